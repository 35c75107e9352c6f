// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use faceta::{compute_alive_options, Catalog, CatalogPayload, Selection};

mod cli;
use cli::{display, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query {
            catalog,
            query,
            institution,
            year,
            area,
            specialty,
            topic,
            best,
            limit,
        } => run_query(
            &catalog,
            query.as_deref().unwrap_or(""),
            Selection {
                institution,
                year,
                area,
                specialty,
                topic,
            },
            best,
            limit,
        ),
        Commands::Stats { catalog } => run_stats(&catalog),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

fn load_catalog(path: &str) -> Result<Catalog, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("reading {}: {}", path, e))?;
    let payload: CatalogPayload =
        serde_json::from_str(&raw).map_err(|e| format!("parsing {}: {}", path, e))?;
    Catalog::from_payload(payload).map_err(|e| e.to_string())
}

fn run_query(
    path: &str,
    query: &str,
    selection: Selection,
    best: usize,
    limit: usize,
) -> Result<(), String> {
    let catalog = load_catalog(path)?;
    let view = compute_alive_options(&catalog, &selection, query);
    display::print_view(&view, query, best, limit);
    Ok(())
}

fn run_stats(path: &str) -> Result<(), String> {
    let catalog = load_catalog(path)?;
    let stats = catalog.stats();
    println!("combinations:        {}", catalog.len());
    println!("total questions:     {}", stats.total_questions);
    println!("unique institutions: {}", stats.unique_institutions);
    println!("unique areas:        {}", stats.unique_areas);
    println!("searchable terms:    {}", catalog.searchable_terms().len());
    Ok(())
}
