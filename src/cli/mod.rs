// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the faceta command-line interface.
//!
//! Two subcommands: `query` runs the constraint engine against a catalog
//! file and prints the alive facet lists, `stats` summarizes the catalog.
//! Mostly useful for poking at a production catalog dump without a UI.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "faceta",
    about = "Fuzzy faceted search over an exam question catalog",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Filter the catalog and show alive facet options
    Query {
        /// Path to the catalog JSON payload
        #[arg(short, long)]
        catalog: String,

        /// Free-text query
        query: Option<String>,

        /// Pin the institution facet
        #[arg(long)]
        institution: Option<String>,

        /// Pin the year facet
        #[arg(long)]
        year: Option<u16>,

        /// Pin the area facet
        #[arg(long)]
        area: Option<String>,

        /// Pin the specialty facet
        #[arg(long)]
        specialty: Option<String>,

        /// Pin the topic facet
        #[arg(long)]
        topic: Option<String>,

        /// How many pooled best matches to show
        #[arg(long, default_value = "3")]
        best: usize,

        /// Maximum options to print per facet
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Print catalog summary statistics
    Stats {
        /// Path to the catalog JSON payload
        #[arg(short, long)]
        catalog: String,
    },
}
