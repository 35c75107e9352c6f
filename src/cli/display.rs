// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the faceta CLI.
//!
//! Query-word hits inside labels are emphasized via the highlight splitter,
//! bold on a TTY and plain markers in pipelines. Respects `NO_COLOR`.

use faceta::{best_matches, highlighted_parts, AliveOption, DerivedView, Facet};

const BOLD: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// Should output use ANSI escapes?
pub fn use_color() -> bool {
    atty::is(atty::Stream::Stdout) && std::env::var_os("NO_COLOR").is_none()
}

/// A label with query hits emphasized.
pub fn render_label(label: &str, query: &str, color: bool) -> String {
    let mut out = String::new();
    for part in highlighted_parts(label, query) {
        if part.highlighted {
            if color {
                out.push_str(BOLD);
                out.push_str(&part.text);
                out.push_str(RESET);
            } else {
                out.push('[');
                out.push_str(&part.text);
                out.push(']');
            }
        } else {
            out.push_str(&part.text);
        }
    }
    out
}

fn print_facet(name: &str, options: &[AliveOption], query: &str, limit: usize, color: bool) {
    if options.is_empty() {
        return;
    }
    println!("{}:", name);
    for option in options.iter().take(limit) {
        let label = render_label(&option.value, query, color);
        if option.score > 0 {
            println!("  {:>6}  {}  (score {})", option.count, label, option.score);
        } else {
            println!("  {:>6}  {}", option.count, label);
        }
    }
    if options.len() > limit {
        println!("  ... and {} more", options.len() - limit);
    }
}

pub fn print_view(view: &DerivedView, query: &str, best: usize, limit: usize) {
    let color = use_color();

    if best > 0 {
        let pooled = best_matches(view, best);
        if !pooled.is_empty() {
            println!("Best matches:");
            for m in &pooled {
                println!(
                    "  {}  {}  ({} questions, score {})",
                    facet_name(m.facet),
                    render_label(&m.value, query, color),
                    m.count,
                    m.score
                );
            }
            println!();
        }
    }

    print_facet("Institutions", &view.institutions, query, limit, color);
    if !view.years.is_empty() {
        println!("Years:");
        for y in view.years.iter().take(limit) {
            println!("  {:>6}  {}", y.count, y.year);
        }
    }
    print_facet("Areas", &view.areas, query, limit, color);
    print_facet("Specialties", &view.specialties, query, limit, color);
    print_facet("Topics", &view.topics, query, limit, color);

    println!();
    println!("{} questions match", view.total_count);
}

pub fn facet_name(facet: Facet) -> &'static str {
    match facet {
        Facet::Institution => "institution",
        Facet::Year => "year",
        Facet::Area => "area",
        Facet::Specialty => "specialty",
        Facet::Topic => "topic",
    }
}
