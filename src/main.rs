//! dbsection entry point.
//!
//! Loads one or more JSON section files (later files override earlier ones),
//! catalogs their database sections, and prints the resolved connection URLs.
//!
//! ```text
//! dbsection <sections.json>... [-- <name>[@environment]...]
//! ```
//!
//! With no names, every cataloged section is printed.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Request};
use dbsection::{DatabaseLookup, ResolverConfig, Sections};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr (stdout carries the results)
    init_logging();

    let config = ResolverConfig::from_env()?;
    let sections = load_sections(&cli.files)?;
    let lookup = DatabaseLookup::load(&sections, &config)?;

    let requests = requests_or_catalog(&lookup, cli.requests);
    let missing = resolve_requests(&lookup, &requests, &mut std::io::stdout().lock())?;

    if missing > 0 {
        bail!("{} of {} requests could not be resolved", missing, requests.len());
    }
    Ok(())
}

/// The requested names, or every cataloged section when none were given.
fn requests_or_catalog(lookup: &DatabaseLookup<'_>, requests: Vec<Request>) -> Vec<Request> {
    if !requests.is_empty() {
        return requests;
    }
    lookup.catalog().names().keys().map(Request::new).collect()
}

/// Print `name\tsection\turl` for each resolvable request.
///
/// Misses are reported on stderr; returns how many there were.
fn resolve_requests(
    lookup: &DatabaseLookup<'_>,
    requests: &[Request],
    out: &mut impl Write,
) -> Result<usize> {
    let mut missing = 0;
    for request in requests {
        let environment = request.environment.as_deref();
        match lookup.find(&request.name, environment) {
            Some(section) => {
                let url = lookup.section_url(&section)?;
                writeln!(out, "{}\t{}\t{}", request.name, section, url)?;
            }
            None => {
                eprintln!(
                    "No database section for '{}' in environment '{}'",
                    request.name,
                    environment.unwrap_or_else(|| lookup.environment())
                );
                missing += 1;
            }
        }
    }
    Ok(missing)
}

fn load_sections(files: &[PathBuf]) -> Result<Sections> {
    let mut layers = Vec::with_capacity(files.len());
    for path in files {
        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let layer = Sections::from_json_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        layers.push(layer);
    }
    Ok(Sections::from_layers(layers))
}

/// Initialize tracing subscriber with stderr output.
fn init_logging() {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn,dbsection=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
