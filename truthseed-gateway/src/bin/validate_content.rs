//! Validates a truths content file against the catalog schema.
//!
//! Run with: cargo run --bin validate-content [-- path/to/truths.json]
//! Without a path, validates the content embedded in the binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use truthseed_verse::{ContentError, TruthCatalog};

#[derive(Parser, Debug)]
#[command(name = "validate-content")]
#[command(about = "Validate a truths content file")]
struct Args {
    /// Content file to validate; defaults to the embedded catalog
    #[arg(env = "CONTENT_PATH")]
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let (source, result) = match &args.path {
        Some(path) => (path.display().to_string(), TruthCatalog::load_path(path)),
        None => ("embedded content".to_string(), TruthCatalog::load_default()),
    };

    println!("Validating {source}...");

    let catalog = match result {
        Ok(catalog) => catalog,
        Err(ContentError::Invalid { violations }) => {
            eprintln!("Validation failed:");
            for violation in &violations {
                eprintln!("  - {violation}");
            }
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error reading or parsing file: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Validation successful!");
    println!();
    println!("Statistics:");
    println!("  Total truths: {}", catalog.len());
    println!("  Categories: {}", catalog.category_count());
    println!("  Total references: {}", catalog.reference_count());

    ExitCode::SUCCESS
}
