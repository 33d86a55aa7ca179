use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{PaginationConfig, create_sales_service, load_catalog, replace_catalog};

/// A utility for loading a sale catalog JSON file into the dashboard's database.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. Created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// File path to a JSON array of catalog entries.
    #[arg(long, short)]
    input: String,
}

/// Replace the contents of a database with a catalog file.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let input_path = Path::new(&args.input);

    if !input_path.is_file() {
        eprintln!("No catalog file at {input_path:#?}!");
        exit(1);
    }

    let raw_records = load_catalog(input_path)?;

    println!("Loading {} catalog entries into {}", raw_records.len(), args.db_path);
    let conn = Connection::open(&args.db_path)?;
    let sales = create_sales_service(conn, PaginationConfig::default())?;

    let summary = replace_catalog(&sales, raw_records)?;

    println!(
        "Success! {} records inserted, {} skipped.",
        summary.inserted, summary.skipped
    );

    Ok(())
}
