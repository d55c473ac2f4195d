//! Clipper CSV CLI
//!
//! Reads a Clipper transaction history PDF and writes its transactions as
//! CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- statement.pdf > transactions.csv
//! cargo run -- statement.pdf transactions.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use clipper_csv::{parse_document, ExtractError, Result};
use log::info;
use std::env;
use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(ExtractError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let table = parse_document(BufReader::new(file))?;
    info!(
        "{}: card {}, {} transactions",
        input_path,
        table.account_number(),
        table.transactions().len()
    );

    match args.get(2) {
        Some(output_path) => {
            let output = File::create(output_path)?;
            table.write_csv(BufWriter::new(output))?;
        }
        None => {
            let stdout = io::stdout();
            let handle = stdout.lock();
            table.write_csv(handle)?;
        }
    }

    Ok(())
}
