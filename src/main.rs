//! conf-registry: inspect and query `key = value` option files
//!
//! Loads one or more option files the same way a server process would at
//! startup and prints the merged table or individual typed lookups.

use anyhow::Result;

mod cli;

fn main() -> Result<()> {
    cli::run()
}
