//! Dump command implementation

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use super::utils::{load_all, SourceArgs};

#[derive(Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// Only print options whose name starts with this prefix
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn run(args: DumpArgs) -> Result<()> {
    let registry = load_all(&args.source)?;

    let mut options = registry.snapshot();
    if let Some(prefix) = &args.prefix {
        options.retain(|name, _| name.starts_with(prefix.as_str()));
    }

    match args.format {
        OutputFormat::Text => {
            for (name, value) in &options {
                println!("{} = {}", name, value);
            }
        }
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&options).context("Failed to serialize options")?;
            println!("{}", json);
        }
    }

    Ok(())
}
