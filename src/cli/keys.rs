//! Keys command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{load_all, SourceArgs};

#[derive(Args)]
pub struct KeysArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Name prefix to match
    #[arg(short, long, value_name = "PREFIX", default_value = "")]
    pub prefix: String,
}

pub fn run(args: KeysArgs) -> Result<()> {
    let registry = load_all(&args.source)?;

    let mut keys = registry.get_keys_by_string(&args.prefix);
    keys.sort();
    for key in keys {
        println!("{}", key);
    }

    Ok(())
}
