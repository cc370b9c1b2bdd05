//! Get command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{load_all, SourceArgs};
use conf_registry::config::OptionKind;

#[derive(Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Option name
    #[arg(short, long, value_name = "NAME")]
    pub name: String,

    /// Type to read the value as
    #[arg(short = 't', long = "type", value_name = "TYPE", default_value = "string")]
    pub kind: OptionKind,

    /// Value to use when the option is missing or invalid
    #[arg(short, long, value_name = "VALUE")]
    pub default: Option<String>,

    /// Do not log missing or invalid values
    #[arg(short, long)]
    pub quiet: bool,
}

pub fn run(args: GetArgs) -> Result<()> {
    let default = match &args.default {
        Some(raw) => match args.kind.parse(raw) {
            Some(value) => value,
            None => anyhow::bail!("Invalid default '{}' for type {:?}", raw, args.kind),
        },
        None => args.kind.zero(),
    };

    let registry = load_all(&args.source)?;
    let value = registry.get_typed(&args.name, args.kind, default, !args.quiet);
    println!("{}", value);

    Ok(())
}
