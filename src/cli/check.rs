//! Check command implementation

use anyhow::Result;
use clap::Args;

use super::utils::{load_sources, SourceArgs};
use conf_registry::config::ConfigRegistry;

#[derive(Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

pub fn run(args: CheckArgs) -> Result<()> {
    let registry = ConfigRegistry::new();
    let reports = load_sources(&args.source, &registry)?;

    for report in &reports {
        println!("{}: {}", report.source, if report.loaded { "ok" } else { "failed" });
    }
    println!("Options loaded: {}", registry.len());

    let failed = reports.iter().filter(|r| !r.loaded).count();
    if failed > 0 {
        anyhow::bail!("{} of {} option files failed to load", failed, reports.len());
    }

    Ok(())
}
