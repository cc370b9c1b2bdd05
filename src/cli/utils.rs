//! Shared CLI utilities.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use conf_registry::config::{ConfigRegistry, DIST_SUFFIX};

/// Where the option table is loaded from.
#[derive(Args)]
pub struct SourceArgs {
    /// Option files: the first replaces the table, the rest are layered on top
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Load `<PRIMARY>.dist` as the application config instead of FILEs
    #[arg(long, value_name = "PRIMARY", conflicts_with = "files")]
    pub app: Option<String>,
}

/// Outcome of loading one source file.
pub struct LoadReport {
    pub source: String,
    pub loaded: bool,
}

/// Load every source into `registry`, in order.
pub fn load_sources(args: &SourceArgs, registry: &ConfigRegistry) -> Result<Vec<LoadReport>> {
    if let Some(primary) = &args.app {
        registry.configure(primary.as_str());
        let loaded = registry.load_app_configs();
        return Ok(vec![LoadReport { source: format!("{primary}{DIST_SUFFIX}"), loaded }]);
    }

    let Some((first, rest)) = args.files.split_first() else {
        anyhow::bail!("No option files given; pass FILE... or --app <PRIMARY>");
    };

    let mut reports = Vec::with_capacity(args.files.len());
    reports.push(LoadReport {
        source: first.display().to_string(),
        loaded: registry.load_initial(first),
    });
    for file in rest {
        reports.push(LoadReport {
            source: file.display().to_string(),
            loaded: registry.load_additional_file(file),
        });
    }

    Ok(reports)
}

/// Load every source, failing on the first one that did not load.
pub fn load_all(args: &SourceArgs) -> Result<ConfigRegistry> {
    let registry = ConfigRegistry::new();
    for report in load_sources(args, &registry)? {
        if !report.loaded {
            anyhow::bail!("Failed to load option file: {}", report.source);
        }
    }
    Ok(registry)
}
