//! # Ls Command Implementation
//!
//! Lists every resolved external module with the scope it is injected into
//! (`common`, or the page name) and the global it binds.

use anyhow::{bail, Context, Result};
use clap::Args;
use std::path::PathBuf;

use cdn_externals::config;
use cdn_externals::defaults::DEFAULT_CONFIG_FILENAME;
use cdn_externals::resolver::{resolve_project, ModuleSet};

/// List resolved external modules
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Path to the configuration file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CDN_EXTERNALS_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// Only list modules injected into this page (common modules included).
    #[arg(short, long, value_name = "NAME")]
    pub page: Option<String>,

    /// Also list asset locations.
    #[arg(short, long)]
    pub long: bool,

    /// Show only the total count of modules.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let project = config::from_file(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let target = project.build_target();
    let resolution = resolve_project(&project);

    let mut rows: Vec<(&str, &ModuleSet)> = vec![("common", &resolution.common)];
    match &args.page {
        Some(page) => {
            if !target.is_registered(page) {
                bail!("Unknown page '{}'", page);
            }
            if let Some(set) = resolution.page(page) {
                rows.push((page.as_str(), set));
            }
        }
        None => rows.extend(
            resolution
                .pages
                .iter()
                .map(|(name, set)| (name.as_str(), set)),
        ),
    }

    if args.count {
        let total: usize = rows.iter().map(|(_, set)| set.len()).sum();
        println!("{}", total);
        return Ok(());
    }

    for (scope, set) in rows {
        for module in set.values() {
            let global = module.global.as_deref().unwrap_or("-");
            if args.long {
                let assets = module.assets.iter().collect::<Vec<_>>().join(", ");
                println!("{:<10} {:<20} {:<16} {}", scope, module.id, global, assets);
            } else {
                println!("{:<10} {:<20} {}", scope, module.id, global);
            }
        }
    }

    Ok(())
}
