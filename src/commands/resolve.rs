//! # Resolve Command Implementation
//!
//! Loads the configuration, resolves common and page-scoped modules, and
//! prints the result.
//!
//! By default the plan itself is printed: the externals mapping plus the
//! injection directives. With `--chain` the plan is first applied to an
//! in-memory plugin registry and the resulting build configuration (plugin
//! name → options, externals) is printed instead.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::info;
use std::path::PathBuf;

use cdn_externals::config;
use cdn_externals::defaults::DEFAULT_CONFIG_FILENAME;
use cdn_externals::output::Format;
use cdn_externals::plan::plan_project;
use cdn_externals::registry::{self, ChainConfig};

/// Output formats accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Yaml => Format::Yaml,
        }
    }
}

/// Resolve the configuration and print the externals plan
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the configuration file (YAML, JSON or TOML).
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CDN_EXTERNALS_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Print the build configuration after registering the plan's plugins.
    #[arg(long)]
    pub chain: bool,

    /// Write the output to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Execute the `resolve` command.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let project = config::from_file(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;
    let plan = plan_project(&project);
    if plan.is_empty() {
        info!("No external modules configured");
    }

    let format: Format = args.format.into();
    let rendered = if args.chain {
        let mut chain = ChainConfig::new();
        registry::apply(&plan, &mut chain);
        format.render(&chain)?
    } else {
        format.render(&plan)?
    };

    match args.output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}
