//! # Validate Command Implementation
//!
//! This module implements the `validate` subcommand, which checks a
//! configuration file without printing a plan.
//!
//! ## Functionality
//!
//! - **Structure**: Every module and page entry is validated; the first
//!   malformed entry is reported with its location.
//! - **Summary**: Counts of pages, common modules and page-scoped modules.
//! - **Warnings**: Page-scoped lists that will never be used (single-page
//!   build, or a page that is not part of the build) and page-scoped modules
//!   shadowed by a common module with the same id.
//!
//! With `--strict`, warnings fail the command.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use cdn_externals::config;
use cdn_externals::defaults::DEFAULT_CONFIG_FILENAME;
use cdn_externals::output::{OutputConfig, Status};
use cdn_externals::resolver::resolve_project;

/// Validate a configuration file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "CDN_EXTERNALS_CONFIG",
        default_value = DEFAULT_CONFIG_FILENAME
    )]
    pub config: PathBuf,

    /// Use strict validation (fail on warnings).
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: ValidateArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let config_path = &args.config;
    println!(
        "{} Validating configuration: {}",
        out.marker(Status::Scan),
        config_path.display()
    );

    let project = match config::from_file(config_path) {
        Ok(project) => {
            println!("{} Configuration parsed successfully", out.marker(Status::Ok));
            project
        }
        Err(e) => {
            println!("{} {}", out.marker(Status::Error), e);
            return Err(anyhow::anyhow!("Configuration validation failed: {}", e));
        }
    };

    let target = project.build_target();
    let page_scoped: usize = project.externals.pages.values().map(Vec::len).sum();

    println!("\n{} Configuration Summary:", out.marker(Status::Info));
    if target.is_single_page() {
        println!("   Build: single page");
    } else {
        println!("   Build: {} pages", project.pages.len());
    }
    println!("   Common modules: {}", project.externals.common.len());
    println!("   Page-scoped modules: {}", page_scoped);

    let resolution = resolve_project(&project);
    let mut warnings = 0usize;

    for page in &resolution.ignored_pages {
        let reason = if target.is_single_page() {
            "this is a single-page build"
        } else {
            "it is not one of the build's pages"
        };
        println!(
            "{} Page-scoped externals for '{}' are ignored: {}",
            out.marker(Status::Warn),
            page,
            reason
        );
        warnings += 1;
    }

    for shadowed in &resolution.shadowed {
        println!(
            "{} '{}' on page '{}' is shadowed by the common module with the same id",
            out.marker(Status::Warn),
            shadowed.id,
            shadowed.page
        );
        warnings += 1;
    }

    println!("\n{} Resolution:", out.marker(Status::Info));
    println!("   Externals: {}", resolution.merged.len());
    println!(
        "   Pages with exclusive modules: {}",
        resolution.pages.len()
    );

    if warnings > 0 && args.strict {
        println!(
            "\n{} Configuration has {} warning(s) (strict mode enabled)",
            out.marker(Status::Error),
            warnings
        );
        return Err(anyhow::anyhow!(
            "Configuration validation failed in strict mode"
        ));
    }

    if warnings > 0 {
        println!(
            "\n{} Configuration is valid but has {} warning(s)",
            out.marker(Status::Warn),
            warnings
        );
    } else {
        println!("\n{} Configuration is valid", out.marker(Status::Ok));
    }

    if resolution.is_empty() {
        println!(
            "{} No external modules configured; the build will be left untouched",
            out.marker(Status::Tip)
        );
    }

    Ok(())
}
