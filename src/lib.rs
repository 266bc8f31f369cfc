//! # CDN Externals Library
//!
//! This library merges "external module" declarations (libraries loaded from a
//! CDN instead of being bundled) for single-page and multi-page builds. It
//! produces the bundler externals mapping and the list of HTML injections a
//! build needs. It is used by the `cdn-externals` command-line tool and can be
//! embedded in any build tool that wants the same resolution rules.
//!
//! ## Quick Example
//!
//! ```
//! use cdn_externals::config;
//! use cdn_externals::plan::plan_project;
//!
//! let project = config::parse(r#"
//! pages:
//!   page1: ./src/page1.js
//!   page2: ./src/page2.js
//! externals:
//!   common:
//!     - id: vue
//!       assets: https://unpkg.com/vue@2.6.14/dist/vue.min.js
//!       global: Vue
//!   pages:
//!     page1:
//!       - id: echarts
//!         assets: https://unpkg.com/echarts@5/dist/echarts.min.js
//!         global: echarts
//! "#).unwrap();
//!
//! let plan = plan_project(&project);
//! assert_eq!(plan.injections.len(), 2);
//! assert_eq!(plan.injections[1].files, Some(vec!["page1.html".to_string()]));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`)**: Typed records for modules, pages and the
//!   configuration file, plus the validating loader.
//! - **Resolution (`resolver`)**: The merge of common and page-scoped modules.
//!   A common module always wins over a page-scoped module with the same id.
//! - **Plan (`plan`)**: The externals mapping and injection directives derived
//!   from a resolution.
//! - **Registry (`registry`)**: The seam to a host build pipeline's plugin
//!   system, with an in-memory implementation.
//!
//! ## Execution Flow
//!
//! 1.  **Load**: Parse and validate the configuration file.
//! 2.  **Resolve**: Build the common set, the per-page exclusive sets and the
//!     merged map.
//! 3.  **Plan**: Derive the externals mapping and the injection directives.
//! 4.  **Apply**: Hand the plan to a `PluginRegistry`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod output;
pub mod plan;
pub mod registry;
pub mod resolver;

#[cfg(test)]
mod resolver_proptest;
