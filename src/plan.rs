//! # Externals Plan
//!
//! Turns a [`Resolution`] into what the build pipeline consumes:
//!
//! - **Externals mapping**: module id → global variable name (or `None` for a
//!   module that is only imported for its side effects). The bundler leaves
//!   these imports alone and resolves them from the global at runtime.
//! - **Injection directives**: which assets to insert into which generated HTML
//!   files. Common modules produce one directive covering every output file;
//!   each page with exclusive modules produces one directive restricted to
//!   that page's HTML file.
//!
//! An empty resolution produces an empty plan: no mapping and no directives.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{Assets, BuildTarget, ProjectConfig};
use crate::defaults;
use crate::resolver::{self, ModuleSet, Resolution};

/// Module id → global variable name.
pub type ExternalsMapping = IndexMap<String, Option<String>>;

/// One module inside an injection directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalEntry {
    /// Module id.
    pub module: String,
    /// Asset locations, as configured.
    pub entry: Assets,
    /// Global variable name, `null` when the module binds none.
    pub global: Option<String>,
}

/// Insert these modules' assets into these HTML files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionDirective {
    /// Plugin name the directive is registered under.
    pub name: String,
    /// Modules to inject, in order.
    pub modules: Vec<ExternalEntry>,
    /// Target HTML files; `None` means every generated file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

impl InjectionDirective {
    fn from_set(name: String, modules: &ModuleSet, files: Option<Vec<String>>) -> Self {
        let modules = modules
            .values()
            .map(|module| ExternalEntry {
                module: module.id.clone(),
                entry: module.assets.clone(),
                global: module.global.clone(),
            })
            .collect();
        Self {
            name,
            modules,
            files,
        }
    }

    /// Whether this directive applies to every output file.
    pub fn targets_all_files(&self) -> bool {
        self.files.is_none()
    }
}

/// Everything a build needs to externalize and inject CDN modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalsPlan {
    /// Bundler externals; `None` when there is nothing to externalize.
    pub externals: Option<ExternalsMapping>,
    /// HTML injection directives, common first, then pages in registration order.
    pub injections: Vec<InjectionDirective>,
}

impl ExternalsPlan {
    /// Apply the emission rules to a resolution.
    pub fn from_resolution(resolution: &Resolution, target: &BuildTarget) -> Self {
        if resolution.is_empty() {
            return Self::default();
        }

        let mut injections = Vec::with_capacity(resolution.pages.len() + 1);
        if !resolution.common.is_empty() {
            injections.push(InjectionDirective::from_set(
                defaults::COMMON_PLUGIN_NAME.to_string(),
                &resolution.common,
                None,
            ));
        }
        for (page_name, modules) in &resolution.pages {
            let filename = target
                .page(page_name)
                .map(|page| page.output_filename(page_name))
                .unwrap_or_else(|| defaults::page_filename(page_name));
            injections.push(InjectionDirective::from_set(
                defaults::page_plugin_name(page_name),
                modules,
                Some(vec![filename]),
            ));
        }

        let externals = resolution
            .merged
            .iter()
            .map(|(id, module)| (id.clone(), module.global.clone()))
            .collect();

        Self {
            externals: Some(externals),
            injections,
        }
    }

    /// True when the build should not be touched at all.
    pub fn is_empty(&self) -> bool {
        self.externals.is_none() && self.injections.is_empty()
    }

    /// Look up a directive by plugin name.
    pub fn injection(&self, name: &str) -> Option<&InjectionDirective> {
        self.injections.iter().find(|d| d.name == name)
    }

    /// Externals that bind a global, skipping side-effect-only modules.
    ///
    /// Some bundlers have no way to express "external without a global"; this
    /// is the mapping to hand them.
    pub fn bound_globals(&self) -> impl Iterator<Item = (&str, &str)> {
        self.externals.iter().flat_map(|mapping| {
            mapping
                .iter()
                .filter_map(|(id, global)| global.as_deref().map(|g| (id.as_str(), g)))
        })
    }
}

/// Resolve a project and build its plan in one step.
pub fn plan_project(project: &ProjectConfig) -> ExternalsPlan {
    let target = project.build_target();
    let resolution = resolver::resolve(
        &project.externals.common,
        &project.externals.pages,
        &target,
    );
    ExternalsPlan::from_resolution(&resolution, &target)
}
