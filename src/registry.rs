//! # Plugin Registry Adapter
//!
//! The resolver and the plan are plain data. Getting them into a host build
//! pipeline means calling into that pipeline's plugin registry: register one
//! HTML-injection plugin per directive and merge the externals mapping into
//! the bundler configuration.
//!
//! [`PluginRegistry`] is that seam. [`apply`] drives it from a plan, and
//! [`ChainConfig`] is an in-memory registry that records what was registered,
//! used by the CLI to print the resulting build configuration and by tests.

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::plan::{ExternalsMapping, ExternalsPlan, InjectionDirective};

/// The parts of a host build pipeline a plan needs to touch.
pub trait PluginRegistry {
    /// Register (or replace) the injection plugin called `name`.
    fn use_plugin(&mut self, name: &str, directive: &InjectionDirective);

    /// Merge `externals` into the bundler's externals configuration.
    fn set_externals(&mut self, externals: &ExternalsMapping);
}

/// Register everything in `plan` with `registry`.
///
/// An empty plan leaves the registry untouched.
pub fn apply<R: PluginRegistry + ?Sized>(plan: &ExternalsPlan, registry: &mut R) {
    if plan.is_empty() {
        debug!("No external modules configured, leaving the build configuration untouched");
        return;
    }

    for directive in &plan.injections {
        debug!(
            "Registering {} ({} modules)",
            directive.name,
            directive.modules.len()
        );
        registry.use_plugin(&directive.name, directive);
    }
    if let Some(externals) = &plan.externals {
        registry.set_externals(externals);
    }
}

/// Injection plugin options as registered in a [`ChainConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginOptions {
    /// Modules to inject.
    pub externals: Vec<crate::plan::ExternalEntry>,
    /// Target files; absent means all generated files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
}

/// A recording, chainable build configuration.
///
/// Plugins keep their registration order; registering a name twice replaces
/// the earlier options in place. Externals accumulate across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChainConfig {
    plugins: IndexMap<String, PluginOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    externals: Option<ExternalsMapping>,
}

impl ChainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.contains_key(name)
    }

    /// Options of the plugin registered as `name`.
    pub fn plugin(&self, name: &str) -> Option<&PluginOptions> {
        self.plugins.get(name)
    }

    /// Registered plugin names, in registration order.
    pub fn plugin_names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn externals(&self) -> Option<&ExternalsMapping> {
        self.externals.as_ref()
    }

    /// True when nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty() && self.externals.is_none()
    }
}

impl PluginRegistry for ChainConfig {
    fn use_plugin(&mut self, name: &str, directive: &InjectionDirective) {
        self.plugins.insert(
            name.to_string(),
            PluginOptions {
                externals: directive.modules.clone(),
                files: directive.files.clone(),
            },
        );
    }

    fn set_externals(&mut self, externals: &ExternalsMapping) {
        self.externals
            .get_or_insert_with(IndexMap::new)
            .extend(externals.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}
