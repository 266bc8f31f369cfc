//! # Module Resolution
//!
//! This module merges the common module list with the page-scoped lists of a
//! build and decides which page gets which module.
//!
//! ## Process
//!
//! 1.  **Common Set**: Every module of the common list is keyed by its id, in
//!     configuration order. A later entry with the same id replaces the
//!     earlier one but keeps its position.
//!
//! 2.  **Page Sets**: For every registered page (in registration order) that
//!     has a page-scoped list, each module whose id is already in the common
//!     set is dropped; the common declaration always wins. The survivors form
//!     the page's exclusive set.
//!
//! 3.  **Merged Map**: The common set plus every surviving page-scoped module.
//!     This is what the bundler externals mapping is built from.
//!
//! 4.  **Pruning**: Pages whose exclusive set ends up empty are left out, so
//!     no injection is produced for them.
//!
//! Lists for pages that are not part of the build are ignored with a warning.
//! In a single-page build every page-scoped list is ignored.
//!
//! `resolve` is pure: it reads its inputs and returns fresh maps.

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::config::{BuildTarget, Module, ProjectConfig};

/// Modules keyed by id, in insertion order.
pub type ModuleSet = IndexMap<String, Module>;

/// A page-scoped module that was dropped because a common module has the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shadowed {
    /// Page that declared the module.
    pub page: String,
    /// Id shared with the common module.
    pub id: String,
}

/// The outcome of resolving one build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Modules for every page.
    pub common: ModuleSet,
    /// Modules exclusive to a page. Only pages with at least one module appear.
    pub pages: IndexMap<String, ModuleSet>,
    /// Every resolved module exactly once; used for the externals mapping.
    pub merged: ModuleSet,
    /// Page-scoped modules dropped in favour of a common module.
    pub shadowed: Vec<Shadowed>,
    /// Pages with a page-scoped list that are not part of the build.
    pub ignored_pages: Vec<String>,
}

impl Resolution {
    /// True when there is nothing to externalize or inject.
    pub fn is_empty(&self) -> bool {
        self.common.is_empty() && self.pages.is_empty()
    }

    /// Exclusive modules of `page`, if it has any.
    pub fn page(&self, page: &str) -> Option<&ModuleSet> {
        self.pages.get(page)
    }
}

/// Resolve common and page-scoped modules for a build.
///
/// # Examples
///
/// ```
/// use cdn_externals::config::{BuildTarget, Module, Page};
/// use cdn_externals::resolver::resolve;
/// use indexmap::IndexMap;
///
/// let common = vec![Module::new("module", "common.js", "module")];
/// let mut pages = IndexMap::new();
/// pages.insert("page1".to_string(), vec![Module::new("module", "private.js", "module")]);
/// let mut registry = IndexMap::new();
/// registry.insert("page1".to_string(), Page::new("./src/page1.js"));
///
/// let resolution = resolve(&common, &pages, &BuildTarget::from_pages(registry));
/// assert!(resolution.pages.is_empty());
/// assert_eq!(resolution.merged["module"].assets.iter().next(), Some("common.js"));
/// ```
pub fn resolve(
    common: &[Module],
    pages: &IndexMap<String, Vec<Module>>,
    target: &BuildTarget,
) -> Resolution {
    let common_set = collect_set(common);

    let ignored_pages: Vec<String> = pages
        .keys()
        .filter(|name| !target.is_registered(name))
        .cloned()
        .collect();
    if !ignored_pages.is_empty() {
        if target.is_single_page() {
            warn!(
                "Single-page build: ignoring page-scoped externals for {}",
                ignored_pages.join(", ")
            );
        } else {
            warn!(
                "Ignoring page-scoped externals for pages that are not part of the build: {}",
                ignored_pages.join(", ")
            );
        }
    }

    let mut merged = common_set.clone();
    let mut page_sets = IndexMap::new();
    let mut shadowed = Vec::new();

    for name in target.page_names() {
        let Some(modules) = pages.get(name) else {
            continue;
        };

        let mut page_set = ModuleSet::new();
        for module in modules {
            if common_set.contains_key(&module.id) {
                debug!(
                    "{}: '{}' is already a common module, dropping the page-scoped declaration",
                    name, module.id
                );
                shadowed.push(Shadowed {
                    page: name.to_string(),
                    id: module.id.clone(),
                });
            } else {
                page_set.insert(module.id.clone(), module.clone());
            }
        }

        if page_set.is_empty() {
            debug!("{}: no exclusive external modules", name);
            continue;
        }

        merged.extend(page_set.iter().map(|(id, m)| (id.clone(), m.clone())));
        page_sets.insert(name.to_string(), page_set);
    }

    debug!(
        "Resolved {} common, {} page-scoped pages, {} modules total",
        common_set.len(),
        page_sets.len(),
        merged.len()
    );

    Resolution {
        common: common_set,
        pages: page_sets,
        merged,
        shadowed,
        ignored_pages,
    }
}

/// Resolve the externals of a loaded project configuration.
pub fn resolve_project(project: &ProjectConfig) -> Resolution {
    resolve(
        &project.externals.common,
        &project.externals.pages,
        &project.build_target(),
    )
}

fn collect_set(modules: &[Module]) -> ModuleSet {
    modules.iter().fold(ModuleSet::new(), |mut set, module| {
        set.insert(module.id.clone(), module.clone());
        set
    })
}
