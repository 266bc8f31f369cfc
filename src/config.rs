//! # Configuration Schema and Parsing
//!
//! This module defines the typed records that describe a project's external
//! modules, and the loader that builds them from a configuration file.
//!
//! ## Key Components
//!
//! - **`Module`**: One external module: its identifier, the asset locations to
//!   inject, and the global variable it binds (absent for side-effect-only
//!   modules such as polyfills).
//! - **`Assets`**: The asset locations, written either as a single string or as
//!   an ordered list of strings.
//! - **`Page`**: A build page with its entry point and optional output
//!   filename. A page's options may also carry its own `externals` list,
//!   which the loader folds into `ExternalsConfig::pages`.
//! - **`BuildTarget`**: The page registry for one build. A project without
//!   pages is a single-page build; otherwise it is a multi-page build.
//! - **`ExternalsConfig`** / **`ProjectConfig`**: The whole file.
//!
//! ## Parsing
//!
//! The loader reads the document into a generic `serde_yaml::Value` first and
//! validates it by hand. Deserializing straight into the records would lose
//! track of *where* a bad entry lives; walking the value keeps a location
//! string such as `externals.pages.page1[0].assets` that every
//! `Error::Configuration` carries.
//!
//! JSON documents are valid YAML and go through the same path. TOML documents
//! are converted to a YAML value first.
//!
//! Page-scoped modules can be declared in two places: under the page's own
//! options (`pages.<name>.externals`) and under `externals.pages.<name>`.
//! The two lists are concatenated, page options first, so on a duplicate id
//! the `externals.pages` declaration wins.
//!
//! Page options and top-level keys are shared with the host build, so keys
//! the loader does not know there are skipped. Modules and the `externals`
//! section are checked strictly.

use crate::defaults;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::path::Path;

const MODULE_KEYS: &[&str] = &["id", "assets", "global"];
const EXTERNALS_KEYS: &[&str] = &["common", "pages"];

/// Asset locations of a module, in injection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Assets {
    /// A single URL or path.
    Single(String),
    /// Several URLs or paths (for example a stylesheet and a script).
    Multiple(Vec<String>),
}

impl Assets {
    /// Iterate over every location, in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Assets::Single(location) => std::slice::from_ref(location),
            Assets::Multiple(locations) => locations,
        };
        slice.iter().map(String::as_str)
    }

    /// Number of asset locations.
    pub fn len(&self) -> usize {
        match self {
            Assets::Single(_) => 1,
            Assets::Multiple(locations) => locations.len(),
        }
    }

    /// True only for an empty `Multiple` list, which the loader never produces.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Assets {
    fn from(location: &str) -> Self {
        Assets::Single(location.to_string())
    }
}

impl From<Vec<&str>> for Assets {
    fn from(locations: Vec<&str>) -> Self {
        Assets::Multiple(locations.into_iter().map(str::to_string).collect())
    }
}

/// An external module declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    /// The import specifier the bundler should leave alone (e.g. `jquery`).
    pub id: String,
    /// Where the module's files live.
    pub assets: Assets,
    /// The global variable that holds the module at runtime.
    ///
    /// `None` marks a module that is only imported for its side effects.
    pub global: Option<String>,
}

impl Module {
    /// Create a module that binds a global variable.
    pub fn new(id: impl Into<String>, assets: impl Into<Assets>, global: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            assets: assets.into(),
            global: Some(global.into()),
        }
    }

    /// Create a side-effect-only module (no bound global).
    pub fn side_effect(id: impl Into<String>, assets: impl Into<Assets>) -> Self {
        Self {
            id: id.into(),
            assets: assets.into(),
            global: None,
        }
    }
}

/// A page of a multi-page build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Entry point of the page bundle.
    pub entry: String,
    /// Generated HTML filename; defaults to `<page>.html`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Page {
    /// Create a page with the default output filename.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            filename: None,
        }
    }

    /// Set an explicit output filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// The HTML file this page is written to.
    pub fn output_filename(&self, page_name: &str) -> String {
        self.filename
            .clone()
            .unwrap_or_else(|| defaults::page_filename(page_name))
    }
}

/// The set of pages a build produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildTarget {
    /// No pages configured: one implicit page, page-scoped externals do not apply.
    SinglePage,
    /// One or more named pages, in registration order.
    MultiPage(IndexMap<String, Page>),
}

impl BuildTarget {
    /// Build the target from a page map. An empty map is a single-page build.
    pub fn from_pages(pages: IndexMap<String, Page>) -> Self {
        if pages.is_empty() {
            BuildTarget::SinglePage
        } else {
            BuildTarget::MultiPage(pages)
        }
    }

    pub fn is_single_page(&self) -> bool {
        matches!(self, BuildTarget::SinglePage)
    }

    /// Whether `name` is a page of this build.
    pub fn is_registered(&self, name: &str) -> bool {
        self.page(name).is_some()
    }

    pub fn page(&self, name: &str) -> Option<&Page> {
        match self {
            BuildTarget::SinglePage => None,
            BuildTarget::MultiPage(pages) => pages.get(name),
        }
    }

    /// Registered page names, in registration order.
    pub fn page_names(&self) -> impl Iterator<Item = &str> {
        let pages = match self {
            BuildTarget::SinglePage => None,
            BuildTarget::MultiPage(pages) => Some(pages),
        };
        pages.into_iter().flat_map(|p| p.keys().map(String::as_str))
    }
}

/// The `externals` section: common modules plus page-scoped lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalsConfig {
    /// Modules injected into every page.
    pub common: Vec<Module>,
    /// Modules injected into one page only, keyed by page name.
    pub pages: IndexMap<String, Vec<Module>>,
}

/// A whole configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectConfig {
    /// Build pages. Empty for a single-page build.
    pub pages: IndexMap<String, Page>,
    /// External module declarations.
    pub externals: ExternalsConfig,
}

impl ProjectConfig {
    /// The page registry this configuration describes.
    pub fn build_target(&self) -> BuildTarget {
        BuildTarget::from_pages(self.pages.clone())
    }
}

/// Parses a YAML (or JSON) string into a `ProjectConfig`.
///
/// An empty document is a valid configuration with no pages and no externals.
///
/// # Examples
///
/// ```
/// use cdn_externals::config;
///
/// let project = config::parse(r#"
/// externals:
///   common:
///     - id: jquery
///       assets: https://unpkg.com/jquery@3.2.1/dist/jquery.min.js
///       global: $
/// "#).unwrap();
/// assert_eq!(project.externals.common.len(), 1);
/// assert!(project.build_target().is_single_page());
/// ```
pub fn parse(content: &str) -> Result<ProjectConfig> {
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    let value: Value = serde_yaml::from_str(content)?;
    from_value(&value)
}

/// Parses a TOML string into a `ProjectConfig`.
pub fn parse_toml(content: &str) -> Result<ProjectConfig> {
    let toml_value: toml::Value = toml::from_str(content)?;
    let value = serde_yaml::to_value(toml_value)?;
    from_value(&value)
}

/// Load a `ProjectConfig` from a file, choosing the parser by extension.
///
/// `.toml` files are read as TOML; everything else as YAML, which also covers
/// JSON.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => parse_toml(&content),
        _ => parse(&content),
    }
}

/// Validate a generic document value into a `ProjectConfig`.
pub fn from_value(value: &Value) -> Result<ProjectConfig> {
    let root = match value {
        Value::Null => return Ok(ProjectConfig::default()),
        Value::Mapping(map) => map,
        _ => {
            return Err(Error::config(
                "<root>",
                "expected a mapping with 'pages' and/or 'externals'",
            ))
        }
    };

    // Other top-level keys belong to the host build configuration.
    let (pages, mut page_lists) = match root.get("pages") {
        None | Some(Value::Null) => (IndexMap::new(), IndexMap::new()),
        Some(value) => parse_pages(value)?,
    };
    let externals = match root.get("externals") {
        None | Some(Value::Null) => ExternalsConfig::default(),
        Some(value) => parse_externals(value)?,
    };

    for (name, modules) in externals.pages {
        page_lists.entry(name).or_default().extend(modules);
    }

    Ok(ProjectConfig {
        pages,
        externals: ExternalsConfig {
            common: externals.common,
            pages: page_lists,
        },
    })
}

type PageLists = IndexMap<String, Vec<Module>>;

fn parse_pages(value: &Value) -> Result<(IndexMap<String, Page>, PageLists)> {
    let map = value
        .as_mapping()
        .ok_or_else(|| Error::config("pages", "expected a mapping of page name to page options"))?;

    let mut pages = IndexMap::with_capacity(map.len());
    let mut page_lists = IndexMap::new();
    for (key, page_value) in map {
        let name = mapping_key(key, "pages")?;
        let location = format!("pages.{}", name);
        let page = match page_value {
            Value::String(entry) => Page::new(entry.clone()),
            Value::Mapping(options) => {
                let page = parse_page_options(options, &location)?;
                let modules = match options.get("externals") {
                    None => Vec::new(),
                    Some(list) => parse_module_list(list, &format!("{}.externals", location))?,
                };
                if !modules.is_empty() {
                    page_lists.insert(name.clone(), modules);
                }
                page
            }
            _ => {
                return Err(Error::config_with_hint(
                    location,
                    "expected an entry string or a mapping",
                    "Write 'page: ./src/page.js' or 'page: { entry: ./src/page.js, filename: page.html }'",
                ))
            }
        };
        pages.insert(name, page);
    }
    Ok((pages, page_lists))
}

fn parse_page_options(options: &Mapping, location: &str) -> Result<Page> {
    for key in options.keys() {
        let name = mapping_key(key, location)?;
        if !matches!(name.as_str(), "entry" | "filename" | "externals") {
            debug!("{}: skipping host page option '{}'", location, name);
        }
    }

    let entry = match options.get("entry") {
        Some(Value::String(entry)) => entry.clone(),
        Some(_) => {
            return Err(Error::config(
                format!("{}.entry", location),
                "'entry' must be a string",
            ))
        }
        None => return Err(Error::config(location, "page is missing 'entry'")),
    };
    let filename = match options.get("filename") {
        None | Some(Value::Null) => None,
        Some(Value::String(filename)) => Some(filename.clone()),
        Some(_) => {
            return Err(Error::config(
                format!("{}.filename", location),
                "'filename' must be a string",
            ))
        }
    };

    Ok(Page { entry, filename })
}

fn parse_externals(value: &Value) -> Result<ExternalsConfig> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::config("externals", "expected a mapping with 'common' and/or 'pages'")
    })?;
    reject_unknown_keys(map, EXTERNALS_KEYS, "externals")?;

    let common = match map.get("common") {
        None => Vec::new(),
        Some(list) => parse_module_list(list, "externals.common")?,
    };

    let mut pages = IndexMap::new();
    match map.get("pages") {
        None | Some(Value::Null) => {}
        Some(Value::Mapping(page_lists)) => {
            for (key, list) in page_lists {
                let name = mapping_key(key, "externals.pages")?;
                let modules = parse_module_list(list, &format!("externals.pages.{}", name))?;
                pages.insert(name, modules);
            }
        }
        Some(_) => {
            return Err(Error::config(
                "externals.pages",
                "expected a mapping of page name to module list",
            ))
        }
    }

    Ok(ExternalsConfig { common, pages })
}

fn parse_module_list(value: &Value, location: &str) -> Result<Vec<Module>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(idx, item)| parse_module(item, &format!("{}[{}]", location, idx)))
            .collect(),
        _ => Err(Error::config(location, "expected a sequence of modules")),
    }
}

fn parse_module(value: &Value, location: &str) -> Result<Module> {
    let map = value.as_mapping().ok_or_else(|| {
        Error::config_with_hint(
            location,
            "expected a module mapping",
            "A module looks like '{ id: jquery, assets: https://cdn/jquery.js, global: $ }'",
        )
    })?;
    reject_unknown_keys(map, MODULE_KEYS, location)?;

    let id = match map.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::String(_)) => {
            return Err(Error::config(format!("{}.id", location), "'id' must not be empty"))
        }
        Some(_) => return Err(Error::config(format!("{}.id", location), "'id' must be a string")),
        None => return Err(Error::config(location, "module is missing 'id'")),
    };

    let assets_location = format!("{}.assets", location);
    let assets = match map.get("assets") {
        Some(value) => parse_assets(value, &assets_location)?,
        None => {
            return Err(Error::config(
                location,
                format!("module '{}' is missing 'assets'", id),
            ))
        }
    };

    let global = match map.get("global") {
        None | Some(Value::Null) => None,
        Some(Value::String(global)) => Some(global.clone()),
        Some(_) => {
            return Err(Error::config(
                format!("{}.global", location),
                "'global' must be a string or null",
            ))
        }
    };

    Ok(Module { id, assets, global })
}

fn parse_assets(value: &Value, location: &str) -> Result<Assets> {
    let invalid = || {
        Error::config_with_hint(
            location,
            "expected a string or a sequence of strings",
            "Write 'assets: https://cdn/x.js' or 'assets: [https://cdn/x.css, https://cdn/x.js]'",
        )
    };

    match value {
        Value::String(location_str) if !location_str.is_empty() => {
            Ok(Assets::Single(location_str.clone()))
        }
        Value::Sequence(items) if !items.is_empty() => items
            .iter()
            .map(|item| match item {
                Value::String(s) if !s.is_empty() => Ok(s.clone()),
                _ => Err(invalid()),
            })
            .collect::<Result<Vec<_>>>()
            .map(Assets::Multiple),
        _ => Err(invalid()),
    }
}

/// Page names and option keys are strings in the host build, so unquoted
/// scalars such as `404:` or `true:` are read back as their text.
fn mapping_key(key: &Value, location: &str) -> Result<String> {
    match key {
        Value::String(name) => Ok(name.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(Error::config(
            location,
            format!("keys must be strings, found {:?}", key),
        )),
    }
}

fn reject_unknown_keys(map: &Mapping, allowed: &[&str], location: &str) -> Result<()> {
    for key in map.keys() {
        let name = mapping_key(key, location)?;
        if !allowed.contains(&name.as_str()) {
            return Err(Error::config_with_hint(
                location,
                format!("unknown key '{}'", name),
                format!("Allowed keys are: {}", allowed.join(", ")),
            ));
        }
    }
    Ok(())
}
