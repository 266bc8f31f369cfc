//! Default values and naming rules shared across the library and commands.

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".externals.yaml";

/// Plugin name used for the directive that covers every output page.
pub const COMMON_PLUGIN_NAME: &str = "externals-modules";

/// Returns the HTML filename a page is written to when none is configured.
///
/// # Examples
///
/// ```
/// use cdn_externals::defaults::page_filename;
///
/// assert_eq!(page_filename("admin"), "admin.html");
/// ```
pub fn page_filename(page_name: &str) -> String {
    format!("{}.html", page_name)
}

/// Returns the plugin name for a page-scoped injection directive.
pub fn page_plugin_name(page_name: &str) -> String {
    format!("{}-{}", page_name, COMMON_PLUGIN_NAME)
}
