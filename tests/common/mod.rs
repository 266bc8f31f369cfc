//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_config(configs::MULTI_PAGE);
//! fixture.command().arg("resolve").assert().success();
//! ```

use assert_cmd::Command;
use assert_fs::prelude::*;
use std::path::Path;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::configs;
    pub use super::TestFixture;
}

/// Configuration snippets for testing.
#[allow(dead_code)]
pub mod configs {
    /// Single-page build with one common module.
    pub const SINGLE_PAGE: &str = r#"
externals:
  common:
    - id: jQuery
      assets: https://unpkg.com/jquery@3.2.1/dist/jquery.min.js
      global: $
"#;

    /// Two pages, each with one page-scoped module, no common modules.
    pub const MULTI_PAGE: &str = r#"
pages:
  page1: ./src/page1.js
  page2: ./src/page2.js
externals:
  pages:
    page1:
      - id: cdnModule1
        assets:
          - //pkg.cdn.com/cdnModule1.css
          - //pkg.cdn.com/cdnModule1.js
        global: cdnModule1
    page2:
      - id: cdnModule2
        assets: [//pkg.cdn.com/cdnModule2.js]
        global: cdnModule2
"#;

    /// A page-scoped module shadowed by a common module.
    pub const SHADOWED: &str = r#"
pages:
  page1: ./src/page1.js
  page2: ./src/page2.js
externals:
  common:
    - id: module
      assets: //pkg.cdn.com/common/module.js
      global: module
  pages:
    page1:
      - id: module
        assets: //pkg.cdn.com/private/module.js
        global: module
"#;

    /// A module entry without an id.
    pub const MISSING_ID: &str = r#"
externals:
  common:
    - assets: https://cdn/a.js
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "externals: [unclosed";

    /// No externals at all.
    pub const EMPTY: &str = "# nothing configured\n{}\n";
}

/// A temporary directory with an optional `.externals.yaml`.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a `.externals.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".externals.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// A `cdn-externals` command running inside the fixture, with colors off
    /// and no config override from the environment.
    pub fn command(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("cdn-externals");
        cmd.current_dir(self.path())
            .env_remove("CDN_EXTERNALS_CONFIG")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
