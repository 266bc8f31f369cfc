//! End-to-end tests for the `ls` command.

mod common;
use common::prelude::*;

const MIXED: &str = r#"
pages:
  home: ./src/home.js
  admin: ./src/admin.js
externals:
  common:
    - id: vue
      assets: https://cdn/vue.js
      global: Vue
  pages:
    admin:
      - id: echarts
        assets: [https://cdn/echarts.css, https://cdn/echarts.js]
        global: echarts
      - id: flexible
        assets: https://cdn/flexible.js
"#;

#[test]
fn test_ls_lists_all_scopes() {
    let fixture = TestFixture::new().with_config(MIXED);

    fixture
        .command()
        .arg("ls")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"common\s+vue\s+Vue").unwrap())
        .stdout(predicate::str::is_match(r"admin\s+echarts\s+echarts").unwrap())
        .stdout(predicate::str::is_match(r"admin\s+flexible\s+-").unwrap());
}

#[test]
fn test_ls_page_filter() {
    let fixture = TestFixture::new().with_config(MIXED);

    fixture
        .command()
        .args(["ls", "--page", "home"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vue"))
        .stdout(predicate::str::contains("echarts").not());
}

#[test]
fn test_ls_unknown_page_fails() {
    let fixture = TestFixture::new().with_config(MIXED);

    fixture
        .command()
        .args(["ls", "--page", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown page 'missing'"));
}

#[test]
fn test_ls_long_shows_assets() {
    let fixture = TestFixture::new().with_config(MIXED);

    fixture
        .command()
        .args(["ls", "--long"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://cdn/echarts.css, https://cdn/echarts.js",
        ));
}

#[test]
fn test_ls_count() {
    let fixture = TestFixture::new().with_config(MIXED);

    fixture
        .command()
        .args(["ls", "--count"])
        .assert()
        .success()
        .stdout("3\n");
}
