//! Benchmarks for configuration parsing and module resolution.
//!
//! Generated configurations scale the number of pages and the number of
//! modules per list, with every third page-scoped module colliding with a
//! common module.

use cdn_externals::config;
use cdn_externals::plan::ExternalsPlan;
use cdn_externals::resolver::resolve_project;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// A typical two-page configuration.
const SMALL_CONFIG: &str = r#"
pages:
  page1: ./src/page1.js
  page2: ./src/page2.js
externals:
  common:
    - id: vue
      assets: https://unpkg.com/vue@2.6.14/dist/vue.min.js
      global: Vue
  pages:
    page1:
      - id: echarts
        assets: https://unpkg.com/echarts@5/dist/echarts.min.js
        global: echarts
    page2:
      - id: swiper
        assets: [https://unpkg.com/swiper/swiper.css, https://unpkg.com/swiper/swiper.js]
        global: Swiper
"#;

fn generate_config(num_pages: usize, modules_per_list: usize) -> String {
    let mut config = String::from("pages:\n");
    for p in 0..num_pages {
        config.push_str(&format!("  page{}: ./src/page{}.js\n", p, p));
    }

    config.push_str("externals:\n  common:\n");
    for m in 0..modules_per_list {
        config.push_str(&format!(
            "    - id: common{}\n      assets: https://cdn/common{}.js\n      global: Common{}\n",
            m, m, m
        ));
    }

    config.push_str("  pages:\n");
    for p in 0..num_pages {
        config.push_str(&format!("    page{}:\n", p));
        for m in 0..modules_per_list {
            let id = if m % 3 == 0 {
                format!("common{}", m)
            } else {
                format!("page{}mod{}", p, m)
            };
            config.push_str(&format!(
                "      - id: {}\n        assets: [https://cdn/{}.css, https://cdn/{}.js]\n",
                id, id, id
            ));
        }
    }

    config
}

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("config_parsing");

    group.bench_function("small", |b| {
        b.iter(|| config::parse(black_box(SMALL_CONFIG)))
    });

    for num_pages in [5, 20, 50] {
        let config = generate_config(num_pages, 10);
        group.bench_with_input(
            BenchmarkId::new("pages", num_pages),
            &config,
            |b, config| b.iter(|| config::parse(black_box(config))),
        );
    }

    group.finish();
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");

    for num_pages in [5, 20, 50] {
        let project = config::parse(&generate_config(num_pages, 10)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("pages", num_pages),
            &project,
            |b, project| {
                b.iter(|| {
                    let target = project.build_target();
                    let resolution = resolve_project(black_box(project));
                    ExternalsPlan::from_resolution(&resolution, &target)
                })
            },
        );
    }

    for modules in [5, 20, 100] {
        let project = config::parse(&generate_config(10, modules)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("modules", modules),
            &project,
            |b, project| b.iter(|| resolve_project(black_box(project))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_resolution);
criterion_main!(benches);
