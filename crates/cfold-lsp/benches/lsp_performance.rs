//! LSP Performance Baseline Benchmarks
//!
//! Thresholds:
//! - Folding ranges for a 5,000 line document: <100ms
//! - Settings intake (TOML or JSON): <1ms

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cfold_core::{FoldingAnalyzer, ScanConfig, Scanner, Settings};
use cfold_lsp::protocol::to_lsp_range;
use serde_json::json;
use std::time::Duration;

/// Generate a C++ document with `count` member functions
fn generate_document(count: usize) -> String {
    let mut content = String::from("namespace app {\n\nclass Service\n{\npublic:\n");
    for i in 0..count {
        content.push_str(&format!(
            r#"    /**
     * Operation {i}
     */
    int op{i}(int a, int b)
    {{
        if (a > b)
        {{
            return a - b; // {i}
        }}
        return b - a;
    }}

"#
        ));
    }
    content.push_str("};\n\n} // namespace app\n");
    content
}

/// Benchmark the folding request path: scan, assemble, convert
fn bench_folding_request(c: &mut Criterion) {
    let mut group = c.benchmark_group("folding_request");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    let config = Settings::default().scan_config();

    for count in [50, 400] {
        let document = generate_document(count);
        group.bench_with_input(BenchmarkId::new("functions", count), &document, |b, document| {
            b.iter(|| {
                let repo = Scanner::new(config).scan_text(black_box(document));
                let ranges: Vec<_> = FoldingAnalyzer::generate_ranges(&repo, &config)
                    .iter()
                    .map(to_lsp_range)
                    .collect();
                black_box(ranges)
            });
        });
    }

    group.finish();
}

/// Benchmark settings and configuration
fn bench_configuration(c: &mut Criterion) {
    let mut group = c.benchmark_group("configuration");
    group.warm_up_time(Duration::from_millis(100));
    group.measurement_time(Duration::from_secs(1));

    let sample_toml = r#"
maxRanges = 1000

[namespace]
enable = true

[withinFunction]
enable = true
minLines = 2

[preprocessor]
enable = true
recursiveDepth = 2
"#;

    let sample_json = json!({
        "cfold": {
            "class": { "enable": true },
            "preprocessor": { "enable": true, "ignoreGuard": false },
            "language": { "csharp": false }
        }
    });

    group.bench_function("parse_toml", |b| {
        b.iter(|| {
            let settings = Settings::from_toml_str(black_box(sample_toml)).unwrap();
            black_box(settings.scan_config())
        });
    });

    group.bench_function("parse_json", |b| {
        b.iter(|| {
            let settings = Settings::from_json(black_box(&sample_json)).unwrap();
            black_box(settings.scan_config())
        });
    });

    group.bench_function("all_enabled_profile", |b| {
        b.iter(|| black_box(ScanConfig::all_enabled()));
    });

    group.finish();
}

criterion_group!(benches, bench_folding_request, bench_configuration);
criterion_main!(benches);
