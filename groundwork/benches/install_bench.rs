//! Benchmarks for install pipeline execution.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use groundwork::pipeline::{InstallPlanBuilder, NoOpAction};
use std::sync::Arc;

fn install_benchmark(c: &mut Criterion) {
    c.bench_function("install_32_noop_actions", |b| {
        b.iter(|| {
            let mut builder = InstallPlanBuilder::new("bench");
            for key in 0..32 {
                builder = builder
                    .action(key, Arc::new(NoOpAction::new(format!("noop-{key}"))))
                    .unwrap();
            }
            let mut pipeline = builder.build().unwrap();
            black_box(pipeline.install())
        })
    });
}

criterion_group!(benches, install_benchmark);
criterion_main!(benches);
