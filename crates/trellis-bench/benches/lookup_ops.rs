//! Criterion benchmarks for lookups, ledger snapshots and a full step.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use trellis_bench::{document_ids, reference_document};
use trellis_core::AssignmentError;
use trellis_engine::{SteerContext, SteeringConfig, SteeringLoop, Steppable};
use trellis_index::{IndexConfig, IndexLookupService};
use trellis_test_utils::NullUpdater;

fn ready_service() -> (IndexLookupService, Vec<String>) {
    let doc = reference_document();
    let mut service = IndexLookupService::new(IndexConfig::default()).unwrap();
    service.build(&doc);
    let ids: Vec<String> = service.ids().take(1_000).map(str::to_string).collect();
    (service, ids)
}

/// Benchmark: 1000 hits followed by a ledger reset.
fn bench_get_hits(c: &mut Criterion) {
    let (mut service, ids) = ready_service();
    c.bench_function("get_1000_hits", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(service.get(id));
            }
            service.reset();
        })
    });
}

/// Benchmark: 1000 misses. Misses are never recorded.
fn bench_get_misses(c: &mut Criterion) {
    let (mut service, _) = ready_service();
    let misses: Vec<String> = (0..1_000).map(|i| format!("absent_{i}")).collect();
    c.bench_function("get_1000_misses", |b| {
        b.iter(|| {
            for id in &misses {
                black_box(service.get(id));
            }
        })
    });
}

/// Benchmark: snapshot of a 1000-entry ledger.
fn bench_recently_accessed(c: &mut Criterion) {
    let (mut service, ids) = ready_service();
    for id in &ids {
        service.get(id);
    }
    c.bench_function("recently_accessed_1000", |b| {
        b.iter(|| black_box(service.recently_accessed().len()))
    });
}

/// Writes the step number into a fixed set of identifiers.
struct Sweep {
    ids: Vec<String>,
}

impl Steppable for Sweep {
    fn name(&self) -> &str {
        "sweep"
    }

    fn step(&mut self, ctx: &mut SteerContext<'_>) -> Result<(), AssignmentError> {
        let step = ctx.step().0;
        for id in &self.ids {
            ctx.set_content(id, step)?;
        }
        Ok(())
    }
}

/// Benchmark: one steering step writing 100 identifiers.
fn bench_steering_step(c: &mut Criterion) {
    let doc = reference_document();
    let ids: Vec<String> = document_ids(&doc).into_iter().take(100).collect();
    let mut sim = SteeringLoop::new(SteeringConfig::default(), doc, NullUpdater).unwrap();
    sim.add_steppable(Box::new(Sweep { ids }));
    c.bench_function("steering_step_100_writes", |b| {
        b.iter(|| black_box(sim.step().unwrap().modules_updated))
    });
}

criterion_group!(
    benches,
    bench_get_hits,
    bench_get_misses,
    bench_recently_accessed,
    bench_steering_step
);
criterion_main!(benches);
