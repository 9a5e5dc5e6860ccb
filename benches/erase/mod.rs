use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use interval_avl::IntervalTree;

use crate::Lfsr;

#[derive(Debug, Clone, Copy)]
struct BenchName {
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new("n_values", v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("erase");

    for n_values in [100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

/// Measure the time needed to remove every one of `n_values` randomly
/// generated keys from a tree, in insertion order.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let mut t = IntervalTree::new();
    let mut keys = Vec::with_capacity(n_values);

    for _i in 0..n_values {
        let key = rand.next_interval();
        t.insert(key, 42_usize);
        keys.push(key);
    }

    let bench_name = BenchName { n_values };
    g.throughput(Throughput::Elements(n_values as _)); // Keys removed per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                for key in &keys {
                    assert_eq!(t.remove_all(key), 1);
                }
                t
            },
            BatchSize::LargeInput,
        );
    });
}
