use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use interval_avl::{Interval, IntervalTree};

use crate::Lfsr;

/// The number of distinct keys in the duplicate-heavy workload.
const DISTINCT_KEYS: u16 = 16;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [100, 1_000, 10_000] {
        bench_unique(&mut g, n_values);
        bench_duplicates(&mut g, n_values);
        bench_churn(&mut g, n_values);
    }
}

/// Fill an empty tree with `n_values` distinct random intervals.
fn bench_unique<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::new("unique", n_values), |b| {
        b.iter_batched(
            || (IntervalTree::new(), Lfsr::default()),
            |(mut t, mut rand)| {
                for i in 0..n_values {
                    t.insert(rand.next_interval(), i);
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Fill an empty tree with `n_values` entries spread over only
/// [`DISTINCT_KEYS`] keys, so most inserts land in a run of equal keys.
fn bench_duplicates<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::new("duplicates", n_values), |b| {
        b.iter_batched(
            || (IntervalTree::new(), Lfsr::default()),
            |(mut t, mut rand)| {
                for i in 0..n_values {
                    let lower = rand.next() % DISTINCT_KEYS;
                    t.insert(Interval::new(lower, lower + 1), i);
                }
                assert_eq!(t.len(), n_values);
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Hold a tree at `n_values` entries, inserting a random interval and
/// removing the smallest entry for each step.
fn bench_churn<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    const STEPS: usize = 1_000;

    let mut rand = Lfsr::default();
    let t = (0..n_values)
        .map(|i| (rand.next_interval(), i))
        .collect::<IntervalTree<_, _>>();

    g.throughput(Throughput::Elements(STEPS as _)); // Insert/remove pairs per second
    g.bench_function(BenchmarkId::new("churn", n_values), |b| {
        b.iter_batched(
            || (t.clone(), rand.clone()),
            |(mut t, mut rand)| {
                for i in 0..STEPS {
                    t.insert(rand.next_interval(), i);
                    assert!(t.cursor_front_mut().remove_current().is_some());
                }
                assert_eq!(t.len(), n_values);
                t
            },
            BatchSize::LargeInput,
        );
    });
}
