use std::hint::black_box;

use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use interval_avl::{Interval, IntervalTree};

use crate::Lfsr;

const N_LOOKUPS: usize = 1_000;

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("bounds");

    for n_values in [1_000, 10_000] {
        bench_param(&mut g, n_values);
    }
}

/// Position [`N_LOOKUPS`] cursors with `lower_bound()` and `upper_bound()` in
/// a tree of `n_values` random intervals, and count the runs of equal keys
/// in a duplicate-heavy tree of the same size.
fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let mut rand = Lfsr::default();
    let t = (0..n_values)
        .map(|i| (rand.next_interval(), i))
        .collect::<IntervalTree<_, _>>();

    // Search keys drawn after the inserted ones, so almost none are present
    // and each search descends to a leaf.
    let queries = (0..N_LOOKUPS)
        .map(|_| rand.next_interval())
        .collect::<Vec<_>>();

    g.throughput(Throughput::Elements(N_LOOKUPS as _)); // Searches per second
    g.bench_function(BenchmarkId::new("lower_bound", n_values), |b| {
        b.iter(|| {
            let mut at_end = 0;
            for q in &queries {
                at_end += usize::from(t.lower_bound(black_box(q)).is_end());
            }
            at_end
        })
    });

    g.bench_function(BenchmarkId::new("upper_bound", n_values), |b| {
        b.iter(|| {
            let mut at_end = 0;
            for q in &queries {
                at_end += usize::from(t.upper_bound(black_box(q)).is_end());
            }
            at_end
        })
    });

    // 64 keys, each repeated n_values / 64 times.
    let dups = (0..n_values)
        .map(|i| (Interval::new(i as u16 % 64, 64), i))
        .collect::<IntervalTree<_, _>>();

    g.bench_function(BenchmarkId::new("count_duplicates", n_values), |b| {
        b.iter_batched(
            Lfsr::default,
            |mut rand| {
                let mut total = 0;
                for _ in 0..N_LOOKUPS {
                    total += dups.count(&Interval::new(rand.next() % 64, 64));
                }
                assert!(total > 0);
                total
            },
            BatchSize::SmallInput,
        )
    });
}
