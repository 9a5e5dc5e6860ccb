use std::collections::HashSet;

use interval_avl::{Interval, IntervalTree};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn unit_intervals() -> IntervalTree<i32, String> {
    (0..7).map(|i| ((i, i + 1), format!("value{i}"))).collect()
}

fn entry(t: &IntervalTree<i32, String>, lower: i32) -> Option<(Interval<i32>, &str)> {
    t.find(&Interval::new(lower, lower + 1))
        .get()
        .map(|(k, v)| (*k, v.as_str()))
}

#[test]
fn test_single_insert() {
    let mut t = IntervalTree::new();
    t.insert((0, 1), "value0");

    assert_eq!(t.len(), 1);
    assert!(!t.is_empty());

    let mut c = t.cursor_front();
    assert_eq!(c.get(), Some((&Interval::new(0, 1), &"value0")));

    c.move_next();
    assert_eq!(c, t.cursor_end());
}

#[test]
fn test_insert_order_independent() {
    let keys = [(-1, 1), (-2, 0), (0, 2)];
    let want = [
        Interval::new(-2, 0),
        Interval::new(-1, 1),
        Interval::new(0, 2),
    ];

    // Every permutation of the three keys.
    for order in [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ] {
        let mut t = IntervalTree::new();
        for i in order {
            t.insert(keys[i], i);
        }

        let got = t.iter().map(|(k, _)| *k).collect::<Vec<_>>();
        assert_eq!(got, want, "insertion order {order:?}");

        let got = t.iter().rev().map(|(k, _)| *k).collect::<Vec<_>>();
        assert!(got.iter().rev().eq(want.iter()));
    }
}

#[test]
fn test_delete_leaf() {
    let mut t = unit_intervals();

    let mut c = t.cursor_front_mut();
    let removed = c.remove_current();
    assert_eq!(removed, Some((Interval::new(0, 1), "value0".to_string())));
    assert_eq!(c.key(), Some(&Interval::new(1, 2)));
    assert_eq!(c.value().map(String::as_str), Some("value1"));

    t.assert_valid();
    assert_eq!(t.len(), 6);
    assert_eq!(t.first().map(|(k, _)| *k), Some(Interval::new(1, 2)));
}

#[test]
fn test_delete_middle() {
    let mut t = unit_intervals();

    let mut c = t.cursor_front_mut();
    c.move_next();
    assert!(c.remove_current().is_some());
    assert_eq!(c.key(), Some(&Interval::new(2, 3)));
    assert_eq!(c.value().map(String::as_str), Some("value2"));

    t.assert_valid();
    assert_eq!(t.len(), 6);
    assert_eq!(entry(&t, 1), None);
}

#[test]
fn test_delete_root() {
    let mut t = unit_intervals();

    let mut c = t.cursor_front_mut();
    c.move_next();
    c.move_next();
    c.move_next();
    assert_eq!(c.key(), Some(&Interval::new(3, 4)));

    assert!(c.remove_current().is_some());
    assert_eq!(c.key(), Some(&Interval::new(4, 5)));
    assert_eq!(c.value().map(String::as_str), Some("value4"));

    t.assert_valid();
    assert_eq!(t.len(), 6);
    assert_eq!(entry(&t, 4), Some((Interval::new(4, 5), "value4")));

    let got = t.iter().map(|(k, _)| *k.lower()).collect::<Vec<_>>();
    assert_eq!(got, [0, 1, 2, 4, 5, 6]);
}

#[test]
fn test_balanced_after_monotonic_inserts() {
    let t = unit_intervals();
    t.assert_valid();

    let mut ascending = IntervalTree::new();
    let mut descending = IntervalTree::new();
    for i in 0..1_000 {
        ascending.insert((i, i + 10), i);
        descending.insert((1_000 - i, 1_010 - i), i);
        if i % 100 == 0 {
            ascending.assert_valid();
            descending.assert_valid();
        }
    }
    ascending.assert_valid();
    descending.assert_valid();

    // Draining from the front rotates every level again.
    let mut c = ascending.cursor_front_mut();
    for _ in 0..500 {
        assert!(c.remove_current().is_some());
    }
    ascending.assert_valid();
    assert_eq!(ascending.first().map(|(_, v)| *v), Some(500));
}

#[test]
fn test_delete_range() {
    let mut t = unit_intervals();

    // Removes [1, 2] through [3, 4], stopping at [4, 5].
    let c = t.remove_range(&Interval::new(1, 2), &Interval::new(4, 5));
    assert_eq!(c.key(), Some(&Interval::new(4, 5)));
    assert_eq!(c.value().map(String::as_str), Some("value4"));
    t.assert_valid();

    let got = t.iter().map(|(k, _)| *k.lower()).collect::<Vec<_>>();
    assert_eq!(got, [0, 4, 5, 6]);

    let c = t.remove_range(&Interval::new(0, 1), &Interval::new(7, 8));
    assert!(c.is_end());
    assert!(t.is_empty());
    t.assert_valid();
}

#[test]
fn test_clear() {
    let mut t = unit_intervals();
    t.clear();

    assert!(t.is_empty());
    assert_eq!(t.len(), 0);
    assert_eq!(t.cursor_front(), t.cursor_end());
    assert_eq!(t.iter().next(), None);
}

#[test]
fn test_point_query_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut t = IntervalTree::new();
    let mut all = Vec::with_capacity(10_000);
    for i in 0..10_000 {
        let a = rng.gen_range(0..1_000);
        let b = rng.gen_range(0..1_000);
        let key = Interval::new(a.min(b), a.max(b));
        t.insert(key, i);
        all.push((key, i));
    }

    let got = t.at(250).map(|(k, v)| (*k, *v)).collect::<Vec<_>>();

    // Ascending key order.
    for w in got.windows(2) {
        assert!(w[0].0 <= w[1].0);
    }

    let got = got.into_iter().collect::<HashSet<_>>();
    let want = all
        .iter()
        .filter(|(k, _)| *k.lower() <= 250 && 250 <= *k.upper())
        .copied()
        .collect::<HashSet<_>>();

    assert!(!want.is_empty());
    assert_eq!(got, want);
}

#[test]
fn test_interval_query_matches_brute_force() {
    let mut rng = StdRng::seed_from_u64(1);

    let all = (0..2_000)
        .map(|i| {
            let a = rng.gen_range(-500..500_i64);
            (Interval::new(a, a + rng.gen_range(0..50)), i)
        })
        .collect::<Vec<_>>();
    let t = all.iter().copied().collect::<IntervalTree<_, _>>();

    for _ in 0..100 {
        let lower = rng.gen_range(-600..600_i64);
        let query = Interval::new(lower, lower + rng.gen_range(0..100));

        let got = t
            .overlapping(query)
            .map(|(k, v)| (*k, *v))
            .collect::<HashSet<_>>();
        let want = all
            .iter()
            .filter(|(k, _)| k.overlaps(&query))
            .copied()
            .collect::<HashSet<_>>();

        assert_eq!(got, want, "query {query}");
    }
}

#[test]
fn test_ordering_with_random_deletes() {
    let mut rng = StdRng::seed_from_u64(0);

    let mut t = IntervalTree::new();
    for i in 0..100 {
        t.insert((rng.gen::<u32>(), rng.gen::<u32>()), i);
    }

    for _ in 0..10 {
        let skip = rng.gen_range(0..t.len());
        let mut c = t.cursor_front_mut();
        for _ in 0..skip {
            c.move_next();
        }
        assert!(c.remove_current().is_some());
    }
    assert_eq!(t.len(), 90);
    t.assert_valid();

    let keys = t.iter().map(|(k, _)| *k).collect::<Vec<_>>();
    assert_eq!(keys.len(), t.len());
    for w in keys.windows(2) {
        assert!(w[0] <= w[1]);
    }

    let rev = t.iter().rev().map(|(k, _)| *k).collect::<Vec<_>>();
    assert!(rev.iter().rev().eq(keys.iter()));
}

#[test]
fn test_insert_then_erase_round_trip() {
    let mut t = IntervalTree::from([((1, 2), 'a'), ((1, 2), 'b'), ((3, 4), 'c')]);
    let key = Interval::new(1, 2);

    let before = t.len();
    let mut c = t.insert(key, 'x');
    assert!(c.remove_current().is_some());
    assert_eq!(t.len(), before);

    // An entry sharing the key is still present.
    let found = t.find(&key);
    assert_eq!(found.key(), Some(&key));

    assert_eq!(t.remove_all(&key), 2);
    assert!(t.find(&key).is_end());
    assert_eq!(t.len(), 1);
}

#[test]
fn test_copy_independence() {
    let t = unit_intervals();

    let mut copy = t.clone();
    copy.cursor_front_mut().remove_current();

    assert_eq!(t.len(), 7);
    assert_eq!(copy.len(), 6);
    assert_eq!(entry(&t, 0), Some((Interval::new(0, 1), "value0")));
    assert_eq!(entry(&copy, 0), None);
    assert!(copy > t);
}

#[test]
fn test_sink_extension() {
    let t = IntervalTree::from([((0, 10), 1), ((5, 15), 2), ((20, 30), 3)]);

    let mut sink = vec![(Interval::new(-1, -1), 0)];
    sink.extend(t.at(7).map(|(k, v)| (*k, *v)));
    sink.extend(t.overlapping((25, 40)).map(|(k, v)| (*k, *v)));

    assert_eq!(
        sink,
        [
            (Interval::new(-1, -1), 0),
            (Interval::new(0, 10), 1),
            (Interval::new(5, 15), 2),
            (Interval::new(20, 30), 3),
        ]
    );
}
