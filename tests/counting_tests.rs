use coinways::{
    count_ways, count_ways_with, CachePolicy, ChangeCounter, CounterConfig, EvaluationMode,
    MemoCache, SharedMemoCache, WaysCache, MAX_TIER,
};
use proptest::prelude::*;
use std::sync::Arc;
use std::thread;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn test_reference_values() {
    init_tracing();
    let cases = [
        (0, 5, 1),
        (1, 5, 1),
        (5, 5, 2),
        (11, 2, 3),
        (15, 2, 4),
        (26, 3, 12),
        (100, 4, 242),
        (100, 5, 243),
        (391, 5, 14870),
        (1000, 5, 438966),
        (5000, 5, 220635826),
    ];

    for (amount, tier, expected) in cases {
        assert_eq!(
            count_ways(amount, tier, true),
            Ok(expected),
            "amount {amount}, tier {tier}"
        );
    }
}

#[test]
fn test_shared_cache_matches_fresh_cache() {
    let mut shared = MemoCache::new();
    let amounts = [391, 17, 250, 100, 0, 999, 391];

    for amount in amounts {
        for tier in 0..=MAX_TIER {
            let reused = count_ways_with(amount, tier, true, &mut shared).unwrap();
            let fresh = count_ways(amount, tier, true).unwrap();
            assert_eq!(reused, fresh, "amount {amount}, tier {tier}");
        }
    }
    assert!(shared.stats().hits > 0);
}

#[test]
fn test_counter_policies_agree() {
    init_tracing();
    let mut shared = ChangeCounter::default();
    let mut fresh =
        ChangeCounter::new(CounterConfig::default().with_cache_policy(CachePolicy::FreshPerCall));

    for amount in [40, 391, 40, 120] {
        assert_eq!(shared.count(amount, 5), fresh.count(amount, 5));
    }
}

#[test]
fn test_concurrent_shared_cache() {
    let cache = Arc::new(SharedMemoCache::new());

    let handles: Vec<_> = [250, 391, 500, 391]
        .into_iter()
        .map(|amount| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut handle = &*cache;
                (amount, count_ways_with(amount, 5, true, &mut handle).unwrap())
            })
        })
        .collect();

    for h in handles {
        let (amount, ways) = h.join().unwrap();
        assert_eq!(Ok(ways), count_ways(amount, 5, true));
    }
    assert!(cache.len() > 0);
    assert_eq!(cache.stats().inserts, cache.len() as u64);
}

#[test]
fn test_amounts_beyond_a_few_thousand() {
    assert_eq!(count_ways(5000, 5, true), Ok(220_635_826));

    let mut counter = ChangeCounter::default();
    assert!(counter.count(20_000, 5).is_ok());
    assert_eq!(counter.count(5000, 5), Ok(220_635_826));
}

#[test]
fn test_naive_mode_without_limit() {
    let mut counter =
        ChangeCounter::new(CounterConfig::default().with_mode(EvaluationMode::Naive));
    assert_eq!(counter.count(100, 5), Ok(243));

    let report = counter.count_report(100, 5).unwrap();
    assert_eq!(report.calls, counter.last_call_count());
    assert_eq!(counter.cache_stats().entries, 0);
}

proptest! {
    #[test]
    fn zero_amount_has_one_way(tier in 1..=MAX_TIER, boosted in any::<bool>()) {
        prop_assert_eq!(count_ways(0, tier, boosted), Ok(1));
    }

    #[test]
    fn negative_amount_has_no_ways(amount in -10_000i64..0, tier in 0..=MAX_TIER, boosted in any::<bool>()) {
        prop_assert_eq!(count_ways(amount, tier, boosted), Ok(0));
    }

    #[test]
    fn no_tiers_means_no_ways(amount in 0i64..10_000, boosted in any::<bool>()) {
        prop_assert_eq!(count_ways(amount, 0, boosted), Ok(0));
    }

    #[test]
    fn boosted_agrees_with_naive(amount in -5i64..120, tier in 0..=MAX_TIER) {
        prop_assert_eq!(count_ways(amount, tier, true), count_ways(amount, tier, false));
    }

    #[test]
    fn adding_a_tier_never_loses_ways(amount in 0i64..2_000, tier in 1..=MAX_TIER) {
        let mut cache = MemoCache::new();
        let with_tier = count_ways_with(amount, tier, true, &mut cache).unwrap();
        let without_tier = count_ways_with(amount, tier - 1, true, &mut cache).unwrap();
        prop_assert!(with_tier >= without_tier);
    }

    #[test]
    fn single_coin_tier_has_one_way(amount in 1i64..2_000) {
        prop_assert_eq!(count_ways(amount, 1, true), Ok(1));
    }
}
