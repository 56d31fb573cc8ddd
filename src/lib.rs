//! Counts the ways to make change for an amount of cents from a fixed set of
//! coin denominations (1, 5, 10, 25, 100), with unlimited coins of each kind.
//!
//! The count follows the classic include/exclude decomposition: every way of
//! making `amount` from tiers `1..=k` either uses no coin of tier `k`, or uses
//! at least one of them. Evaluation is either memoized ("boosted") against a
//! caller-owned cache, or plain tree recursion ("naive").

pub mod change;

pub use change::{
    count_ways, count_ways_with, value_of_tier, CachePolicy, CacheStats, ChangeCounter,
    CountError, CountReport, CounterConfig, EvaluationMode, MemoCache, MemoKey, SharedMemoCache,
    Tier, WaysCache, MAX_TIER,
};
