//! Change counting: denomination table, memo cache and the recursive counter.

pub mod cache;
pub mod counter;
pub mod denomination;
pub mod error;
pub mod key;

pub use cache::{CacheStats, MemoCache, SharedMemoCache, WaysCache};
pub use counter::{
    count_ways, count_ways_with, CachePolicy, ChangeCounter, CountReport, CounterConfig,
    EvaluationMode,
};
pub use denomination::{value_of_tier, Tier, DENOMINATIONS, MAX_TIER};
pub use error::CountError;
pub use key::MemoKey;
