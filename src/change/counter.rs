use super::cache::{CacheStats, MemoCache, WaysCache};
use super::denomination::Tier;
use super::error::CountError;
use super::key::MemoKey;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How the recursion treats already-solved subproblems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvaluationMode {
    /// Memoized: each `(amount, tier)` pair is solved once.
    #[default]
    Boosted,
    /// Plain tree recursion. Exponential; kept for contrast.
    Naive,
}

impl EvaluationMode {
    pub fn uses_cache(&self) -> bool {
        matches!(self, EvaluationMode::Boosted)
    }
}

/// Lifetime of the memo table owned by a [`ChangeCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CachePolicy {
    /// Every top-level call starts from an empty table. Isolated and deterministic.
    FreshPerCall,
    /// One table lives as long as the counter, so later calls reuse earlier work.
    #[default]
    SharedAcrossCalls,
}

/// Configuration for a [`ChangeCounter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    pub mode: EvaluationMode,
    pub cache_policy: CachePolicy,
    /// Upper bound on recursive calls in naive mode. Boosted mode ignores it.
    pub max_calls: Option<u64>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            mode: EvaluationMode::Boosted,
            cache_policy: CachePolicy::SharedAcrossCalls,
            max_calls: None,
        }
    }
}

impl CounterConfig {
    pub fn with_mode(mut self, mode: EvaluationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cache_policy(mut self, cache_policy: CachePolicy) -> Self {
        self.cache_policy = cache_policy;
        self
    }

    pub fn with_max_calls(mut self, max_calls: u64) -> Self {
        self.max_calls = Some(max_calls);
        self
    }
}

/// Outcome of a single top-level count, with the work it took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountReport {
    pub amount: i64,
    pub tier: i64,
    pub ways: u64,
    pub calls: u64,
    pub mode: EvaluationMode,
    pub elapsed: Duration,
}

/// Pending work on the evaluation stack.
#[derive(Debug, Clone, Copy)]
enum Step {
    /// Solve `(amount, tier)` and push its way count.
    Solve { amount: i64, tier: Tier },
    /// Pop the "with largest" and "without largest" counts and add them.
    Combine { amount: i64, tier: Tier },
}

/// State of one top-level evaluation.
///
/// The include/exclude recursion runs on a heap-allocated work stack, so deep
/// amounts on the 1-cent tier cannot exhaust the thread stack.
struct Evaluation<'a, C: WaysCache> {
    cache: &'a mut C,
    use_cache: bool,
    max_calls: Option<u64>,
    calls: u64,
    steps: Vec<Step>,
    results: Vec<u64>,
}

impl<'a, C: WaysCache> Evaluation<'a, C> {
    fn new(cache: &'a mut C, use_cache: bool, max_calls: Option<u64>) -> Self {
        Self {
            cache,
            use_cache,
            max_calls: if use_cache { None } else { max_calls },
            calls: 0,
            steps: Vec::new(),
            results: Vec::new(),
        }
    }

    fn ways(&mut self, amount: i64, tier: Tier) -> Result<u64, CountError> {
        self.steps.push(Step::Solve { amount, tier });

        while let Some(step) = self.steps.pop() {
            match step {
                Step::Solve { amount, tier } => self.solve(amount, tier)?,
                Step::Combine { amount, tier } => {
                    let with_largest = self.pop_result();
                    let without_largest = self.pop_result();
                    let ways = without_largest.checked_add(with_largest).ok_or(
                        CountError::Overflow {
                            amount,
                            tier: tier.index(),
                        },
                    )?;
                    self.finish(amount, tier, ways);
                }
            }
        }

        Ok(self.pop_result())
    }

    fn solve(&mut self, amount: i64, tier: Tier) -> Result<(), CountError> {
        self.calls += 1;
        if let Some(limit) = self.max_calls {
            if self.calls > limit {
                return Err(CountError::CallLimitExceeded { limit });
            }
        }

        if self.use_cache {
            if let Some(ways) = self.cache.lookup(MemoKey::new(amount, tier.index())) {
                self.results.push(ways);
                return Ok(());
            }
        }

        // Order matters: (0, 0) must count as zero ways.
        if amount < 0 || tier == Tier::NONE {
            self.finish(amount, tier, 0);
        } else if amount == 0 {
            self.finish(amount, tier, 1);
        } else {
            // Popped last to first: the exclude branch is solved before the include branch.
            self.steps.push(Step::Combine { amount, tier });
            self.steps.push(Step::Solve {
                amount: amount - tier.value(),
                tier,
            });
            self.steps.push(Step::Solve {
                amount,
                tier: tier.lower(),
            });
        }
        Ok(())
    }

    fn finish(&mut self, amount: i64, tier: Tier, ways: u64) {
        if self.use_cache {
            self.cache
                .insert_if_absent(MemoKey::new(amount, tier.index()), ways);
        }
        self.results.push(ways);
    }

    fn pop_result(&mut self) -> u64 {
        // Every Combine sits above the two Solve steps that feed it.
        self.results.pop().unwrap_or_default()
    }
}

fn evaluate<C: WaysCache>(
    amount: i64,
    tier: i64,
    use_cache: bool,
    cache: &mut C,
    max_calls: Option<u64>,
) -> Result<(u64, u64), CountError> {
    let tier = Tier::new(tier)?;
    let mut evaluation = Evaluation::new(cache, use_cache, max_calls);
    let ways = evaluation.ways(amount, tier)?;
    Ok((ways, evaluation.calls))
}

/// Counts the ways to make `amount` from tiers `1..=tier`, against a caller-owned cache.
///
/// With `use_cache` false the cache is neither read nor written. Tiers outside
/// `0..=MAX_TIER` are rejected with [`CountError::TierOutOfRange`].
pub fn count_ways_with<C: WaysCache>(
    amount: i64,
    tier: i64,
    use_cache: bool,
    cache: &mut C,
) -> Result<u64, CountError> {
    evaluate(amount, tier, use_cache, cache, None).map(|(ways, _)| ways)
}

/// Counts the ways to make `amount` from tiers `1..=tier` with a fresh cache.
pub fn count_ways(amount: i64, tier: i64, use_cache: bool) -> Result<u64, CountError> {
    count_ways_with(amount, tier, use_cache, &mut MemoCache::new())
}

/// Caller-owned counter holding its memo table and configuration.
#[derive(Debug, Default)]
pub struct ChangeCounter {
    cache: MemoCache,
    config: CounterConfig,
    last_calls: u64,
}

impl ChangeCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            cache: MemoCache::new(),
            config,
            last_calls: 0,
        }
    }

    /// Counts using the configured evaluation mode.
    pub fn count(&mut self, amount: i64, tier: i64) -> Result<u64, CountError> {
        self.count_with_mode(amount, tier, self.config.mode)
    }

    pub fn count_with_mode(
        &mut self,
        amount: i64,
        tier: i64,
        mode: EvaluationMode,
    ) -> Result<u64, CountError> {
        if self.config.cache_policy == CachePolicy::FreshPerCall && mode.uses_cache() {
            self.cache = MemoCache::new();
        }

        let result = evaluate(
            amount,
            tier,
            mode.uses_cache(),
            &mut self.cache,
            self.config.max_calls,
        );

        match result {
            Ok((ways, calls)) => {
                self.last_calls = calls;
                tracing::debug!(amount, tier, ?mode, ways, calls, "counted ways");
                Ok(ways)
            }
            Err(err) => {
                if let CountError::CallLimitExceeded { limit } = err {
                    tracing::warn!(amount, tier, limit, "naive evaluation hit call limit");
                }
                Err(err)
            }
        }
    }

    /// Counts using the configured mode and reports the work done.
    pub fn count_report(&mut self, amount: i64, tier: i64) -> Result<CountReport, CountError> {
        let start = Instant::now();
        let ways = self.count(amount, tier)?;

        Ok(CountReport {
            amount,
            tier,
            ways,
            calls: self.last_calls,
            mode: self.config.mode,
            elapsed: start.elapsed(),
        })
    }

    /// Recursive calls made by the last successful count.
    pub fn last_call_count(&self) -> u64 {
        self.last_calls
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Empties the memo table.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
