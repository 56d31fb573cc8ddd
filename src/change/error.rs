use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    #[error("Tier {tier} is outside the supported range 0..={max}")]
    TierOutOfRange { tier: i64, max: i64 },
    #[error("Naive evaluation exceeded the call limit of {limit}")]
    CallLimitExceeded { limit: u64 },
    #[error("Way count overflowed u64 at amount {amount}, tier {tier}")]
    Overflow { amount: i64, tier: i64 },
}
