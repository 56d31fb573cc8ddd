use serde::{Deserialize, Serialize};

/// Identifies one subproblem: ways to make `amount` from tiers `1..=tier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoKey {
    amount: i64, // cents left to form, may be negative on overshoot
    tier: i64,
}

impl MemoKey {
    pub fn new(amount: i64, tier: i64) -> Self {
        Self { amount, tier }
    }
}
