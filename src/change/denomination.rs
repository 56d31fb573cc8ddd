use super::error::CountError;
use serde::{Deserialize, Serialize};

/// Highest tier in the built-in table.
pub const MAX_TIER: i64 = 5;

/// Face values in cents, indexed by `tier - 1`.
pub const DENOMINATIONS: [i64; MAX_TIER as usize] = [1, 5, 10, 25, 100];

/// Face value of the largest coin available at `tier`.
///
/// Total over all integers: tier 0, negative tiers and tiers above
/// [`MAX_TIER`] map to the sentinel 0.
pub fn value_of_tier(tier: i64) -> i64 {
    match tier {
        1..=MAX_TIER => DENOMINATIONS[(tier - 1) as usize],
        _ => 0,
    }
}

/// A denomination tier checked against the built-in table.
///
/// Tier `k` allows the `k` smallest coins; [`Tier::NONE`] allows none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tier(i64);

impl Tier {
    pub const NONE: Tier = Tier(0);

    pub fn new(tier: i64) -> Result<Self, CountError> {
        if (0..=MAX_TIER).contains(&tier) {
            Ok(Self(tier))
        } else {
            Err(CountError::TierOutOfRange {
                tier,
                max: MAX_TIER,
            })
        }
    }

    pub fn index(&self) -> i64 {
        self.0
    }

    /// Face value of the largest coin in this tier (0 for [`Tier::NONE`]).
    pub fn value(&self) -> i64 {
        value_of_tier(self.0)
    }

    /// The next smaller tier, saturating at [`Tier::NONE`].
    pub fn lower(&self) -> Tier {
        Tier(self.0.saturating_sub(1).max(0))
    }
}
