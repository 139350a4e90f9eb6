//! Dice-pool formulas in drop-lowest notation.
//!
//! A SIFRP test rolls a pool of six-sided dice, keeps the highest, and adds
//! a flat modifier. [`PoolFormula`] is the canonical form of such a pool,
//! rendered as `Nd6dlD`, `Nd6dlD + F` or `Nd6dlD - F`. An empty pool
//! renders as `0d6`, which evaluates to zero plus the modifier.

pub mod roll;

pub use roll::{PoolRoll, RolledDie};

use serde::Serialize;

/// Sides on every die in a pool.
pub const DIE_SIDES: u32 = 6;

/// A dice pool: how many d6 to roll, how many of the lowest to drop, and a
/// flat modifier. The drop count never exceeds the dice count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct PoolFormula {
    dice: u64,
    drop: u64,
    flat: i64,
}

impl PoolFormula {
    /// Roll `dice` d6 and drop the lowest `drop`.
    ///
    /// A drop count of `dice` or more collapses the pool to no dice.
    pub fn new(dice: u64, drop: u64, flat: i64) -> Self {
        if drop >= dice {
            return Self::empty(flat);
        }
        Self { dice, drop, flat }
    }

    /// A pool with no dice: only the flat modifier counts.
    pub fn empty(flat: i64) -> Self {
        Self {
            dice: 0,
            drop: 0,
            flat,
        }
    }

    /// Dice rolled.
    pub fn dice(&self) -> u64 {
        self.dice
    }

    /// Lowest dice discarded.
    pub fn drop(&self) -> u64 {
        self.drop
    }

    /// Dice that count toward the total.
    pub fn kept(&self) -> u64 {
        self.dice - self.drop
    }

    /// Flat modifier added to the kept dice.
    pub fn flat(&self) -> i64 {
        self.flat
    }

    /// Returns true if the pool rolls no dice.
    pub fn is_empty(&self) -> bool {
        self.dice == 0
    }

    /// Smallest and largest totals the formula can produce, saturating at
    /// the bounds of `i64`.
    pub fn range(&self) -> (i64, i64) {
        let kept = i64::try_from(self.kept()).unwrap_or(i64::MAX);
        (
            kept.saturating_add(self.flat),
            kept.saturating_mul(i64::from(DIE_SIDES))
                .saturating_add(self.flat),
        )
    }
}

impl std::fmt::Display for PoolFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "0d{DIE_SIDES}")?;
        } else {
            write!(f, "{}d{DIE_SIDES}dl{}", self.dice, self.drop)?;
        }
        match self.flat {
            0 => Ok(()),
            n if n > 0 => write!(f, " + {n}"),
            n => write!(f, " - {}", n.unsigned_abs()),
        }
    }
}
