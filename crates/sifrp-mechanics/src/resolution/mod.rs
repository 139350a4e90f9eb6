//! Turning a request, penalties and manual adjustments into a dice pool.
//!
//! SIFRP rolls test dice plus bonus dice and keeps only as many as the
//! test dice allow, so every die-denominated penalty shrinks the kept pool
//! rather than the rolled pool:
//!
//! ```text
//! keep  = test - wounds - manual penalty dice - training (attacks)
//!              - frustration (Deception / Persuasion)
//! roll  = test + bonus + manual bonus dice
//! drop  = roll - keep
//! flat  = manual bonus - manual penalty - injuries - fatigue
//!              - armor (Agility)
//! ```
//!
//! A pool that would drop every die collapses to `0d6` plus the modifier.

pub mod labels;
pub mod narrative;

pub use labels::{DefaultLabels, LabelCatalog, LabelKey, Labels};
pub use narrative::{ModifierSource, NarrativeDisplay, NarrativeItem, RollNarrative};

use serde::Serialize;

use crate::dice::PoolFormula;
use crate::modifiers::ModifierSet;
use crate::request::{ActionRequest, ManualAdjustment};
use crate::rules::Ability;

/// Intermediate values of a resolution, signed and unclamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolTally {
    /// Dice given up to weapon training (attacks only).
    pub training_penalty_dice: i64,
    /// Frustration dice actually applied (Deception and Persuasion only).
    pub frustration_applied: i64,
    /// Armor penalty actually applied (Agility only).
    pub armor_applied: i64,
    /// Dice the test may keep. Negative when penalties exceed test dice.
    pub dice_to_keep: i64,
    /// Flat penalty from the actor's condition.
    pub flat_penalty: i64,
    /// Net flat modifier.
    pub total_flat_mod: i64,
    /// Dice rolled.
    pub total_dice_count: i64,
    /// Dice dropped, before clamping into the formula.
    pub dice_to_drop: i64,
}

/// The outcome of resolving a request: the formula to hand to a dice
/// engine and the breakdown explaining it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRoll {
    /// Pool to roll.
    pub formula: PoolFormula,
    /// Itemized explanation of the pool.
    pub narrative: RollNarrative,
    /// Dice rolled before any collapse: test + bonus + manual bonus.
    pub total_dice_count: i64,
    /// Dice to drop, unclamped. The formula's own drop count is clamped.
    pub dice_to_drop: i64,
    /// Net flat modifier.
    pub flat_modifier: i64,
}

/// Whether a resolution produced a roll or the player backed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The pool to roll.
    Resolved(ResolvedRoll),
    /// The prompt was dismissed; nothing was computed.
    Cancelled,
}

impl Resolution {
    /// The resolved roll, or `None` if cancelled.
    pub fn into_resolved(self) -> Option<ResolvedRoll> {
        match self {
            Self::Resolved(roll) => Some(roll),
            Self::Cancelled => None,
        }
    }

    /// Returns true if the prompt was dismissed.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Abilities whose tests lose dice to frustration.
fn suffers_frustration(ability: Option<Ability>) -> bool {
    matches!(ability, Some(Ability::Deception | Ability::Persuasion))
}

/// Abilities whose test results suffer the armor penalty.
fn suffers_armor(ability: Option<Ability>) -> bool {
    ability == Some(Ability::Agility)
}

/// Compute the intermediate values of a resolution.
pub fn tally(
    request: &ActionRequest,
    modifiers: &ModifierSet,
    manual: &ManualAdjustment,
) -> PoolTally {
    let test_dice = i64::from(request.kind.test_dice());
    let bonus_dice = i64::from(request.kind.bonus_dice());
    let training_penalty_dice = i64::from(request.kind.training_penalty_dice());

    let mut dice_to_keep = test_dice
        - i64::from(modifiers.test_dice_penalty)
        - i64::from(manual.penalty_dice)
        - training_penalty_dice;

    let frustration_applied = if suffers_frustration(request.ability) {
        i64::from(modifiers.frustration_penalty)
    } else {
        0
    };
    dice_to_keep -= frustration_applied;

    let armor_applied = if suffers_armor(request.ability) {
        i64::from(modifiers.armor_penalty)
    } else {
        0
    };
    let flat_penalty = i64::from(modifiers.global_result_penalty) + armor_applied;

    let total_flat_mod = i64::from(manual.bonus_flat) - i64::from(manual.penalty_flat) - flat_penalty;
    let total_dice_count = test_dice + bonus_dice + i64::from(manual.bonus_dice);
    let dice_to_drop = total_dice_count - dice_to_keep;

    PoolTally {
        training_penalty_dice,
        frustration_applied,
        armor_applied,
        dice_to_keep,
        flat_penalty,
        total_flat_mod,
        total_dice_count,
        dice_to_drop,
    }
}

/// Build the formula from a tally.
///
/// Dropping every rolled die (or rolling none) gives the empty pool.
pub fn formula(tally: &PoolTally) -> PoolFormula {
    if tally.dice_to_drop >= tally.total_dice_count || tally.total_dice_count <= 0 {
        if tally.total_dice_count > 0 {
            tracing::warn!(
                rolled = tally.total_dice_count,
                drop = tally.dice_to_drop,
                "penalties remove every die, rolling no dice"
            );
        }
        return PoolFormula::empty(tally.total_flat_mod);
    }
    PoolFormula::new(
        tally.total_dice_count.unsigned_abs(),
        tally.dice_to_drop.max(0).unsigned_abs(),
        tally.total_flat_mod,
    )
}

/// Resolve a request into a formula and breakdown. Never fails.
pub fn resolve_pool(
    request: &ActionRequest,
    modifiers: &ModifierSet,
    manual: &ManualAdjustment,
) -> ResolvedRoll {
    let tally = tally(request, modifiers, manual);
    let formula = formula(&tally);

    tracing::debug!(
        label = %request.label,
        kind = ?request.kind,
        ability = ?request.ability,
        ?modifiers,
        ?manual,
        keep = tally.dice_to_keep,
        rolled = tally.total_dice_count,
        drop = tally.dice_to_drop,
        flat = tally.total_flat_mod,
        %formula,
        "resolved dice pool"
    );

    ResolvedRoll {
        formula,
        narrative: RollNarrative::compose(request, modifiers, manual, &tally),
        total_dice_count: tally.total_dice_count,
        dice_to_drop: tally.dice_to_drop,
        flat_modifier: tally.total_flat_mod,
    }
}
