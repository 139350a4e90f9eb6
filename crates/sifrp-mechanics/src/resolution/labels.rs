//! Text used when rendering a roll breakdown.
//!
//! The composer never embeds display strings. It asks a [`Labels`]
//! implementation for each one, so hosts can supply translations. The
//! built-in [`DefaultLabels`] are English; a [`LabelCatalog`] overrides any
//! subset of them from a JSON object keyed by [`LabelKey::key`].

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{MechError, MechResult};

/// Every piece of text a rendered breakdown can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelKey {
    /// Heading verb of ability and speciality tests.
    TestAction,
    /// Heading of combat initiative rolls.
    CombatInitiativeAction,
    /// Heading of intrigue initiative rolls.
    IntrigueInitiativeAction,
    /// Heading of attack rolls.
    AttackAction,
    /// "test dice"
    TestDice,
    /// "bonus dice" in the dice summary line.
    BonusDice,
    /// "drop"
    Drop,
    /// Bonuses section heading.
    Bonuses,
    /// Penalties section heading.
    Penalties,
    /// Manually added bonus dice.
    ManualBonusDice,
    /// Manually added flat bonus.
    ManualBonusFlat,
    /// Manually added penalty dice.
    ManualPenaltyDice,
    /// Manually added flat penalty.
    ManualPenaltyFlat,
    /// Weapon training.
    Training,
    /// Wounds.
    Wounds,
    /// Frustration.
    Frustration,
    /// Injuries.
    Injuries,
    /// Fatigue.
    Fatigue,
    /// Armor penalty.
    ArmorPenalty,
}

impl LabelKey {
    /// Every key, for catalog validation.
    pub const ALL: [LabelKey; 19] = [
        Self::TestAction,
        Self::CombatInitiativeAction,
        Self::IntrigueInitiativeAction,
        Self::AttackAction,
        Self::TestDice,
        Self::BonusDice,
        Self::Drop,
        Self::Bonuses,
        Self::Penalties,
        Self::ManualBonusDice,
        Self::ManualBonusFlat,
        Self::ManualPenaltyDice,
        Self::ManualPenaltyFlat,
        Self::Training,
        Self::Wounds,
        Self::Frustration,
        Self::Injuries,
        Self::Fatigue,
        Self::ArmorPenalty,
    ];

    /// Catalog key.
    pub fn key(self) -> &'static str {
        match self {
            Self::TestAction => "roll.test_action",
            Self::CombatInitiativeAction => "roll.combat_initiative_action",
            Self::IntrigueInitiativeAction => "roll.intrigue_initiative_action",
            Self::AttackAction => "roll.attack_action",
            Self::TestDice => "roll.test_dice",
            Self::BonusDice => "roll.bonus_dice",
            Self::Drop => "roll.drop",
            Self::Bonuses => "roll.bonuses",
            Self::Penalties => "roll.penalties",
            Self::ManualBonusDice => "modifiers.bonus_dice",
            Self::ManualBonusFlat => "modifiers.bonus_modifier",
            Self::ManualPenaltyDice => "modifiers.penalty_dice",
            Self::ManualPenaltyFlat => "modifiers.penalty_modifier",
            Self::Training => "weapon.training",
            Self::Wounds => "actor.wounds",
            Self::Frustration => "actor.frustration",
            Self::Injuries => "actor.injuries",
            Self::Fatigue => "actor.fatigue",
            Self::ArmorPenalty => "actor.armor_penalty",
        }
    }

    /// English text.
    pub fn default_text(self) -> &'static str {
        match self {
            Self::TestAction => "Test",
            Self::CombatInitiativeAction => "Combat initiative",
            Self::IntrigueInitiativeAction => "Intrigue initiative",
            Self::AttackAction => "Attack",
            Self::TestDice => "test dice",
            Self::BonusDice => "bonus dice",
            Self::Drop => "drop",
            Self::Bonuses => "Bonuses",
            Self::Penalties => "Penalties",
            Self::ManualBonusDice => "Bonus dice",
            Self::ManualBonusFlat => "Bonus modifier",
            Self::ManualPenaltyDice => "Penalty dice",
            Self::ManualPenaltyFlat => "Penalty modifier",
            Self::Training => "Training",
            Self::Wounds => "Wounds",
            Self::Frustration => "Frustration",
            Self::Injuries => "Injuries",
            Self::Fatigue => "Fatigue",
            Self::ArmorPenalty => "Armor penalty",
        }
    }

    /// Look a key up by its catalog name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.key() == key)
    }
}

/// Resolves label keys to display text.
pub trait Labels {
    /// The text for `key`.
    fn text(&self, key: LabelKey) -> Cow<'_, str>;
}

/// English labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLabels;

impl Labels for DefaultLabels {
    fn text(&self, key: LabelKey) -> Cow<'_, str> {
        Cow::Borrowed(key.default_text())
    }
}

/// Labels loaded from a JSON object, falling back to English for keys the
/// catalog does not define.
#[derive(Debug, Clone, Default)]
pub struct LabelCatalog {
    entries: HashMap<LabelKey, String>,
}

impl LabelCatalog {
    /// Parse a catalog such as `{ "roll.test_dice": "dés de test" }`.
    ///
    /// Unknown keys are rejected so typos do not silently fall back.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let raw: HashMap<String, String> =
            serde_json::from_str(json).map_err(|e| MechError::InvalidLabels(e.to_string()))?;
        let mut entries = HashMap::with_capacity(raw.len());
        for (key, text) in raw {
            let label = LabelKey::from_key(&key)
                .ok_or_else(|| MechError::InvalidLabels(format!("unknown label key '{key}'")))?;
            entries.insert(label, text);
        }
        Ok(Self { entries })
    }

    /// Read a catalog file. See [`LabelCatalog::from_json`].
    pub fn load(path: &Path) -> MechResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| MechError::InvalidLabels(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Override one label.
    pub fn with(mut self, key: LabelKey, text: impl Into<String>) -> Self {
        self.entries.insert(key, text.into());
        self
    }
}

impl Labels for LabelCatalog {
    fn text(&self, key: LabelKey) -> Cow<'_, str> {
        match self.entries.get(&key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key.default_text()),
        }
    }
}
