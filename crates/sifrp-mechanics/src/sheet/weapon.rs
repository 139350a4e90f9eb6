//! Weapons carried by an actor.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::rules::{self, Ability};
use crate::sheet::AttributeState;

/// Most training dice a weapon may demand.
pub const MAX_TRAINING: u32 = 2;

/// Bounds of a weapon's flat damage modifier.
pub const DAMAGE_MODIFIER_RANGE: std::ops::RangeInclusive<i32> = -5..=5;

/// Whether a weapon is used in melee or at range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    /// Hand-to-hand weapons, usually tested with Fighting.
    #[default]
    Melee,
    /// Missile weapons, usually tested with Marksmanship.
    Ranged,
}

impl WeaponKind {
    /// The ability a weapon of this kind is tested with when none is given.
    pub fn default_ability(self) -> Ability {
        match self {
            Self::Melee => Ability::Fighting,
            Self::Ranged => Ability::Marksmanship,
        }
    }
}

impl std::fmt::Display for WeaponKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
        })
    }
}

/// Craftsmanship level of a weapon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponQuality {
    /// Poorly made.
    Poor,
    /// Ordinary workmanship.
    #[default]
    Common,
    /// Better than average.
    Superior,
    /// Masterwork.
    Extraordinary,
}

impl std::fmt::Display for WeaponQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Poor => "poor",
            Self::Common => "common",
            Self::Superior => "superior",
            Self::Extraordinary => "extraordinary",
        })
    }
}

/// A weapon and the test it calls for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    /// Weapon name.
    pub name: String,
    /// Melee or ranged.
    #[serde(default)]
    pub kind: WeaponKind,
    /// Craftsmanship.
    #[serde(default)]
    pub quality: WeaponQuality,
    /// Ability tested when attacking. Defaults from [`WeaponKind`].
    #[serde(default)]
    pub ability: Option<Ability>,
    /// Speciality whose rank adds bonus dice.
    #[serde(default)]
    pub speciality: String,
    /// Training requirement in dice, traded away from the kept dice.
    #[serde(default)]
    pub training: u32,
    /// Ability whose rank is the base damage. `None` means no ability.
    #[serde(default)]
    pub damage_ability: Option<Ability>,
    /// Flat damage modifier (e.g. -2 for a dagger).
    #[serde(default)]
    pub damage_modifier: i32,
    /// Free-text weapon qualities (e.g. "Slow, Powerful, Piercing 1").
    #[serde(default)]
    pub qualities: String,
}

impl Weapon {
    /// A common melee weapon with no training, speciality or damage ability.
    pub fn new(name: impl Into<String>, kind: WeaponKind) -> Self {
        Self {
            name: name.into(),
            kind,
            quality: WeaponQuality::Common,
            ability: None,
            speciality: String::new(),
            training: 0,
            damage_ability: None,
            damage_modifier: 0,
            qualities: String::new(),
        }
    }

    /// The ability tested when attacking with this weapon.
    pub fn attack_ability(&self) -> Ability {
        self.ability.unwrap_or_else(|| self.kind.default_ability())
    }

    /// Check training, damage modifier and speciality against the rules.
    pub fn validate(&self) -> MechResult<()> {
        if self.training > MAX_TRAINING {
            return Err(self.invalid(format!(
                "training {} exceeds {MAX_TRAINING}",
                self.training
            )));
        }
        if !DAMAGE_MODIFIER_RANGE.contains(&self.damage_modifier) {
            return Err(self.invalid(format!(
                "damage modifier {} outside {}..={}",
                self.damage_modifier,
                DAMAGE_MODIFIER_RANGE.start(),
                DAMAGE_MODIFIER_RANGE.end()
            )));
        }
        let ability = self.attack_ability();
        if !self.speciality.is_empty() && !rules::is_known_speciality(ability, &self.speciality) {
            return Err(self.invalid(format!(
                "speciality '{}' does not belong to {ability}",
                self.speciality
            )));
        }
        Ok(())
    }

    /// Base damage: damage ability rank plus the modifier, floored at 0.
    pub fn damage(&self, state: &AttributeState) -> u32 {
        let base = self
            .damage_ability
            .map_or(0, |ability| i64::from(state.abilities.rank(ability)));
        u32::try_from((base + i64::from(self.damage_modifier)).max(0)).unwrap_or(0)
    }

    fn invalid(&self, reason: String) -> MechError {
        MechError::InvalidWeapon {
            name: self.name.clone(),
            reason,
        }
    }
}
