//! Penalties derived from an actor's current condition.
//!
//! Each actor variant contributes a [`ModifierSet`] through the
//! [`RollModifiers`] capability. The baseline contributor covers what every
//! actor has (injuries, fatigue, frustration, armor); player characters call
//! it and add their wounds.

use serde::{Deserialize, Serialize};

use crate::sheet::{Actor, AttributeState, Character};

/// Penalty magnitudes that apply to a test. All values are non-negative;
/// the resolver applies the sign.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifierSet {
    /// Dice removed from the kept pool on every test (wounds).
    pub test_dice_penalty: u32,
    /// Subtracted from every test result (injuries + fatigue, saturating).
    pub global_result_penalty: u32,
    /// Dice removed on Deception and Persuasion tests.
    pub frustration_penalty: u32,
    /// Subtracted from Agility test results.
    pub armor_penalty: u32,
}

/// Something that can state which penalties its tests suffer.
pub trait RollModifiers {
    /// The penalties in effect right now.
    fn roll_modifiers(&self) -> ModifierSet;
}

impl RollModifiers for ModifierSet {
    fn roll_modifiers(&self) -> ModifierSet {
        *self
    }
}

impl RollModifiers for AttributeState {
    fn roll_modifiers(&self) -> ModifierSet {
        ModifierSet {
            test_dice_penalty: 0,
            global_result_penalty: self.injuries.value.saturating_add(self.fatigue.value),
            frustration_penalty: self.frustration.value,
            armor_penalty: self.armor.penalty,
        }
    }
}

impl RollModifiers for Character {
    fn roll_modifiers(&self) -> ModifierSet {
        ModifierSet {
            test_dice_penalty: self.wounds.value,
            ..self.state.roll_modifiers()
        }
    }
}

impl RollModifiers for Actor {
    fn roll_modifiers(&self) -> ModifierSet {
        match self {
            Self::Character(character) => character.roll_modifiers(),
            Self::Npc(state) => state.roll_modifiers(),
        }
    }
}

impl<T: RollModifiers + ?Sized> RollModifiers for &T {
    fn roll_modifiers(&self) -> ModifierSet {
        (**self).roll_modifiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Armor, Track};

    fn battered() -> AttributeState {
        AttributeState {
            injuries: Track::with_value(1, 3),
            fatigue: Track::with_value(2, 3),
            frustration: Track::with_value(1, 2),
            armor: Armor {
                penalty: 3,
                ..Armor::default()
            },
            ..AttributeState::default()
        }
    }

    #[test]
    fn baseline_has_no_dice_penalty() {
        let mods = battered().roll_modifiers();
        assert_eq!(
            mods,
            ModifierSet {
                test_dice_penalty: 0,
                global_result_penalty: 3,
                frustration_penalty: 1,
                armor_penalty: 3,
            }
        );
    }

    #[test]
    fn character_adds_wounds_to_baseline() {
        let character = Character {
            state: battered(),
            wounds: Track::with_value(2, 4),
            ..Character::default()
        };
        let mods = character.roll_modifiers();
        assert_eq!(mods.test_dice_penalty, 2);
        assert_eq!(mods.global_result_penalty, 3);
        assert_eq!(mods.armor_penalty, 3);
    }

    #[test]
    fn actor_dispatches_to_variant() {
        let npc = Actor::Npc(battered());
        assert_eq!(npc.roll_modifiers().test_dice_penalty, 0);

        let pc = Actor::Character(Character {
            wounds: Track::with_value(1, 2),
            ..Character::default()
        });
        assert_eq!(pc.roll_modifiers().test_dice_penalty, 1);
    }

    #[test]
    fn extreme_condition_saturates() {
        let state = AttributeState {
            injuries: Track::with_value(u32::MAX, u32::MAX),
            fatigue: Track::with_value(1, 1),
            ..AttributeState::default()
        };
        assert_eq!(state.roll_modifiers().global_result_penalty, u32::MAX);
    }

    #[test]
    fn empty_sheet_has_no_penalties() {
        assert_eq!(
            AttributeState::default().roll_modifiers(),
            ModifierSet::default()
        );
    }
}
