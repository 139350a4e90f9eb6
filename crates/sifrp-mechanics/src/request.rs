//! What the actor is trying to do, and what the player adds on top.
//!
//! An [`ActionRequest`] names the kind of roll and carries exactly the dice
//! counts that kind uses. A [`ManualAdjustment`] holds the ad hoc bonus and
//! penalty the player enters before rolling.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::rules::{self, Ability};
use crate::sheet::{AttributeState, Weapon};

/// The kind of roll and the dice it is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RollKind {
    /// A plain ability test.
    Ability {
        /// Test dice (ability rank).
        test_dice: u32,
    },
    /// An ability test helped by a speciality.
    Speciality {
        /// Test dice (ability rank).
        test_dice: u32,
        /// Bonus dice (speciality rank).
        bonus_dice: u32,
    },
    /// Combat initiative (Agility + Quickness).
    CombatInitiative {
        /// Test dice.
        test_dice: u32,
        /// Bonus dice.
        bonus_dice: u32,
    },
    /// Intrigue initiative (Status + Reputation).
    IntrigueInitiative {
        /// Test dice.
        test_dice: u32,
        /// Bonus dice.
        bonus_dice: u32,
    },
    /// A weapon attack.
    Attack {
        /// Test dice (weapon ability rank).
        test_dice: u32,
        /// Bonus dice (weapon speciality rank).
        bonus_dice: u32,
        /// The weapon's training requirement.
        training_dice: u32,
    },
}

impl RollKind {
    /// Test dice of any kind.
    pub fn test_dice(&self) -> u32 {
        match *self {
            Self::Ability { test_dice }
            | Self::Speciality { test_dice, .. }
            | Self::CombatInitiative { test_dice, .. }
            | Self::IntrigueInitiative { test_dice, .. }
            | Self::Attack { test_dice, .. } => test_dice,
        }
    }

    /// Bonus dice; 0 for a plain ability test.
    pub fn bonus_dice(&self) -> u32 {
        match *self {
            Self::Ability { .. } => 0,
            Self::Speciality { bonus_dice, .. }
            | Self::CombatInitiative { bonus_dice, .. }
            | Self::IntrigueInitiative { bonus_dice, .. }
            | Self::Attack { bonus_dice, .. } => bonus_dice,
        }
    }

    /// Dice the roll gives up to training. Only attacks pay for training.
    pub fn training_penalty_dice(&self) -> u32 {
        match *self {
            Self::Attack { training_dice, .. } => training_dice,
            _ => 0,
        }
    }

    /// The action this kind of roll performs.
    pub fn action(&self) -> RollAction {
        match self {
            Self::Ability { .. } | Self::Speciality { .. } => RollAction::Test,
            Self::CombatInitiative { .. } => RollAction::CombatInitiative,
            Self::IntrigueInitiative { .. } => RollAction::IntrigueInitiative,
            Self::Attack { .. } => RollAction::Attack,
        }
    }
}

/// The action heading a roll breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RollAction {
    /// An ability or speciality test.
    Test,
    /// Combat initiative.
    CombatInitiative,
    /// Intrigue initiative.
    IntrigueInitiative,
    /// A weapon attack.
    Attack,
}

/// A request to roll a test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Roll kind and dice.
    pub kind: RollKind,
    /// The ability being tested, which decides whether frustration and
    /// armor penalties apply.
    pub ability: Option<Ability>,
    /// What is being rolled, e.g. "Agility | Quickness".
    pub label: String,
}

impl ActionRequest {
    /// A request with an explicit kind.
    pub fn new(kind: RollKind, ability: Option<Ability>, label: impl Into<String>) -> Self {
        Self {
            kind,
            ability,
            label: label.into(),
        }
    }

    /// Test an ability with its rank as test dice.
    pub fn ability_test(state: &AttributeState, ability: Ability) -> Self {
        Self::new(
            RollKind::Ability {
                test_dice: state.abilities.rank(ability),
            },
            Some(ability),
            ability.display_name(),
        )
    }

    /// Test an ability with a speciality's rank as bonus dice.
    pub fn speciality_test(
        state: &AttributeState,
        ability: Ability,
        speciality: &str,
    ) -> MechResult<Self> {
        if !rules::is_known_speciality(ability, speciality) {
            return Err(MechError::UnknownSpeciality {
                ability: ability.key().to_string(),
                speciality: speciality.to_string(),
            });
        }
        Ok(Self::new(
            RollKind::Speciality {
                test_dice: state.abilities.rank(ability),
                bonus_dice: state.abilities.speciality_rank(ability, speciality),
            },
            Some(ability),
            pair_label(ability, speciality),
        ))
    }

    /// Combat initiative: Agility with Quickness.
    pub fn combat_initiative(state: &AttributeState) -> Self {
        let (ability, speciality) = (Ability::Agility, "quickness");
        Self::new(
            RollKind::CombatInitiative {
                test_dice: state.abilities.rank(ability),
                bonus_dice: state.abilities.speciality_rank(ability, speciality),
            },
            Some(ability),
            pair_label(ability, speciality),
        )
    }

    /// Intrigue initiative: Status with Reputation.
    pub fn intrigue_initiative(state: &AttributeState) -> Self {
        let (ability, speciality) = (Ability::Status, "reputation");
        Self::new(
            RollKind::IntrigueInitiative {
                test_dice: state.abilities.rank(ability),
                bonus_dice: state.abilities.speciality_rank(ability, speciality),
            },
            Some(ability),
            pair_label(ability, speciality),
        )
    }

    /// Attack with a weapon: its ability, speciality and training.
    pub fn attack(state: &AttributeState, weapon: &Weapon) -> MechResult<Self> {
        weapon.validate()?;
        let ability = weapon.attack_ability();
        Ok(Self::new(
            RollKind::Attack {
                test_dice: state.abilities.rank(ability),
                bonus_dice: state.abilities.speciality_rank(ability, &weapon.speciality),
                training_dice: weapon.training,
            },
            Some(ability),
            format!("{} ({})", weapon.name, pair_label(ability, &weapon.speciality)),
        ))
    }
}

fn pair_label(ability: Ability, speciality: &str) -> String {
    if speciality.is_empty() {
        return ability.display_name().to_string();
    }
    format!(
        "{} | {}",
        ability.display_name(),
        rules::speciality_display_name(ability, speciality)
    )
}

/// Bonus and penalty the player adds by hand before rolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualAdjustment {
    /// Extra dice rolled.
    pub bonus_dice: u32,
    /// Dice removed from the kept pool.
    pub penalty_dice: u32,
    /// Added to the result.
    pub bonus_flat: i32,
    /// Subtracted from the result.
    pub penalty_flat: i32,
}

impl ManualAdjustment {
    /// No adjustment.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from raw text fields as typed by the player.
    ///
    /// Each field is read with [`parse_lenient`]; dice counts below zero
    /// become zero.
    pub fn from_raw(raw: &RawAdjustment) -> Self {
        let dice = |s: &str| u32::try_from(parse_lenient(s).max(0)).unwrap_or(u32::MAX);
        let flat = |s: &str| {
            let n = parse_lenient(s).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
            i32::try_from(n).unwrap_or_default()
        };
        Self {
            bonus_dice: dice(&raw.bonus_dice),
            penalty_dice: dice(&raw.penalty_dice),
            bonus_flat: flat(&raw.bonus_flat),
            penalty_flat: flat(&raw.penalty_flat),
        }
    }
}

/// The four prompt fields before parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawAdjustment {
    /// Bonus dice text.
    pub bonus_dice: String,
    /// Penalty dice text.
    pub penalty_dice: String,
    /// Bonus modifier text.
    pub bonus_flat: String,
    /// Penalty modifier text.
    pub penalty_flat: String,
}

/// Read an integer the way a form field is read: surrounding whitespace is
/// ignored, an optional sign and the leading digits are taken, and anything
/// after them is dropped. Text with no leading digits reads as 0.
pub fn parse_lenient(s: &str) -> i64 {
    let s = s.trim();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = match digits[..end].parse::<i64>() {
        Ok(n) => n,
        Err(_) if end == 0 => {
            if !s.is_empty() {
                tracing::warn!(input = s, "non-numeric modifier read as 0");
            }
            return 0;
        }
        Err(_) => i64::MAX,
    };
    if negative { -magnitude } else { magnitude }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{Abilities, WeaponKind};

    fn state() -> AttributeState {
        AttributeState {
            abilities: Abilities::new()
                .with(Ability::Agility, 4)
                .with_speciality(Ability::Agility, "quickness", 2)
                .with(Ability::Status, 5)
                .with(Ability::Fighting, 3)
                .with_speciality(Ability::Fighting, "longBlades", 1)
                .with(Ability::Persuasion, 3)
                .with_speciality(Ability::Persuasion, "charm", 2),
            ..AttributeState::default()
        }
    }

    #[test]
    fn kind_accessors() {
        let attack = RollKind::Attack {
            test_dice: 3,
            bonus_dice: 1,
            training_dice: 2,
        };
        assert_eq!(attack.test_dice(), 3);
        assert_eq!(attack.bonus_dice(), 1);
        assert_eq!(attack.training_penalty_dice(), 2);
        assert_eq!(attack.action(), RollAction::Attack);

        let ability = RollKind::Ability { test_dice: 4 };
        assert_eq!(ability.bonus_dice(), 0);
        assert_eq!(ability.training_penalty_dice(), 0);
        assert_eq!(ability.action(), RollAction::Test);
    }

    #[test]
    fn ability_test_uses_rank() {
        let request = ActionRequest::ability_test(&state(), Ability::Agility);
        assert_eq!(request.kind, RollKind::Ability { test_dice: 4 });
        assert_eq!(request.ability, Some(Ability::Agility));
        assert_eq!(request.label, "Agility");
    }

    #[test]
    fn speciality_test_adds_bonus_dice() {
        let request = ActionRequest::speciality_test(&state(), Ability::Persuasion, "charm").unwrap();
        assert_eq!(
            request.kind,
            RollKind::Speciality {
                test_dice: 3,
                bonus_dice: 2
            }
        );
        assert_eq!(request.label, "Persuasion | Charm");
    }

    #[test]
    fn speciality_test_rejects_foreign_speciality() {
        let err = ActionRequest::speciality_test(&state(), Ability::Persuasion, "bows");
        assert!(matches!(err, Err(MechError::UnknownSpeciality { .. })));
    }

    #[test]
    fn initiative_requests() {
        let combat = ActionRequest::combat_initiative(&state());
        assert_eq!(
            combat.kind,
            RollKind::CombatInitiative {
                test_dice: 4,
                bonus_dice: 2
            }
        );
        assert_eq!(combat.ability, Some(Ability::Agility));
        assert_eq!(combat.label, "Agility | Quickness");

        let intrigue = ActionRequest::intrigue_initiative(&state());
        assert_eq!(
            intrigue.kind,
            RollKind::IntrigueInitiative {
                test_dice: 5,
                bonus_dice: 0
            }
        );
        assert_eq!(intrigue.label, "Status | Reputation");
    }

    #[test]
    fn attack_request_from_weapon() {
        let weapon = Weapon {
            speciality: "longBlades".to_string(),
            training: 1,
            ..Weapon::new("Longsword", WeaponKind::Melee)
        };
        let request = ActionRequest::attack(&state(), &weapon).unwrap();
        assert_eq!(
            request.kind,
            RollKind::Attack {
                test_dice: 3,
                bonus_dice: 1,
                training_dice: 1
            }
        );
        assert_eq!(request.label, "Longsword (Fighting | Long Blades)");
    }

    #[test]
    fn attack_request_rejects_invalid_weapon() {
        let weapon = Weapon {
            training: 5,
            ..Weapon::new("Greatsword", WeaponKind::Melee)
        };
        assert!(ActionRequest::attack(&state(), &weapon).is_err());
    }

    #[test]
    fn parse_lenient_reads_leading_integer() {
        assert_eq!(parse_lenient("3"), 3);
        assert_eq!(parse_lenient("  -2 "), -2);
        assert_eq!(parse_lenient("+4"), 4);
        assert_eq!(parse_lenient("2.7"), 2);
        assert_eq!(parse_lenient("5 dice"), 5);
        assert_eq!(parse_lenient(""), 0);
        assert_eq!(parse_lenient("abc"), 0);
        assert_eq!(parse_lenient("-"), 0);
    }

    #[test]
    fn manual_adjustment_from_raw() {
        let raw = RawAdjustment {
            bonus_dice: "2".to_string(),
            penalty_dice: "-1".to_string(),
            bonus_flat: "x".to_string(),
            penalty_flat: " 3".to_string(),
        };
        assert_eq!(
            ManualAdjustment::from_raw(&raw),
            ManualAdjustment {
                bonus_dice: 2,
                penalty_dice: 0,
                bonus_flat: 0,
                penalty_flat: 3,
            }
        );
        assert_eq!(
            ManualAdjustment::from_raw(&RawAdjustment::default()),
            ManualAdjustment::none()
        );
    }

    #[test]
    fn request_serializes_with_tagged_kind() {
        let request = ActionRequest::new(
            RollKind::Speciality {
                test_dice: 3,
                bonus_dice: 1,
            },
            Some(Ability::Deception),
            "Deception | Bluff",
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["kind"]["type"], "speciality");
        assert_eq!(json["kind"]["testDice"], 3);
        assert_eq!(json["kind"]["bonusDice"], 1);
        assert_eq!(json["ability"], "deception");
    }
}
