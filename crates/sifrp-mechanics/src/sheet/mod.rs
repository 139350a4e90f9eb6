//! Actor sheets: ability ranks, gauges, armor, defenses and weapons.
//!
//! [`AttributeState`] holds what every actor has. [`Character`] extends it
//! with wounds and the player-only qualities, and [`Actor`] is the tagged
//! union read from sheet files (`"type": "character"` or `"type": "npc"`).

pub mod ability;
pub mod derived;
pub mod track;
pub mod weapon;

pub use ability::{Abilities, AbilityScore};
pub use track::Track;
pub use weapon::{Weapon, WeaponKind, WeaponQuality};

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::rules::{self, Ability};

/// Armor worn by an actor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Armor {
    /// Armor type name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Armor rating (damage reduction).
    pub rating: u32,
    /// Penalty applied to Agility test results and Combat Defense.
    pub penalty: u32,
    /// Bulk (movement reduction).
    pub bulk: u32,
}

/// A defense score with a situational bonus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defense {
    /// Derived value.
    pub value: u32,
    /// Bonus added on top of the derived value.
    pub bonus: u32,
}

/// Destiny point ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Destiny {
    /// Starting destiny points.
    pub base: u32,
    /// Points invested in benefits.
    pub invested: u32,
    /// Points gained during play.
    pub bonus: u32,
    /// Points spent.
    pub spent: u32,
    /// Points burnt.
    pub burnt: u32,
    /// Derived: points still available.
    pub available: u32,
}

/// A total/spent/available ledger (glory, experience).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    /// Points earned.
    pub total: u32,
    /// Points spent.
    pub spent: u32,
    /// Derived: points still available.
    pub available: u32,
}

/// The state shared by every actor, player character or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttributeState {
    /// Actor name.
    pub name: String,
    /// Ability and speciality ranks.
    pub abilities: Abilities,
    /// Health gauge.
    pub health: Track,
    /// Injuries; each one is -1 to every test result.
    pub injuries: Track,
    /// Fatigue; each point is -1 to every test result.
    pub fatigue: Track,
    /// Composure gauge (intrigue health).
    pub composure: Track,
    /// Frustration; each point is -1D on Deception and Persuasion tests.
    pub frustration: Track,
    /// Combat Defense.
    pub combat_defense: Defense,
    /// Intrigue Defense.
    pub intrigue_defense: Defense,
    /// Worn armor.
    pub armor: Armor,
    /// Destiny points.
    pub destiny: Destiny,
    /// Carried weapons.
    pub weapons: Vec<Weapon>,
}

/// Ability and speciality shortcuts (`@agility`, `@quickness`) handed to a
/// dice engine as the variable context of a formula.
pub type RollData = BTreeMap<String, u32>;

impl AttributeState {
    /// Find a carried weapon by name, ignoring case.
    pub fn weapon(&self, name: &str) -> MechResult<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| MechError::WeaponNotFound(name.to_string()))
    }

    /// Build the formula variable context.
    ///
    /// Every ability has an entry; every catalog speciality has one too,
    /// as do open-list specialities present on the sheet. A speciality key
    /// shared by two abilities (charm) takes the later ability's rank.
    pub fn roll_data(&self) -> RollData {
        let mut data = RollData::new();
        for ability in Ability::ALL {
            data.insert(ability.key().to_string(), self.abilities.rank(ability));
            for (key, _) in rules::specialities(ability) {
                data.insert(
                    (*key).to_string(),
                    self.abilities.speciality_rank(ability, key),
                );
            }
            if ability.has_open_specialities() {
                if let Some(score) = self.abilities.score(ability) {
                    for (key, rank) in &score.specialities {
                        data.insert(key.clone(), *rank);
                    }
                }
            }
        }
        data
    }
}

/// A player character: the shared state plus wounds, glory and experience.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Character {
    /// Shared actor state.
    #[serde(flatten)]
    pub state: AttributeState,
    /// Wounds; each one is -1D on every test.
    pub wounds: Track,
    /// Glory points.
    pub glory: Ledger,
    /// Experience points.
    pub experience: Ledger,
}

/// Any actor that can make a test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Actor {
    /// A player character.
    Character(Character),
    /// A non-player character (no wounds track).
    Npc(AttributeState),
}

impl Actor {
    /// Parse a sheet from JSON and recompute its derived values.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let mut actor: Self =
            serde_json::from_str(json).map_err(|e| MechError::InvalidSheet(e.to_string()))?;
        actor.derive();
        Ok(actor)
    }

    /// Read a sheet file. See [`Actor::from_json`].
    pub fn load(path: &Path) -> MechResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| MechError::InvalidSheet(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// The shared state of either variant.
    pub fn state(&self) -> &AttributeState {
        match self {
            Self::Character(character) => &character.state,
            Self::Npc(state) => state,
        }
    }

    /// Mutable access to the shared state.
    pub fn state_mut(&mut self) -> &mut AttributeState {
        match self {
            Self::Character(character) => &mut character.state,
            Self::Npc(state) => state,
        }
    }

    /// Recompute derived values for the variant.
    pub fn derive(&mut self) {
        match self {
            Self::Character(character) => character.derive(),
            Self::Npc(state) => state.derive(),
        }
    }

    /// The actor's name.
    pub fn name(&self) -> &str {
        &self.state().name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHARACTER: &str = r#"{
        "type": "character",
        "name": "Brienne",
        "abilities": {
            "endurance": { "value": 4 },
            "agility": { "value": 3, "specialities": { "quickness": 1 } },
            "fighting": { "value": 5, "specialities": { "longBlades": 2 } }
        },
        "wounds": { "value": 1 },
        "injuries": { "value": 1 },
        "armor": { "type": "Mail", "rating": 5, "penalty": 3, "bulk": 2 },
        "weapons": [
            { "name": "Oathkeeper", "speciality": "longBlades", "training": 1 }
        ]
    }"#;

    #[test]
    fn loads_character_and_derives_maxima() {
        let actor = Actor::from_json(CHARACTER).unwrap();
        let Actor::Character(character) = &actor else {
            panic!("expected a character");
        };
        assert_eq!(actor.name(), "Brienne");
        assert_eq!(character.wounds, Track { value: 1, max: 4 });
        assert_eq!(character.state.health.max, 12);
        assert_eq!(character.state.armor.kind, "Mail");
        assert_eq!(character.state.armor.penalty, 3);
    }

    #[test]
    fn loads_npc_without_wounds() {
        let actor = Actor::from_json(r#"{ "type": "npc", "name": "Gold Cloak" }"#).unwrap();
        assert!(matches!(actor, Actor::Npc(_)));
        assert_eq!(actor.state().abilities.rank(Ability::Fighting), 2);
    }

    #[test]
    fn sheet_keys_are_camel_case() {
        let actor = Actor::from_json(
            r#"{
                "type": "character",
                "combatDefense": { "bonus": 2 },
                "intrigueDefense": { "bonus": 1 },
                "weapons": [
                    { "name": "Ice", "damageAbility": "athletics", "damageModifier": 3 }
                ]
            }"#,
        )
        .unwrap();
        let state = actor.state();
        assert_eq!(state.combat_defense.bonus, 2);
        assert_eq!(state.intrigue_defense.bonus, 1);
        assert_eq!(state.weapons[0].damage_ability, Some(Ability::Athletics));
        assert_eq!(state.weapons[0].damage(state), 5);

        let json = serde_json::to_value(&actor).unwrap();
        assert!(json.get("combatDefense").is_some());
        assert!(json.get("combat_defense").is_none());
    }

    #[test]
    fn huge_ranks_load_without_overflow() {
        let actor = Actor::from_json(
            r#"{ "type": "npc", "abilities": { "endurance": { "value": 2000000000 } } }"#,
        )
        .unwrap();
        assert_eq!(actor.state().health.max, u32::MAX);
        assert_eq!(actor.state().injuries.max, 2_000_000_000);
    }

    #[test]
    fn malformed_sheet_is_an_error() {
        assert!(matches!(
            Actor::from_json(r#"{ "type": "dragon" }"#),
            Err(MechError::InvalidSheet(_))
        ));
    }

    #[test]
    fn weapon_lookup_ignores_case() {
        let actor = Actor::from_json(CHARACTER).unwrap();
        assert_eq!(actor.state().weapon("oathkeeper").unwrap().training, 1);
        assert!(matches!(
            actor.state().weapon("Ice"),
            Err(MechError::WeaponNotFound(_))
        ));
    }

    #[test]
    fn roll_data_has_ability_and_speciality_shortcuts() {
        let actor = Actor::from_json(CHARACTER).unwrap();
        let data = actor.state().roll_data();
        assert_eq!(data["agility"], 3);
        assert_eq!(data["quickness"], 1);
        assert_eq!(data["longBlades"], 2);
        assert_eq!(data["will"], 2);
        assert_eq!(data["notice"], 0);
    }

    #[test]
    fn roll_data_includes_known_languages() {
        let state = AttributeState {
            abilities: Abilities::new().with_speciality(Ability::Language, "lowValyrian", 2),
            ..AttributeState::default()
        };
        assert_eq!(state.roll_data()["lowValyrian"], 2);
    }
}
