//! Ability and speciality ranks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rules::{self, Ability, DEFAULT_ABILITY_RANK};

fn default_rank() -> u32 {
    DEFAULT_ABILITY_RANK
}

/// An ability rank together with the ranks of its specialities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// Ability rank (test dice).
    #[serde(default = "default_rank")]
    pub value: u32,
    /// Speciality ranks (bonus dice), keyed by speciality key.
    #[serde(default)]
    pub specialities: BTreeMap<String, u32>,
}

impl Default for AbilityScore {
    fn default() -> Self {
        Self::with_rank(DEFAULT_ABILITY_RANK)
    }
}

impl AbilityScore {
    /// An ability score with no specialities.
    pub fn with_rank(value: u32) -> Self {
        Self {
            value,
            specialities: BTreeMap::new(),
        }
    }

    /// Add or replace a speciality rank.
    pub fn with_speciality(mut self, key: impl Into<String>, rank: u32) -> Self {
        self.specialities.insert(key.into(), rank);
        self
    }
}

/// All ability scores of an actor. Abilities absent from the map have the
/// default rank and no specialities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abilities {
    scores: BTreeMap<Ability, AbilityScore>,
}

impl Abilities {
    /// Create an empty set where every ability has the default rank.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rank of an ability.
    pub fn rank(&self, ability: Ability) -> u32 {
        self.scores
            .get(&ability)
            .map_or(DEFAULT_ABILITY_RANK, |score| score.value)
    }

    /// The rank of a speciality, or 0 if the actor has none.
    ///
    /// Keys are matched against the catalog spelling first, so `long_blades`
    /// finds a rank stored as `longBlades`.
    pub fn speciality_rank(&self, ability: Ability, speciality: &str) -> u32 {
        let Some(score) = self.scores.get(&ability) else {
            return 0;
        };
        let key = rules::canonical_speciality(ability, speciality).unwrap_or(speciality);
        if let Some(rank) = score.specialities.get(key) {
            return *rank;
        }
        score
            .specialities
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(speciality))
            .map_or(0, |(_, rank)| *rank)
    }

    /// The score entry for an ability, if the sheet lists it.
    pub fn score(&self, ability: Ability) -> Option<&AbilityScore> {
        self.scores.get(&ability)
    }

    /// Set an ability rank, keeping its specialities.
    pub fn set_rank(&mut self, ability: Ability, rank: u32) {
        self.scores.entry(ability).or_default().value = rank;
    }

    /// Set a speciality rank.
    pub fn set_speciality(&mut self, ability: Ability, speciality: impl Into<String>, rank: u32) {
        self.scores
            .entry(ability)
            .or_default()
            .specialities
            .insert(speciality.into(), rank);
    }

    /// Insert an entry for every ability missing from the sheet, at `rank`.
    pub fn fill_missing(&mut self, rank: u32) {
        for ability in Ability::ALL {
            self.scores
                .entry(ability)
                .or_insert_with(|| AbilityScore::with_rank(rank));
        }
    }

    /// Builder form of [`Abilities::set_rank`].
    pub fn with(mut self, ability: Ability, rank: u32) -> Self {
        self.set_rank(ability, rank);
        self
    }

    /// Builder form of [`Abilities::set_speciality`].
    pub fn with_speciality(
        mut self,
        ability: Ability,
        speciality: impl Into<String>,
        rank: u32,
    ) -> Self {
        self.set_speciality(ability, speciality, rank);
        self
    }

    /// Iterate over the abilities listed on the sheet.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &AbilityScore)> {
        self.scores.iter().map(|(ability, score)| (*ability, score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_ability_has_default_rank() {
        let abilities = Abilities::new();
        assert_eq!(abilities.rank(Ability::Cunning), 2);
        assert_eq!(abilities.speciality_rank(Ability::Cunning, "logic"), 0);
    }

    #[test]
    fn speciality_lookup_uses_catalog_spelling() {
        let abilities = Abilities::new().with_speciality(Ability::Fighting, "longBlades", 2);
        assert_eq!(abilities.speciality_rank(Ability::Fighting, "long_blades"), 2);
        assert_eq!(abilities.speciality_rank(Ability::Fighting, "LONGBLADES"), 2);
        assert_eq!(abilities.speciality_rank(Ability::Fighting, "axes"), 0);
    }

    #[test]
    fn open_list_speciality_lookup() {
        let abilities = Abilities::new().with_speciality(Ability::Language, "Braavosi", 1);
        assert_eq!(abilities.speciality_rank(Ability::Language, "braavosi"), 1);
    }

    #[test]
    fn deserializes_from_sheet_json() {
        let abilities: Abilities = serde_json::from_str(
            r#"{
                "agility": { "value": 4, "specialities": { "quickness": 1 } },
                "will": {}
            }"#,
        )
        .unwrap();
        assert_eq!(abilities.rank(Ability::Agility), 4);
        assert_eq!(abilities.speciality_rank(Ability::Agility, "quickness"), 1);
        assert_eq!(abilities.rank(Ability::Will), 2);
    }

    #[test]
    fn fill_missing_keeps_existing_ranks() {
        let mut abilities = Abilities::new().with(Ability::Status, 5);
        abilities.fill_missing(3);
        assert_eq!(abilities.rank(Ability::Status), 5);
        assert_eq!(abilities.rank(Ability::Healing), 3);
        assert_eq!(abilities.iter().count(), Ability::ALL.len());
    }
}
