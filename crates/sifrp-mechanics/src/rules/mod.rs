//! SIFRP rules catalog: abilities and their specialities.
//!
//! Every actor has a rank in each of the nineteen abilities. Specialities
//! are fixed per ability, except for Language whose list is open (each
//! tongue is its own speciality).

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Rank an ability has when a sheet does not list it.
pub const DEFAULT_ABILITY_RANK: u32 = 2;

/// One of the SIFRP abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    /// Agility.
    Agility,
    /// Animal Handling.
    AnimalHandling,
    /// Athletics.
    Athletics,
    /// Awareness.
    Awareness,
    /// Cunning.
    Cunning,
    /// Deception.
    Deception,
    /// Endurance.
    Endurance,
    /// Fighting.
    Fighting,
    /// Healing.
    Healing,
    /// Language.
    Language,
    /// Knowledge.
    Knowledge,
    /// Marksmanship.
    Marksmanship,
    /// Persuasion.
    Persuasion,
    /// Status.
    Status,
    /// Stealth.
    Stealth,
    /// Survival.
    Survival,
    /// Thievery.
    Thievery,
    /// Warfare.
    Warfare,
    /// Will.
    Will,
}

impl Ability {
    /// All abilities in catalog order.
    pub const ALL: [Ability; 19] = [
        Self::Agility,
        Self::AnimalHandling,
        Self::Athletics,
        Self::Awareness,
        Self::Cunning,
        Self::Deception,
        Self::Endurance,
        Self::Fighting,
        Self::Healing,
        Self::Language,
        Self::Knowledge,
        Self::Marksmanship,
        Self::Persuasion,
        Self::Status,
        Self::Stealth,
        Self::Survival,
        Self::Thievery,
        Self::Warfare,
        Self::Will,
    ];

    /// The key used in sheets and on the command line (e.g. `animalHandling`).
    pub fn key(self) -> &'static str {
        match self {
            Self::Agility => "agility",
            Self::AnimalHandling => "animalHandling",
            Self::Athletics => "athletics",
            Self::Awareness => "awareness",
            Self::Cunning => "cunning",
            Self::Deception => "deception",
            Self::Endurance => "endurance",
            Self::Fighting => "fighting",
            Self::Healing => "healing",
            Self::Language => "language",
            Self::Knowledge => "knowledge",
            Self::Marksmanship => "marksmanship",
            Self::Persuasion => "persuasion",
            Self::Status => "status",
            Self::Stealth => "stealth",
            Self::Survival => "survival",
            Self::Thievery => "thievery",
            Self::Warfare => "warfare",
            Self::Will => "will",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::AnimalHandling => "Animal Handling",
            Self::Agility => "Agility",
            Self::Athletics => "Athletics",
            Self::Awareness => "Awareness",
            Self::Cunning => "Cunning",
            Self::Deception => "Deception",
            Self::Endurance => "Endurance",
            Self::Fighting => "Fighting",
            Self::Healing => "Healing",
            Self::Language => "Language",
            Self::Knowledge => "Knowledge",
            Self::Marksmanship => "Marksmanship",
            Self::Persuasion => "Persuasion",
            Self::Status => "Status",
            Self::Stealth => "Stealth",
            Self::Survival => "Survival",
            Self::Thievery => "Thievery",
            Self::Warfare => "Warfare",
            Self::Will => "Will",
        }
    }

    /// Parse an ability from its key, ignoring case, `_`, `-` and spaces.
    pub fn from_key(s: &str) -> Option<Self> {
        let wanted = normalize(s);
        Self::ALL
            .into_iter()
            .find(|ability| normalize(ability.key()) == wanted)
    }

    /// Like [`Ability::from_key`] but reports unknown keys as an error.
    pub fn parse(s: &str) -> MechResult<Self> {
        Self::from_key(s).ok_or_else(|| MechError::UnknownAbility(s.to_string()))
    }

    /// Returns true for abilities whose specialities are an open list.
    pub fn has_open_specialities(self) -> bool {
        self == Self::Language
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The fixed specialities of an ability as `(key, display name)` pairs.
///
/// Returns an empty slice for Language.
pub fn specialities(ability: Ability) -> &'static [(&'static str, &'static str)] {
    match ability {
        Ability::Agility => &[
            ("acrobatics", "Acrobatics"),
            ("balance", "Balance"),
            ("contortions", "Contortions"),
            ("dodge", "Dodge"),
            ("quickness", "Quickness"),
        ],
        Ability::AnimalHandling => &[
            ("charm", "Charm"),
            ("drive", "Drive"),
            ("ride", "Ride"),
            ("train", "Train"),
        ],
        Ability::Athletics => &[
            ("climb", "Climb"),
            ("jump", "Jump"),
            ("run", "Run"),
            ("strength", "Strength"),
            ("swim", "Swim"),
            ("throw", "Throw"),
        ],
        Ability::Awareness => &[("empathy", "Empathy"), ("notice", "Notice")],
        Ability::Cunning => &[
            ("decipher", "Decipher"),
            ("logic", "Logic"),
            ("memory", "Memory"),
        ],
        Ability::Deception => &[
            ("act", "Act"),
            ("bluff", "Bluff"),
            ("cheat", "Cheat"),
            ("disguise", "Disguise"),
        ],
        Ability::Endurance => &[("resilience", "Resilience"), ("stamina", "Stamina")],
        Ability::Fighting => &[
            ("axes", "Axes"),
            ("bludgeons", "Bludgeons"),
            ("brawling", "Brawling"),
            ("fencing", "Fencing"),
            ("longBlades", "Long Blades"),
            ("polearms", "Polearms"),
            ("shields", "Shields"),
            ("shortBlades", "Short Blades"),
            ("spears", "Spears"),
        ],
        Ability::Healing => &[
            ("diagnose", "Diagnose"),
            ("treatailment", "Treat Ailment"),
            ("treatinjury", "Treat Injury"),
        ],
        Ability::Language => &[],
        Ability::Knowledge => &[
            ("education", "Education"),
            ("research", "Research"),
            ("streetwise", "Streetwise"),
        ],
        Ability::Marksmanship => &[
            ("bows", "Bows"),
            ("crossbows", "Crossbows"),
            ("siege", "Siege"),
            ("thrown", "Thrown"),
        ],
        Ability::Persuasion => &[
            ("bargain", "Bargain"),
            ("charm", "Charm"),
            ("convince", "Convince"),
            ("incite", "Incite"),
            ("intimidate", "Intimidate"),
            ("seduce", "Seduce"),
            ("taunt", "Taunt"),
        ],
        Ability::Status => &[
            ("breeding", "Breeding"),
            ("reputation", "Reputation"),
            ("stewardship", "Stewardship"),
            ("tournaments", "Tournaments"),
        ],
        Ability::Stealth => &[("blendIn", "Blend In"), ("sneak", "Sneak")],
        Ability::Survival => &[
            ("forage", "Forage"),
            ("hunt", "Hunt"),
            ("orientation", "Orientation"),
            ("track", "Track"),
        ],
        Ability::Thievery => &[
            ("picklock", "Pick Lock"),
            ("sleightOfHand", "Sleight of Hand"),
            ("steal", "Steal"),
        ],
        Ability::Warfare => &[
            ("command", "Command"),
            ("strategy", "Strategy"),
            ("tactics", "Tactics"),
        ],
        Ability::Will => &[
            ("courage", "Courage"),
            ("coordinate", "Coordinate"),
            ("dedication", "Dedication"),
        ],
    }
}

/// Returns true if `speciality` may be ranked under `ability`.
///
/// Any speciality is accepted under an ability with an open list.
pub fn is_known_speciality(ability: Ability, speciality: &str) -> bool {
    ability.has_open_specialities() || canonical_speciality(ability, speciality).is_some()
}

/// Resolve a speciality key to its catalog spelling, ignoring case.
pub fn canonical_speciality(ability: Ability, speciality: &str) -> Option<&'static str> {
    let wanted = normalize(speciality);
    specialities(ability)
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(key, _)| *key)
}

/// Display name for a speciality, falling back to the key itself for
/// open-list specialities (e.g. a language name).
pub fn speciality_display_name(ability: Ability, speciality: &str) -> String {
    let wanted = normalize(speciality);
    specialities(ability)
        .iter()
        .find(|(key, _)| normalize(key) == wanted)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| speciality.to_string())
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}
