//! Error types for the mechanics engine.
//!
//! Resolution itself never fails. These errors come from the collaborators
//! around it: loading sheets and settings, building requests from a sheet,
//! and the prompt and dice engine implementations.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// An ability key does not name one of the SIFRP abilities.
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// A speciality is not listed under the given ability.
    #[error("unknown speciality '{speciality}' for ability {ability}")]
    UnknownSpeciality {
        /// The ability the speciality was looked up under.
        ability: String,
        /// The speciality key that was not found.
        speciality: String,
    },

    /// A weapon definition violates the weapon rules.
    #[error("invalid weapon '{name}': {reason}")]
    InvalidWeapon {
        /// Weapon name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A weapon was not found on the character sheet.
    #[error("weapon '{0}' not found")]
    WeaponNotFound(String),

    /// A character sheet could not be read or parsed.
    #[error("invalid sheet: {0}")]
    InvalidSheet(String),

    /// The settings file is malformed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// The label catalog is malformed.
    #[error("invalid label catalog: {0}")]
    InvalidLabels(String),

    /// The interactive prompt failed before the user answered.
    #[error("prompt failed: {0}")]
    Prompt(String),

    /// The dice engine could not evaluate a formula.
    #[error("dice engine error: {0}")]
    Engine(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
