//! Check resolution for A Song of Ice and Fire Roleplaying.
//!
//! Turns an ability test, initiative roll or attack into a drop-lowest dice
//! pool. The actor's wounds, injuries, fatigue, frustration and armor shrink
//! the kept pool or the flat modifier, the player may add manual bonuses or
//! penalties through a prompt, and every contribution is itemized in a
//! breakdown rendered through injectable labels.

pub mod config;
pub mod dice;
pub mod error;
pub mod modifiers;
pub mod prompt;
pub mod request;
pub mod resolution;
pub mod roller;
pub mod rules;
pub mod sheet;

pub use config::Settings;
pub use dice::{PoolFormula, PoolRoll, RolledDie};
pub use error::{MechError, MechResult};
pub use modifiers::{ModifierSet, RollModifiers};
pub use prompt::{ModifierPrompt, PromptOutcome, StaticPrompt};
pub use request::{ActionRequest, ManualAdjustment, RawAdjustment, RollAction, RollKind};
pub use resolution::{
    DefaultLabels, LabelCatalog, LabelKey, Labels, Resolution, ResolvedRoll, RollNarrative,
    resolve_pool,
};
pub use roller::{AttributeSource, DiceEngine, RollContext, RolledCheck, Roller, SuppliedFaces};
pub use rules::Ability;
pub use sheet::{Actor, AttributeState, Character, RollData, Track, Weapon};
