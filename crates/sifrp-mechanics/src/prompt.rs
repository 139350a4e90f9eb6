//! Asking the player for ad hoc bonuses and penalties.
//!
//! Before every roll the player may add bonus or penalty dice and flat
//! modifiers, or dismiss the prompt to abort the roll. Hosts implement
//! [`ModifierPrompt`] over whatever UI they have; [`StaticPrompt`] answers
//! without asking.

use async_trait::async_trait;

use crate::error::MechResult;
use crate::request::ManualAdjustment;

/// The player's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Roll with these adjustments.
    Submitted(ManualAdjustment),
    /// The prompt was dismissed. No roll happens.
    Cancelled,
}

/// A source of manual adjustments.
///
/// `ask` may wait indefinitely for the player. An `Err` means the prompt
/// itself broke (closed input, lost connection); dismissal is
/// [`PromptOutcome::Cancelled`], not an error.
#[async_trait]
pub trait ModifierPrompt: Send + Sync {
    /// Ask for adjustments.
    async fn ask(&self) -> MechResult<PromptOutcome>;
}

/// A prompt that always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticPrompt {
    outcome: PromptOutcome,
}

impl StaticPrompt {
    /// Always submit `adjustment`.
    pub fn submit(adjustment: ManualAdjustment) -> Self {
        Self {
            outcome: PromptOutcome::Submitted(adjustment),
        }
    }

    /// Always submit no adjustment.
    pub fn none() -> Self {
        Self::submit(ManualAdjustment::none())
    }

    /// Always cancel.
    pub fn cancel() -> Self {
        Self {
            outcome: PromptOutcome::Cancelled,
        }
    }
}

#[async_trait]
impl ModifierPrompt for StaticPrompt {
    async fn ask(&self) -> MechResult<PromptOutcome> {
        Ok(self.outcome)
    }
}

#[async_trait]
impl<P: ModifierPrompt + ?Sized> ModifierPrompt for Box<P> {
    async fn ask(&self) -> MechResult<PromptOutcome> {
        (**self).ask().await
    }
}
