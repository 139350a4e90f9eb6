//! Driving one check from request to rolled dice.
//!
//! The [`Roller`] asks its prompt for manual adjustments, snapshots the
//! actor once the prompt has answered, resolves the pool and hands the
//! formula to a [`DiceEngine`]. A dismissed prompt ends the check before
//! anything is read or rolled.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use serde::Serialize;

use crate::dice::{PoolFormula, PoolRoll};
use crate::error::MechResult;
use crate::modifiers::RollModifiers;
use crate::prompt::{ModifierPrompt, PromptOutcome};
use crate::request::{ActionRequest, ManualAdjustment};
use crate::resolution::{Resolution, ResolvedRoll, resolve_pool};
use crate::sheet::{Actor, AttributeState, Character, RollData};

/// A snapshot that can supply the variable context of a formula.
pub trait RollContext: RollModifiers {
    /// Ability and speciality shortcuts.
    fn roll_data(&self) -> RollData;
}

impl RollContext for AttributeState {
    fn roll_data(&self) -> RollData {
        AttributeState::roll_data(self)
    }
}

impl RollContext for Character {
    fn roll_data(&self) -> RollData {
        self.state.roll_data()
    }
}

impl RollContext for Actor {
    fn roll_data(&self) -> RollData {
        self.state().roll_data()
    }
}

/// Where a check reads the actor's condition from.
///
/// `snapshot` is called once per check, after the prompt has answered, so
/// changes made while the player was deciding are seen.
pub trait AttributeSource {
    /// The owned copy a resolution works from.
    type Snapshot: RollContext;

    /// Copy the current state.
    fn snapshot(&self) -> Self::Snapshot;
}

impl AttributeSource for AttributeState {
    type Snapshot = AttributeState;

    fn snapshot(&self) -> AttributeState {
        self.clone()
    }
}

impl AttributeSource for Character {
    type Snapshot = Character;

    fn snapshot(&self) -> Character {
        self.clone()
    }
}

impl AttributeSource for Actor {
    type Snapshot = Actor;

    fn snapshot(&self) -> Actor {
        self.clone()
    }
}

impl<T: AttributeSource> AttributeSource for RwLock<T> {
    type Snapshot = T::Snapshot;

    fn snapshot(&self) -> T::Snapshot {
        // A writer that panicked leaves the last state it wrote.
        match self.read() {
            Ok(guard) => guard.snapshot(),
            Err(poisoned) => poisoned.into_inner().snapshot(),
        }
    }
}

impl<T: AttributeSource + ?Sized> AttributeSource for Arc<T> {
    type Snapshot = T::Snapshot;

    fn snapshot(&self) -> T::Snapshot {
        (**self).snapshot()
    }
}

/// Evaluates pool formulas.
#[async_trait]
pub trait DiceEngine: Send + Sync {
    /// Roll `formula`, resolving variables from `data`.
    async fn evaluate(&self, formula: &PoolFormula, data: &RollData) -> MechResult<PoolRoll>;
}

/// An engine that reads faces from a fixed list instead of rolling.
///
/// Each evaluation consumes the faces it needs from the front of the list
/// and fails once the list runs short.
#[derive(Debug, Default)]
pub struct SuppliedFaces {
    faces: Mutex<VecDeque<u32>>,
}

impl SuppliedFaces {
    /// Serve `faces` in order.
    pub fn new(faces: impl IntoIterator<Item = u32>) -> Self {
        Self {
            faces: Mutex::new(faces.into_iter().collect()),
        }
    }

    /// Faces not yet used.
    pub fn remaining(&self) -> usize {
        match self.faces.lock() {
            Ok(faces) => faces.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }
}

#[async_trait]
impl DiceEngine for SuppliedFaces {
    async fn evaluate(&self, formula: &PoolFormula, _data: &RollData) -> MechResult<PoolRoll> {
        let taken: Vec<u32> = {
            let mut faces = match self.faces.lock() {
                Ok(faces) => faces,
                Err(poisoned) => poisoned.into_inner(),
            };
            let n = usize::try_from(formula.dice())
                .map_or(faces.len(), |dice| dice.min(faces.len()));
            faces.drain(..n).collect()
        };
        formula.evaluate(&taken)
    }
}

/// A resolved pool together with the dice the engine produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolledCheck {
    /// What was rolled and why.
    pub resolved: ResolvedRoll,
    /// The engine's result.
    pub outcome: PoolRoll,
}

impl RolledCheck {
    /// Final result of the check.
    pub fn total(&self) -> i64 {
        self.outcome.total()
    }
}

/// Runs checks through a modifier prompt.
#[derive(Debug, Clone)]
pub struct Roller<P> {
    prompt: P,
}

impl<P: ModifierPrompt> Roller<P> {
    /// Create a roller that asks `prompt` before every check.
    pub fn new(prompt: P) -> Self {
        Self { prompt }
    }

    /// The prompt in use.
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Ask for adjustments and resolve the pool without rolling.
    pub async fn resolve<S: AttributeSource>(
        &self,
        source: &S,
        request: &ActionRequest,
    ) -> MechResult<Resolution> {
        Ok(match self.prepare(source, request).await? {
            Some((resolved, _)) => Resolution::Resolved(resolved),
            None => Resolution::Cancelled,
        })
    }

    /// Resolve the pool and roll it. `None` when the player cancelled.
    pub async fn roll<S, E>(
        &self,
        source: &S,
        request: &ActionRequest,
        engine: &E,
    ) -> MechResult<Option<RolledCheck>>
    where
        S: AttributeSource,
        E: DiceEngine + ?Sized,
    {
        let Some((resolved, snapshot)) = self.prepare(source, request).await? else {
            return Ok(None);
        };
        let outcome = engine
            .evaluate(&resolved.formula, &snapshot.roll_data())
            .await?;
        tracing::debug!(
            formula = %resolved.formula,
            total = outcome.total(),
            "pool rolled"
        );
        Ok(Some(RolledCheck { resolved, outcome }))
    }

    async fn prepare<S: AttributeSource>(
        &self,
        source: &S,
        request: &ActionRequest,
    ) -> MechResult<Option<(ResolvedRoll, S::Snapshot)>> {
        let manual: ManualAdjustment = match self.prompt.ask().await? {
            PromptOutcome::Submitted(manual) => manual,
            PromptOutcome::Cancelled => {
                tracing::debug!(label = %request.label, "modifier prompt cancelled");
                return Ok(None);
            }
        };
        let snapshot = source.snapshot();
        let modifiers = snapshot.roll_modifiers();
        let resolved = resolve_pool(request, &modifiers, &manual);
        Ok(Some((resolved, snapshot)))
    }
}
