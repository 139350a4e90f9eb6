//! Values derived from ability ranks.
//!
//! Gauge maxima, defenses and available points are recomputed from ranks
//! rather than stored. Current gauge values are never clamped here: a sheet
//! whose maximum dropped keeps its recorded value until play adjusts it.
//! Sums and products saturate at `u32::MAX`.

use crate::rules::Ability;
use crate::sheet::{Abilities, AttributeState, Character, Track};

/// Health and composure hold three points per rank.
fn gauge_max(rank: u32) -> u32 {
    rank.saturating_mul(3)
}

fn sum(values: &[u32]) -> u32 {
    values.iter().fold(0, |acc, v| acc.saturating_add(*v))
}

impl AttributeState {
    /// A fresh actor with the given ranks, health and composure full.
    pub fn new_from_ranks(name: impl Into<String>, abilities: Abilities) -> Self {
        let mut state = Self {
            name: name.into(),
            abilities,
            ..Self::default()
        };
        state.derive();
        state.health = Track::full(state.health.max);
        state.composure = Track::full(state.composure.max);
        state
    }

    /// Recompute gauge maxima, defenses and available destiny.
    pub fn derive(&mut self) {
        let rank = |ability| self.abilities.rank(ability);
        let endurance = rank(Ability::Endurance);
        let will = rank(Ability::Will);

        self.health.max = gauge_max(endurance);
        self.injuries.max = endurance;
        self.fatigue.max = endurance;
        self.composure.max = gauge_max(will);
        self.frustration.max = will;

        self.intrigue_defense.value = sum(&[
            rank(Ability::Awareness),
            rank(Ability::Cunning),
            rank(Ability::Status),
            self.intrigue_defense.bonus,
        ]);

        self.combat_defense.value = sum(&[
            rank(Ability::Agility),
            rank(Ability::Athletics),
            rank(Ability::Awareness),
            self.combat_defense.bonus,
        ])
        .saturating_sub(self.armor.penalty);

        let destiny = &mut self.destiny;
        destiny.available = sum(&[destiny.base, destiny.bonus])
            .saturating_sub(sum(&[destiny.invested, destiny.spent, destiny.burnt]));
    }

    /// Change an ability rank and recompute derived values.
    ///
    /// Health follows a new Endurance rank, and composure a new Will rank,
    /// only when the gauge was full before the change.
    pub fn set_rank(&mut self, ability: Ability, rank: u32) {
        let health_was_full = self.health.value >= gauge_max(self.abilities.rank(Ability::Endurance));
        let composure_was_full = self.composure.value >= gauge_max(self.abilities.rank(Ability::Will));

        self.abilities.set_rank(ability, rank);
        self.derive();

        if ability == Ability::Endurance && health_was_full {
            self.health.value = self.health.max;
        }
        if ability == Ability::Will && composure_was_full {
            self.composure.value = self.composure.max;
        }
    }
}

impl Character {
    /// Recompute the shared values plus wounds maximum, glory and experience.
    pub fn derive(&mut self) {
        self.state.derive();
        self.wounds.max = self.state.abilities.rank(Ability::Endurance);
        self.glory.available = self.glory.total.saturating_sub(self.glory.spent);
        self.experience.available = self.experience.total.saturating_sub(self.experience.spent);
    }
}
