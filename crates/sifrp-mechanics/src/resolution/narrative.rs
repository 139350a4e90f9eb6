//! Itemized breakdown of how a pool was built.

use std::fmt;

use serde::Serialize;

use super::PoolTally;
use super::labels::{LabelKey, Labels};
use crate::modifiers::ModifierSet;
use crate::request::{ActionRequest, ManualAdjustment, RollAction};

/// Where a listed bonus or penalty came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModifierSource {
    /// Bonus dice entered by the player.
    ManualBonusDice,
    /// Flat bonus entered by the player.
    ManualBonusFlat,
    /// Penalty dice entered by the player.
    ManualPenaltyDice,
    /// Flat penalty entered by the player.
    ManualPenaltyFlat,
    /// Weapon training traded for kept dice.
    Training,
    /// Wounds.
    Wounds,
    /// Frustration on a social test.
    Frustration,
    /// Injuries and fatigue together.
    InjuryFatigue,
    /// Armor on an Agility test.
    Armor,
}

impl ModifierSource {
    /// Returns true if the amount counts dice rather than result points.
    pub fn is_dice(self) -> bool {
        matches!(
            self,
            Self::ManualBonusDice
                | Self::ManualPenaltyDice
                | Self::Training
                | Self::Wounds
                | Self::Frustration
        )
    }

    fn name(self, labels: &dyn Labels) -> String {
        let key = match self {
            Self::ManualBonusDice => LabelKey::ManualBonusDice,
            Self::ManualBonusFlat => LabelKey::ManualBonusFlat,
            Self::ManualPenaltyDice => LabelKey::ManualPenaltyDice,
            Self::ManualPenaltyFlat => LabelKey::ManualPenaltyFlat,
            Self::Training => LabelKey::Training,
            Self::Wounds => LabelKey::Wounds,
            Self::Frustration => LabelKey::Frustration,
            Self::Armor => LabelKey::ArmorPenalty,
            Self::InjuryFatigue => {
                return format!(
                    "{}/{}",
                    labels.text(LabelKey::Injuries),
                    labels.text(LabelKey::Fatigue)
                );
            }
        };
        labels.text(key).into_owned()
    }
}

/// One line of the bonuses or penalties list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NarrativeItem {
    /// Where the modifier came from.
    pub source: ModifierSource,
    /// Its magnitude, always positive.
    pub amount: i64,
}

impl NarrativeItem {
    fn render(&self, sign: char, labels: &dyn Labels) -> String {
        let unit = if self.source.is_dice() { "D" } else { "" };
        format!(
            "{}: {sign}{}{unit}",
            self.source.name(labels),
            self.amount
        )
    }
}

fn listed(items: &[(ModifierSource, i64)]) -> Vec<NarrativeItem> {
    items
        .iter()
        .filter(|(_, amount)| *amount > 0)
        .map(|&(source, amount)| NarrativeItem { source, amount })
        .collect()
}

/// A structured explanation of a resolved pool.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollNarrative {
    /// What kind of roll this is.
    pub action: RollAction,
    /// What is being rolled.
    pub label: String,
    /// Test dice.
    pub test_dice: u32,
    /// Bonus dice from the request plus manual bonus dice.
    pub bonus_dice: i64,
    /// Dice dropped, unclamped.
    pub drop: i64,
    /// Bonuses, in display order.
    pub bonuses: Vec<NarrativeItem>,
    /// Penalties, in display order.
    pub penalties: Vec<NarrativeItem>,
}

impl RollNarrative {
    /// Build the breakdown from the values a resolution computed.
    ///
    /// Only positive amounts are listed. Penalties keep a fixed order:
    /// manual dice, manual flat, training, wounds, frustration,
    /// injuries/fatigue, armor.
    pub fn compose(
        request: &ActionRequest,
        modifiers: &ModifierSet,
        manual: &ManualAdjustment,
        tally: &PoolTally,
    ) -> Self {
        let bonuses = listed(&[
            (ModifierSource::ManualBonusDice, i64::from(manual.bonus_dice)),
            (ModifierSource::ManualBonusFlat, i64::from(manual.bonus_flat)),
        ]);

        let penalties = listed(&[
            (ModifierSource::ManualPenaltyDice, i64::from(manual.penalty_dice)),
            (ModifierSource::ManualPenaltyFlat, i64::from(manual.penalty_flat)),
            (ModifierSource::Training, tally.training_penalty_dice),
            (ModifierSource::Wounds, i64::from(modifiers.test_dice_penalty)),
            (ModifierSource::Frustration, tally.frustration_applied),
            (
                ModifierSource::InjuryFatigue,
                i64::from(modifiers.global_result_penalty),
            ),
            (ModifierSource::Armor, tally.armor_applied),
        ]);

        Self {
            action: request.kind.action(),
            label: request.label.clone(),
            test_dice: request.kind.test_dice(),
            bonus_dice: i64::from(request.kind.bonus_dice()) + i64::from(manual.bonus_dice),
            drop: tally.dice_to_drop,
            bonuses,
            penalties,
        }
    }

    /// Amount listed for a penalty source, if any.
    pub fn penalty(&self, source: ModifierSource) -> Option<i64> {
        self.penalties
            .iter()
            .find(|item| item.source == source)
            .map(|item| item.amount)
    }

    /// Amount listed for a bonus source, if any.
    pub fn bonus(&self, source: ModifierSource) -> Option<i64> {
        self.bonuses
            .iter()
            .find(|item| item.source == source)
            .map(|item| item.amount)
    }

    /// Render as plain text, one section per line. Empty sections are
    /// left out.
    pub fn render(&self, labels: &dyn Labels) -> String {
        self.display(labels).to_string()
    }

    /// A [`Display`](fmt::Display) view of the breakdown in the given labels.
    pub fn display<'a>(&'a self, labels: &'a dyn Labels) -> NarrativeDisplay<'a> {
        NarrativeDisplay {
            narrative: self,
            labels,
        }
    }
}

/// A breakdown paired with the labels to print it in.
pub struct NarrativeDisplay<'a> {
    narrative: &'a RollNarrative,
    labels: &'a dyn Labels,
}

impl fmt::Display for NarrativeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { narrative, labels } = self;
        let action = match narrative.action {
            RollAction::Test => LabelKey::TestAction,
            RollAction::CombatInitiative => LabelKey::CombatInitiativeAction,
            RollAction::IntrigueInitiative => LabelKey::IntrigueInitiativeAction,
            RollAction::Attack => LabelKey::AttackAction,
        };

        let head = format!("{} {}", labels.text(action), narrative.label);
        f.write_str(head.trim_end())?;
        write!(
            f,
            "\n{} {}",
            narrative.test_dice,
            labels.text(LabelKey::TestDice)
        )?;
        if narrative.bonus_dice > 0 {
            write!(
                f,
                " + {} {}",
                narrative.bonus_dice,
                labels.text(LabelKey::BonusDice)
            )?;
        }
        write!(f, " ({} {})", labels.text(LabelKey::Drop), narrative.drop)?;

        let sections = [
            (LabelKey::Bonuses, '+', &narrative.bonuses),
            (LabelKey::Penalties, '-', &narrative.penalties),
        ];
        for (heading, sign, items) in sections {
            if items.is_empty() {
                continue;
            }
            let rendered: Vec<String> = items.iter().map(|i| i.render(sign, *labels)).collect();
            write!(f, "\n{}: {}", labels.text(heading), rendered.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::labels::{DefaultLabels, LabelCatalog};
    use crate::resolution::{resolve_pool, tally};
    use crate::request::RollKind;
    use crate::rules::Ability;

    fn persuasion(test_dice: u32) -> ActionRequest {
        ActionRequest::new(
            RollKind::Ability { test_dice },
            Some(Ability::Persuasion),
            "Persuasion",
        )
    }

    #[test]
    fn frustration_is_listed() {
        let mods = ModifierSet {
            frustration_penalty: 2,
            ..ModifierSet::default()
        };
        let roll = resolve_pool(&persuasion(4), &mods, &ManualAdjustment::none());
        assert_eq!(roll.narrative.penalty(ModifierSource::Frustration), Some(2));
        assert!(roll.narrative.bonuses.is_empty());
        insta::assert_snapshot!(roll.narrative.render(&DefaultLabels), @r"
        Test Persuasion
        4 test dice (drop 2)
        Penalties: Frustration: -2D
        ");
    }

    #[test]
    fn unapplied_penalties_are_not_listed() {
        let mods = ModifierSet {
            frustration_penalty: 2,
            armor_penalty: 3,
            ..ModifierSet::default()
        };
        let request = ActionRequest::new(
            RollKind::Ability { test_dice: 3 },
            Some(Ability::Fighting),
            "Fighting",
        );
        let roll = resolve_pool(&request, &mods, &ManualAdjustment::none());
        assert!(roll.narrative.penalties.is_empty());
        assert_eq!(
            roll.narrative.render(&DefaultLabels),
            "Test Fighting\n3 test dice (drop 0)"
        );
    }

    #[test]
    fn penalties_follow_fixed_order() {
        let mods = ModifierSet {
            test_dice_penalty: 1,
            global_result_penalty: 2,
            frustration_penalty: 1,
            armor_penalty: 1,
        };
        let manual = ManualAdjustment {
            bonus_dice: 1,
            penalty_dice: 1,
            bonus_flat: 2,
            penalty_flat: 1,
        };
        let request = ActionRequest::new(
            RollKind::Attack {
                test_dice: 5,
                bonus_dice: 2,
                training_dice: 1,
            },
            Some(Ability::Agility),
            "Whip (Agility)",
        );
        let t = tally(&request, &mods, &manual);
        let narrative = RollNarrative::compose(&request, &mods, &manual, &t);
        let order: Vec<ModifierSource> = narrative.penalties.iter().map(|i| i.source).collect();
        assert_eq!(
            order,
            vec![
                ModifierSource::ManualPenaltyDice,
                ModifierSource::ManualPenaltyFlat,
                ModifierSource::Training,
                ModifierSource::Wounds,
                ModifierSource::InjuryFatigue,
                ModifierSource::Armor,
            ]
        );
        assert_eq!(narrative.bonus(ModifierSource::ManualBonusDice), Some(1));
        assert_eq!(narrative.bonus(ModifierSource::ManualBonusFlat), Some(2));
        assert_eq!(narrative.bonus_dice, 3);

        insta::assert_snapshot!(narrative.render(&DefaultLabels), @r"
        Attack Whip (Agility)
        5 test dice + 3 bonus dice (drop 6)
        Bonuses: Bonus dice: +1D, Bonus modifier: +2
        Penalties: Penalty dice: -1D, Penalty modifier: -1, Training: -1D, Wounds: -1D, Injuries/Fatigue: -2, Armor penalty: -1
        ");
    }

    #[test]
    fn initiative_heading() {
        let request = ActionRequest::new(
            RollKind::IntrigueInitiative {
                test_dice: 4,
                bonus_dice: 1,
            },
            Some(Ability::Status),
            "Status | Reputation",
        );
        let roll = resolve_pool(&request, &ModifierSet::default(), &ManualAdjustment::none());
        assert_eq!(
            roll.narrative.render(&DefaultLabels),
            "Intrigue initiative Status | Reputation\n4 test dice + 1 bonus dice (drop 1)"
        );
    }

    #[test]
    fn empty_label_leaves_bare_heading() {
        let request = ActionRequest::new(
            RollKind::Ability { test_dice: 0 },
            None,
            "",
        );
        let roll = resolve_pool(&request, &ModifierSet::default(), &ManualAdjustment::none());
        assert_eq!(roll.narrative.drop, 0);
        assert_eq!(roll.narrative.render(&DefaultLabels), "Test\n0 test dice (drop 0)");
    }

    #[test]
    fn display_matches_render() {
        let mods = ModifierSet {
            frustration_penalty: 1,
            global_result_penalty: 2,
            ..ModifierSet::default()
        };
        let roll = resolve_pool(&persuasion(3), &mods, &ManualAdjustment::none());
        let shown = format!("{}", roll.narrative.display(&DefaultLabels));
        assert_eq!(shown, roll.narrative.render(&DefaultLabels));
        assert!(shown.ends_with("Penalties: Frustration: -1D, Injuries/Fatigue: -2"));
    }

    #[test]
    fn renders_through_catalog() {
        let labels = LabelCatalog::default()
            .with(LabelKey::TestAction, "Prueba")
            .with(LabelKey::TestDice, "dados de prueba")
            .with(LabelKey::Drop, "descarta")
            .with(LabelKey::Penalties, "Penalizaciones")
            .with(LabelKey::Injuries, "Heridas")
            .with(LabelKey::Fatigue, "Fatiga");
        let mods = ModifierSet {
            global_result_penalty: 1,
            ..ModifierSet::default()
        };
        let roll = resolve_pool(&persuasion(2), &mods, &ManualAdjustment::none());
        assert_eq!(
            roll.narrative.render(&labels),
            "Prueba Persuasion\n2 dados de prueba (descarta 0)\nPenalizaciones: Heridas/Fatiga: -1"
        );
    }
}
