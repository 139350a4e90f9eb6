use std::path::PathBuf;

use async_trait::async_trait;
use clap::{Args, ValueEnum};
use colored::Colorize;
use sifrp_mechanics::{
    Ability, ActionRequest, AttributeState, Labels, ManualAdjustment, MechError, MechResult,
    ModifierPrompt, PromptOutcome, RawAdjustment, Resolution, ResolvedRoll, RolledCheck, Roller,
    Settings, StaticPrompt, SuppliedFaces,
};
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Args)]
pub struct RollArgs {
    /// Sheet file (JSON)
    sheet: PathBuf,

    /// Ability to test (e.g. agility, animalHandling)
    #[arg(short, long, conflicts_with_all = ["initiative", "weapon"])]
    ability: Option<String>,

    /// Speciality adding its rank as bonus dice
    #[arg(short, long, requires = "ability")]
    speciality: Option<String>,

    /// Roll initiative instead of a test
    #[arg(long, value_enum, conflicts_with = "weapon")]
    initiative: Option<Initiative>,

    /// Attack with a carried weapon
    #[arg(short, long)]
    weapon: Option<String>,

    /// Extra dice rolled
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    bonus_dice: String,

    /// Dice removed from the kept pool
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    penalty_dice: String,

    /// Added to the result
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    bonus: String,

    /// Subtracted from the result
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    penalty: String,

    /// Ask for the modifiers on stdin
    #[arg(short, long)]
    interactive: bool,

    /// Roll these faces instead of only resolving the pool (e.g. 3,6,1,4)
    #[arg(long, value_delimiter = ',')]
    faces: Option<Vec<u32>>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Initiative {
    Combat,
    Intrigue,
}

/// Reads the four modifier fields from stdin, showing the current value of
/// each. A blank line keeps it; `c`, `cancel` or end of input cancels.
struct StdinPrompt {
    defaults: RawAdjustment,
}

#[async_trait]
impl ModifierPrompt for StdinPrompt {
    async fn ask(&self) -> MechResult<PromptOutcome> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut raw = self.defaults.clone();
        eprintln!("Modifiers (blank keeps the value shown, 'c' cancels)");

        let fields = [
            ("Bonus dice", &mut raw.bonus_dice),
            ("Penalty dice", &mut raw.penalty_dice),
            ("Bonus modifier", &mut raw.bonus_flat),
            ("Penalty modifier", &mut raw.penalty_flat),
        ];
        for (label, field) in fields {
            eprint!("  {label} [{field}]: ");
            let line = lines
                .next_line()
                .await
                .map_err(|e| MechError::Prompt(e.to_string()))?;
            let Some(line) = line else {
                return Ok(PromptOutcome::Cancelled);
            };
            let line = line.trim();
            if line.eq_ignore_ascii_case("c") || line.eq_ignore_ascii_case("cancel") {
                return Ok(PromptOutcome::Cancelled);
            }
            if !line.is_empty() {
                *field = line.to_string();
            }
        }
        Ok(PromptOutcome::Submitted(ManualAdjustment::from_raw(&raw)))
    }
}

pub async fn run(settings: &Settings, args: &RollArgs) -> Result<(), String> {
    let actor = super::load_actor(settings, &args.sheet)?;
    let request = build_request(actor.state(), args)?;
    let labels = settings.label_catalog().map_err(|e| e.to_string())?;

    let raw = RawAdjustment {
        bonus_dice: args.bonus_dice.clone(),
        penalty_dice: args.penalty_dice.clone(),
        bonus_flat: args.bonus.clone(),
        penalty_flat: args.penalty.clone(),
    };
    let prompt: Box<dyn ModifierPrompt> = if args.interactive {
        Box::new(StdinPrompt { defaults: raw })
    } else {
        Box::new(StaticPrompt::submit(ManualAdjustment::from_raw(&raw)))
    };
    let roller = Roller::new(prompt);

    match &args.faces {
        Some(faces) => {
            let engine = SuppliedFaces::new(faces.iter().copied());
            let Some(rolled) = roller
                .roll(&actor, &request, &engine)
                .await
                .map_err(|e| e.to_string())?
            else {
                println!("roll cancelled");
                return Ok(());
            };
            if engine.remaining() > 0 {
                tracing::warn!(unused = engine.remaining(), "more faces supplied than rolled");
            }
            if args.json {
                print_json(&rolled)
            } else {
                print_rolled(actor.name(), &rolled, &labels);
                Ok(())
            }
        }
        None => {
            let resolution = roller
                .resolve(&actor, &request)
                .await
                .map_err(|e| e.to_string())?;
            let Resolution::Resolved(resolved) = resolution else {
                println!("roll cancelled");
                return Ok(());
            };
            if args.json {
                print_json(&resolved)
            } else {
                print_resolved(actor.name(), &resolved, &labels);
                Ok(())
            }
        }
    }
}

fn build_request(state: &AttributeState, args: &RollArgs) -> Result<ActionRequest, String> {
    match (&args.ability, args.initiative, &args.weapon) {
        (Some(ability), None, None) => {
            let ability = Ability::parse(ability).map_err(|e| e.to_string())?;
            match &args.speciality {
                Some(speciality) => ActionRequest::speciality_test(state, ability, speciality)
                    .map_err(|e| e.to_string()),
                None => Ok(ActionRequest::ability_test(state, ability)),
            }
        }
        (None, Some(Initiative::Combat), None) => Ok(ActionRequest::combat_initiative(state)),
        (None, Some(Initiative::Intrigue), None) => Ok(ActionRequest::intrigue_initiative(state)),
        (None, None, Some(name)) => {
            let weapon = state.weapon(name).map_err(|e| e.to_string())?;
            ActionRequest::attack(state, weapon).map_err(|e| e.to_string())
        }
        _ => Err("specify one of --ability, --initiative or --weapon".into()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}

fn print_resolved(name: &str, resolved: &ResolvedRoll, labels: &dyn Labels) {
    println!("  {}", name.bold());
    for line in resolved.narrative.render(labels).lines() {
        println!("  {line}");
    }
    println!();
    println!("  formula: {}", resolved.formula.to_string().cyan());
}

fn print_rolled(name: &str, rolled: &RolledCheck, labels: &dyn Labels) {
    print_resolved(name, &rolled.resolved, labels);
    println!("  rolled:  {}", rolled.outcome);
    println!("  total:   {}", rolled.total().to_string().bold());
}
