use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use sifrp_mechanics::rules::speciality_display_name;
use sifrp_mechanics::{Actor, RollModifiers, Settings};

pub fn run(settings: &Settings, sheet: &Path) -> Result<(), String> {
    let actor = super::load_actor(settings, sheet)?;
    let state = actor.state();

    let kind = match &actor {
        Actor::Character(_) => "character",
        Actor::Npc(_) => "npc",
    };
    println!("  {} [{}]", actor.name().bold(), kind.dimmed());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ability", "Rank", "Specialities"]);
    for (ability, score) in state.abilities.iter() {
        let specialities: Vec<String> = score
            .specialities
            .iter()
            .filter(|(_, rank)| **rank > 0)
            .map(|(key, rank)| format!("{} {rank}B", speciality_display_name(ability, key)))
            .collect();
        table.add_row(vec![
            ability.display_name().to_string(),
            score.value.to_string(),
            specialities.join(", "),
        ]);
    }
    println!("{table}");
    println!();

    println!("  health:      {}", state.health);
    println!("  injuries:    {}", state.injuries);
    if let Actor::Character(character) = &actor {
        println!("  wounds:      {}", character.wounds);
    }
    println!("  fatigue:     {}", state.fatigue);
    println!("  composure:   {}", state.composure);
    println!("  frustration: {}", state.frustration);
    println!();
    println!("  combat defense:   {}", state.combat_defense.value);
    println!("  intrigue defense: {}", state.intrigue_defense.value);
    if !state.armor.kind.is_empty() || state.armor.rating > 0 {
        println!(
            "  armor:            {} (AR {}, AP -{}, bulk {})",
            if state.armor.kind.is_empty() {
                "armor"
            } else {
                state.armor.kind.as_str()
            },
            state.armor.rating,
            state.armor.penalty,
            state.armor.bulk
        );
    }
    println!("  destiny:          {}", state.destiny.available);
    if let Actor::Character(character) = &actor {
        println!("  glory:            {}", character.glory.available);
        println!("  experience:       {}", character.experience.available);
    }

    let modifiers = actor.roll_modifiers();
    let mut penalties = Vec::new();
    if modifiers.test_dice_penalty > 0 {
        penalties.push(format!("-{}D on every test", modifiers.test_dice_penalty));
    }
    if modifiers.global_result_penalty > 0 {
        penalties.push(format!(
            "-{} to every result",
            modifiers.global_result_penalty
        ));
    }
    if modifiers.frustration_penalty > 0 {
        penalties.push(format!(
            "-{}D on Deception and Persuasion",
            modifiers.frustration_penalty
        ));
    }
    if modifiers.armor_penalty > 0 {
        penalties.push(format!("-{} to Agility results", modifiers.armor_penalty));
    }
    println!();
    if penalties.is_empty() {
        println!("  penalties: {}", "none".dimmed());
    } else {
        println!("  penalties: {}", penalties.join(", ").yellow());
    }

    if !state.weapons.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            "Weapon", "Kind", "Quality", "Test", "Training", "Damage", "Qualities",
        ]);
        for weapon in &state.weapons {
            let ability = weapon.attack_ability();
            let test = if weapon.speciality.is_empty() {
                ability.display_name().to_string()
            } else {
                format!(
                    "{} | {}",
                    ability.display_name(),
                    speciality_display_name(ability, &weapon.speciality)
                )
            };
            table.add_row(vec![
                weapon.name.clone(),
                weapon.kind.to_string(),
                weapon.quality.to_string(),
                test,
                format!("{}D", weapon.training),
                weapon.damage(state).to_string(),
                weapon.qualities.clone(),
            ]);
        }
        println!();
        println!("{table}");
    }

    Ok(())
}
