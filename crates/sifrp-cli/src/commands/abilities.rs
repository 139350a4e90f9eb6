use comfy_table::{ContentArrangement, Table};
use sifrp_mechanics::Ability;
use sifrp_mechanics::rules::specialities;

pub fn run() -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Ability", "Key", "Specialities"]);

    for ability in Ability::ALL {
        let names = if ability.has_open_specialities() {
            "(any language)".to_string()
        } else {
            specialities(ability)
                .iter()
                .map(|(_, name)| *name)
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![
            ability.display_name().to_string(),
            ability.key().to_string(),
            names,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} abilities", Ability::ALL.len());
    Ok(())
}
