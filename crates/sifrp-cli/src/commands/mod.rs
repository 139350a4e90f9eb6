pub mod abilities;
pub mod roll;
pub mod show;

use std::path::Path;

use sifrp_mechanics::{Actor, Settings};

/// Read a sheet, give missing abilities the configured rank and recompute
/// derived values.
fn load_actor(settings: &Settings, path: &Path) -> Result<Actor, String> {
    let mut actor = Actor::load(path).map_err(|e| e.to_string())?;
    actor
        .state_mut()
        .abilities
        .fill_missing(settings.rank_default);
    actor.derive();
    Ok(actor)
}
