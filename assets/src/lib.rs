//! Default content for Conductor: the unit pool, intervention cards, boss
//! table and enemy base rosters.
//!
//! Compiled from `data/*.json` by build.rs, so no JSON parsing happens at
//! runtime and the crate stays no_std compatible.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use conductor_battle::{Catalog, GameError, GameResult, UnitTemplate};

mod generated {
    include!(concat!(env!("OUT_DIR"), "/assets_generated.rs"));
}

pub use generated::{get_bosses, get_intervention_cards, get_unit_pool, ENEMY_BASES, STARTERS};

/// Cards and bosses the engine runs with by default.
pub fn default_catalog() -> Catalog {
    Catalog::new(get_intervention_cards(), get_bosses())
}

/// Looks up a unit template by id.
pub fn template(id: &str) -> GameResult<UnitTemplate> {
    get_unit_pool()
        .into_iter()
        .find(|t| t.template_id == id)
        .ok_or(GameError::TemplateNotFound)
}

/// Resolves a list of template ids.
pub fn templates(ids: &[&str]) -> GameResult<Vec<UnitTemplate>> {
    let pool = get_unit_pool();
    ids.iter()
        .map(|id| {
            pool.iter()
                .find(|t| t.template_id == *id)
                .cloned()
                .ok_or(GameError::TemplateNotFound)
        })
        .collect()
}

pub fn starter_templates() -> GameResult<Vec<UnitTemplate>> {
    templates(STARTERS)
}
