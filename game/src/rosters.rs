//! Enemy roster supply
//!
//! The session asks a [`RosterSource`] for each round's enemy board. The
//! default [`ScaledRosters`] walks a fixed list of base rosters, swaps in the
//! boss roster on boss rounds and scales stats with the round and heat.

use alloc::vec::Vec;

use conductor_battle::{GameError, GameResult, UnitTemplate};

/// Supplies the enemy roster for a round.
pub trait RosterSource {
    fn roster(&mut self, round: u32, heat: u8) -> GameResult<Vec<UnitTemplate>>;
}

/// Attack bonus for a round: one per round after the first.
pub fn round_attack_bonus(round: u32) -> i32 {
    round.saturating_sub(1) as i32
}

/// Health bonus for a round: half the attack bonus, rounded down.
pub fn round_health_bonus(round: u32) -> i32 {
    round_attack_bonus(round) / 2
}

/// Applies round scaling plus heat amplification to a base template.
pub fn scale(template: &UnitTemplate, round: u32, heat: u8) -> UnitTemplate {
    let mut scaled = template.clone();
    scaled.attack += round_attack_bonus(round) + heat as i32;
    scaled.health += round_health_bonus(round);
    scaled
}

#[derive(Debug, Clone, Default)]
pub struct ScaledRosters {
    bases: Vec<Vec<UnitTemplate>>,
    bosses: Vec<(u32, Vec<UnitTemplate>)>,
}

impl ScaledRosters {
    pub fn new(bases: Vec<Vec<UnitTemplate>>, bosses: Vec<(u32, Vec<UnitTemplate>)>) -> Self {
        Self { bases, bosses }
    }

    /// Base and boss rosters from the bundled asset data.
    pub fn from_assets() -> GameResult<Self> {
        let bases = conductor_assets::ENEMY_BASES
            .iter()
            .map(|ids| conductor_assets::templates(ids))
            .collect::<GameResult<Vec<_>>>()?;
        let bosses = conductor_assets::get_bosses()
            .into_iter()
            .map(|boss| {
                let ids: Vec<&str> = boss.roster.iter().map(|id| id.as_str()).collect();
                conductor_assets::templates(&ids).map(|roster| (boss.round, roster))
            })
            .collect::<GameResult<Vec<_>>>()?;
        Ok(Self::new(bases, bosses))
    }

    fn base_for(&self, round: u32) -> Option<&Vec<UnitTemplate>> {
        if let Some((_, roster)) = self.bosses.iter().find(|(r, _)| *r == round) {
            return Some(roster);
        }
        let last = self.bases.len().checked_sub(1)?;
        let index = (round.saturating_sub(1) as usize).min(last);
        self.bases.get(index)
    }
}

impl RosterSource for ScaledRosters {
    fn roster(&mut self, round: u32, heat: u8) -> GameResult<Vec<UnitTemplate>> {
        let base = self.base_for(round).ok_or(GameError::TemplateNotFound)?;
        Ok(base.iter().map(|t| scale(t, round, heat)).collect())
    }
}
