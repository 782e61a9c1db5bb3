//! Boss encounters
//!
//! Designated rounds field a hand-authored roster and open with a scripted
//! effect on the freshly built combat boards, before the first tick.

use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::state::Boards;

/// Scripted pre-combat effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "camelCase"))]
pub enum BossEffect {
    /// Every living player unit loses `amount` health, never dropping below 1.
    DrainAll { amount: i32 },
    /// The highest-attack enemy gains `amount` attack. Ties go to the first.
    SurgeStrongest { amount: i32 },
}

/// A boss round
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct BossDefinition {
    pub round: u32,
    pub name: String,
    /// Shown the round before
    pub warning: String,
    /// Template ids of the boss roster
    pub roster: Vec<String>,
    pub effect: BossEffect,
    /// Log line when the effect fires
    pub opening: String,
}

pub fn boss_for_round(bosses: &[BossDefinition], round: u32) -> Option<&BossDefinition> {
    bosses.iter().find(|b| b.round == round)
}

/// Warning for a boss arriving next round.
pub fn upcoming_warning(bosses: &[BossDefinition], round: u32) -> Option<&str> {
    boss_for_round(bosses, round + 1).map(|b| b.warning.as_str())
}

impl BossEffect {
    pub fn apply(self, boards: &mut Boards) {
        match self {
            BossEffect::DrainAll { amount } => {
                for unit in boards.player.iter_mut().filter(|u| u.is_alive()) {
                    unit.health = (unit.health - amount).max(1);
                }
            }
            BossEffect::SurgeStrongest { amount } => {
                let strongest = boards
                    .enemy
                    .iter_mut()
                    .filter(|u| u.is_alive())
                    .reduce(|best, u| if u.attack > best.attack { u } else { best });
                if let Some(unit) = strongest {
                    unit.attack += amount;
                }
            }
        }
    }
}

/// Runs the round's boss effect, if any, and returns its opening line.
pub fn apply_boss_effect(
    bosses: &[BossDefinition],
    round: u32,
    boards: &mut Boards,
) -> Option<String> {
    let boss = boss_for_round(bosses, round)?;
    boss.effect.apply(boards);
    crate::log::debug("boss", &boss.opening);
    Some(boss.opening.clone())
}
