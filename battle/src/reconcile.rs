//! Outcome reconciliation
//!
//! Writes a finished combat back into the campaign. Only health and death
//! flow back from combat copies; everything else on the persistent unit is
//! authoritative.

use alloc::vec::Vec;

use crate::state::{Boards, Campaign, DRAW_ENTROPY, LOSS_ENTROPY, XP_PER_LEVEL};
use crate::types::{BoardUnit, CombatResult, CombatUnit};

/// What reconciliation changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub result: CombatResult,
    pub hp_lost: i32,
    pub level_ups: u32,
    pub card_discarded: bool,
}

/// Scores the combat boards by their survivors.
pub fn score(boards: &Boards) -> CombatResult {
    CombatResult::from_survivors(
        boards.player.iter().any(|u| u.is_alive()),
        boards.enemy.iter().any(|u| u.is_alive()),
    )
}

fn copy_back(unit: &mut BoardUnit, combat: &CombatUnit) {
    unit.current_health = combat.health.clamp(0, unit.max_health);
    unit.dead = combat.dead || combat.health <= 0;
}

fn prune_dead(board: &mut Vec<BoardUnit>) {
    board.retain(|u| u.is_alive());
}

pub fn reconcile(
    campaign: &mut Campaign,
    boards: &Boards,
    result: CombatResult,
    card_spent: bool,
) -> Reconciliation {
    campaign.level_queue.clear();
    let mut hp_lost = 0;

    match result {
        CombatResult::Win => {
            for cu in &boards.player {
                let Some(unit) = campaign.board.iter_mut().find(|u| u.id == cu.id) else {
                    continue;
                };
                copy_back(unit, cu);
                if unit.is_alive() {
                    unit.xp += 1;
                    if unit.xp >= XP_PER_LEVEL {
                        unit.xp = 0;
                        campaign.level_queue.push(unit.id);
                    }
                }
            }
            prune_dead(&mut campaign.board);
        }
        CombatResult::Loss => {
            let damage: i32 = boards
                .enemy
                .iter()
                .filter(|u| u.is_alive())
                .map(|u| u.attack)
                .sum();
            let before = campaign.hp;
            campaign.hp = (campaign.hp - damage).max(0);
            hp_lost = before - campaign.hp;

            for cu in &boards.player {
                if let Some(unit) = campaign.board.iter_mut().find(|u| u.id == cu.id) {
                    copy_back(unit, cu);
                    unit.entropy += LOSS_ENTROPY;
                }
            }
            prune_dead(&mut campaign.board);
        }
        CombatResult::Draw => {
            campaign.board = core::mem::take(&mut campaign.snapshot);
            for unit in campaign.board.iter_mut() {
                unit.entropy += DRAW_ENTROPY;
            }
        }
    }

    let card_discarded = card_spent && campaign.armed_card.is_some();
    if card_spent {
        campaign.armed_card = None;
    }

    Reconciliation {
        result,
        hp_lost,
        level_ups: campaign.level_queue.len() as u32,
        card_discarded,
    }
}
