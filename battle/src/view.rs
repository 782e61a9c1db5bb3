//! View types for UI serialization
//!
//! Snapshot of everything the presentation layer draws. JSON hosts use the
//! serde derives; compact hosts use the SCALE codec.

use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::engine::CombatEngine;
use crate::rules::Rule;
use crate::scheduler::Millis;
use crate::state::*;
use crate::types::*;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// View of a unit on either board
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct UnitView {
    pub id: UnitId,
    pub template_id: String,
    pub name: String,
    pub attack: i32,
    pub health: i32,
    pub max_health: i32,
    pub polarity: u8,
    pub keyword: Option<Keyword>,
    pub entropy: u32,
    pub xp: u8,
    pub level: u32,
    pub dead: bool,
    /// Hit by the last exchange
    pub flashing: bool,
}

impl From<&BoardUnit> for UnitView {
    fn from(unit: &BoardUnit) -> Self {
        Self {
            id: unit.id,
            template_id: unit.card.template_id.clone(),
            name: unit.card.name.clone(),
            attack: unit.card.attack,
            health: unit.current_health,
            max_health: unit.max_health,
            polarity: unit.card.polarity,
            keyword: unit.card.keyword,
            entropy: unit.entropy,
            xp: unit.xp,
            level: unit.level,
            dead: unit.dead,
            flashing: false,
        }
    }
}

impl UnitView {
    /// Combat stats, with entropy and progress taken from the persistent unit.
    fn from_combat(unit: &CombatUnit, persistent: Option<&BoardUnit>, flashing: bool) -> Self {
        Self {
            id: unit.id,
            template_id: unit.template_id.clone(),
            name: unit.name.clone(),
            attack: unit.attack,
            health: unit.health.max(0),
            max_health: unit.max_health,
            polarity: unit.polarity,
            keyword: unit.keyword,
            entropy: persistent.map_or(0, |u| u.entropy),
            xp: persistent.map_or(0, |u| u.xp),
            level: persistent.map_or(1, |u| u.level),
            dead: !unit.is_alive(),
            flashing,
        }
    }
}

/// The complete combat view sent to the frontend
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct CombatView {
    pub phase: Phase,
    pub round: u32,
    pub hp: i32,
    pub gold: i32,
    pub pending_gold: i32,
    pub insight: u8,
    pub heat: u8,
    /// Active rule; outside combat, the rule the current board would get
    pub rule: Rule,
    pub player: Vec<UnitView>,
    pub enemy: Vec<UnitView>,
    pub attacker: Option<UnitRef>,
    pub target: Option<UnitRef>,
    pub turn: Option<Team>,
    pub window_open: bool,
    /// Time left in the open window
    pub window_remaining: Option<Millis>,
    pub window_locked: bool,
    pub card_spent: bool,
    pub hand: Vec<CardKind>,
    pub selected: Option<CardKind>,
    pub armed_card: Option<CardKind>,
    pub card_options: Vec<CardKind>,
    pub log: String,
    pub result: Option<CombatResult>,
    pub upcoming_boss: Option<String>,
    pub pending_level_ups: u32,
}

impl CombatView {
    pub fn from_engine(engine: &CombatEngine) -> Self {
        let campaign = &engine.campaign;
        let combat = engine.combat();
        let showing_combat = campaign.phase != Phase::Shop;

        let side = |team: Team| -> Vec<UnitView> {
            if showing_combat {
                engine
                    .boards()
                    .side(team)
                    .iter()
                    .map(|u| {
                        let persistent = match team {
                            Team::Player => campaign
                                .board
                                .iter()
                                .chain(campaign.snapshot.iter())
                                .find(|p| p.id == u.id),
                            Team::Enemy => campaign.enemy_board.iter().find(|p| p.id == u.id),
                        };
                        let flashing = combat.flashing.contains(&UnitRef::new(team, u.id));
                        UnitView::from_combat(u, persistent, flashing)
                    })
                    .collect()
            } else {
                let board = match team {
                    Team::Player => &campaign.board,
                    Team::Enemy => &campaign.enemy_board,
                };
                board.iter().map(UnitView::from).collect()
            }
        };

        let rule = if showing_combat {
            combat.rule
        } else {
            Rule::for_board(&campaign.board)
        };

        Self {
            phase: campaign.phase,
            round: campaign.round,
            hp: campaign.hp,
            gold: campaign.gold,
            pending_gold: campaign.pending_gold,
            insight: campaign.insight,
            heat: campaign.heat,
            rule,
            player: side(Team::Player),
            enemy: side(Team::Enemy),
            attacker: combat.attacker,
            target: combat.target,
            turn: combat.turn,
            window_open: combat.window_open,
            window_remaining: engine
                .window_deadline()
                .map(|deadline| deadline.saturating_sub(engine.now())),
            window_locked: combat.window_locked,
            card_spent: combat.card_spent,
            hand: combat.hand.clone(),
            selected: combat.selected,
            armed_card: campaign.armed_card,
            card_options: campaign.card_options.clone(),
            log: combat.log.clone(),
            result: combat.result,
            upcoming_boss: campaign.upcoming_boss.clone(),
            pending_level_ups: campaign.level_queue.len() as u32,
        }
    }
}

impl CombatEngine {
    pub fn view(&self) -> CombatView {
        CombatView::from_engine(self)
    }
}
