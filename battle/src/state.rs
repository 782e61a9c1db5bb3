use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::rules::Rule;
use crate::types::*;

/// Starting campaign health
pub const STARTING_HP: i32 = 30;
/// Gold at the start of round 1
pub const STARTING_GOLD: i32 = 3;
/// Round-over-round gold growth stops after this many rounds
pub const MAX_GOLD_GROWTH: i32 = 7;
/// Heat cap; each played card adds one
pub const MAX_HEAT: u8 = 3;
/// Insight cap; banked by holding
pub const MAX_INSIGHT: u8 = 2;
/// Wins needed for a level-up
pub const XP_PER_LEVEL: u8 = 2;
/// Number of board slots
pub const MAX_BOARD_SIZE: usize = 4;
/// Bulwark and Surge only reach this many leading combat slots
pub const FRONT_SLOTS: usize = 2;
/// Number of cards offered when arming
pub const CARD_OPTIONS: usize = 3;

pub const BULWARK_HEALTH: i32 = 3;
pub const SURGE_ATTACK: i32 = 2;
pub const DRAIN_TOTAL: i32 = 3;
pub const DRAIN_CHUNK: i32 = 2;
pub const UNRAVEL_ENTROPY: u32 = 3;
/// Entropy added to survivors of a loss
pub const LOSS_ENTROPY: u32 = 2;
/// Entropy added to every unit restored by a draw
pub const DRAW_ENTROPY: u32 = 1;

/// Current phase of the campaign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub enum Phase {
    Shop,
    Combat,
    Result,
}

/// Persistent campaign state. Combat reads it at entry and writes it back
/// at reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Campaign {
    pub phase: Phase,
    /// Current round (1-indexed)
    pub round: u32,
    pub hp: i32,
    pub gold: i32,
    /// Gold banked by holding, paid at the next round start
    pub pending_gold: i32,
    pub insight: u8,
    pub heat: u8,
    /// Player units, index 0 is front
    pub board: Vec<BoardUnit>,
    pub enemy_board: Vec<BoardUnit>,
    /// Player board as it stood when combat started
    pub snapshot: Vec<BoardUnit>,
    pub armed_card: Option<CardKind>,
    pub card_options: Vec<CardKind>,
    /// Units waiting for a level-up choice, in order
    pub level_queue: Vec<UnitId>,
    /// Warning shown the round before a boss
    pub upcoming_boss: Option<String>,
    pub next_unit_id: u32,
}

impl Campaign {
    pub fn new() -> Self {
        Self {
            phase: Phase::Shop,
            round: 1,
            hp: STARTING_HP,
            gold: STARTING_GOLD,
            pending_gold: 0,
            insight: 0,
            heat: 0,
            board: Vec::new(),
            enemy_board: Vec::new(),
            snapshot: Vec::new(),
            armed_card: None,
            card_options: Vec::new(),
            level_queue: Vec::new(),
            upcoming_boss: None,
            next_unit_id: 1,
        }
    }

    /// Creates a fresh unit with a unique id. Placement is up to the caller.
    pub fn mint_unit(&mut self, card: UnitTemplate) -> BoardUnit {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        BoardUnit::from_template(id, card)
    }

    pub fn is_eliminated(&self) -> bool {
        self.hp <= 0
    }

    pub fn find_unit_mut(&mut self, id: UnitId) -> Option<&mut BoardUnit> {
        self.board.iter_mut().find(|u| u.id == id)
    }

    pub fn raise_heat(&mut self) {
        self.heat = (self.heat + 1).min(MAX_HEAT);
    }
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new()
    }
}

/// Both combat boards, in board order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boards {
    pub player: Vec<CombatUnit>,
    pub enemy: Vec<CombatUnit>,
}

impl Boards {
    pub fn side(&self, team: Team) -> &Vec<CombatUnit> {
        match team {
            Team::Player => &self.player,
            Team::Enemy => &self.enemy,
        }
    }

    pub fn side_mut(&mut self, team: Team) -> &mut Vec<CombatUnit> {
        match team {
            Team::Player => &mut self.player,
            Team::Enemy => &mut self.enemy,
        }
    }

    pub fn get(&self, unit: UnitRef) -> Option<&CombatUnit> {
        self.side(unit.team).iter().find(|u| u.id == unit.id)
    }

    pub fn get_mut(&mut self, unit: UnitRef) -> Option<&mut CombatUnit> {
        self.side_mut(unit.team).iter_mut().find(|u| u.id == unit.id)
    }

    /// Slot index of a unit on its side.
    pub fn position(&self, unit: UnitRef) -> Option<usize> {
        self.side(unit.team).iter().position(|u| u.id == unit.id)
    }

    pub fn living_count(&self, team: Team) -> usize {
        self.side(team).iter().filter(|u| u.is_alive()).count()
    }
}

/// Combat-scoped state. Reset at every combat start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatState {
    pub rule: Rule,
    pub attacker: Option<UnitRef>,
    pub target: Option<UnitRef>,
    pub tick: u32,
    pub turn: Option<Team>,
    pub window_open: bool,
    /// Set by hold; no further intervention this combat
    pub window_locked: bool,
    pub hold_used: bool,
    pub card_spent: bool,
    pub selected: Option<CardKind>,
    pub hand: Vec<CardKind>,
    pub flux_redirect_used: bool,
    pub log: String,
    pub result: Option<CombatResult>,
    pub over: bool,
    /// Units highlighted by the last exchange
    pub flashing: Vec<UnitRef>,
}

impl CombatState {
    pub fn new(rule: Rule) -> Self {
        Self {
            rule,
            attacker: None,
            target: None,
            tick: 0,
            turn: None,
            window_open: false,
            window_locked: false,
            hold_used: false,
            card_spent: false,
            selected: None,
            hand: Vec::new(),
            flux_redirect_used: false,
            log: String::new(),
            result: None,
            over: false,
            flashing: Vec::new(),
        }
    }
}
