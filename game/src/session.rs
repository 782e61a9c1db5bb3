//! Round flow
//!
//! A [`Session`] wraps the combat engine with the bookkeeping between
//! encounters: enemy roster supply, heat decay, gold payout, arm offers,
//! and the level-up queue.

use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use conductor_battle::bosses::upcoming_warning;
use conductor_battle::log;
use conductor_battle::state::{MAX_BOARD_SIZE, MAX_GOLD_GROWTH, STARTING_GOLD};
use conductor_battle::{
    Campaign, CardKind, Catalog, CombatEngine, CombatView, GameError, GameResult, LevelChoice,
    Phase, UnitId, UnitTemplate,
};

use crate::rosters::{RosterSource, ScaledRosters};

/// Where the campaign goes after a combat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum RoundFlow {
    /// A unit is waiting for a level-up choice.
    LevelUp(UnitId),
    /// The next round has begun.
    NextRound(u32),
    /// Campaign health reached zero.
    Eliminated,
}

/// Gold granted at the start of a round, before any banked gold.
pub fn gold_for_round(round: u32) -> i32 {
    STARTING_GOLD + (round.saturating_sub(1) as i32).min(MAX_GOLD_GROWTH)
}

pub struct Session<R: RosterSource> {
    engine: CombatEngine,
    rosters: R,
}

impl<R: RosterSource> Session<R> {
    /// Fresh campaign with the starter board, already in round 1's shop.
    pub fn new(
        catalog: Catalog,
        starters: Vec<UnitTemplate>,
        rosters: R,
        seed: u64,
    ) -> GameResult<Self> {
        let mut campaign = Campaign::new();
        for template in starters {
            let unit = campaign.mint_unit(template);
            campaign.board.push(unit);
        }
        let mut session = Self {
            engine: CombatEngine::new(campaign, catalog, seed),
            rosters,
        };
        session.begin_round()?;
        Ok(session)
    }

    pub fn engine(&self) -> &CombatEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CombatEngine {
        &mut self.engine
    }

    pub fn campaign(&self) -> &Campaign {
        &self.engine.campaign
    }

    pub fn view(&self) -> CombatView {
        self.engine.view()
    }

    /// Sets up the current round: enemy board, heat decay, gold, arm offers.
    pub fn begin_round(&mut self) -> GameResult<()> {
        let round = self.engine.campaign.round;
        let heat = self.engine.campaign.heat;
        log::action("begin_round", &format!("round={} heat={}", round, heat));

        let roster = self.rosters.roster(round, heat)?;
        let warning = upcoming_warning(&self.engine.catalog().bosses, round).map(|w| w.to_string());

        let campaign = &mut self.engine.campaign;
        let enemy: Vec<_> = roster.into_iter().map(|t| campaign.mint_unit(t)).collect();
        campaign.enemy_board = enemy;
        // Heat decays only after it has amplified this round's enemies.
        campaign.heat = campaign.heat.saturating_sub(1);
        campaign.gold = gold_for_round(round) + campaign.pending_gold;
        campaign.pending_gold = 0;
        campaign.phase = Phase::Shop;
        campaign.upcoming_boss = warning;

        self.engine.ensure_card_options();
        log::info(&format!(
            "round {} ready: {} enemies, {} gold",
            round,
            self.engine.campaign.enemy_board.len(),
            self.engine.campaign.gold
        ));
        Ok(())
    }

    /// Places a new unit on the board. Pricing belongs to the shop.
    pub fn recruit(&mut self, template: UnitTemplate) -> GameResult<UnitId> {
        let campaign = &mut self.engine.campaign;
        if campaign.phase != Phase::Shop {
            return Err(GameError::WrongPhase);
        }
        if campaign.board.len() >= MAX_BOARD_SIZE {
            return Err(GameError::BoardFull);
        }
        let unit = campaign.mint_unit(template);
        let id = unit.id;
        campaign.board.push(unit);
        Ok(id)
    }

    pub fn arm_card(&mut self, kind: CardKind) -> GameResult<()> {
        self.engine.arm_card(kind)
    }

    pub fn start_combat(&mut self) -> GameResult<()> {
        self.engine.start_combat()
    }

    /// Moves on from a finished combat.
    pub fn continue_after_combat(&mut self) -> GameResult<RoundFlow> {
        if self.engine.campaign.phase != Phase::Result {
            return Err(GameError::WrongPhase);
        }
        if self.engine.campaign.is_eliminated() {
            return Ok(RoundFlow::Eliminated);
        }
        if let Some(&id) = self.engine.campaign.level_queue.first() {
            return Ok(RoundFlow::LevelUp(id));
        }
        self.engine.campaign.round += 1;
        self.begin_round()?;
        Ok(RoundFlow::NextRound(self.engine.campaign.round))
    }

    /// Applies the choice to the first queued unit, then continues.
    pub fn apply_level_up(&mut self, choice: LevelChoice) -> GameResult<RoundFlow> {
        let campaign = &mut self.engine.campaign;
        if campaign.phase != Phase::Result || campaign.level_queue.is_empty() {
            return Err(GameError::NoPendingLevelUp);
        }
        let id = campaign.level_queue.remove(0);
        // A queued unit may have been removed since; its choice is dropped.
        if let Some(unit) = campaign.find_unit_mut(id) {
            unit.level_up(choice);
            log::info(&format!("{} reached level {}", unit.card.name, unit.level));
        }
        self.continue_after_combat()
    }
}

/// A session on the bundled content.
pub fn default_session(seed: u64) -> GameResult<Session<ScaledRosters>> {
    Session::new(
        conductor_assets::default_catalog(),
        conductor_assets::starter_templates()?,
        ScaledRosters::from_assets()?,
        seed,
    )
}
