//! Combat engine
//!
//! Owns one campaign and runs its encounters on a virtual clock. Every state
//! change happens inside a run-to-completion handler: a scheduled [`Task`]
//! firing, or a player action from [`crate::intervention`]. Hosts move time
//! forward with [`CombatEngine::advance`] and drain notifications with
//! [`CombatEngine::take_events`].

use alloc::format;
use alloc::string::ToString;
use alloc::vec;
use alloc::vec::Vec;

use crate::battle::{pick_target, resolve_exchange, turn_order};
use crate::bosses::{apply_boss_effect, BossDefinition};
use crate::error::{GameError, GameResult};
use crate::event::{Announcement, CombatEvent};
use crate::limits::BattleLimits;
use crate::log;
use crate::reconcile::{reconcile, score, Reconciliation};
use crate::rng::{BattleRng, XorShiftRng};
use crate::rules::{PolarityBonus, Rule};
use crate::scheduler::{Millis, Scheduler, Task, TaskHandle, Timing};
use crate::state::*;
use crate::types::*;

/// Static content the engine draws from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub cards: Vec<InterventionCard>,
    pub bosses: Vec<BossDefinition>,
}

impl Catalog {
    pub fn new(cards: Vec<InterventionCard>, bosses: Vec<BossDefinition>) -> Self {
        Self { cards, bosses }
    }

    pub fn card(&self, kind: CardKind) -> Option<&InterventionCard> {
        self.cards.iter().find(|c| c.kind == kind)
    }

    pub fn kinds(&self) -> Vec<CardKind> {
        self.cards.iter().map(|c| c.kind).collect()
    }
}

pub struct CombatEngine {
    pub campaign: Campaign,
    pub(crate) boards: Boards,
    pub(crate) combat: CombatState,
    pub(crate) catalog: Catalog,
    pub(crate) scheduler: Scheduler,
    pub(crate) timing: Timing,
    /// The one outstanding tick, window close, or resolution
    pub(crate) pending: Option<TaskHandle>,
    pub(crate) flash_timer: Option<TaskHandle>,
    /// Result overlay still owed for the last finished combat
    pub(crate) announce_timer: Option<TaskHandle>,
    pub(crate) window_deadline: Option<Millis>,
    pub(crate) events: Vec<CombatEvent>,
    pub(crate) limits: BattleLimits,
    pub(crate) outcome: Option<Reconciliation>,
    pub(crate) rng: XorShiftRng,
}

impl CombatEngine {
    pub fn new(campaign: Campaign, catalog: Catalog, seed: u64) -> Self {
        log::info("=== CONDUCTOR ENGINE INITIALIZED ===");
        Self {
            campaign,
            boards: Boards::default(),
            combat: CombatState::new(Rule::Flux),
            catalog,
            scheduler: Scheduler::new(),
            timing: Timing::default(),
            pending: None,
            flash_timer: None,
            announce_timer: None,
            window_deadline: None,
            events: Vec::new(),
            limits: BattleLimits::new(),
            outcome: None,
            rng: XorShiftRng::seed_from_u64(seed),
        }
    }

    #[cfg(feature = "std")]
    pub fn from_entropy(campaign: Campaign, catalog: Catalog) -> Self {
        let mut engine = Self::new(campaign, catalog, 0);
        engine.rng = XorShiftRng::from_entropy();
        engine
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_max_ticks(mut self, max_ticks: u32) -> Self {
        self.limits = BattleLimits::with_max_ticks(max_ticks);
        self
    }

    pub fn boards(&self) -> &Boards {
        &self.boards
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn limits(&self) -> &BattleLimits {
        &self.limits
    }

    /// What the last finished combat changed.
    pub fn outcome(&self) -> Option<&Reconciliation> {
        self.outcome.as_ref()
    }

    pub fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn in_combat(&self) -> bool {
        self.campaign.phase == Phase::Combat
    }

    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        core::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Enters combat against the campaign's enemy board.
    pub fn start_combat(&mut self) -> GameResult<()> {
        log::action("start_combat", &format!("round={}", self.campaign.round));
        if self.campaign.phase == Phase::Combat {
            return Err(GameError::WrongPhase);
        }
        if self.campaign.board.is_empty() {
            return Err(GameError::EmptyBoard);
        }

        // An owed announcement fires now rather than being dropped with the queue.
        if let Some(handle) = self.announce_timer.take() {
            if self.scheduler.cancel(handle) {
                self.run_task(Task::Announce);
            }
        }
        self.scheduler.clear();
        self.pending = None;
        self.flash_timer = None;
        self.window_deadline = None;
        self.outcome = None;
        self.campaign.snapshot = self.campaign.board.clone();

        let rule = Rule::for_board(&self.campaign.board);
        let player_bonus = PolarityBonus::for_board(&self.campaign.board);
        let enemy_bonus = PolarityBonus::for_board(&self.campaign.enemy_board);

        let mut collapses = Vec::new();
        let player: Vec<CombatUnit> = self
            .campaign
            .board
            .iter()
            .map(|u| CombatUnit::enter(u, Team::Player, player_bonus))
            .collect();
        for unit in player.iter().filter(|u| u.dead) {
            collapses.push(format!("{} collapses, entropy overwhelming.", unit.name));
        }
        let enemy = self
            .campaign
            .enemy_board
            .iter()
            .map(|u| CombatUnit::enter(u, Team::Enemy, enemy_bonus))
            .collect();
        self.boards = Boards { player, enemy };

        let boss_line = apply_boss_effect(&self.catalog.bosses, self.campaign.round, &mut self.boards);

        self.combat = CombatState::new(rule);
        self.combat.hand = self.combat_hand();
        self.combat.log = if !collapses.is_empty() {
            collapses.join(" ")
        } else if let Some(line) = &boss_line {
            line.clone()
        } else {
            rule.announcement().to_string()
        };
        self.limits = BattleLimits::with_max_ticks(self.limits.max_ticks);

        self.campaign.phase = Phase::Combat;
        log::info(&format!(
            "combat started: rule={} bonus=+{}atk/+{}hp vs +{}atk/+{}hp",
            rule.label(),
            player_bonus.attack,
            player_bonus.health,
            enemy_bonus.attack,
            enemy_bonus.health
        ));
        self.emit(CombatEvent::CombatStarted {
            rule,
            boss: boss_line,
        });
        self.emit(CombatEvent::Render);
        self.pending = Some(self.scheduler.schedule(self.timing.pre_combat, Task::Tick));
        Ok(())
    }

    pub(crate) fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        self.window_deadline = None;
    }

    fn run_task(&mut self, task: Task) {
        match task {
            Task::Tick => {
                self.pending = None;
                self.tick();
            }
            Task::CloseWindow => {
                self.pending = None;
                self.close_window();
            }
            Task::Resolve => {
                self.pending = None;
                self.resolve_pending();
            }
            Task::ClearFlash => {
                self.flash_timer = None;
                self.combat.flashing.clear();
                self.emit(CombatEvent::Render);
            }
            Task::Announce => {
                self.announce_timer = None;
                if let Some(result) = self.combat.result {
                    let announcement = Announcement::for_outcome(result, self.campaign.hp);
                    self.emit(CombatEvent::Announcement(announcement));
                }
            }
        }
    }

    fn tick(&mut self) {
        let player_order = turn_order(&self.boards.player);
        let enemy_order = turn_order(&self.boards.enemy);
        if player_order.is_empty() || enemy_order.is_empty() {
            self.end_combat();
            return;
        }
        if let Err(e) = self.limits.record_tick() {
            log::warn(&format!("{}: scoring the board as it stands", e));
            self.end_combat();
            return;
        }

        let t = self.combat.tick;
        let turn = if t % 2 == 0 { Team::Player } else { Team::Enemy };
        let order = match turn {
            Team::Player => &player_order,
            Team::Enemy => &enemy_order,
        };
        let attacker = order[(t / 2) as usize % order.len()];
        let Some(target) = pick_target(self.boards.side(turn.opponent())) else {
            self.end_combat();
            return;
        };

        let log_line = {
            let name = |r: UnitRef| self.boards.get(r).map(|u| u.name.as_str()).unwrap_or("?");
            format!("{} → {}…", name(attacker), name(target))
        };
        self.combat.log = log_line;
        self.combat.attacker = Some(attacker);
        self.combat.target = Some(target);
        self.combat.turn = Some(turn);
        self.combat.window_open = true;
        self.combat.tick += 1;

        log::combat_summary(
            self.campaign.round,
            self.combat.rule.label(),
            t,
            self.boards.living_count(Team::Player),
            self.boards.living_count(Team::Enemy),
            self.campaign.heat,
        );

        self.pending = Some(self.scheduler.schedule(self.timing.window, Task::CloseWindow));
        let closes_at = self.scheduler.now() + self.timing.window;
        self.window_deadline = Some(closes_at);
        self.emit(CombatEvent::WindowOpened {
            attacker,
            target,
            turn,
            closes_at,
        });
        self.emit(CombatEvent::Render);
    }

    fn close_window(&mut self) {
        self.combat.window_open = false;
        self.combat.selected = None;
        self.window_deadline = None;
        self.emit(CombatEvent::WindowClosed);
        self.resolve_pending();
    }

    /// Resolves the current exchange now, pre-empting the window.
    pub fn resolve(&mut self) -> GameResult<()> {
        log::action("resolve", "pre-empting window");
        if !self.in_combat() || self.combat.over {
            return Err(GameError::WrongPhase);
        }
        self.cancel_pending();
        if self.combat.window_open {
            self.combat.window_open = false;
            self.combat.selected = None;
            self.emit(CombatEvent::WindowClosed);
        }
        self.resolve_pending();
        Ok(())
    }

    pub(crate) fn resolve_pending(&mut self) {
        let attacker = self.combat.attacker.take();
        let target = self.combat.target.take();
        self.combat.turn = None;
        self.combat.window_open = false;
        self.window_deadline = None;

        let exchange = match (attacker, target) {
            (Some(a), Some(t)) => resolve_exchange(&mut self.boards, a, t, self.combat.rule),
            _ => None,
        };

        match exchange {
            None => {
                log::debug("resolve", "stale exchange, skipping");
                self.combat.log = "—".to_string();
                self.emit(CombatEvent::Render);
                self.pending = Some(self.scheduler.schedule(self.timing.noop_delay, Task::Tick));
            }
            Some(exchange) => {
                self.combat.log = exchange.narrate();
                log::debug("resolve", &self.combat.log);
                self.flash(exchange.touched());
                self.emit(CombatEvent::Exchange(exchange));
                self.emit(CombatEvent::Render);
                self.pending = Some(self.scheduler.schedule(self.timing.resolve_delay, Task::Tick));
            }
        }
    }

    fn flash(&mut self, units: Vec<UnitRef>) {
        if let Some(handle) = self.flash_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.combat.flashing = units;
        self.flash_timer = Some(self.scheduler.schedule(self.timing.flash, Task::ClearFlash));
    }

    fn end_combat(&mut self) {
        self.cancel_pending();
        let result = score(&self.boards);
        self.combat.result = Some(result);
        self.combat.over = true;
        self.combat.window_open = false;
        self.combat.attacker = None;
        self.combat.target = None;
        self.combat.turn = None;
        self.combat.selected = None;
        self.combat.log = result.summary().to_string();

        let outcome = reconcile(
            &mut self.campaign,
            &self.boards,
            result,
            self.combat.card_spent,
        );
        self.campaign.phase = Phase::Result;
        log::result(
            result != CombatResult::Loss,
            &format!(
                "combat over after {} ticks: {:?}, hp {} (-{}), {} level-ups",
                self.combat.tick, result, self.campaign.hp, outcome.hp_lost, outcome.level_ups
            ),
        );

        self.emit(CombatEvent::CombatEnded {
            result,
            hp_lost: outcome.hp_lost,
            level_ups: outcome.level_ups,
        });
        self.emit(CombatEvent::Render);
        self.outcome = Some(outcome);
        self.announce_timer = Some(self.scheduler.schedule(self.timing.announce, Task::Announce));
    }

    /// Runs every task due up to `time`, then parks the clock there.
    pub fn advance_to(&mut self, time: Millis) {
        while let Some(task) = self.scheduler.pop_due(time) {
            self.run_task(task);
        }
        self.scheduler.advance_to(time);
    }

    pub fn advance(&mut self, ms: Millis) {
        let until = self.scheduler.now() + ms;
        self.advance_to(until);
    }

    /// Jumps to the next deadline and runs what is due there.
    pub fn advance_to_next(&mut self) -> Option<Millis> {
        let due = self.scheduler.next_due()?;
        self.advance_to(due);
        Some(due)
    }

    pub fn next_deadline(&mut self) -> Option<Millis> {
        self.scheduler.next_due()
    }

    /// Deadline of the open intervention window.
    pub fn window_deadline(&self) -> Option<Millis> {
        self.window_deadline
    }

    /// Runs the encounter with no player input until nothing is left to do.
    pub fn run_to_completion(&mut self) -> Option<CombatResult> {
        while self.advance_to_next().is_some() {}
        self.combat.result
    }

    /// The armed card, or one random catalog card when nothing is armed.
    pub(crate) fn combat_hand(&mut self) -> Vec<CardKind> {
        if let Some(kind) = self.campaign.armed_card {
            return vec![kind];
        }
        let kinds = self.catalog.kinds();
        self.rng.choose(&kinds).copied().into_iter().collect()
    }
}
