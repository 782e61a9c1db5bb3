//! Player intervention
//!
//! One card may be played per combat, inside an open attack window. Holding
//! instead banks a reward and locks intervention for the rest of the combat.
//! A rejected action leaves the encounter as it was, apart from clearing the
//! card selection.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::engine::CombatEngine;
use crate::error::{GameError, GameResult};
use crate::event::CombatEvent;
use crate::log;
use crate::rng::BattleRng;
use crate::scheduler::Task;
use crate::state::*;
use crate::types::*;

impl CombatEngine {
    fn check_window(&self) -> GameResult<()> {
        if !self.in_combat() || self.combat.over {
            return Err(GameError::WrongPhase);
        }
        if self.combat.card_spent {
            return Err(GameError::CardSpent);
        }
        if self.combat.window_locked {
            return Err(GameError::WindowLocked);
        }
        if !self.combat.window_open {
            return Err(GameError::WindowClosed);
        }
        Ok(())
    }

    fn reject(&mut self, err: GameError, message: Option<String>) -> GameResult<()> {
        self.combat.selected = None;
        if let Some(message) = message {
            self.combat.log = message;
        }
        log::result(false, &format!("{}", err));
        self.emit(CombatEvent::Render);
        Err(err)
    }

    /// Selects a card from the combat hand, or deselects it if already
    /// selected. Untargeted cards play immediately.
    pub fn select_card(&mut self, kind: CardKind) -> GameResult<()> {
        log::action("select_card", &format!("{:?}", kind));
        self.check_window()?;
        if !self.combat.hand.contains(&kind) {
            return Err(GameError::CardNotInHand);
        }
        let target = self.catalog.card(kind).ok_or(GameError::UnknownCard)?.target;
        if target == CardTarget::Untargeted {
            return self.conduct(kind, None);
        }
        self.combat.selected = if self.combat.selected == Some(kind) {
            None
        } else {
            Some(kind)
        };
        self.emit(CombatEvent::Render);
        Ok(())
    }

    /// Aims the selected card at a unit. A unit on the wrong side is ignored.
    pub fn target_click(&mut self, target: UnitRef) -> GameResult<()> {
        log::action("target_click", &format!("{} {}", target.team.label(), target.id));
        self.check_window()?;
        let kind = self.combat.selected.ok_or(GameError::NoCardSelected)?;
        let accepts = self.catalog.card(kind).ok_or(GameError::UnknownCard)?.target;
        if !accepts.accepts(target.team) {
            return Err(GameError::InvalidTarget);
        }
        self.conduct(kind, Some(target))
    }

    /// Plays a card from the combat hand.
    pub fn conduct(&mut self, kind: CardKind, target: Option<UnitRef>) -> GameResult<()> {
        log::action("conduct", &format!("{:?} -> {:?}", kind, target));
        self.check_window()?;
        if !self.combat.hand.contains(&kind) {
            return Err(GameError::CardNotInHand);
        }
        let name = self
            .catalog
            .card(kind)
            .ok_or(GameError::UnknownCard)?
            .name
            .clone();

        match kind {
            CardKind::Redirect => self.redirect(target),
            CardKind::Bulwark | CardKind::Surge => self.empower(kind, &name, target),
            CardKind::Drain => {
                self.drain();
                self.spend(kind, false);
                Ok(())
            }
            CardKind::Unravel => self.unravel(target),
        }
    }

    fn spend(&mut self, kind: CardKind, heat_free: bool) {
        if !heat_free {
            self.campaign.raise_heat();
        }
        self.combat.card_spent = true;
        self.combat.selected = None;
        log::result(true, &self.combat.log);
        self.emit(CombatEvent::CardPlayed {
            card: kind,
            heat_free,
        });
        self.emit(CombatEvent::Render);
    }

    fn redirect(&mut self, target: Option<UnitRef>) -> GameResult<()> {
        let attacker = match (self.combat.turn, self.combat.attacker) {
            (Some(Team::Player), Some(attacker)) => attacker,
            _ => {
                return self.reject(
                    GameError::NotYourTurn,
                    Some("Redirect only works during your attack window.".to_string()),
                )
            }
        };
        let Some(new_target) = target.filter(|t| {
            t.team == Team::Enemy && self.boards.get(*t).map_or(false, |u| u.is_alive())
        }) else {
            return self.reject(GameError::InvalidTarget, None);
        };

        self.cancel_pending();
        self.combat.target = Some(new_target);
        self.combat.window_open = false;

        let free = self.combat.rule.waives_first_redirect_heat() && !self.combat.flux_redirect_used;
        if free {
            self.combat.flux_redirect_used = true;
        }
        let name = |r: UnitRef| self.boards.get(r).map(|u| u.name.as_str()).unwrap_or("?");
        let line = format!(
            "Redirected, {} now strikes {}…{}",
            name(attacker),
            name(new_target),
            if free { " [free, no Heat]" } else { "" }
        );
        self.combat.log = line;

        self.emit(CombatEvent::WindowClosed);
        self.spend(CardKind::Redirect, free);
        self.pending = Some(self.scheduler.schedule(self.timing.preempt_delay, Task::Resolve));
        Ok(())
    }

    fn empower(&mut self, kind: CardKind, name: &str, target: Option<UnitRef>) -> GameResult<()> {
        let Some(target) = target.filter(|t| t.team == Team::Player) else {
            return self.reject(GameError::InvalidTarget, None);
        };
        let in_reach = self
            .boards
            .position(target)
            .map_or(false, |slot| slot < FRONT_SLOTS);
        if !in_reach {
            return self.reject(
                GameError::OutOfReach {
                    slots: FRONT_SLOTS as u8,
                },
                Some(format!("{} only reaches the front two units.", name)),
            );
        }
        let line = match self.boards.get_mut(target).filter(|u| u.is_alive()) {
            Some(unit) if kind == CardKind::Bulwark => {
                unit.health += BULWARK_HEALTH;
                unit.max_health += BULWARK_HEALTH;
                format!("Bulwark: {} +{} HP.", unit.name, BULWARK_HEALTH)
            }
            Some(unit) => {
                unit.attack += SURGE_ATTACK;
                format!("Surge: {} +{} ATK.", unit.name, SURGE_ATTACK)
            }
            None => return self.reject(GameError::InvalidTarget, None),
        };
        self.combat.log = line;
        self.spend(kind, false);
        Ok(())
    }

    fn drain(&mut self) {
        let mut remaining = DRAIN_TOTAL;
        while remaining > 0 {
            let living: Vec<usize> = self
                .boards
                .enemy
                .iter()
                .enumerate()
                .filter(|(_, u)| u.is_alive())
                .map(|(i, _)| i)
                .collect();
            let Some(&slot) = self.rng.choose(&living) else {
                break;
            };
            let chunk = remaining.min(DRAIN_CHUNK);
            self.boards.enemy[slot].take_damage(chunk);
            remaining -= chunk;
        }
        self.combat.log = format!("Drain: {} damage scattered among enemies.", DRAIN_TOTAL);
    }

    fn unravel(&mut self, target: Option<UnitRef>) -> GameResult<()> {
        let unit = target
            .filter(|t| t.team == Team::Player)
            .and_then(|t| self.campaign.find_unit_mut(t.id));
        let Some(unit) = unit else {
            return self.reject(GameError::InvalidTarget, None);
        };
        unit.entropy = unit.entropy.saturating_sub(UNRAVEL_ENTROPY);
        self.combat.log = format!("Unravel: entropy cleared from {}.", unit.card.name);
        self.spend(CardKind::Unravel, false);
        Ok(())
    }

    /// Banks a reward instead of intervening. Locks intervention for the rest
    /// of the combat and resolves the current exchange early.
    pub fn hold(&mut self, choice: HoldChoice) -> GameResult<()> {
        log::action("hold", &format!("{:?}", choice));
        self.check_window()?;
        self.combat.log = match choice {
            HoldChoice::Gold => {
                self.campaign.pending_gold += 1;
                "Held: +1 Gold banked for next round.".to_string()
            }
            HoldChoice::Insight => {
                self.campaign.insight = (self.campaign.insight + 1).min(MAX_INSIGHT);
                "Held: +1 Insight stored.".to_string()
            }
        };
        self.combat.window_locked = true;
        self.combat.hold_used = true;
        self.combat.selected = None;

        self.cancel_pending();
        self.combat.window_open = false;
        self.emit(CombatEvent::Held { choice });
        self.emit(CombatEvent::WindowClosed);
        self.emit(CombatEvent::Render);
        self.pending = Some(self.scheduler.schedule(self.timing.preempt_delay, Task::Resolve));
        Ok(())
    }

    /// Arms a card for the next combat. Shop phase only, one at a time.
    pub fn arm_card(&mut self, kind: CardKind) -> GameResult<()> {
        log::action("arm_card", &format!("{:?}", kind));
        if self.campaign.phase != Phase::Shop {
            return Err(GameError::WrongPhase);
        }
        if self.campaign.armed_card.is_some() {
            return Err(GameError::CardAlreadyArmed);
        }
        self.catalog.card(kind).ok_or(GameError::UnknownCard)?;
        self.campaign.armed_card = Some(kind);
        self.campaign.card_options.clear();
        Ok(())
    }

    /// Offers distinct random cards to arm when nothing is armed or offered.
    pub fn ensure_card_options(&mut self) {
        if self.campaign.armed_card.is_some() || !self.campaign.card_options.is_empty() {
            return;
        }
        let mut kinds = self.catalog.kinds();
        self.rng.shuffle(&mut kinds);
        kinds.truncate(CARD_OPTIONS);
        self.campaign.card_options = kinds;
    }
}
