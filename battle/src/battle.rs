//! Attack resolution
//!
//! One exchange is a simultaneous trade of damage between an attacker and its
//! target. Keyword effects come from the capability table; chain kills from
//! the active [`Rule`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::keywords::{counter_damage, draws_attacks, kill_heal, strikes_first};
use crate::rules::Rule;
use crate::state::Boards;
use crate::types::{CombatUnit, Keyword, Team, UnitRef};

/// Follow-up strike after a kill under CHAOS
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct ChainStrike {
    pub target: UnitRef,
    pub target_name: String,
    pub damage: i32,
    pub killed: bool,
}

/// Outcome of one resolved exchange
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
pub struct Exchange {
    pub attacker: UnitRef,
    pub defender: UnitRef,
    pub attacker_name: String,
    pub defender_name: String,
    /// Damage the attacker dealt
    pub dealt: i32,
    /// Counter-damage the attacker took
    pub taken: i32,
    pub retaliated: bool,
    pub attacker_health: i32,
    pub defender_health: i32,
    pub attacker_died: bool,
    pub defender_died: bool,
    pub chain: Option<ChainStrike>,
}

impl Exchange {
    /// Every unit the exchange touched, for hit highlighting.
    pub fn touched(&self) -> Vec<UnitRef> {
        let mut units = alloc::vec![self.defender, self.attacker];
        if let Some(chain) = &self.chain {
            units.push(chain.target);
        }
        units
    }

    pub fn narrate(&self) -> String {
        let note = if self.retaliated { " (Retaliate +1)" } else { "" };
        let mut line = match (self.attacker_died, self.defender_died) {
            (true, true) => format!(
                "Both {} and {} fall.",
                self.attacker_name, self.defender_name
            ),
            (true, false) => format!(
                "{} destroys {} but falls to the counter{}.",
                self.attacker_name, self.defender_name, note
            ),
            (false, true) => format!(
                "{} slays {} ({} dealt, {} taken{}).",
                self.attacker_name, self.defender_name, self.dealt, self.taken, note
            ),
            (false, false) => format!(
                "{} deals {}, takes {}{}: {} vs {} HP.",
                self.attacker_name,
                self.dealt,
                self.taken,
                note,
                self.attacker_health,
                self.defender_health
            ),
        };
        if let Some(chain) = &self.chain {
            line.push_str(&format!(" [chain] → {} ({}).", chain.target_name, chain.damage));
        }
        line
    }
}

/// Living units in board order.
pub fn living(units: &[CombatUnit]) -> impl Iterator<Item = &CombatUnit> {
    units.iter().filter(|u| u.is_alive())
}

/// Acting order for one side: living haste units first, then the rest, each
/// group keeping board order.
pub fn turn_order(units: &[CombatUnit]) -> Vec<UnitRef> {
    let (mut order, rest): (Vec<&CombatUnit>, Vec<&CombatUnit>) =
        living(units).partition(|u| strikes_first(u));
    order.extend(rest);
    order
        .into_iter()
        .map(|u| UnitRef::new(u.team, u.id))
        .collect()
}

/// Default target on a side: the first living taunt, else the first living unit.
pub fn pick_target(units: &[CombatUnit]) -> Option<UnitRef> {
    living(units)
        .find(|u| draws_attacks(u))
        .or_else(|| living(units).next())
        .map(|u| UnitRef::new(u.team, u.id))
}

/// Resolves one exchange on the combat boards.
///
/// Returns `None` without touching anything if either unit is missing or
/// already dead.
pub fn resolve_exchange(
    boards: &mut Boards,
    attacker: UnitRef,
    defender: UnitRef,
    rule: Rule,
) -> Option<Exchange> {
    let att = boards.get(attacker).filter(|u| u.is_alive())?.clone();
    let def = boards.get(defender).filter(|u| u.is_alive())?.clone();

    let dealt = att.attack;
    let taken = counter_damage(&def);
    let retaliated = def.has_keyword(Keyword::Retaliate);

    let mut att_health = att.health - taken;
    let mut def_health = def.health - dealt;

    // Leech heals before deaths are settled, so it can save the killer.
    if def_health <= 0 {
        att_health = (att_health + kill_heal(&att)).min(att.max_health);
    }
    if att_health <= 0 {
        def_health = (def_health + kill_heal(&def)).min(def.max_health);
    }

    let attacker_died = att_health <= 0;
    let defender_died = def_health <= 0;

    if let Some(u) = boards.get_mut(attacker) {
        u.health = att_health;
        u.dead = attacker_died;
    }
    if let Some(u) = boards.get_mut(defender) {
        u.health = def_health;
        u.dead = defender_died;
    }

    let chain = if rule.chains_kills() && defender_died && !attacker_died {
        chain_strike(boards, defender.team, att.attack)
    } else {
        None
    };

    Some(Exchange {
        attacker,
        defender,
        attacker_name: att.name,
        defender_name: def.name,
        dealt,
        taken,
        retaliated,
        attacker_health: att_health,
        defender_health: def_health,
        attacker_died,
        defender_died,
        chain,
    })
}

fn chain_strike(boards: &mut Boards, side: Team, damage: i32) -> Option<ChainStrike> {
    let target = pick_target(boards.side(side))?;
    let unit = boards.get_mut(target)?;
    unit.take_damage(damage);
    Some(ChainStrike {
        target,
        target_name: unit.name.clone(),
        damage,
        killed: unit.dead,
    })
}
