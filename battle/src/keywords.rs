//! Keyword capability table
//!
//! Every keyword maps to one static [`Capabilities`] row. Combat code asks the
//! row what a unit does instead of matching on keywords at each call site.

use crate::types::{CombatUnit, Keyword};

/// What a keyword changes about a unit in combat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Extra damage dealt back when this unit is attacked.
    pub counter_bonus: i32,
    /// Must be targeted while alive.
    pub draws_attacks: bool,
    /// Moves ahead of non-haste units in the turn order.
    pub strikes_first: bool,
    /// Health restored when this unit kills its opponent in an exchange.
    pub kill_heal: i32,
}

const PLAIN: Capabilities = Capabilities {
    counter_bonus: 0,
    draws_attacks: false,
    strikes_first: false,
    kill_heal: 0,
};

const TAUNT: Capabilities = Capabilities {
    draws_attacks: true,
    ..PLAIN
};

const HASTE: Capabilities = Capabilities {
    strikes_first: true,
    ..PLAIN
};

const RETALIATE: Capabilities = Capabilities {
    counter_bonus: 1,
    ..PLAIN
};

const LEECH: Capabilities = Capabilities {
    kill_heal: 1,
    ..PLAIN
};

impl Capabilities {
    pub const fn of(keyword: Option<Keyword>) -> &'static Capabilities {
        match keyword {
            None => &PLAIN,
            Some(Keyword::Taunt) => &TAUNT,
            Some(Keyword::Haste) => &HASTE,
            Some(Keyword::Retaliate) => &RETALIATE,
            Some(Keyword::Leech) => &LEECH,
        }
    }
}

/// Damage a unit deals back when it is the defender of an exchange.
pub fn counter_damage(defender: &CombatUnit) -> i32 {
    defender.attack + defender.capabilities().counter_bonus
}

pub fn draws_attacks(unit: &CombatUnit) -> bool {
    unit.capabilities().draws_attacks
}

pub fn strikes_first(unit: &CombatUnit) -> bool {
    unit.capabilities().strikes_first
}

pub fn kill_heal(unit: &CombatUnit) -> i32 {
    unit.capabilities().kill_heal
}
