#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod battle;
pub mod bosses;
pub mod engine;
pub mod error;
pub mod event;
pub mod intervention;
pub mod keywords;
pub mod limits;
pub mod log;
pub mod reconcile;
pub mod rng;
pub mod rules;
pub mod scheduler;
pub mod state;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use battle::{resolve_exchange, ChainStrike, Exchange};
pub use bosses::{apply_boss_effect, BossDefinition, BossEffect};
pub use engine::{Catalog, CombatEngine};
pub use error::{GameError, GameResult};
pub use event::{Announcement, CombatEvent};
pub use keywords::Capabilities;
pub use reconcile::{reconcile, Reconciliation};
pub use rng::{BattleRng, XorShiftRng};
pub use rules::{BoardPolarity, PolarityBonus, Rule};
pub use scheduler::{Millis, Scheduler, Task, TaskHandle, Timing};
pub use state::*;
pub use types::*;
pub use view::{CombatView, UnitView};
