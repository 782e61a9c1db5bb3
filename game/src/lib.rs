//! Round flow for Conductor
//!
//! Wraps the combat engine with everything that happens between encounters.
//! The `realtime` feature adds a tokio driver that runs the engine's virtual
//! clock against wall time and feeds it player commands.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod rosters;
pub mod session;

#[cfg(feature = "realtime")]
pub mod realtime;


pub use rosters::{RosterSource, ScaledRosters};
pub use session::{default_session, RoundFlow, Session};
