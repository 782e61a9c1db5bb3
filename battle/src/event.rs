use alloc::string::{String, ToString};
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::battle::Exchange;
use crate::rules::Rule;
use crate::scheduler::Millis;
use crate::types::{CardKind, CombatResult, HoldChoice, Team, UnitRef};

/// Notifications for the presentation layer, drained with
/// [`crate::CombatEngine::take_events`].
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "std",
    serde(tag = "type", content = "payload", rename_all = "camelCase")
)]
pub enum CombatEvent {
    /// Visible state changed; redraw from the view.
    Render,
    #[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
    CombatStarted { rule: Rule, boss: Option<String> },
    #[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
    WindowOpened {
        attacker: UnitRef,
        target: UnitRef,
        turn: Team,
        closes_at: Millis,
    },
    WindowClosed,
    Exchange(Exchange),
    #[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
    CardPlayed { card: CardKind, heat_free: bool },
    #[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
    Held { choice: HoldChoice },
    #[cfg_attr(feature = "std", serde(rename_all = "camelCase"))]
    CombatEnded {
        result: CombatResult,
        hp_lost: i32,
        level_ups: u32,
    },
    Announcement(Announcement),
}

/// End-of-combat overlay
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct Announcement {
    pub title: String,
    pub subtitle: String,
    /// No continuing from here
    pub eliminated: bool,
}

impl Announcement {
    pub fn for_outcome(result: CombatResult, campaign_hp: i32) -> Self {
        let (title, subtitle, eliminated) = if campaign_hp <= 0 {
            ("Eliminated", "Your HP reached zero.", true)
        } else {
            match result {
                CombatResult::Win => ("Victory", "Survivors carry their HP forward.", false),
                CombatResult::Loss => (
                    "Defeat",
                    "You lose HP. Entropy marks your survivors.",
                    false,
                ),
                CombatResult::Draw => ("Draw", "Both armies fall. Your board is restored.", false),
            }
        };
        Self {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            eliminated,
        }
    }
}
