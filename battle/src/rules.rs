//! Polarity rules
//!
//! The player board's average polarity selects the combat-wide [`Rule`], and each
//! side's average grants a flat [`PolarityBonus`] at combat entry. The two use
//! different thresholds and must stay separate.

use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

use crate::types::BoardUnit;

/// Rule selection: average strictly below this is ORDER.
pub const ORDER_BELOW: u32 = 35;
/// Rule selection: average strictly above this is CHAOS.
pub const CHAOS_ABOVE: u32 = 65;

/// Stat bonus: averages in this inclusive band grant attack.
pub const BALANCED_BAND: (u32, u32) = (40, 60);
/// Stat bonus: averages strictly below this grant health.
pub const EXTREME_BELOW: u32 = 30;
/// Stat bonus: averages strictly above this grant health.
pub const EXTREME_ABOVE: u32 = 70;
pub const BALANCED_ATTACK_BONUS: i32 = 2;
pub const EXTREME_HEALTH_BONUS: i32 = 2;

/// Polarity an empty board is treated as having.
pub const NEUTRAL_POLARITY: u32 = 50;

/// Entropy at which a unit enters combat with reduced attack.
pub const STRAIN_ENTROPY: u32 = 3;
pub const STRAIN_ATTACK_PENALTY: i32 = 1;
/// Entropy at which a unit collapses before combat.
pub const COLLAPSE_ENTROPY: u32 = 5;

/// Sum and count of a board's polarities. Averages are compared exactly,
/// as `total` against `threshold * count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardPolarity {
    total: u32,
    count: u32,
}

impl BoardPolarity {
    pub fn from_polarities<I: IntoIterator<Item = u8>>(polarities: I) -> Self {
        polarities
            .into_iter()
            .fold(Self { total: 0, count: 0 }, |acc, p| Self {
                total: acc.total + p as u32,
                count: acc.count + 1,
            })
    }

    pub fn of(board: &[BoardUnit]) -> Self {
        Self::from_polarities(board.iter().map(|u| u.card.polarity))
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn scaled(&self) -> (u32, u32) {
        if self.is_empty() {
            (NEUTRAL_POLARITY, 1)
        } else {
            (self.total, self.count)
        }
    }

    pub fn below(&self, threshold: u32) -> bool {
        let (total, count) = self.scaled();
        total < threshold * count
    }

    pub fn above(&self, threshold: u32) -> bool {
        let (total, count) = self.scaled();
        total > threshold * count
    }

    pub fn within(&self, low: u32, high: u32) -> bool {
        let (total, count) = self.scaled();
        total >= low * count && total <= high * count
    }
}

/// The combat-wide modifier regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub enum Rule {
    Order,
    Chaos,
    Flux,
}

impl Rule {
    pub fn from_polarity(polarity: &BoardPolarity) -> Self {
        if polarity.below(ORDER_BELOW) {
            Rule::Order
        } else if polarity.above(CHAOS_ABOVE) {
            Rule::Chaos
        } else {
            Rule::Flux
        }
    }

    pub fn for_board(board: &[BoardUnit]) -> Self {
        Self::from_polarity(&BoardPolarity::of(board))
    }

    /// A surviving attacker strikes again after a kill.
    pub fn chains_kills(self) -> bool {
        self == Rule::Chaos
    }

    /// The first Redirect of a combat raises no heat.
    pub fn waives_first_redirect_heat(self) -> bool {
        self == Rule::Flux
    }

    pub fn label(self) -> &'static str {
        match self {
            Rule::Order => "ORDER",
            Rule::Chaos => "CHAOS",
            Rule::Flux => "FLUX",
        }
    }

    pub fn announcement(self) -> &'static str {
        match self {
            Rule::Order => "ORDER active, formation engaged.",
            Rule::Chaos => "CHAOS active, chain kills enabled.",
            Rule::Flux => "FLUX active, first Redirect costs no Heat.",
        }
    }
}

/// Flat stats granted to every unit of one side at combat entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
pub struct PolarityBonus {
    pub attack: i32,
    pub health: i32,
}

impl PolarityBonus {
    pub const NONE: PolarityBonus = PolarityBonus {
        attack: 0,
        health: 0,
    };

    pub fn from_polarity(polarity: &BoardPolarity) -> Self {
        if polarity.is_empty() {
            return Self::NONE;
        }
        let (low, high) = BALANCED_BAND;
        if polarity.within(low, high) {
            Self {
                attack: BALANCED_ATTACK_BONUS,
                health: 0,
            }
        } else if polarity.below(EXTREME_BELOW) || polarity.above(EXTREME_ABOVE) {
            Self {
                attack: 0,
                health: EXTREME_HEALTH_BONUS,
            }
        } else {
            Self::NONE
        }
    }

    pub fn for_board(board: &[BoardUnit]) -> Self {
        Self::from_polarity(&BoardPolarity::of(board))
    }
}
