//! Error types for combat operations
//!
//! Every rejected action leaves the encounter untouched. Callers driven by
//! player input are free to ignore the error.

use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

#[cfg(feature = "std")]
use serde::{Deserialize, Serialize};

/// Errors that can occur while running a combat or a round
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo)]
#[cfg_attr(feature = "std", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "std", serde(tag = "type", rename_all = "camelCase"))]
pub enum GameError {
    /// Action not allowed in current phase
    WrongPhase,
    /// Combat cannot start without player units
    EmptyBoard,
    /// Board is full, cannot place more units
    BoardFull,
    /// Unit template not found
    TemplateNotFound,
    /// Card is not part of the catalog
    UnknownCard,
    /// Card is not in this combat's hand
    CardNotInHand,
    /// A card is already armed for the next combat
    CardAlreadyArmed,
    /// The intervention for this combat has been spent
    CardSpent,
    /// Hold locked intervention for the rest of the combat
    WindowLocked,
    /// No intervention window is open
    WindowClosed,
    /// The card only works during the player's attack window
    NotYourTurn,
    /// A target was clicked with no card selected
    NoCardSelected,
    /// Target is missing, dead, or on the wrong side
    InvalidTarget,
    /// Target is outside the card's reach
    OutOfReach { slots: u8 },
    /// No unit is waiting for a level-up choice
    NoPendingLevelUp,
    /// Combat tick limit exceeded
    LimitExceeded,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase => write!(f, "action not allowed in the current phase"),
            GameError::EmptyBoard => write!(f, "player board is empty"),
            GameError::BoardFull => write!(f, "board is full"),
            GameError::TemplateNotFound => write!(f, "unit template not found"),
            GameError::UnknownCard => write!(f, "card is not in the catalog"),
            GameError::CardNotInHand => write!(f, "card is not in the combat hand"),
            GameError::CardAlreadyArmed => write!(f, "a card is already armed"),
            GameError::CardSpent => write!(f, "intervention already spent this combat"),
            GameError::WindowLocked => write!(f, "intervention locked by hold"),
            GameError::WindowClosed => write!(f, "no intervention window is open"),
            GameError::NotYourTurn => write!(f, "only usable during your attack window"),
            GameError::NoCardSelected => write!(f, "no card selected"),
            GameError::InvalidTarget => write!(f, "invalid target"),
            GameError::OutOfReach { slots } => {
                write!(f, "target outside the front {} slots", slots)
            }
            GameError::NoPendingLevelUp => write!(f, "no level-up pending"),
            GameError::LimitExceeded => write!(f, "combat tick limit exceeded"),
        }
    }
}

/// Result type alias for game operations
pub type GameResult<T> = Result<T, GameError>;
