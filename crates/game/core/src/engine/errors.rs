//! Errors returned by the battle engine.
//!
//! Every rejected call leaves the battle state untouched.

use crate::env::RowId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattlePhase, CardInstanceId, EntityId};

/// Why a card could not be played.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayError {
    #[error("cards can only be played during the player turn (current phase: {actual})")]
    PhaseMismatch { actual: BattlePhase },

    #[error("the battle has already ended")]
    BattleFinished,

    #[error("{0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error("not enough action points: card costs {cost}, {available} available")]
    InsufficientActionPoints { cost: i32, available: i32 },

    #[error("{0} is not a living enemy")]
    UnknownTarget(EntityId),
}

impl GameError for PlayError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PhaseMismatch { .. } | Self::InsufficientActionPoints { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::CardNotInHand(_) | Self::UnknownTarget(_) => ErrorSeverity::Validation,
            Self::BattleFinished => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PhaseMismatch { .. } => "PLAY_PHASE_MISMATCH",
            Self::BattleFinished => "PLAY_BATTLE_FINISHED",
            Self::CardNotInHand(_) => "PLAY_CARD_NOT_IN_HAND",
            Self::InsufficientActionPoints { .. } => "PLAY_INSUFFICIENT_ACTION_POINTS",
            Self::UnknownTarget(_) => "PLAY_UNKNOWN_TARGET",
        }
    }
}

/// Why the player turn could not be ended.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnError {
    #[error("the turn can only be ended during the player turn (current phase: {actual})")]
    PhaseMismatch { actual: BattlePhase },

    #[error("the battle has already ended")]
    BattleFinished,
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::PhaseMismatch { .. } => ErrorSeverity::Recoverable,
            Self::BattleFinished => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PhaseMismatch { .. } => "TURN_PHASE_MISMATCH",
            Self::BattleFinished => "TURN_BATTLE_FINISHED",
        }
    }
}

/// Why a battle could not be started.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetupError {
    #[error("deck references unknown card '{0}'")]
    UnknownCard(RowId),

    #[error("unknown enemy '{0}'")]
    UnknownEnemy(RowId),

    #[error("a battle needs at least one enemy")]
    NoEnemies,

    #[error("the player deck is empty")]
    EmptyDeck,
}

impl GameError for SetupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownCard(_) => "SETUP_UNKNOWN_CARD",
            Self::UnknownEnemy(_) => "SETUP_UNKNOWN_ENEMY",
            Self::NoEnemies => "SETUP_NO_ENEMIES",
            Self::EmptyDeck => "SETUP_EMPTY_DECK",
        }
    }
}
