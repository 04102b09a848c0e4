//! Behavior row grammars.
//!
//! Weight slots read `"<skillId>,<baseWeight>"`; rule results read
//! `"Skill<N>,<bonusWeight>"` with `N` counting weight slots from 1.

use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::env::RowId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BehaviorParseError {
    #[error("weight slot '{0}' must be '<skillId>,<baseWeight>'")]
    WeightFormat(String),

    #[error("rule result '{0}' must be 'Skill<N>,<bonusWeight>'")]
    ResultFormat(String),

    #[error("invalid weight '{0}'")]
    InvalidWeight(String),

    #[error("rule result addresses Skill{slot}, slots are numbered from 1")]
    InvalidSlot { slot: usize },
}

impl GameError for BehaviorParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::WeightFormat(_) => "BEHAVIOR_WEIGHT_FORMAT",
            Self::ResultFormat(_) => "BEHAVIOR_RESULT_FORMAT",
            Self::InvalidWeight(_) => "BEHAVIOR_INVALID_WEIGHT",
            Self::InvalidSlot { .. } => "BEHAVIOR_INVALID_SLOT",
        }
    }
}

/// One weighted skill slot of a behavior row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightSlot {
    pub skill_id: RowId,
    pub weight: i32,
}

impl FromStr for WeightSlot {
    type Err = BehaviorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (skill_id, weight) = raw
            .split_once(',')
            .ok_or_else(|| BehaviorParseError::WeightFormat(raw.to_string()))?;
        let skill_id = skill_id.trim();
        if skill_id.is_empty() {
            return Err(BehaviorParseError::WeightFormat(raw.to_string()));
        }
        Ok(Self {
            skill_id: skill_id.to_string(),
            weight: parse_weight(weight)?,
        })
    }
}

/// Bonus a satisfied rule adds to one weight slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleResult {
    /// Zero-based weight slot index.
    pub slot: usize,
    pub bonus: i32,
}

impl FromStr for RuleResult {
    type Err = BehaviorParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let format = || BehaviorParseError::ResultFormat(raw.to_string());
        let (slot, bonus) = raw.split_once(',').ok_or_else(format)?;
        let slot = slot.trim();
        let number = slot
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("skill"))
            .and_then(|_| slot[5..].parse::<usize>().ok())
            .ok_or_else(format)?;
        if number == 0 {
            return Err(BehaviorParseError::InvalidSlot { slot: number });
        }
        Ok(Self {
            slot: number - 1,
            bonus: parse_weight(bonus)?,
        })
    }
}

fn parse_weight(raw: &str) -> Result<i32, BehaviorParseError> {
    raw.trim()
        .parse()
        .map_err(|_| BehaviorParseError::InvalidWeight(raw.trim().to_string()))
}
