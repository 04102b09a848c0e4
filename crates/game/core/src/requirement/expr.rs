//! Card requirement expressions: `"<Identifier><Operator><Number>"`.

use std::str::FromStr;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleState, EntityId};

/// Prefix marking a slot consumed by `SpendRepeatTheRest`; never blocks.
pub const SPEND_REPEAT_SENTINEL: &str = "SpendRepeat";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RequirementParseError {
    #[error("requirement '{0}' has no comparison operator")]
    MissingOperator(String),

    #[error("unknown requirement identifier '{0}'")]
    UnknownIdentifier(String),

    #[error("invalid requirement number '{0}'")]
    InvalidNumber(String),
}

impl GameError for RequirementParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingOperator(_) => "REQUIREMENT_MISSING_OPERATOR",
            Self::UnknownIdentifier(_) => "REQUIREMENT_UNKNOWN_IDENTIFIER",
            Self::InvalidNumber(_) => "REQUIREMENT_INVALID_NUMBER",
        }
    }
}

/// Caster values a requirement can read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RequirementSubject {
    #[strum(serialize = "ametervalue")]
    AngelGauge,
    #[strum(serialize = "dmetervalue")]
    DemonGauge,
    #[strum(serialize = "hp")]
    Hp,
    #[strum(serialize = "shield")]
    Shield,
    #[strum(serialize = "actionpoint")]
    ActionPoint,
    #[strum(serialize = "killoccurred")]
    KillOccurred,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Ge,
    Le,
    Gt,
    Lt,
    Eq,
    Ne,
}

impl Comparison {
    /// Two-character operators first, so `>=` wins over `>`.
    const TOKENS: [(&'static str, Comparison); 6] = [
        (">=", Comparison::Ge),
        ("<=", Comparison::Le),
        ("==", Comparison::Eq),
        ("!=", Comparison::Ne),
        (">", Comparison::Gt),
        ("<", Comparison::Lt),
    ];

    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Comparison::Ge => lhs >= rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Requirement {
    pub subject: RequirementSubject,
    pub comparison: Comparison,
    pub threshold: f64,
}

impl FromStr for Requirement {
    type Err = RequirementParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(['<', '>', '=', '!'])
            .ok_or_else(|| RequirementParseError::MissingOperator(s.to_string()))?;
        let (identifier, rest) = s.split_at(split);

        let (token, comparison) = Comparison::TOKENS
            .iter()
            .find(|(token, _)| rest.starts_with(token))
            .ok_or_else(|| RequirementParseError::MissingOperator(s.to_string()))?;

        let identifier = identifier.trim();
        let subject = RequirementSubject::from_str(identifier)
            .map_err(|_| RequirementParseError::UnknownIdentifier(identifier.to_string()))?;

        let number = rest[token.len()..].trim();
        let threshold = number
            .parse()
            .map_err(|_| RequirementParseError::InvalidNumber(number.to_string()))?;

        Ok(Self {
            subject,
            comparison: *comparison,
            threshold,
        })
    }
}

impl Requirement {
    pub fn evaluate(&self, subjects: &RequirementSubjects) -> bool {
        self.comparison
            .holds(subjects.value(self.subject) as f64, self.threshold)
    }
}

/// Snapshot of the caster values requirements compare against.
///
/// Gauges and action points belong to the player; enemy casters read 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequirementSubjects {
    pub angel_gauge: i32,
    pub demon_gauge: i32,
    pub hp: i32,
    pub shield: i32,
    pub action_point: i32,
    pub kill_occurred: bool,
}

impl RequirementSubjects {
    pub fn of(state: &BattleState, caster: EntityId, kill_occurred: bool) -> Self {
        let (hp, shield) = state
            .entity(caster)
            .map(|e| (e.hp(), e.shield()))
            .unwrap_or_default();
        if caster.is_player() {
            Self {
                angel_gauge: state.player.angel_gauge(),
                demon_gauge: state.player.demon_gauge(),
                hp,
                shield,
                action_point: state.player.action_point(),
                kill_occurred,
            }
        } else {
            Self {
                hp,
                shield,
                kill_occurred,
                ..Self::default()
            }
        }
    }

    pub fn value(&self, subject: RequirementSubject) -> i32 {
        match subject {
            RequirementSubject::AngelGauge => self.angel_gauge,
            RequirementSubject::DemonGauge => self.demon_gauge,
            RequirementSubject::Hp => self.hp,
            RequirementSubject::Shield => self.shield,
            RequirementSubject::ActionPoint => self.action_point,
            RequirementSubject::KillOccurred => i32::from(self.kill_occurred),
        }
    }
}

/// Whether a raw requirement string lets an effect run.
///
/// Empty strings and the SpendRepeat sentinel always pass. Unparsable
/// requirements pass too, with a warning.
pub fn requirement_met(raw: &str, subjects: &RequirementSubjects) -> bool {
    let raw = raw.trim();
    if raw.is_empty() || raw.starts_with(SPEND_REPEAT_SENTINEL) {
        return true;
    }
    match raw.parse::<Requirement>() {
        Ok(requirement) => requirement.evaluate(subjects),
        Err(error) => {
            tracing::warn!(requirement = raw, %error, "unparsable requirement, allowing effect");
            true
        }
    }
}
