//! Enemy behavior conditions: `"<ConditionType>,<Value>"`.
//!
//! "Self" is the deciding enemy and "Target" is the player. Conditions fail
//! closed: anything that does not parse evaluates to false.

use std::str::FromStr;

use crate::buff::BuffId;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BattleEntity, BattleState, EntityId};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConditionParseError {
    #[error("condition '{0}' must be '<ConditionType>,<Value>'")]
    Format(String),

    #[error("unknown condition type '{0}'")]
    UnknownCondition(String),

    #[error("invalid value '{value}' for condition {kind}")]
    InvalidValue { kind: ConditionKind, value: String },
}

impl GameError for ConditionParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Format(_) => "CONDITION_FORMAT",
            Self::UnknownCondition(_) => "CONDITION_UNKNOWN_TYPE",
            Self::InvalidValue { .. } => "CONDITION_INVALID_VALUE",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ConditionKind {
    // ===== HP percent, strict =====
    SelfHpBelow,
    SelfHpAbove,
    TargetHpBelow,
    TargetHpAbove,

    // ===== buff counts, at least =====
    SelfBuffCount,
    SelfDebuffCount,
    TargetBuffCount,
    TargetDebuffCount,

    // ===== buff presence, value is a buff id =====
    SelfHasBuff,
    SelfLacksBuff,
    TargetHasBuff,
    TargetLacksBuff,

    // ===== player gauges, strict =====
    AmeterAbove,
    DmeterAbove,

    // ===== battle progress =====
    TurnAtLeast,
    CastCountAtLeast,
    LivingEnemiesAtMost,
}

impl ConditionKind {
    const fn takes_buff(&self) -> bool {
        matches!(
            self,
            ConditionKind::SelfHasBuff
                | ConditionKind::SelfLacksBuff
                | ConditionKind::TargetHasBuff
                | ConditionKind::TargetLacksBuff
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConditionValue {
    Number(f32),
    Buff(BuffId),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BehaviorCondition {
    pub kind: ConditionKind,
    pub value: ConditionValue,
}

impl FromStr for BehaviorCondition {
    type Err = ConditionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, value) = s
            .split_once(',')
            .ok_or_else(|| ConditionParseError::Format(s.to_string()))?;
        let kind = kind.trim();
        let value = value.trim();

        let kind = ConditionKind::from_str(kind)
            .map_err(|_| ConditionParseError::UnknownCondition(kind.to_string()))?;
        let invalid = || ConditionParseError::InvalidValue {
            kind,
            value: value.to_string(),
        };
        let value = if kind.takes_buff() {
            ConditionValue::Buff(BuffId::from_str(value).map_err(|_| invalid())?)
        } else {
            ConditionValue::Number(value.parse().map_err(|_| invalid())?)
        };
        Ok(Self { kind, value })
    }
}

impl BehaviorCondition {
    /// Evaluates the condition for `enemy` deciding against the player.
    pub fn evaluate(&self, state: &BattleState, enemy: EntityId) -> bool {
        let Some(me) = state.entity(enemy) else {
            return false;
        };
        let player = &state.player.entity;

        match (self.kind, self.value) {
            (ConditionKind::SelfHasBuff, ConditionValue::Buff(id)) => me.buffs.has(id),
            (ConditionKind::SelfLacksBuff, ConditionValue::Buff(id)) => !me.buffs.has(id),
            (ConditionKind::TargetHasBuff, ConditionValue::Buff(id)) => player.buffs.has(id),
            (ConditionKind::TargetLacksBuff, ConditionValue::Buff(id)) => !player.buffs.has(id),
            (kind, ConditionValue::Number(value)) => {
                numeric(kind, value, me, player, state, enemy)
            }
            _ => false,
        }
    }
}

fn numeric(
    kind: ConditionKind,
    value: f32,
    me: &BattleEntity,
    player: &BattleEntity,
    state: &BattleState,
    enemy: EntityId,
) -> bool {
    match kind {
        ConditionKind::SelfHpBelow => me.hp_percent() < value,
        ConditionKind::SelfHpAbove => me.hp_percent() > value,
        ConditionKind::TargetHpBelow => player.hp_percent() < value,
        ConditionKind::TargetHpAbove => player.hp_percent() > value,
        ConditionKind::SelfBuffCount => me.buffs.positive_count() as f32 >= value,
        ConditionKind::SelfDebuffCount => me.buffs.negative_count() as f32 >= value,
        ConditionKind::TargetBuffCount => player.buffs.positive_count() as f32 >= value,
        ConditionKind::TargetDebuffCount => player.buffs.negative_count() as f32 >= value,
        ConditionKind::AmeterAbove => state.player.angel_gauge() as f32 > value,
        ConditionKind::DmeterAbove => state.player.demon_gauge() as f32 > value,
        ConditionKind::TurnAtLeast => state.turn as f32 >= value,
        ConditionKind::CastCountAtLeast => state
            .enemy(enemy)
            .is_some_and(|e| e.cast_count as f32 >= value),
        ConditionKind::LivingEnemiesAtMost => state.living_enemy_count() as f32 <= value,
        ConditionKind::SelfHasBuff
        | ConditionKind::SelfLacksBuff
        | ConditionKind::TargetHasBuff
        | ConditionKind::TargetLacksBuff => false,
    }
}

/// Whether a raw condition string holds. Malformed conditions are false.
pub fn condition_holds(raw: &str, state: &BattleState, enemy: EntityId) -> bool {
    match raw.parse::<BehaviorCondition>() {
        Ok(condition) => condition.evaluate(state, enemy),
        Err(error) => {
            tracing::warn!(condition = raw, %error, "unparsable behavior condition, treating as false");
            false
        }
    }
}
