//! Parsed effect variants.
//!
//! Effect values arrive as plain text next to a closed [`EffectType`]. They
//! are parsed into an [`Effect`] right before execution; a value that does not
//! fit its type's grammar is an [`EffectParseError`].

use std::str::FromStr;

use crate::buff::{BuffSpec, BuffSpecError};
use crate::delayed::DelayedMode;
use crate::env::EffectType;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Pile, Side};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EffectParseError {
    #[error("{effect} expects a number, got '{value}'")]
    InvalidNumber { effect: EffectType, value: String },

    #[error("{effect} value '{value}' does not match '{expected}'")]
    InvalidFormat {
        effect: EffectType,
        value: String,
        expected: &'static str,
    },

    #[error("unknown meter '{0}'")]
    UnknownMeter(String),

    #[error("unknown side '{0}'")]
    UnknownSide(String),

    #[error(transparent)]
    Buff(#[from] BuffSpecError),
}

impl GameError for EffectParseError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "EFFECT_INVALID_NUMBER",
            Self::InvalidFormat { .. } => "EFFECT_INVALID_FORMAT",
            Self::UnknownMeter(_) => "EFFECT_UNKNOWN_METER",
            Self::UnknownSide(_) => "EFFECT_UNKNOWN_SIDE",
            Self::Buff(error) => error.error_code(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gauge {
    Angel,
    Demon,
}

/// Resource a spend-repeat loop pays with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Meter {
    #[strum(serialize = "Ametervalue")]
    AngelGauge,
    #[strum(serialize = "Dmetervalue")]
    DemonGauge,
    ActionPoint,
}

/// Who a buff effect lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuffScope {
    Caster,
    Target,
    AllOpponents,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SingleDamage(f32),
    AoeDamage(f32),
    SelfDamage(f32),
    SelfFlatHeal(f32),
    SelfPercHeal(f32),
    ShiftGauge { gauge: Gauge, delta: i32 },
    GainAction(i32),
    ReduceCost(i32),
    InstDraw(u32),
    Burn { pile: Pile, count: u32 },
    CleanseSelf(u32),
    ApplyBuff { scope: BuffScope, spec: BuffSpec },
    CastMore { side: Side, distance: usize },
    Delay { mode: DelayedMode, damage: f32, turns: i32 },
    SpendRepeat { meter: Meter, cost: i32, budget: i32 },
}

impl Effect {
    /// Parses the value of one effect slot. `None` for empty slots.
    pub fn parse(effect_type: EffectType, value: &str) -> Result<Option<Self>, EffectParseError> {
        let value = value.trim();
        let number = |v: &str| -> Result<f32, EffectParseError> {
            v.trim().parse().map_err(|_| EffectParseError::InvalidNumber {
                effect: effect_type,
                value: value.to_string(),
            })
        };
        let integer = |v: &str| -> Result<i32, EffectParseError> {
            v.trim().parse().map_err(|_| EffectParseError::InvalidNumber {
                effect: effect_type,
                value: value.to_string(),
            })
        };
        let negated = |v: &str| -> Result<i32, EffectParseError> {
            integer(v)?
                .checked_neg()
                .ok_or_else(|| EffectParseError::InvalidNumber {
                    effect: effect_type,
                    value: value.to_string(),
                })
        };
        let count = |v: &str| -> Result<u32, EffectParseError> { Ok(integer(v)?.max(0) as u32) };
        let buff = |scope: BuffScope| -> Result<Effect, EffectParseError> {
            Ok(Effect::ApplyBuff {
                scope,
                spec: BuffSpec::from_str(value)?,
            })
        };

        let effect = match effect_type {
            EffectType::None => return Ok(None),
            EffectType::SingleDamage => Effect::SingleDamage(number(value)?),
            EffectType::AoeDamage => Effect::AoeDamage(number(value)?),
            EffectType::SelfDamage => Effect::SelfDamage(number(value)?),
            EffectType::SelfFlatHeal => Effect::SelfFlatHeal(number(value)?),
            EffectType::SelfPercHeal => Effect::SelfPercHeal(number(value)?),
            EffectType::AvalueInc => Effect::ShiftGauge {
                gauge: Gauge::Angel,
                delta: integer(value)?,
            },
            EffectType::AvalueDec => Effect::ShiftGauge {
                gauge: Gauge::Angel,
                delta: negated(value)?,
            },
            EffectType::DvalueInc => Effect::ShiftGauge {
                gauge: Gauge::Demon,
                delta: integer(value)?,
            },
            EffectType::DvalueDec => Effect::ShiftGauge {
                gauge: Gauge::Demon,
                delta: negated(value)?,
            },
            EffectType::GainAction => Effect::GainAction(integer(value)?),
            EffectType::ReduceCost => Effect::ReduceCost(integer(value)?),
            EffectType::InstDraw => Effect::InstDraw(count(value)?),
            EffectType::DeckBurn => Effect::Burn {
                pile: Pile::Draw,
                count: count(value)?,
            },
            EffectType::HandBurn => Effect::Burn {
                pile: Pile::Hand,
                count: count(value)?,
            },
            EffectType::CleanseSelf => Effect::CleanseSelf(count(value)?),
            EffectType::SelfBuff => buff(BuffScope::Caster)?,
            EffectType::TargetSingleBuff => buff(BuffScope::Target)?,
            EffectType::TargetAoeBuff => buff(BuffScope::AllOpponents)?,
            EffectType::CastMore => {
                let (side, distance) = pair(effect_type, value, "<Left|Right>,<n>")?;
                let side = Side::from_str(side.trim())
                    .map_err(|_| EffectParseError::UnknownSide(side.trim().to_string()))?;
                Effect::CastMore {
                    side,
                    distance: count(distance)? as usize,
                }
            }
            EffectType::DelaySingleDamage | EffectType::DelayAoeDamage => {
                let (damage, turns) = pair(effect_type, value, "<damage>,<delayTurns>")?;
                let mode = if effect_type == EffectType::DelaySingleDamage {
                    DelayedMode::Single
                } else {
                    DelayedMode::AreaOfAllEnemies
                };
                Effect::Delay {
                    mode,
                    damage: number(damage)?,
                    turns: integer(turns)?,
                }
            }
            EffectType::SpendRepeatTheRest => {
                let fields: Vec<&str> = value.split(',').map(str::trim).collect();
                let [meter, cost, budget] = fields.as_slice() else {
                    return Err(EffectParseError::InvalidFormat {
                        effect: effect_type,
                        value: value.to_string(),
                        expected: "<meter>,<costPerRepeat>,<maxTotal>",
                    });
                };
                Effect::SpendRepeat {
                    meter: Meter::from_str(meter)
                        .map_err(|_| EffectParseError::UnknownMeter(meter.to_string()))?,
                    cost: integer(*cost)?,
                    budget: integer(*budget)?,
                }
            }
        };
        Ok(Some(effect))
    }
}

fn pair<'v>(
    effect: EffectType,
    value: &'v str,
    expected: &'static str,
) -> Result<(&'v str, &'v str), EffectParseError> {
    value
        .split_once(',')
        .ok_or_else(|| EffectParseError::InvalidFormat {
            effect,
            value: value.to_string(),
            expected,
        })
}
