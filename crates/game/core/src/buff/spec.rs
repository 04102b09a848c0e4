//! Parsing of buff effect values: `"<buffId>,<param>,<stacks>,<duration>"`.

use std::str::FromStr;

use super::{Buff, BuffId, BuffKind};
use crate::env::ElementType;
use crate::error::{ErrorSeverity, GameError};

/// Errors produced while parsing a buff effect value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BuffSpecError {
    #[error("buff spec '{0}' must have four comma-separated fields")]
    FieldCount(String),

    #[error("unknown buff id '{0}'")]
    UnknownBuff(String),

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid resistance parameter '{0}'")]
    InvalidResistance(String),
}

impl GameError for BuffSpecError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::FieldCount(_) => "BUFF_SPEC_FIELD_COUNT",
            Self::UnknownBuff(_) => "BUFF_SPEC_UNKNOWN_BUFF",
            Self::InvalidNumber { .. } => "BUFF_SPEC_INVALID_NUMBER",
            Self::InvalidResistance(_) => "BUFF_SPEC_INVALID_RESISTANCE",
        }
    }
}

/// Hand offsets of a Swift buff.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwiftOffsets {
    pub left: u32,
    pub right: u32,
}

impl SwiftOffsets {
    /// Parses `L{n}`, `R{n}`, `L{n}R{m}` or `LR{n}` (case-insensitive).
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim().to_ascii_uppercase();
        if let Some(both) = spec.strip_prefix("LR") {
            let n = both.parse().ok()?;
            return Some(Self { left: n, right: n });
        }
        if let Some(rest) = spec.strip_prefix('L') {
            return match rest.split_once('R') {
                Some((left, right)) => Some(Self {
                    left: left.parse().ok()?,
                    right: right.parse().ok()?,
                }),
                None => Some(Self {
                    left: rest.parse().ok()?,
                    right: 0,
                }),
            };
        }
        if let Some(right) = spec.strip_prefix('R') {
            return Some(Self {
                left: 0,
                right: right.parse().ok()?,
            });
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

/// A parsed buff effect value, not yet bound to an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuffSpec {
    pub id: BuffId,
    pub param: String,
    pub stacks: u32,
    pub duration: i32,
}

impl FromStr for BuffSpec {
    type Err = BuffSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [id, param, stacks, duration] = fields.as_slice() else {
            return Err(BuffSpecError::FieldCount(s.to_string()));
        };

        let id = BuffId::from_str(id).map_err(|_| BuffSpecError::UnknownBuff(id.to_string()))?;
        let stacks: i64 = parse_number("stacks", stacks)?;
        let duration: i32 = parse_number("duration", duration)?;

        Ok(Self {
            id,
            param: param.to_string(),
            stacks: stacks.clamp(1, u32::MAX as i64) as u32,
            duration,
        })
    }
}

impl BuffSpec {
    /// Builds the buff instance, interpreting the parameter per variant.
    ///
    /// A malformed Swift direction yields 0/0 offsets instead of an error.
    pub fn to_buff(&self) -> Result<Buff, BuffSpecError> {
        let kind = match self.id {
            BuffId::Guard => BuffKind::Guard,
            BuffId::Cursed => BuffKind::Cursed,
            BuffId::Gifted => BuffKind::Gifted,
            BuffId::Blessed => BuffKind::Blessed {
                percent: self.percent()?,
            },
            BuffId::Lifesteel => BuffKind::Lifesteel {
                percent: self.percent()?,
                triggered: false,
            },
            BuffId::ReqChange => BuffKind::ReqChange {
                modifier: parse_number("requirement modifier", &self.param)?,
            },
            BuffId::IncreaseDmg => BuffKind::IncreaseDmg {
                percent: self.percent()?,
            },
            BuffId::BoostDmg => BuffKind::BoostDmg {
                flat: self.percent()?,
            },
            BuffId::Fragile => BuffKind::Fragile {
                percent: self.percent()?,
            },
            BuffId::Bleeding => BuffKind::Bleeding {
                percent: self.percent()?,
            },
            BuffId::ReduceAtk => BuffKind::ReduceAtk {
                percent: self.percent()?,
            },
            BuffId::Feared => BuffKind::Feared { accumulated: 0 },
            BuffId::IncreaseRes => {
                let (element, percent) = parse_resistance(&self.param)?;
                BuffKind::IncreaseRes { element, percent }
            }
            BuffId::ReduceRes => {
                let (element, percent) = parse_resistance(&self.param)?;
                BuffKind::ReduceRes { element, percent }
            }
            BuffId::Swift => {
                let offsets = SwiftOffsets::parse(&self.param).unwrap_or_else(|| {
                    tracing::warn!(param = %self.param, "malformed swift direction, using 0/0");
                    SwiftOffsets::default()
                });
                BuffKind::Swift { offsets }
            }
        };
        Ok(Buff::new(kind, self.stacks, self.duration))
    }

    fn percent(&self) -> Result<f32, BuffSpecError> {
        parse_number("parameter", &self.param)
    }
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, BuffSpecError> {
    value
        .trim()
        .parse()
        .map_err(|_| BuffSpecError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// `"<Element>:<percent>"` or a bare percent covering every element.
fn parse_resistance(param: &str) -> Result<(Option<ElementType>, i32), BuffSpecError> {
    match param.split_once(':') {
        Some((element, percent)) => {
            let element = ElementType::from_str(element.trim())
                .map_err(|_| BuffSpecError::InvalidResistance(param.to_string()))?;
            Ok((Some(element), parse_number("resistance", percent)?))
        }
        None => Ok((None, parse_number("resistance", param)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_four_fields() {
        let spec: BuffSpec = "Fragile,25,2,3".parse().unwrap();
        assert_eq!(spec.id, BuffId::Fragile);
        assert_eq!(spec.stacks, 2);
        assert_eq!(spec.duration, 3);

        let buff = spec.to_buff().unwrap();
        assert_eq!(buff.kind, BuffKind::Fragile { percent: 25.0 });
    }

    #[test]
    fn rejects_malformed_specs() {
        assert!(matches!(
            "Fragile,25,2".parse::<BuffSpec>(),
            Err(BuffSpecError::FieldCount(_))
        ));
        assert!(matches!(
            "Stoneskin,1,1,1".parse::<BuffSpec>(),
            Err(BuffSpecError::UnknownBuff(_))
        ));
        assert!(matches!(
            "Guard,0,x,1".parse::<BuffSpec>(),
            Err(BuffSpecError::InvalidNumber { field: "stacks", .. })
        ));

        let spec: BuffSpec = "IncreaseDmg,lots,1,1".parse().unwrap();
        assert!(spec.to_buff().is_err());
    }

    #[test]
    fn swift_directions() {
        assert_eq!(
            SwiftOffsets::parse("L2"),
            Some(SwiftOffsets { left: 2, right: 0 })
        );
        assert_eq!(
            SwiftOffsets::parse("r1"),
            Some(SwiftOffsets { left: 0, right: 1 })
        );
        assert_eq!(
            SwiftOffsets::parse("L1R3"),
            Some(SwiftOffsets { left: 1, right: 3 })
        );
        assert_eq!(
            SwiftOffsets::parse("LR2"),
            Some(SwiftOffsets { left: 2, right: 2 })
        );
        assert_eq!(SwiftOffsets::parse("L"), None);
        assert_eq!(SwiftOffsets::parse("Up1"), None);
    }

    #[test]
    fn malformed_swift_direction_becomes_empty_offsets() {
        let spec: BuffSpec = "Swift,sideways,1,1".parse().unwrap();
        let buff = spec.to_buff().unwrap();
        match buff.kind {
            BuffKind::Swift { offsets } => assert!(offsets.is_empty()),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn resistance_parameters() {
        let scoped: BuffSpec = "IncreaseRes,Fire:20,1,2".parse().unwrap();
        assert_eq!(
            scoped.to_buff().unwrap().kind,
            BuffKind::IncreaseRes {
                element: Some(ElementType::Fire),
                percent: 20
            }
        );

        let global: BuffSpec = "ReduceRes,15,1,2".parse().unwrap();
        assert_eq!(
            global.to_buff().unwrap().kind,
            BuffKind::ReduceRes {
                element: None,
                percent: 15
            }
        );

        let bad: BuffSpec = "ReduceRes,Ice:15,1,2".parse().unwrap();
        assert!(matches!(
            bad.to_buff(),
            Err(BuffSpecError::InvalidResistance(_))
        ));
    }
}
