//! Gating micro-languages.
//!
//! Two unrelated grammars live here:
//!
//! - [`expr`]: card and skill requirements such as `"Ametervalue>=25"`,
//!   evaluated against the caster. Fail-open.
//! - [`condition`]: enemy behavior conditions such as `"SelfHpBelow,30"`,
//!   evaluated by the AI. Fail-closed.
pub mod condition;
pub mod expr;

pub use condition::{
    BehaviorCondition, ConditionKind, ConditionParseError, ConditionValue, condition_holds,
};
pub use expr::{
    Comparison, Requirement, RequirementParseError, RequirementSubject, RequirementSubjects,
    SPEND_REPEAT_SENTINEL, requirement_met,
};
