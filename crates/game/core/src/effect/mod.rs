//! Effect interpreter.
//!
//! Card and skill rows carry up to four `(EffectType, value, requirement)`
//! slots. [`kind`] parses one slot into a typed [`Effect`], [`context`] holds
//! the per-resolution context, and [`execute`] runs the slots against the
//! battle state.
pub mod context;
pub mod execute;
pub mod kind;

pub use context::{CardSource, EffectContext};
pub use execute::{PlayedCard, execute_card, execute_skill, skill_slots};
pub use kind::{BuffScope, Effect, EffectParseError, Gauge, Meter};
