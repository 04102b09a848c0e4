//! Damage and healing resolution.
//!
//! Every HP change in a battle flows through this module so that buff hooks
//! (outgoing fold, Fragile, Guard, Feared, Lifesteel, Cursed) apply uniformly
//! to card damage, delayed damage and buff ticks.
//!
//! # Core Functions
//!
//! - `calculate_damage`: attacker-side fold of a base amount
//! - `apply_damage`: incoming modifiers, rounding, shield, HP
//! - `apply_healing`: rounding, Cursed, max-HP cap
//! - `strike`: the three above plus Lifesteel, for a landed hit

pub mod damage;

pub use damage::{
    DamageReport, apply_damage, apply_healing, calculate_damage, round_half_up, strike,
};
