//! Enemy decision procedure.
//!
//! Every enemy carries an intent: the skill it will use on its next turn,
//! chosen at the end of the previous enemy turn so the player can see it
//! coming.
//!
//! - [`behavior`]: grammars of the behavior row strings
//! - [`decision`]: weighting, the weighted draw and intent resolution
pub mod behavior;
pub mod decision;

pub use behavior::{BehaviorParseError, RuleResult, WeightSlot};
pub use decision::{SkillCandidate, candidates, choose_intent, perform_intent, refresh_intents};
