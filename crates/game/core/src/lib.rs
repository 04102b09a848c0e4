//! Deterministic rules engine of the card battler.
//!
//! `battle-core` resolves card plays and enemy skills into state changes
//! (HP, shields, the angel and demon gauges, action points, card piles, buffs,
//! delayed effects) and drives the turn state machine. It performs no I/O:
//! static rows arrive already parsed in [`BattleTables`] and every random
//! decision pulls from the battle's seeded [`BattleRng`].
//!
//! All state mutation flows through [`engine::BattleEngine`]; the presentation
//! layer reads state through its queries and drains [`BattleEvent`]s.
pub mod ai;
pub mod buff;
pub mod combat;
pub mod config;
pub mod delayed;
pub mod effect;
pub mod engine;
pub mod env;
pub mod error;
pub mod requirement;
pub mod state;

pub use buff::{Buff, BuffId, BuffKind, BuffList, BuffSpec, BuffSpecError};
pub use config::BattleConfig;
pub use delayed::{DelayedEffect, DelayedMode, DelayedQueue};
pub use effect::{Effect, EffectParseError};
pub use engine::{BattleEngine, EnemySetup, PlayError, SetupError, TurnError};
pub use env::{
    BattleRng, BattleTables, CardRow, EffectSlot, EffectType, ElementType, EnemyBehaviorRow,
    EnemyRow, Faction, MonsterSkillRow, Rarity, Resistances, RowId, SkillType,
};
pub use error::{ErrorSeverity, GameError};
pub use state::{
    BattleEntity, BattleEvent, BattleOutcome, BattlePhase, BattleState, CardInstance,
    CardInstanceId, EnemyState, EntityId, Pile, PileCounts, PlayerState, Side,
};
