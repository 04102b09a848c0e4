//! Read-only battle environment.
//!
//! Static rows (cards, enemies, behaviors, monster skills) arrive already
//! parsed and are bundled into [`BattleTables`]. Together with the seeded
//! [`BattleRng`] they are everything the engine needs from outside; there is
//! no ambient global lookup.
mod cards;
mod enemies;
mod rng;
mod tables;

pub use cards::{CardRow, EffectSlot, EffectType, ElementType, Faction, Rarity, RowId};
pub use enemies::{
    BehaviorRuleRow, EnemyBehaviorRow, EnemyRow, EnemySkillRef, MonsterSkillRow, Resistances,
    SkillEffectSlot, SkillType,
};
pub use rng::BattleRng;
pub use tables::BattleTables;
