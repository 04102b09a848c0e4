//! Static enemy, behavior and monster-skill rows.

use arrayvec::ArrayVec;

use super::cards::{EffectType, ElementType, RowId};
use crate::config::BattleConfig;

/// Elemental resistance percentages of an enemy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Resistances {
    pub fire: i32,
    pub water: i32,
    pub earth: i32,
    pub wind: i32,
    pub lightning: i32,
}

impl Resistances {
    /// Resistance percentage against an element. Neutral is never resisted.
    pub fn get(&self, element: ElementType) -> i32 {
        match element {
            ElementType::Neutral => 0,
            ElementType::Fire => self.fire,
            ElementType::Water => self.water,
            ElementType::Earth => self.earth,
            ElementType::Wind => self.wind,
            ElementType::Lightning => self.lightning,
        }
    }
}

/// `(SkillName, SkillRequirement)` pair of an enemy row.
///
/// The requirement uses the card requirement grammar and is evaluated against
/// the enemy itself; an empty requirement means always unlocked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySkillRef {
    pub skill_id: RowId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub requirement: String,
}

/// Static enemy definition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyRow {
    pub id: RowId,
    pub display_name: String,
    pub hp: i32,
    /// Percentage applied to the flat damage values of this enemy's skills.
    #[cfg_attr(feature = "serde", serde(default = "default_base_atk"))]
    pub base_atk: i32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistances: Resistances,
    #[cfg_attr(feature = "serde", serde(default))]
    pub behavior_id: Option<RowId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: ArrayVec<EnemySkillRef, { BattleConfig::MAX_ENEMY_SKILLS }>,
}

#[cfg(feature = "serde")]
fn default_base_atk() -> i32 {
    100
}

impl EnemyRow {
    pub fn new(id: impl Into<RowId>, display_name: impl Into<String>, hp: i32) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            hp,
            base_atk: 100,
            ..Self::default()
        }
    }

    /// Builder: add a skill. Skills beyond the third are dropped.
    pub fn with_skill(mut self, skill_id: impl Into<RowId>, requirement: impl Into<String>) -> Self {
        let skill = EnemySkillRef {
            skill_id: skill_id.into(),
            requirement: requirement.into(),
        };
        if self.skills.try_push(skill).is_err() {
            tracing::warn!(enemy = %self.id, "enemy row already has three skills");
        }
        self
    }

    pub fn with_base_atk(mut self, base_atk: i32) -> Self {
        self.base_atk = base_atk;
        self
    }

    pub fn with_behavior(mut self, behavior_id: impl Into<RowId>) -> Self {
        self.behavior_id = Some(behavior_id.into());
        self
    }

    pub fn with_resistances(mut self, resistances: Resistances) -> Self {
        self.resistances = resistances;
        self
    }
}

/// One `condition → result` rule of a behavior row.
///
/// `condition` is `"<ConditionType>,<Value>"`, `result` is `"SkillN,<bonus>"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorRuleRow {
    pub condition: String,
    pub result: String,
}

/// AI weight table of an enemy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyBehaviorRow {
    pub id: RowId,
    /// `"skillId,baseWeight"` strings, slot `N` is addressed as `SkillN`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_weights: ArrayVec<String, { BattleConfig::MAX_BEHAVIOR_SKILLS }>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: ArrayVec<BehaviorRuleRow, { BattleConfig::MAX_BEHAVIOR_RULES }>,
}

impl EnemyBehaviorRow {
    pub fn new(id: impl Into<RowId>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        if self.skill_weights.try_push(weight.into()).is_err() {
            tracing::warn!(behavior = %self.id, "behavior row already has six skill slots");
        }
        self
    }

    pub fn with_rule(mut self, condition: impl Into<String>, result: impl Into<String>) -> Self {
        let rule = BehaviorRuleRow {
            condition: condition.into(),
            result: result.into(),
        };
        if self.rules.try_push(rule).is_err() {
            tracing::warn!(behavior = %self.id, "behavior row already has four rules");
        }
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum SkillType {
    #[default]
    Attack,
    Defense,
    Buff,
    Debuff,
    Special,
}

/// `(EffectType, EffectValue)` pair of a monster skill. Skill values are numeric.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillEffectSlot {
    pub effect_type: EffectType,
    pub value: f32,
}

/// Static monster skill definition.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterSkillRow {
    pub id: RowId,
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skill_type: SkillType,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: ArrayVec<SkillEffectSlot, { BattleConfig::MAX_SKILL_EFFECT_SLOTS }>,
}

impl MonsterSkillRow {
    pub fn new(id: impl Into<RowId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn with_effect(mut self, effect_type: EffectType, value: f32) -> Self {
        if self
            .effects
            .try_push(SkillEffectSlot { effect_type, value })
            .is_err()
        {
            tracing::warn!(skill = %self.id, "skill row already has three effect slots");
        }
        self
    }
}
