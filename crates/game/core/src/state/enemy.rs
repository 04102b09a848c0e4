use super::entity::{BattleEntity, EntityId, EntityKind};
use crate::env::{EnemyBehaviorRow, EnemyRow, MonsterSkillRow, RowId};

/// A monster skill an enemy may pick, with its unlock requirement.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySkill {
    pub row: MonsterSkillRow,
    /// Requirement string evaluated against the enemy; empty means unlocked.
    pub requirement: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnemyState {
    pub entity: BattleEntity,
    pub data: EnemyRow,
    pub behavior: Option<EnemyBehaviorRow>,
    pub skills: Vec<EnemySkill>,
    /// Skill chosen for the next enemy turn.
    pub intent: Option<RowId>,
    /// Skills this enemy has resolved so far.
    pub cast_count: u32,
}

impl EnemyState {
    pub fn new(
        id: EntityId,
        data: EnemyRow,
        behavior: Option<EnemyBehaviorRow>,
        skills: Vec<EnemySkill>,
    ) -> Self {
        Self {
            entity: BattleEntity::new(id, EntityKind::Enemy, data.hp),
            data,
            behavior,
            skills,
            intent: None,
            cast_count: 0,
        }
    }

    pub fn id(&self) -> EntityId {
        self.entity.id
    }

    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    pub fn skill(&self, skill_id: &str) -> Option<&EnemySkill> {
        self.skills.iter().find(|s| s.row.id == skill_id)
    }

    pub fn intent_skill(&self) -> Option<&EnemySkill> {
        self.intent.as_deref().and_then(|id| self.skill(id))
    }
}
