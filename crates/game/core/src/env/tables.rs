//! Row registry handed to the engine at battle start.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::cards::{CardRow, RowId};
use super::enemies::{EnemyBehaviorRow, EnemyRow, MonsterSkillRow};

/// Immutable lookup over every static row a battle may reference.
///
/// Rows are kept in id order so that random picks from the card pool are
/// deterministic for a given seed.
#[derive(Clone, Debug, Default)]
pub struct BattleTables {
    cards: BTreeMap<RowId, Arc<CardRow>>,
    enemies: BTreeMap<RowId, EnemyRow>,
    behaviors: BTreeMap<RowId, EnemyBehaviorRow>,
    skills: BTreeMap<RowId, MonsterSkillRow>,
}

impl BattleTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the registry from row lists. Later duplicates replace earlier rows.
    pub fn from_rows(
        cards: Vec<CardRow>,
        enemies: Vec<EnemyRow>,
        behaviors: Vec<EnemyBehaviorRow>,
        skills: Vec<MonsterSkillRow>,
    ) -> Self {
        let mut tables = Self::new();
        for card in cards {
            tables.insert_card(card);
        }
        for enemy in enemies {
            tables.insert_enemy(enemy);
        }
        for behavior in behaviors {
            tables.insert_behavior(behavior);
        }
        for skill in skills {
            tables.insert_skill(skill);
        }
        tables
    }

    pub fn insert_card(&mut self, card: CardRow) {
        if self.cards.contains_key(&card.id) {
            tracing::warn!(card = %card.id, "duplicate card row replaces earlier definition");
        }
        self.cards.insert(card.id.clone(), Arc::new(card));
    }

    pub fn insert_enemy(&mut self, enemy: EnemyRow) {
        self.enemies.insert(enemy.id.clone(), enemy);
    }

    pub fn insert_behavior(&mut self, behavior: EnemyBehaviorRow) {
        self.behaviors.insert(behavior.id.clone(), behavior);
    }

    pub fn insert_skill(&mut self, skill: MonsterSkillRow) {
        self.skills.insert(skill.id.clone(), skill);
    }

    pub fn with_card(mut self, card: CardRow) -> Self {
        self.insert_card(card);
        self
    }

    pub fn with_enemy(mut self, enemy: EnemyRow) -> Self {
        self.insert_enemy(enemy);
        self
    }

    pub fn with_behavior(mut self, behavior: EnemyBehaviorRow) -> Self {
        self.insert_behavior(behavior);
        self
    }

    pub fn with_skill(mut self, skill: MonsterSkillRow) -> Self {
        self.insert_skill(skill);
        self
    }

    pub fn card(&self, id: &str) -> Option<&Arc<CardRow>> {
        self.cards.get(id)
    }

    pub fn enemy(&self, id: &str) -> Option<&EnemyRow> {
        self.enemies.get(id)
    }

    pub fn behavior(&self, id: &str) -> Option<&EnemyBehaviorRow> {
        self.behaviors.get(id)
    }

    pub fn skill(&self, id: &str) -> Option<&MonsterSkillRow> {
        self.skills.get(id)
    }

    /// Every card row, in id order.
    pub fn card_pool(&self) -> impl Iterator<Item = &Arc<CardRow>> {
        self.cards.values()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}
