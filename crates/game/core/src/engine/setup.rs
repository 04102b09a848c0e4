//! Battle construction from static tables.

use std::sync::Arc;

use crate::ai::WeightSlot;
use crate::config::BattleConfig;
use crate::env::{BattleRng, BattleTables, CardRow, EnemyBehaviorRow, EnemyRow, RowId};
use crate::state::{BattleState, DeckPiles, EnemySkill, EnemyState, EntityId, PlayerState};

use super::errors::SetupError;

/// One enemy to place in a battle.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemySetup {
    pub enemy_id: RowId,
    /// Overrides the row's HP when set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<i32>,
}

impl EnemySetup {
    pub fn new(enemy_id: impl Into<RowId>) -> Self {
        Self {
            enemy_id: enemy_id.into(),
            hp: None,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = Some(hp);
        self
    }
}

/// Builds the initial state: shuffled deck, enemies with their skills, no
/// turn started yet.
pub(crate) fn build_state<S: AsRef<str>>(
    tables: &BattleTables,
    config: BattleConfig,
    seed: u64,
    deck_ids: &[S],
    enemy_setups: &[EnemySetup],
) -> Result<BattleState, SetupError> {
    if deck_ids.is_empty() {
        return Err(SetupError::EmptyDeck);
    }
    if enemy_setups.is_empty() {
        return Err(SetupError::NoEnemies);
    }

    let deck = deck_ids
        .iter()
        .map(|id| {
            let id = id.as_ref();
            tables
                .card(id)
                .cloned()
                .ok_or_else(|| SetupError::UnknownCard(id.to_string()))
        })
        .collect::<Result<Vec<Arc<CardRow>>, _>>()?;

    let enemies = enemy_setups
        .iter()
        .enumerate()
        .map(|(index, setup)| build_enemy(tables, EntityId::enemy(index), setup))
        .collect::<Result<Vec<_>, _>>()?;

    let mut rng = BattleRng::seeded(seed);
    let mut piles = DeckPiles::from_rows(deck);
    piles.shuffle_draw(&mut rng);

    let player = PlayerState::new(config.player_max_hp, piles, &config);
    let card_pool = tables.card_pool().cloned().collect();
    Ok(BattleState::new(config, player, enemies, rng, card_pool))
}

fn build_enemy(
    tables: &BattleTables,
    id: EntityId,
    setup: &EnemySetup,
) -> Result<EnemyState, SetupError> {
    let mut row: EnemyRow = tables
        .enemy(&setup.enemy_id)
        .cloned()
        .ok_or_else(|| SetupError::UnknownEnemy(setup.enemy_id.clone()))?;
    if let Some(hp) = setup.hp {
        row.hp = hp;
    }

    let behavior: Option<EnemyBehaviorRow> = row.behavior_id.as_deref().and_then(|behavior_id| {
        let behavior = tables.behavior(behavior_id).cloned();
        if behavior.is_none() {
            tracing::warn!(enemy = %row.id, behavior = behavior_id, "unknown behavior row, picking uniformly");
        }
        behavior
    });

    let mut skills: Vec<EnemySkill> = Vec::new();
    for skill_ref in &row.skills {
        match tables.skill(&skill_ref.skill_id) {
            Some(skill) => skills.push(EnemySkill {
                row: skill.clone(),
                requirement: skill_ref.requirement.clone(),
            }),
            None => {
                tracing::warn!(enemy = %row.id, skill = %skill_ref.skill_id, "unknown monster skill");
            }
        }
    }

    // Skills named only by the behavior row are always unlocked.
    if let Some(behavior) = &behavior {
        for slot in behavior.skill_weights.iter().filter_map(|raw| raw.parse::<WeightSlot>().ok()) {
            if skills.iter().any(|s| s.row.id == slot.skill_id) {
                continue;
            }
            if let Some(skill) = tables.skill(&slot.skill_id) {
                skills.push(EnemySkill {
                    row: skill.clone(),
                    requirement: String::new(),
                });
            }
        }
    }

    Ok(EnemyState::new(id, row, behavior, skills))
}
