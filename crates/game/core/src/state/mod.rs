//! Mutable battle state.
//!
//! [`BattleState`] owns every entity, the card piles, the delayed-effect
//! queue, the random stream and the event buffer of one battle. Rule modules
//! mutate it through `&mut BattleState`; there is exactly one writer at a
//! time.
mod card;
mod enemy;
mod entity;
mod events;
mod piles;
mod player;
mod turn;

use std::sync::Arc;

pub use card::{CardInstance, CardInstanceId};
pub use enemy::{EnemySkill, EnemyState};
pub use entity::{BattleEntity, EntityId, EntityKind};
pub use events::BattleEvent;
pub use piles::{DeckPiles, DrawOutcome, HandAnchor, Pile, PileCounts, Side};
pub use player::PlayerState;
pub use turn::{BattleOutcome, BattlePhase};

use crate::config::BattleConfig;
use crate::delayed::DelayedQueue;
use crate::env::{BattleRng, CardRow};

#[derive(Clone, Debug)]
pub struct BattleState {
    pub config: BattleConfig,
    /// Turn counter, incremented on every player turn entry.
    pub turn: u32,
    pub phase: BattlePhase,
    pub outcome: Option<BattleOutcome>,
    pub player: PlayerState,
    /// Enemies in battle order; enemy `i` has id `EntityId::enemy(i)`.
    pub enemies: Vec<EnemyState>,
    pub delayed: DelayedQueue,
    pub rng: BattleRng,
    /// Rows Gifted grants draw from.
    card_pool: Vec<Arc<CardRow>>,
    events: Vec<BattleEvent>,
}

impl BattleState {
    pub fn new(
        config: BattleConfig,
        player: PlayerState,
        enemies: Vec<EnemyState>,
        rng: BattleRng,
        card_pool: Vec<Arc<CardRow>>,
    ) -> Self {
        Self {
            config,
            turn: 0,
            phase: BattlePhase::BattleStart,
            outcome: None,
            player,
            enemies,
            delayed: DelayedQueue::new(),
            rng,
            card_pool,
            events: Vec::new(),
        }
    }

    pub fn entity(&self, id: EntityId) -> Option<&BattleEntity> {
        match id.enemy_index() {
            None => Some(&self.player.entity),
            Some(index) => self.enemies.get(index).map(|e| &e.entity),
        }
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut BattleEntity> {
        match id.enemy_index() {
            None => Some(&mut self.player.entity),
            Some(index) => self.enemies.get_mut(index).map(|e| &mut e.entity),
        }
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.enemies.get(id.enemy_index()?)
    }

    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut EnemyState> {
        self.enemies.get_mut(id.enemy_index()?)
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.entity(id).is_some_and(BattleEntity::is_alive)
    }

    /// Living enemy ids in battle order.
    pub fn living_enemies(&self) -> Vec<EntityId> {
        self.enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(EnemyState::id)
            .collect()
    }

    pub fn living_enemy_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }

    /// The opposing side of `caster`: every living enemy for the player,
    /// the player for an enemy.
    pub fn opponents_of(&self, caster: EntityId) -> Vec<EntityId> {
        if caster.is_player() {
            self.living_enemies()
        } else if self.player.entity.is_alive() {
            vec![EntityId::PLAYER]
        } else {
            Vec::new()
        }
    }

    pub fn card_pool(&self) -> &[Arc<CardRow>] {
        &self.card_pool
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BattlePhase::BattleEnd
    }

    pub fn emit(&mut self, event: BattleEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Grants Gifted cards from the card pool to the player's hand.
    pub(crate) fn grant_cards(&mut self, count: u32) {
        let granted = self
            .player
            .piles
            .grant_random(&self.card_pool, count, &mut self.rng);
        if !granted.is_empty() {
            tracing::debug!(count = granted.len(), "granted gifted cards");
            self.emit(BattleEvent::CardsGranted { cards: granted });
        }
    }

    /// Draws into the player's hand and records the result.
    pub(crate) fn draw_cards(&mut self, count: u32) -> usize {
        let outcome = self.player.piles.draw(count, &mut self.rng);
        if outcome.reshuffled {
            self.emit(BattleEvent::DeckReshuffled);
        }
        let drawn = outcome.drawn.len();
        if drawn < count as usize {
            tracing::debug!(requested = count, drawn, "draw stopped early, piles exhausted");
        }
        if drawn > 0 {
            self.emit(BattleEvent::CardsDrawn {
                cards: outcome.drawn,
            });
        }
        drawn
    }

    pub(crate) fn emit_gauges(&mut self) {
        let event = BattleEvent::GaugesChanged {
            angel: self.player.angel_gauge(),
            demon: self.player.demon_gauge(),
        };
        self.emit(event);
    }

    pub(crate) fn emit_action_points(&mut self) {
        let event = BattleEvent::ActionPointsChanged {
            action_point: self.player.action_point(),
        };
        self.emit(event);
    }
}
