//! Battle driver.
//!
//! [`BattleEngine`] owns the [`BattleState`] of one battle and is the only way
//! the outside world moves it: [`BattleEngine::play_card`] during the player
//! turn and [`BattleEngine::end_turn`] to hand over to the enemies. Both
//! either succeed or return an error without touching state.

mod errors;
mod setup;
mod turns;

pub use errors::{PlayError, SetupError, TurnError};
pub use setup::EnemySetup;

use std::sync::Arc;

use crate::ai;
use crate::config::BattleConfig;
use crate::delayed::DelayedEffect;
use crate::effect::{PlayedCard, execute_card};
use crate::env::{BattleTables, ElementType, MonsterSkillRow};
use crate::state::{
    BattleEvent, BattleOutcome, BattlePhase, BattleState, CardInstance, CardInstanceId,
    EnemyState, EntityId, PileCounts, PlayerState,
};

pub struct BattleEngine {
    state: BattleState,
}

impl BattleEngine {
    /// Starts a battle and runs it up to the first player decision.
    ///
    /// The deck is shuffled with the battle seed, every enemy picks its first
    /// intent, then the first player turn begins.
    pub fn start<S: AsRef<str>>(
        tables: &BattleTables,
        config: BattleConfig,
        seed: u64,
        deck_ids: &[S],
        enemy_setups: &[EnemySetup],
    ) -> Result<Self, SetupError> {
        let mut state = setup::build_state(tables, config, seed, deck_ids, enemy_setups)?;
        tracing::info!(
            seed,
            deck = deck_ids.len(),
            enemies = enemy_setups.len(),
            "battle started"
        );
        state.emit(BattleEvent::PhaseChanged {
            phase: BattlePhase::BattleStart,
        });
        ai::refresh_intents(&mut state);
        turns::begin_player_turn(&mut state);
        Ok(Self { state })
    }

    /// Wraps an already built state, for tools that assemble battles by hand.
    pub fn from_state(state: BattleState) -> Self {
        Self { state }
    }

    /// Plays a hand card.
    ///
    /// `target` must be a living enemy when given. Cards whose effects need a
    /// target and get none resolve those effects as no-ops.
    pub fn play_card(
        &mut self,
        card: CardInstanceId,
        target: Option<EntityId>,
    ) -> Result<(), PlayError> {
        let state = &mut self.state;
        match state.phase {
            BattlePhase::PlayerTurn => {}
            BattlePhase::BattleEnd => return Err(PlayError::BattleFinished),
            actual => return Err(PlayError::PhaseMismatch { actual }),
        }

        let hand_card = state
            .player
            .piles
            .hand()
            .iter()
            .find(|c| c.id == card)
            .ok_or(PlayError::CardNotInHand(card))?;
        let cost = hand_card.cost();
        let available = state.player.action_point();
        if available < cost {
            return Err(PlayError::InsufficientActionPoints { cost, available });
        }
        match target {
            Some(target) if target.is_player() || !state.is_alive(target) => {
                return Err(PlayError::UnknownTarget(target));
            }
            _ => {}
        }

        let hand_index = state
            .player
            .piles
            .begin_play(card)
            .ok_or(PlayError::CardNotInHand(card))?;
        let row = match state.player.piles.in_play() {
            Some(instance) => Arc::clone(&instance.row),
            None => return Err(PlayError::CardNotInHand(card)),
        };
        state.player.spend_action(cost);
        state.emit_action_points();

        tracing::debug!(%card, row = %row.id, cost, target = ?target, "card played");
        state.emit(BattleEvent::CardPlayed {
            card,
            row: row.id.clone(),
            target,
        });

        let played = PlayedCard {
            instance: card,
            row,
            hand_index,
        };
        execute_card(state, &played, target);

        if let Some(discarded) = state.player.piles.finish_play() {
            state.emit(BattleEvent::CardsDiscarded {
                cards: vec![discarded],
            });
        }
        turns::check_battle_end(state);
        Ok(())
    }

    /// Ends the player turn and runs the enemy turn.
    ///
    /// Returns once the next player turn has begun or the battle has ended.
    pub fn end_turn(&mut self) -> Result<(), TurnError> {
        match self.state.phase {
            BattlePhase::PlayerTurn => {}
            BattlePhase::BattleEnd => return Err(TurnError::BattleFinished),
            actual => return Err(TurnError::PhaseMismatch { actual }),
        }
        turns::end_player_turn(&mut self.state);
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn phase(&self) -> BattlePhase {
        self.state.phase
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.state.outcome
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn player(&self) -> &PlayerState {
        &self.state.player
    }

    pub fn enemies(&self) -> &[EnemyState] {
        &self.state.enemies
    }

    pub fn enemy(&self, id: EntityId) -> Option<&EnemyState> {
        self.state.enemy(id)
    }

    pub fn hand(&self) -> &[CardInstance] {
        self.state.player.piles.hand()
    }

    pub fn pile_counts(&self) -> PileCounts {
        self.state.player.piles.counts()
    }

    /// The skill an enemy will use on its next turn.
    pub fn intent(&self, enemy: EntityId) -> Option<&MonsterSkillRow> {
        self.state
            .enemy(enemy)
            .and_then(|e| e.intent_skill())
            .map(|skill| &skill.row)
    }

    pub fn pending_delayed(&self) -> impl Iterator<Item = &DelayedEffect> {
        self.state.delayed.iter()
    }

    /// Effective resistance percentage of an entity against an element.
    ///
    /// The enemy row value plus IncreaseRes / ReduceRes modifiers. The
    /// player has no base resistance.
    pub fn resistance(&self, entity: EntityId, element: ElementType) -> Option<i32> {
        let base = match self.state.enemy(entity) {
            Some(enemy) => enemy.data.resistances.get(element),
            None if entity.is_player() => 0,
            None => return None,
        };
        let modifier = self.state.entity(entity)?.buffs.resistance_modifier(element);
        Some(base.saturating_add(modifier))
    }

    /// Takes every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.state.drain_events()
    }
}
