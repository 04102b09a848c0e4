//! Turn state machine.
//!
//! ```text
//! BattleStart → PlayerTurn ⇄ EnemyTurn
//!                   ↓           ↓
//!                 BattleEnd (terminal)
//! ```
//!
//! Every transition is synchronous. The end-of-battle check runs after every
//! card play and at each phase boundary; once `BattleEnd` is reached nothing
//! moves the state again.

use crate::ai;
use crate::buff::BuffTick;
use crate::combat::{self, damage::emit_expired};
use crate::delayed;
use crate::state::{BattleEvent, BattleOutcome, BattlePhase, BattleState, EntityId};

pub(crate) fn set_phase(state: &mut BattleState, phase: BattlePhase) {
    state.phase = phase;
    tracing::info!(turn = state.turn, %phase, "phase changed");
    state.emit(BattleEvent::PhaseChanged { phase });
}

/// Ends the battle if either side has been wiped out.
///
/// Defeat wins over Victory when both happen at once.
pub(crate) fn check_battle_end(state: &mut BattleState) -> bool {
    if state.phase == BattlePhase::BattleEnd {
        return true;
    }
    let outcome = if !state.player.entity.is_alive() {
        BattleOutcome::Defeat
    } else if state.living_enemy_count() == 0 {
        BattleOutcome::Victory
    } else {
        return false;
    };

    state.outcome = Some(outcome);
    set_phase(state, BattlePhase::BattleEnd);
    tracing::info!(turn = state.turn, %outcome, "battle ended");
    state.emit(BattleEvent::BattleEnded { outcome });
    true
}

/// PlayerTurn entry.
pub(crate) fn begin_player_turn(state: &mut BattleState) {
    state.turn += 1;
    set_phase(state, BattlePhase::PlayerTurn);
    state.emit(BattleEvent::TurnStarted { turn: state.turn });

    state.player.reset_action_points();
    state.emit_action_points();

    let started = state.player.entity.buffs.on_turn_start();
    emit_expired(state, EntityId::PLAYER, started.expired);
    if started.gifted_cards > 0 {
        state.grant_cards(started.gifted_cards);
    }

    let hand_size = state.config.hand_size;
    state.draw_cards(hand_size);

    delayed::on_turn_start(state);
    check_battle_end(state);
}

/// PlayerTurn exit followed by the whole enemy turn.
pub(crate) fn end_player_turn(state: &mut BattleState) {
    run_turn_end_hooks(state, EntityId::PLAYER);

    let discarded = state.player.piles.discard_hand();
    if !discarded.is_empty() {
        state.emit(BattleEvent::CardsDiscarded { cards: discarded });
    }
    if check_battle_end(state) {
        return;
    }

    set_phase(state, BattlePhase::EnemyTurn);
    run_enemy_turn(state);
    if check_battle_end(state) {
        return;
    }

    begin_player_turn(state);
}

fn run_enemy_turn(state: &mut BattleState) {
    for enemy in state.living_enemies() {
        if !state.is_alive(enemy) {
            continue;
        }
        run_turn_start_hooks(state, enemy);
        if !state.is_alive(enemy) {
            continue;
        }
        ai::perform_intent(state, enemy);
        if !state.player.entity.is_alive() {
            tracing::debug!(%enemy, "player fell, enemy turn stops");
            return;
        }
    }

    for enemy in state.living_enemies() {
        run_turn_end_hooks(state, enemy);
        if state.is_alive(enemy) {
            ai::choose_intent(state, enemy);
        }
    }
}

fn run_turn_start_hooks(state: &mut BattleState, target: EntityId) {
    let Some(entity) = state.entity_mut(target) else {
        return;
    };
    let started = entity.buffs.on_turn_start();
    if started.gifted_cards > 0 {
        tracing::debug!(%target, "Gifted on an enemy has no hand to fill");
    }
    emit_expired(state, target, started.expired);
}

/// Applies Blessed / Bleeding / Feared ticks, then prunes expired buffs.
fn run_turn_end_hooks(state: &mut BattleState, target: EntityId) {
    let Some(entity) = state.entity(target) else {
        return;
    };
    let ticks = entity.buffs.on_turn_end(entity.max_hp());
    for tick in ticks {
        match tick {
            BuffTick::Heal { source, amount } => {
                let healed = combat::apply_healing(state, target, amount);
                tracing::debug!(%target, %source, healed, "turn-end heal");
            }
            BuffTick::Damage { source, amount } => {
                let report = combat::apply_damage(state, target, amount);
                tracing::debug!(%target, %source, hp_lost = report.hp_lost, "turn-end damage");
            }
        }
    }
    if let Some(entity) = state.entity_mut(target) {
        let expired = entity.buffs.prune_expired();
        emit_expired(state, target, expired);
    }
}
