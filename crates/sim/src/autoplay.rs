//! Naive play policy: first affordable card, first living enemy.

use anyhow::Result;
use battle_core::{BattleEngine, BattleOutcome, CardInstanceId};

/// Upper bound on plays within one turn. Zero-cost draw cards could
/// otherwise keep the policy busy forever.
const MAX_PLAYS_PER_TURN: u32 = 64;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimReport {
    /// `None` when the turn limit stopped the battle first.
    pub outcome: Option<BattleOutcome>,
    pub turns: u32,
    pub cards_played: u32,
    pub player_hp: i32,
}

/// Plays the battle until it ends or `turn_limit` turns have passed
/// (`0` = no limit).
pub fn run(engine: &mut BattleEngine, turn_limit: u32) -> Result<SimReport> {
    let mut cards_played = 0;

    while !engine.is_finished() {
        if turn_limit > 0 && engine.turn() > turn_limit {
            tracing::warn!(turn_limit, "turn limit reached");
            break;
        }
        cards_played += play_turn(engine)?;
        if !engine.is_finished() {
            engine.end_turn()?;
        }
        log_events(engine);
    }
    log_events(engine);

    Ok(SimReport {
        outcome: engine.outcome(),
        turns: engine.turn(),
        cards_played,
        player_hp: engine.player().entity.hp(),
    })
}

fn play_turn(engine: &mut BattleEngine) -> Result<u32> {
    let mut played = 0;
    while played < MAX_PLAYS_PER_TURN && !engine.is_finished() {
        let Some(card) = first_affordable(engine) else {
            break;
        };
        let target = engine.state().living_enemies().first().copied();
        tracing::debug!(%card, turn = engine.turn(), "auto-play");
        engine.play_card(card, target)?;
        played += 1;
    }
    Ok(played)
}

fn first_affordable(engine: &BattleEngine) -> Option<CardInstanceId> {
    let available = engine.player().action_point();
    engine
        .hand()
        .iter()
        .find(|card| card.cost() <= available)
        .map(|card| card.id)
}

fn log_events(engine: &mut BattleEngine) {
    for event in engine.drain_events() {
        tracing::debug!(?event, "battle event");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_content::ContentFactory;
    use battle_core::EnemySetup;

    fn start(seed: u64, enemy: EnemySetup) -> BattleEngine {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let tables = factory.load_tables().unwrap();
        let deck: Vec<String> = tables.card_pool().map(|card| card.id.clone()).collect();
        BattleEngine::start(&tables, config, seed, &deck, &[enemy]).unwrap()
    }

    #[test]
    fn stops_at_the_turn_limit_or_the_end() {
        let mut engine = start(3, EnemySetup::new("slime").with_hp(500));
        let report = run(&mut engine, 2).unwrap();

        assert!(report.cards_played > 0);
        assert!(report.outcome.is_some() || report.turns == 3);
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn a_weak_enemy_is_beaten() {
        let mut engine = start(5, EnemySetup::new("slime").with_hp(1));
        let report = run(&mut engine, 10).unwrap();

        assert_eq!(report.outcome, Some(BattleOutcome::Victory));
        assert!(report.turns <= 10);
        assert!(report.player_hp > 0);
    }
}
