//! End-to-end battle scenarios through the public API.

use std::sync::Arc;

use battle_core::buff::{Buff, BuffKind};
use battle_core::combat;
use battle_core::{
    BattleConfig, BattleEngine, BattleEvent, BattleOutcome, BattlePhase, BattleRng, BattleState,
    BattleTables, BuffId, CardInstanceId, CardRow, EffectType, ElementType, EnemyRow, EnemySetup,
    EnemyState, EntityId, MonsterSkillRow, PlayError, PlayerState, TurnError,
};
use battle_core::state::DeckPiles;

const FIRST: EntityId = EntityId(1);
const SECOND: EntityId = EntityId(2);

fn tables() -> BattleTables {
    BattleTables::new()
        .with_card(CardRow::new("jab", "Jab", 1).with_effect(EffectType::SingleDamage, "20", ""))
        .with_card(CardRow::new("wait", "Wait", 1))
        .with_card(
            CardRow::new("bomb", "Bomb", 1).with_effect(EffectType::DelaySingleDamage, "10,2", ""),
        )
        .with_skill(MonsterSkillRow::new("idle", "Idle"))
        .with_skill(MonsterSkillRow::new("bite", "Bite").with_effect(EffectType::SingleDamage, 8.0))
        .with_enemy(EnemyRow::new("dummy", "Dummy", 100).with_skill("idle", ""))
        .with_enemy(EnemyRow::new("wolf", "Wolf", 30).with_skill("bite", ""))
}

fn find(engine: &BattleEngine, row: &str) -> CardInstanceId {
    engine
        .hand()
        .iter()
        .find(|c| c.row.id == row)
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("no '{row}' in hand"))
}

/// A state already in the player turn with `cards` in hand, in order.
fn player_turn(cards: Vec<CardRow>, enemies: &[(&str, i32)]) -> BattleState {
    let config = BattleConfig::default();
    let count = cards.len() as u32;
    let mut rng = BattleRng::seeded(5);
    let mut piles = DeckPiles::from_rows(cards.into_iter().map(Arc::new));
    piles.draw(count, &mut rng);

    let mut player = PlayerState::new(config.player_max_hp, piles, &config);
    player.reset_action_points();
    let enemies = enemies
        .iter()
        .enumerate()
        .map(|(index, (id, hp))| {
            EnemyState::new(EntityId::enemy(index), EnemyRow::new(*id, *id, *hp), None, Vec::new())
        })
        .collect();
    let mut state = BattleState::new(config, player, enemies, rng, Vec::new());
    state.phase = BattlePhase::PlayerTurn;
    state.turn = 1;
    state
}

#[test]
fn single_damage_on_an_unbuffed_enemy() {
    let mut engine =
        BattleEngine::start(&tables(), BattleConfig::default(), 1, &["jab"; 5], &[EnemySetup::new("dummy")])
            .unwrap();
    let jab = find(&engine, "jab");
    engine.play_card(jab, Some(FIRST)).unwrap();

    let dummy = &engine.enemy(FIRST).unwrap().entity;
    assert_eq!(dummy.hp(), 80);
    assert_eq!(dummy.shield(), 0);
    assert!(dummy.is_alive());
}

#[test]
fn shield_absorbs_before_hp() {
    let mut state = player_turn(Vec::new(), &[("dummy", 100)]);
    state.enemy_mut(FIRST).unwrap().entity.add_shield(15);

    let report = combat::apply_damage(&mut state, FIRST, 20.0);
    let dummy = &state.enemy(FIRST).unwrap().entity;
    assert_eq!((report.absorbed, report.hp_lost), (15, 5));
    assert_eq!(dummy.shield(), 0);
    assert_eq!(dummy.hp(), 95);
}

#[test]
fn zero_damage_changes_nothing() {
    let mut state = player_turn(Vec::new(), &[("dummy", 100)]);
    state
        .enemy_mut(FIRST)
        .unwrap()
        .entity
        .buffs
        .add(Buff::new(BuffKind::Guard, 1, 2));
    combat::apply_damage(&mut state, FIRST, 0.0);

    let dummy = &state.enemy(FIRST).unwrap().entity;
    assert_eq!(dummy.hp(), 100);
    assert!(dummy.buffs.has(BuffId::Guard));
}

#[test]
fn delayed_damage_needs_two_turn_starts() {
    let mut engine = BattleEngine::start(
        &tables(),
        BattleConfig::default(),
        3,
        &["bomb", "wait", "wait", "wait", "wait"],
        &[EnemySetup::new("dummy")],
    )
    .unwrap();
    let bomb = find(&engine, "bomb");
    engine.play_card(bomb, Some(FIRST)).unwrap();
    assert_eq!(engine.pending_delayed().count(), 1);

    engine.end_turn().unwrap();
    assert_eq!(engine.enemy(FIRST).unwrap().entity.hp(), 100);
    assert_eq!(engine.pending_delayed().next().map(|d| d.remaining), Some(1));

    engine.end_turn().unwrap();
    assert_eq!(engine.enemy(FIRST).unwrap().entity.hp(), 90);
    assert_eq!(engine.pending_delayed().count(), 0);
}

#[test]
fn spend_repeat_heals_once_per_action_point() {
    let prayer = CardRow::new("prayer", "Prayer", 0)
        .with_effect(EffectType::SpendRepeatTheRest, "ActionPoint,1,3", "")
        .with_effect(EffectType::SelfFlatHeal, "5", "SpendRepeat");
    let mut state = player_turn(vec![prayer], &[("dummy", 100)]);
    state.player.entity.set_hp(50);
    let card = state.player.piles.hand()[0].id;

    let mut engine = BattleEngine::from_state(state);
    engine.play_card(card, None).unwrap();
    assert_eq!(engine.player().entity.hp(), 65);
    assert_eq!(engine.player().action_point(), 0);
}

#[test]
fn extreme_effect_values_do_not_abort_the_battle() {
    let drain = CardRow::new("drain", "Drain", 0)
        .with_effect(EffectType::AvalueDec, "-2147483648", "")
        .with_effect(EffectType::ReduceCost, "-2147483648", "")
        .with_effect(EffectType::TargetSingleBuff, "IncreaseRes,10,1000000000,3", "");
    let mut state = player_turn(vec![drain], &[("dummy", 100)]);
    let card = state.player.piles.hand()[0].id;
    let gauge = state.player.angel_gauge();

    let mut engine = BattleEngine::from_state(state);
    engine.play_card(card, Some(FIRST)).unwrap();

    assert_eq!(engine.player().angel_gauge(), gauge);
    assert_eq!(engine.pile_counts().discard, 1);
    assert_eq!(engine.resistance(FIRST, ElementType::Fire), Some(i32::MAX));
    assert_eq!(engine.phase(), BattlePhase::PlayerTurn);
}

#[test]
fn guard_blocks_only_the_first_hit() {
    let mut state = player_turn(Vec::new(), &[("dummy", 100)]);
    state
        .player
        .entity
        .buffs
        .add(Buff::new(BuffKind::Guard, 1, 1));

    combat::apply_damage(&mut state, EntityId::PLAYER, 30.0);
    assert_eq!(state.player.entity.hp(), 100);
    assert!(!state.player.entity.buffs.has(BuffId::Guard));

    combat::apply_damage(&mut state, EntityId::PLAYER, 30.0);
    assert_eq!(state.player.entity.hp(), 70);
}

#[test]
fn gifted_cards_arrive_at_the_next_turn() {
    let tables = tables().with_card(
        CardRow::new("gift", "Gift", 1).with_effect(EffectType::SelfBuff, "Gifted,0,2,3", ""),
    );
    let mut engine = BattleEngine::start(
        &tables,
        BattleConfig::default(),
        9,
        &["gift", "wait", "wait", "wait", "wait"],
        &[EnemySetup::new("dummy")],
    )
    .unwrap();
    let gift = find(&engine, "gift");
    engine.play_card(gift, None).unwrap();
    let total = engine.pile_counts().total();
    let before: Vec<CardInstanceId> = engine.state().player.piles.all_ids().collect();
    engine.drain_events();

    engine.end_turn().unwrap();

    assert_eq!(engine.pile_counts().total(), total + 2);
    let granted: Vec<CardInstanceId> = engine
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            BattleEvent::CardsGranted { cards } => Some(cards),
            _ => None,
        })
        .flatten()
        .collect();
    assert_eq!(granted.len(), 2);
    assert!(granted.iter().all(|id| !before.contains(id)));
    assert!(granted.iter().all(|id| engine.hand().iter().any(|c| c.id == *id)));
}

#[test]
fn stackable_buffs_merge_into_one_entry() {
    let mut state = player_turn(Vec::new(), &[("dummy", 100)]);
    let buffs = &mut state.enemy_mut(FIRST).unwrap().entity.buffs;
    buffs.add(Buff::new(BuffKind::Fragile { percent: 10.0 }, 2, 2));
    buffs.add(Buff::new(BuffKind::Fragile { percent: 10.0 }, 3, 2));
    buffs.add(Buff::new(BuffKind::Cursed, 1, 2));
    buffs.add(Buff::new(BuffKind::Cursed, 1, 2));

    assert_eq!(buffs.len(), 2);
    assert_eq!(buffs.get(BuffId::Fragile).map(|b| b.stacks), Some(5));
    assert_eq!(buffs.get(BuffId::Cursed).map(|b| b.stacks), Some(1));
}

#[test]
fn drawing_from_an_empty_pile_reshuffles_the_discard() {
    let mut rng = BattleRng::seeded(8);
    let rows = (0..4).map(|i| Arc::new(CardRow::new(format!("c{i}"), "Card", 1)));
    let mut piles = DeckPiles::from_rows(rows);
    piles.draw(4, &mut rng);
    piles.discard_hand();
    assert!(piles.draw_pile().is_empty());

    let outcome = piles.draw(3, &mut rng);
    assert!(outcome.reshuffled);
    assert_eq!(outcome.drawn.len(), 3);
    assert_eq!(piles.counts().discard, 0);
    assert_eq!(piles.counts().draw, 1);
}

#[test]
fn piles_are_conserved_without_destruction() {
    let mut engine = BattleEngine::start(
        &tables(),
        BattleConfig::default(),
        21,
        &["jab", "wait", "jab", "wait", "bomb", "jab", "wait"],
        &[EnemySetup::new("dummy"), EnemySetup::new("dummy")],
    )
    .unwrap();
    let total = engine.pile_counts().total();

    for _ in 0..6 {
        if engine.is_finished() {
            break;
        }
        while let Some(card) = engine
            .hand()
            .iter()
            .find(|c| c.cost() <= engine.player().action_point())
            .map(|c| c.id)
        {
            let target = engine.state().living_enemies().first().copied();
            engine.play_card(card, target).unwrap();
            assert_eq!(engine.pile_counts().total(), total);
            if engine.is_finished() {
                break;
            }
        }
        if !engine.is_finished() {
            engine.end_turn().unwrap();
        }
        assert_eq!(engine.pile_counts().total(), total);

        let mut seen: Vec<CardInstanceId> = engine.state().player.piles.all_ids().collect();
        seen.sort_by_key(|id| id.0);
        seen.dedup();
        assert_eq!(seen.len(), total);
    }
}

#[test]
fn battle_end_is_terminal() {
    let mut engine = BattleEngine::start(
        &tables(),
        BattleConfig::default(),
        4,
        &["jab"; 6],
        &[EnemySetup::new("wolf").with_hp(20)],
    )
    .unwrap();
    let jab = find(&engine, "jab");
    engine.play_card(jab, Some(FIRST)).unwrap();
    assert_eq!(engine.outcome(), Some(BattleOutcome::Victory));
    assert_eq!(engine.phase(), BattlePhase::BattleEnd);

    let ended = engine
        .drain_events()
        .iter()
        .filter(|e| matches!(e, BattleEvent::BattleEnded { .. }))
        .count();
    assert_eq!(ended, 1);

    let counts = engine.pile_counts();
    let hp = engine.player().entity.hp();
    let jab = find(&engine, "jab");
    assert_eq!(engine.play_card(jab, Some(FIRST)), Err(PlayError::BattleFinished));
    assert_eq!(engine.end_turn(), Err(TurnError::BattleFinished));
    assert_eq!(engine.pile_counts(), counts);
    assert_eq!(engine.player().entity.hp(), hp);
    assert!(engine.drain_events().is_empty());
}

#[test]
fn the_player_can_lose() {
    let config = BattleConfig::default().with_player_max_hp(8);
    let mut engine = BattleEngine::start(
        &tables(),
        config,
        2,
        &["wait"; 5],
        &[EnemySetup::new("wolf"), EnemySetup::new("wolf")],
    )
    .unwrap();
    engine.end_turn().unwrap();

    assert_eq!(engine.outcome(), Some(BattleOutcome::Defeat));
    assert_eq!(engine.player().entity.hp(), 0);
    // The second wolf never acted: the turn stopped when the player fell.
    assert_eq!(engine.enemy(SECOND).unwrap().cast_count, 0);
}

#[test]
fn same_seed_same_battle() {
    let run = |seed: u64| {
        let mut engine = BattleEngine::start(
            &tables(),
            BattleConfig::default(),
            seed,
            &["jab", "wait", "bomb", "jab", "wait", "wait", "jab"],
            &[EnemySetup::new("wolf"), EnemySetup::new("dummy")],
        )
        .unwrap();
        for _ in 0..3 {
            if let Some(card) = engine.hand().first().map(|c| c.id) {
                let target = engine.state().living_enemies().first().copied();
                let _ = engine.play_card(card, target);
            }
            if !engine.is_finished() {
                engine.end_turn().unwrap();
            }
        }
        engine.drain_events()
    };
    assert_eq!(run(77), run(77));
}
