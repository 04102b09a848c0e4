//! Effect execution.
//!
//! Slots run in fixed order. A slot is skipped when its type is `None` or
//! its requirement fails; a malformed value logs a warning and becomes a
//! no-op, so one bad row never aborts a battle.
//!
//! A `SpendRepeatTheRest` slot ends the normal pass. The slots after it run
//! once per repeat: while the remaining budget covers the cost and the
//! caster can pay it from the named meter.

use std::ops::Range;
use std::sync::Arc;

use super::context::{CardSource, EffectContext};
use super::kind::{BuffScope, Effect, Gauge, Meter};
use crate::buff::BuffSpec;
use crate::combat::{self, damage::emit_expired};
use crate::delayed::{self, DelayedEffect, DelayedMode};
use crate::env::{CardRow, EffectSlot, MonsterSkillRow};
use crate::requirement::{RequirementSubjects, requirement_met};
use crate::state::{BattleEvent, BattleState, CardInstanceId, EntityId, HandAnchor, Side};

/// A card that has left the hand and is resolving.
#[derive(Clone, Debug)]
pub struct PlayedCard {
    pub instance: CardInstanceId,
    pub row: Arc<CardRow>,
    /// Index the card held in hand before it was played.
    pub hand_index: usize,
}

/// Resolves a card the player has played.
///
/// Any Swift buff present beforehand is consumed first. Then the card's
/// slots run, its gauge deltas apply, and finally the Swift neighbours are
/// echoed. Returns whether any effect killed something.
pub fn execute_card(state: &mut BattleState, played: &PlayedCard, target: Option<EntityId>) -> bool {
    let swift = state.player.entity.buffs.trigger_swift();
    if swift.is_some() {
        let expired = state.player.entity.buffs.prune_expired();
        emit_expired(state, EntityId::PLAYER, expired);
    }

    let source = CardSource {
        instance: played.instance,
        anchor: HandAnchor::Played(played.hand_index),
    };
    let mut ctx = EffectContext::new(EntityId::PLAYER, target, state, &played.row.effects)
        .with_card(source, played.row.element);
    run_card(&mut ctx);

    let row = &played.row;
    if row.avalue_inc != 0 || row.dvalue_inc != 0 {
        ctx.state.player.shift_angel(row.avalue_inc);
        ctx.state.player.shift_demon(row.dvalue_inc);
        ctx.state.emit_gauges();
    }

    if let Some(offsets) = swift {
        tracing::debug!(left = offsets.left, right = offsets.right, "swift triggered");
        // Both neighbours are fixed before either echo can reshape the hand.
        let sides = [(Side::Left, offsets.left), (Side::Right, offsets.right)];
        let neighbors: Vec<CardInstanceId> = sides
            .into_iter()
            .filter_map(|(side, distance)| {
                ctx.state
                    .player
                    .piles
                    .neighbor(source.anchor, side, distance as usize)
                    .map(|(_, card)| card.id)
            })
            .collect();
        for card in neighbors {
            match ctx.state.player.piles.hand_index(card) {
                Some(index) => {
                    echo_card(&mut ctx, index);
                }
                None => tracing::debug!(%card, "swift neighbour left the hand, skipping"),
            }
        }
    }

    ctx.kill_occurred
}

/// Resolves an enemy skill against the player.
pub fn execute_skill(
    state: &mut BattleState,
    enemy: EntityId,
    skill: &MonsterSkillRow,
    base_atk: i32,
) -> bool {
    let slots = skill_slots(skill, base_atk);
    let mut ctx = EffectContext::new(enemy, Some(EntityId::PLAYER), state, &slots);
    run_card(&mut ctx);
    ctx.kill_occurred
}

/// Turns numeric skill values into effect slots.
///
/// Flat damage values are scaled by `base_atk` percent and rounded half-up.
pub fn skill_slots(skill: &MonsterSkillRow, base_atk: i32) -> Vec<EffectSlot> {
    skill
        .effects
        .iter()
        .map(|effect| {
            let value = if effect.effect_type.is_flat_damage() {
                combat::round_half_up(effect.value * base_atk as f32 / 100.0).to_string()
            } else if effect.value.fract() == 0.0 {
                (effect.value as i64).to_string()
            } else {
                effect.value.to_string()
            };
            EffectSlot::unconditional(effect.effect_type, value)
        })
        .collect()
}

fn run_card(ctx: &mut EffectContext<'_>) {
    let end = ctx.spend_repeat_index.unwrap_or(ctx.slots.len());
    run_slots(ctx, 0..end);
    if let Some(index) = ctx.spend_repeat_index {
        spend_repeat(ctx, index);
    }
}

fn run_slots(ctx: &mut EffectContext<'_>, range: Range<usize>) {
    let slots = ctx.slots;
    for slot in &slots[range] {
        if slot.is_empty() {
            continue;
        }
        let subjects = RequirementSubjects::of(ctx.state, ctx.caster, ctx.kill_occurred);
        if !requirement_met(&slot.requirement, &subjects) {
            tracing::debug!(
                effect = %slot.effect_type,
                requirement = %slot.requirement,
                "requirement not met, skipping slot"
            );
            continue;
        }
        match Effect::parse(slot.effect_type, &slot.value) {
            Ok(Some(Effect::SpendRepeat { .. })) => {
                tracing::warn!("nested SpendRepeatTheRest slot ignored");
            }
            Ok(Some(effect)) => {
                apply_effect(ctx, &effect);
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(
                    effect = %slot.effect_type,
                    value = %slot.value,
                    %error,
                    "malformed effect value, skipping slot"
                );
            }
        }
    }
}

fn spend_repeat(ctx: &mut EffectContext<'_>, index: usize) {
    let slots = ctx.slots;
    let slot = &slots[index];
    let subjects = RequirementSubjects::of(ctx.state, ctx.caster, ctx.kill_occurred);
    if !requirement_met(&slot.requirement, &subjects) {
        return;
    }
    let (meter, cost, budget) = match Effect::parse(slot.effect_type, &slot.value) {
        Ok(Some(Effect::SpendRepeat {
            meter,
            cost,
            budget,
        })) => (meter, cost, budget),
        Ok(_) => return,
        Err(error) => {
            tracing::warn!(value = %slot.value, %error, "malformed spend-repeat value");
            return;
        }
    };
    if cost <= 0 {
        tracing::warn!(cost, "spend-repeat cost must be positive");
        return;
    }

    let mut remaining = budget;
    let mut repeats = 0;
    while remaining >= cost {
        if !spend_meter(ctx.state, ctx.caster, meter, cost) {
            break;
        }
        remaining -= cost;
        repeats += 1;
        run_slots(ctx, index + 1..slots.len());
    }
    tracing::debug!(%meter, cost, budget, repeats, "spend-repeat finished");
}

fn spend_meter(state: &mut BattleState, caster: EntityId, meter: Meter, cost: i32) -> bool {
    if !caster.is_player() {
        return false;
    }
    let player = &mut state.player;
    match meter {
        Meter::AngelGauge => {
            if player.angel_gauge() < cost {
                return false;
            }
            player.shift_angel(-cost);
            state.emit_gauges();
        }
        Meter::DemonGauge => {
            if player.demon_gauge() < cost {
                return false;
            }
            player.shift_demon(-cost);
            state.emit_gauges();
        }
        Meter::ActionPoint => {
            if !player.spend_action(cost) {
                return false;
            }
            state.emit_action_points();
        }
    }
    true
}

/// Applies one parsed effect. Returns whether it killed something.
fn apply_effect(ctx: &mut EffectContext<'_>, effect: &Effect) -> bool {
    let caster = ctx.caster;
    let killed = match effect {
        Effect::SingleDamage(amount) => match ctx.single_target() {
            Some(target) => combat::strike(ctx.state, caster, target, *amount).killed,
            None => {
                tracing::warn!(%caster, "single-target damage without a living target");
                false
            }
        },
        Effect::AoeDamage(amount) => {
            let mut killed = false;
            for target in ctx.state.opponents_of(caster) {
                killed |= combat::strike(ctx.state, caster, target, *amount).killed;
            }
            killed
        }
        Effect::SelfDamage(amount) => {
            let amount = ctx
                .state
                .entity(caster)
                .map_or(0.0, |entity| combat::calculate_damage(*amount, entity));
            combat::apply_damage(ctx.state, caster, amount);
            false
        }
        Effect::SelfFlatHeal(amount) => {
            combat::apply_healing(ctx.state, caster, *amount);
            false
        }
        Effect::SelfPercHeal(percent) => {
            let max_hp = ctx.state.entity(caster).map_or(0, |e| e.max_hp());
            combat::apply_healing(ctx.state, caster, max_hp as f32 * percent / 100.0);
            false
        }
        Effect::ShiftGauge { gauge, delta } => {
            match gauge {
                Gauge::Angel => ctx.state.player.shift_angel(*delta),
                Gauge::Demon => ctx.state.player.shift_demon(*delta),
            };
            ctx.state.emit_gauges();
            false
        }
        Effect::GainAction(amount) => {
            if caster.is_player() {
                ctx.state.player.gain_action(*amount);
                ctx.state.emit_action_points();
            } else {
                tracing::warn!(%caster, "GainAction from a non-player caster ignored");
            }
            false
        }
        Effect::ReduceCost(amount) => {
            reduce_cost(ctx, *amount);
            false
        }
        Effect::InstDraw(count) => {
            ctx.state.draw_cards(*count);
            false
        }
        Effect::Burn { pile, count } => {
            let state = &mut *ctx.state;
            let cards = state.player.piles.destroy_random(*pile, *count, &mut state.rng);
            if !cards.is_empty() {
                tracing::debug!(%pile, count = cards.len(), "cards destroyed");
                state.emit(BattleEvent::CardsDestroyed { pile: *pile, cards });
            }
            false
        }
        Effect::CleanseSelf(count) => {
            if let Some(entity) = ctx.state.entity_mut(caster) {
                let removed = entity.buffs.remove_debuffs(*count as usize);
                emit_expired(ctx.state, caster, removed);
            }
            false
        }
        Effect::ApplyBuff { scope, spec } => {
            apply_buff(ctx, *scope, spec);
            false
        }
        Effect::CastMore { side, distance } => cast_more(ctx, *side, *distance),
        Effect::Delay {
            mode,
            damage,
            turns,
        } => {
            queue_delayed(ctx, *mode, *damage, *turns);
            false
        }
        // Driven by `run_card`, never dispatched here.
        Effect::SpendRepeat { .. } => false,
    };
    if killed {
        ctx.kill_occurred = true;
    }
    killed
}

fn reduce_cost(ctx: &mut EffectContext<'_>, amount: i32) {
    let Some(card) = ctx.card else {
        tracing::warn!("ReduceCost outside a card resolution ignored");
        return;
    };
    let Some(instance) = ctx.state.player.piles.active_card_mut(card.instance) else {
        return;
    };
    let cost = instance.reduce_cost(amount);
    ctx.state.emit(BattleEvent::CostReduced {
        card: card.instance,
        cost,
    });
}

fn apply_buff(ctx: &mut EffectContext<'_>, scope: BuffScope, spec: &BuffSpec) {
    let buff = match spec.to_buff() {
        Ok(buff) => buff,
        Err(error) => {
            tracing::warn!(buff = %spec.id, %error, "malformed buff parameter, no buff created");
            return;
        }
    };
    let targets = match scope {
        BuffScope::Caster => vec![ctx.caster],
        BuffScope::Target => ctx.single_target().into_iter().collect(),
        BuffScope::AllOpponents => ctx.state.opponents_of(ctx.caster),
    };
    if targets.is_empty() {
        tracing::warn!(buff = %spec.id, "buff effect has no living target");
    }

    for target in targets {
        let Some(entity) = ctx.state.entity_mut(target) else {
            continue;
        };
        let applied = entity.buffs.add(buff);
        let stacks = entity
            .buffs
            .iter()
            .find(|b| b.id() == buff.id())
            .map_or(buff.stacks, |b| b.stacks);
        tracing::debug!(%target, buff = %buff.id(), ?applied, stacks, "buff applied");
        ctx.state.emit(BattleEvent::BuffApplied {
            target,
            buff: buff.id(),
            stacks,
        });
    }
}

fn cast_more(ctx: &mut EffectContext<'_>, side: Side, distance: usize) -> bool {
    let Some(card) = ctx.card else {
        tracing::warn!("CastMore outside a card resolution ignored");
        return false;
    };
    let neighbor = ctx
        .state
        .player
        .piles
        .neighbor(card.anchor, side, distance)
        .map(|(index, _)| index);
    match neighbor {
        Some(index) => echo_card(ctx, index),
        None => {
            tracing::debug!(%side, distance, "no card at CastMore position");
            false
        }
    }
}

/// Runs the effect slots of the hand card at `index` in a child context.
///
/// Only the slots run: no cost is paid and no gauge delta applies.
fn echo_card(ctx: &mut EffectContext<'_>, index: usize) -> bool {
    if ctx.depth >= ctx.state.config.max_chain_depth {
        tracing::warn!(depth = ctx.depth, "re-execution chain too deep, stopping");
        return false;
    }
    let Some(card) = ctx.state.player.piles.hand().get(index) else {
        return false;
    };
    let instance = card.id;
    let row = Arc::clone(&card.row);
    ctx.state.emit(BattleEvent::CardEchoed {
        card: instance,
        row: row.id.clone(),
    });

    let source = CardSource {
        instance,
        anchor: HandAnchor::Held(index),
    };
    let mut nested = EffectContext::new(ctx.caster, ctx.target, &mut *ctx.state, &row.effects)
        .with_card(source, row.element);
    nested.kill_occurred = ctx.kill_occurred;
    nested.depth = ctx.depth + 1;
    run_card(&mut nested);

    let killed = nested.kill_occurred && !ctx.kill_occurred;
    ctx.kill_occurred |= nested.kill_occurred;
    killed
}

fn queue_delayed(ctx: &mut EffectContext<'_>, mode: DelayedMode, damage: f32, turns: i32) {
    let effect = match mode {
        DelayedMode::Single => {
            let Some(target) = ctx.single_target() else {
                tracing::warn!("delayed single damage without a living target");
                return;
            };
            DelayedEffect::single(ctx.caster, target, damage, turns)
        }
        DelayedMode::AreaOfAllEnemies => DelayedEffect::area(ctx.caster, damage, turns),
    };
    delayed::enqueue(ctx.state, effect.with_element(ctx.element));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::{Buff, BuffId, BuffKind};
    use crate::config::BattleConfig;
    use crate::env::{BattleRng, EffectType, EnemyRow};
    use crate::state::{DeckPiles, EnemyState, PlayerState};

    const ENEMY: EntityId = EntityId(1);
    const OTHER: EntityId = EntityId(2);

    fn state_with_hand(cards: Vec<CardRow>) -> BattleState {
        let config = BattleConfig::default();
        let count = cards.len() as u32;
        let piles = DeckPiles::from_rows(cards.into_iter().map(Arc::new));
        let player = PlayerState::new(100, piles, &config);
        let enemies = vec![
            EnemyState::new(ENEMY, EnemyRow::new("orc", "Orc", 50), None, Vec::new()),
            EnemyState::new(OTHER, EnemyRow::new("imp", "Imp", 10), None, Vec::new()),
        ];
        let mut state =
            BattleState::new(config, player, enemies, BattleRng::seeded(3), Vec::new());
        state.draw_cards(count);
        state.player.reset_action_points();
        state
    }

    fn play(state: &mut BattleState, hand_index: usize, target: Option<EntityId>) -> bool {
        let instance = state.player.piles.hand()[hand_index].id;
        let index = state.player.piles.begin_play(instance).unwrap();
        let row = Arc::clone(&state.player.piles.in_play().unwrap().row);
        let played = PlayedCard {
            instance,
            row,
            hand_index: index,
        };
        let killed = execute_card(state, &played, target);
        state.player.piles.finish_play();
        killed
    }

    #[test]
    fn single_and_area_damage() {
        let mut state = state_with_hand(vec![
            CardRow::new("jab", "Jab", 1).with_effect(EffectType::SingleDamage, "20", ""),
            CardRow::new("wave", "Wave", 1).with_effect(EffectType::AoeDamage, "12", ""),
        ]);
        assert!(!play(&mut state, 0, Some(ENEMY)));
        assert_eq!(state.enemies[0].entity.hp(), 30);

        assert!(play(&mut state, 0, None));
        assert_eq!(state.enemies[0].entity.hp(), 18);
        assert!(!state.enemies[1].is_alive());
    }

    #[test]
    fn kill_flag_gates_later_slots() {
        let mut state = state_with_hand(vec![
            CardRow::new("finisher", "Finisher", 1)
                .with_effect(EffectType::SingleDamage, "10", "")
                .with_effect(EffectType::AvalueInc, "20", "killoccurred==1"),
        ]);
        play(&mut state, 0, Some(OTHER));
        assert_eq!(state.player.angel_gauge(), 70);
    }

    #[test]
    fn failed_requirement_skips_only_that_slot() {
        let mut state = state_with_hand(vec![
            CardRow::new("gated", "Gated", 1)
                .with_effect(EffectType::SingleDamage, "5", "Ametervalue>=90")
                .with_effect(EffectType::SingleDamage, "7", ""),
        ]);
        play(&mut state, 0, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 43);
    }

    #[test]
    fn malformed_values_degrade_to_no_ops() {
        let mut state = state_with_hand(vec![
            CardRow::new("broken", "Broken", 1)
                .with_effect(EffectType::SingleDamage, "lots", "")
                .with_effect(EffectType::SelfBuff, "Stoneskin,1,1,1", "")
                .with_effect(EffectType::SingleDamage, "4", "Mana>3"),
        ]);
        play(&mut state, 0, Some(ENEMY));
        // Only the fail-open third slot landed.
        assert_eq!(state.enemies[0].entity.hp(), 46);
        assert!(state.player.entity.buffs.is_empty());
    }

    #[test]
    fn spend_repeat_runs_the_rest_per_payment() {
        let mut state = state_with_hand(vec![
            CardRow::new("prayer", "Prayer", 0)
                .with_effect(EffectType::SpendRepeatTheRest, "ActionPoint,1,3", "")
                .with_effect(EffectType::SelfFlatHeal, "5", "SpendRepeat"),
        ]);
        state.player.entity.set_hp(60);
        play(&mut state, 0, None);
        assert_eq!(state.player.entity.hp(), 75);
        assert_eq!(state.player.action_point(), 0);
    }

    #[test]
    fn spend_repeat_stops_when_the_meter_runs_dry() {
        let mut state = state_with_hand(vec![
            CardRow::new("zeal", "Zeal", 0)
                .with_effect(EffectType::SingleDamage, "1", "")
                .with_effect(EffectType::SpendRepeatTheRest, "Ametervalue,20,100", "")
                .with_effect(EffectType::SingleDamage, "3", ""),
        ]);
        play(&mut state, 0, Some(ENEMY));
        // 1 + 3 * (50 / 20 rounded down)
        assert_eq!(state.enemies[0].entity.hp(), 43);
        assert_eq!(state.player.angel_gauge(), 10);
    }

    #[test]
    fn gauge_deltas_apply_after_slots() {
        let mut state = state_with_hand(vec![
            CardRow::new("halo", "Halo", 1)
                .with_effect(EffectType::AvalueInc, "5", "")
                .with_effect(EffectType::DvalueDec, "60", "")
                .with_gauges(60, 10),
        ]);
        play(&mut state, 0, None);
        assert_eq!(state.player.angel_gauge(), 100);
        assert_eq!(state.player.demon_gauge(), 10);
    }

    #[test]
    fn cast_more_echoes_the_neighbour() {
        let mut state = state_with_hand(vec![
            CardRow::new("left", "Left", 1).with_effect(EffectType::SingleDamage, "6", ""),
            CardRow::new("echo", "Echo", 1).with_effect(EffectType::CastMore, "Left,1", ""),
            CardRow::new("right", "Right", 1).with_effect(EffectType::SingleDamage, "9", ""),
        ]);
        play(&mut state, 1, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 44);
        // The neighbour stays in hand.
        assert_eq!(state.player.piles.hand().len(), 2);
    }

    #[test]
    fn cast_more_out_of_bounds_is_a_no_op() {
        let mut state = state_with_hand(vec![
            CardRow::new("echo", "Echo", 1).with_effect(EffectType::CastMore, "Left,1", ""),
        ]);
        assert!(!play(&mut state, 0, Some(ENEMY)));
        assert_eq!(state.enemies[0].entity.hp(), 50);
    }

    #[test]
    fn echo_to_a_played_card_position_finds_nothing() {
        let mut state = state_with_hand(vec![
            CardRow::new("mirror", "Mirror", 1)
                .with_effect(EffectType::SingleDamage, "1", "")
                .with_effect(EffectType::CastMore, "Right,1", ""),
            CardRow::new("origin", "Origin", 1).with_effect(EffectType::CastMore, "Left,1", ""),
        ]);
        play(&mut state, 1, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 49);
    }

    #[test]
    fn echo_loops_are_cut_at_max_depth() {
        let mut state = state_with_hand(vec![
            CardRow::new("a", "A", 1)
                .with_effect(EffectType::SingleDamage, "1", "")
                .with_effect(EffectType::CastMore, "Right,1", ""),
            CardRow::new("b", "B", 1)
                .with_effect(EffectType::SingleDamage, "1", "")
                .with_effect(EffectType::CastMore, "Right,1", ""),
            CardRow::new("c", "C", 1)
                .with_effect(EffectType::SingleDamage, "1", "")
                .with_effect(EffectType::CastMore, "Left,1", ""),
        ]);
        state.config = state.config.clone().with_max_chain_depth(3);
        // a, then b and c bounce between each other: b, c, b.
        play(&mut state, 0, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 46);
    }

    #[test]
    fn reduce_cost_targets_the_resolving_card() {
        let mut state = state_with_hand(vec![
            CardRow::new("thrift", "Thrift", 3)
                .with_effect(EffectType::ReduceCost, "2", "")
                .with_effect(EffectType::CastMore, "Right,1", ""),
            CardRow::new("cheapen", "Cheapen", 2).with_effect(EffectType::ReduceCost, "1", ""),
        ]);
        play(&mut state, 0, None);
        let discarded = &state.player.piles.discard_pile()[0];
        assert_eq!(discarded.cost(), 1);
        // The echoed neighbour reduced its own cost.
        assert_eq!(state.player.piles.hand()[0].cost(), 1);
    }

    #[test]
    fn swift_echoes_neighbours_once() {
        let mut state = state_with_hand(vec![
            CardRow::new("l", "L", 1).with_effect(EffectType::SingleDamage, "2", ""),
            CardRow::new("play", "Play", 1).with_effect(EffectType::SingleDamage, "10", ""),
            CardRow::new("r", "R", 1).with_effect(EffectType::SingleDamage, "3", ""),
        ]);
        state
            .player
            .entity
            .buffs
            .add("Swift,LR1,1,2".parse::<BuffSpec>().unwrap().to_buff().unwrap());
        play(&mut state, 1, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 35);
        assert!(!state.player.entity.buffs.has(BuffId::Swift));
    }

    #[test]
    fn swift_right_neighbour_survives_a_left_hand_burn() {
        let mut burned_left = 0;
        for seed in 0..16 {
            let mut state = state_with_hand(vec![
                CardRow::new("l", "L", 1).with_effect(EffectType::HandBurn, "1", ""),
                CardRow::new("play", "Play", 1).with_effect(EffectType::SingleDamage, "10", ""),
                CardRow::new("r", "R", 1).with_effect(EffectType::SingleDamage, "3", ""),
            ]);
            state.rng = BattleRng::seeded(seed);
            let left = state.player.piles.hand()[0].id;
            let right = state.player.piles.hand()[2].id;
            state
                .player
                .entity
                .buffs
                .add("Swift,LR1,1,2".parse::<BuffSpec>().unwrap().to_buff().unwrap());
            play(&mut state, 1, Some(ENEMY));

            let destroyed: Vec<CardInstanceId> =
                state.player.piles.destroyed().iter().map(|c| c.id).collect();
            assert_eq!(destroyed.len(), 1);
            if destroyed[0] == left {
                burned_left += 1;
                assert_eq!(state.enemies[0].entity.hp(), 37, "seed {seed}");
            } else {
                assert_eq!(destroyed[0], right);
                assert_eq!(state.enemies[0].entity.hp(), 40, "seed {seed}");
            }
        }
        assert!(burned_left > 0);
    }

    #[test]
    fn swift_applied_by_the_card_waits_for_the_next_play() {
        let mut state = state_with_hand(vec![
            CardRow::new("l", "L", 1).with_effect(EffectType::SingleDamage, "2", ""),
            CardRow::new("haste", "Haste", 1).with_effect(EffectType::SelfBuff, "Swift,L1,1,2", ""),
        ]);
        play(&mut state, 1, Some(ENEMY));
        assert_eq!(state.enemies[0].entity.hp(), 50);
        assert!(state.player.entity.buffs.has(BuffId::Swift));
    }

    #[test]
    fn buffs_land_on_their_scope() {
        let mut state = state_with_hand(vec![
            CardRow::new("hex", "Hex", 1)
                .with_effect(EffectType::TargetAoeBuff, "Fragile,50,1,2", "")
                .with_effect(EffectType::TargetSingleBuff, "Fragile,50,2,2", "")
                .with_effect(EffectType::SelfBuff, "Guard,0,1,1", ""),
        ]);
        play(&mut state, 0, Some(ENEMY));
        let stacks = |id: EntityId| {
            state
                .entity(id)
                .and_then(|e| e.buffs.get(BuffId::Fragile))
                .map(|b| b.stacks)
        };
        assert_eq!(stacks(ENEMY), Some(3));
        assert_eq!(stacks(OTHER), Some(1));
        assert!(state.player.entity.buffs.has(BuffId::Guard));
    }

    #[test]
    fn cleanse_removes_negative_buffs() {
        let mut state = state_with_hand(vec![
            CardRow::new("purify", "Purify", 1).with_effect(EffectType::CleanseSelf, "1", ""),
        ]);
        let buffs = &mut state.player.entity.buffs;
        buffs.add(Buff::new(BuffKind::Cursed, 1, 2));
        buffs.add(Buff::new(BuffKind::Bleeding { percent: 5.0 }, 1, 2));
        play(&mut state, 0, None);
        assert!(!state.player.entity.buffs.has(BuffId::Cursed));
        assert!(state.player.entity.buffs.has(BuffId::Bleeding));
    }

    #[test]
    fn burn_and_draw_move_cards() {
        let mut state = state_with_hand(vec![
            CardRow::new("burn", "Burn", 1)
                .with_effect(EffectType::HandBurn, "1", "")
                .with_effect(EffectType::InstDraw, "2", ""),
            CardRow::new("a", "A", 1),
            CardRow::new("b", "B", 1),
        ]);
        let total = state.player.piles.counts().total();
        play(&mut state, 0, None);
        let counts = state.player.piles.counts();
        assert_eq!(counts.destroyed, 1);
        assert_eq!(counts.total(), total);
        // Hand had one card left after the burn; the draw pile was empty
        // and the discard pile too, so nothing more could be drawn.
        assert_eq!(counts.hand, 1);
    }

    #[test]
    fn delayed_damage_is_queued_with_the_card_element() {
        let mut state = state_with_hand(vec![
            CardRow::new("meteor", "Meteor", 1)
                .with_element(crate::env::ElementType::Fire)
                .with_effect(EffectType::DelaySingleDamage, "10,2", "")
                .with_effect(EffectType::DelayAoeDamage, "4,1", ""),
        ]);
        play(&mut state, 0, Some(ENEMY));
        let queued: Vec<_> = state.delayed.iter().collect();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].target, Some(ENEMY));
        assert_eq!(queued[0].element, crate::env::ElementType::Fire);
        assert_eq!(queued[1].mode, DelayedMode::AreaOfAllEnemies);
    }

    #[test]
    fn skills_scale_flat_damage_by_base_attack() {
        let skill = MonsterSkillRow::new("maul", "Maul")
            .with_effect(EffectType::SingleDamage, 10.0)
            .with_effect(EffectType::SelfFlatHeal, 4.0)
            .with_effect(EffectType::SelfPercHeal, 2.5);
        let slots = skill_slots(&skill, 125);
        assert_eq!(slots[0].value, "13");
        assert_eq!(slots[1].value, "4");
        assert_eq!(slots[2].value, "2.5");

        let mut state = state_with_hand(Vec::new());
        execute_skill(&mut state, ENEMY, &skill, 125);
        assert_eq!(state.player.entity.hp(), 87);
    }
}
