//! Damage calculation and application.

use crate::buff::BuffId;
use crate::state::{BattleEntity, BattleEvent, BattleState, EntityId};

/// What one [`apply_damage`] call did to its target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageReport {
    pub absorbed: i32,
    pub hp_lost: i32,
    /// HP went from positive to 0 on this hit.
    pub killed: bool,
}

/// Rounds half away from zero, so `2.5 → 3`.
pub fn round_half_up(value: f32) -> i32 {
    value.round() as i32
}

/// Passes `base` through the attacker's outgoing-damage fold, floored at 0.
///
/// Defender-side and elemental modifiers are not applied here.
pub fn calculate_damage(base: f32, attacker: &BattleEntity) -> f32 {
    attacker.buffs.modify_outgoing(base).max(0.0)
}

/// Applies `amount` to `target`.
///
/// # Order
///
/// ```text
/// amount <= 0          → no-op
/// incoming modifiers   (Fragile, Guard)
/// round half-up
/// shield absorbs first
/// HP loses the rest, floored at 0
/// Feared records the HP lost, expired buffs are pruned
/// ```
///
/// Dead or unknown targets take nothing.
pub fn apply_damage(state: &mut BattleState, target: EntityId, amount: f32) -> DamageReport {
    if amount <= 0.0 {
        return DamageReport::default();
    }
    let Some(entity) = state.entity_mut(target) else {
        tracing::warn!(%target, "damage target does not exist");
        return DamageReport::default();
    };
    if !entity.is_alive() {
        return DamageReport::default();
    }

    let modified = entity.buffs.modify_incoming(amount);
    let rounded = round_half_up(modified).max(0);
    let (absorbed, remainder) = entity.absorb(rounded);
    let hp_lost = entity.lose_hp(remainder);
    if hp_lost > 0 {
        entity.buffs.record_damage_taken(hp_lost);
    }
    let killed = !entity.is_alive();
    let expired = entity.buffs.prune_expired();

    tracing::debug!(%target, amount, absorbed, hp_lost, killed, "damage applied");
    let report = DamageReport {
        absorbed,
        hp_lost,
        killed,
    };
    state.emit(BattleEvent::Damaged {
        target,
        absorbed,
        hp_lost,
        killed,
    });
    emit_expired(state, target, expired);
    report
}

/// Heals `target` by `amount`, rounded half-up and capped at max HP.
///
/// A Cursed target receives nothing. Returns the HP restored.
pub fn apply_healing(state: &mut BattleState, target: EntityId, amount: f32) -> i32 {
    let Some(entity) = state.entity_mut(target) else {
        tracing::warn!(%target, "healing target does not exist");
        return 0;
    };
    if !entity.is_alive() {
        return 0;
    }
    let amount = if entity.buffs.has(BuffId::Cursed) {
        0
    } else {
        round_half_up(amount).max(0)
    };
    let restored = entity.restore_hp(amount);
    if restored > 0 {
        tracing::debug!(%target, restored, "healing applied");
        state.emit(BattleEvent::Healed {
            target,
            amount: restored,
        });
    }
    restored
}

/// A landed hit from `attacker`: outgoing fold, damage, then Lifesteel.
pub fn strike(
    state: &mut BattleState,
    attacker: EntityId,
    target: EntityId,
    base: f32,
) -> DamageReport {
    let amount = match state.entity(attacker) {
        Some(entity) => calculate_damage(base, entity),
        None => base.max(0.0),
    };
    let report = apply_damage(state, target, amount);
    if report.hp_lost > 0 && attacker != target {
        drain_life(state, attacker, report.hp_lost);
    }
    report
}

fn drain_life(state: &mut BattleState, attacker: EntityId, hp_lost: i32) {
    let Some(entity) = state.entity_mut(attacker) else {
        return;
    };
    let Some(percent) = entity.buffs.trigger_lifesteel() else {
        return;
    };
    let expired = entity.buffs.prune_expired();
    emit_expired(state, attacker, expired);
    apply_healing(state, attacker, hp_lost as f32 * percent / 100.0);
}

pub(crate) fn emit_expired(state: &mut BattleState, target: EntityId, expired: Vec<BuffId>) {
    for buff in expired {
        tracing::debug!(%target, %buff, "buff expired");
        state.emit(BattleEvent::BuffExpired { target, buff });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buff::{Buff, BuffKind};
    use crate::config::BattleConfig;
    use crate::env::{BattleRng, EnemyRow};
    use crate::state::{DeckPiles, EnemyState, PlayerState};

    fn state() -> BattleState {
        let config = BattleConfig::default();
        let player = PlayerState::new(100, DeckPiles::new(), &config);
        let enemy = EnemyState::new(
            EntityId::enemy(0),
            EnemyRow::new("slime", "Slime", 40),
            None,
            Vec::new(),
        );
        BattleState::new(config, player, vec![enemy], BattleRng::seeded(0), Vec::new())
    }

    const ENEMY: EntityId = EntityId(1);

    #[test]
    fn damage_without_buffs() {
        let mut state = state();
        let report = apply_damage(&mut state, EntityId::PLAYER, 20.0);
        assert_eq!(state.player.entity.hp(), 80);
        assert_eq!(state.player.entity.shield(), 0);
        assert!(!report.killed);
    }

    #[test]
    fn shield_absorbs_first() {
        let mut state = state();
        state.player.entity.add_shield(15);
        let report = apply_damage(&mut state, EntityId::PLAYER, 20.0);
        assert_eq!(report.absorbed, 15);
        assert_eq!(state.player.entity.shield(), 0);
        assert_eq!(state.player.entity.hp(), 95);
    }

    #[test]
    fn zero_damage_is_a_no_op() {
        let mut state = state();
        state.player.entity.add_shield(3);
        state
            .player
            .entity
            .buffs
            .add(Buff::new(BuffKind::Guard, 1, 1));
        assert_eq!(
            apply_damage(&mut state, EntityId::PLAYER, 0.0),
            DamageReport::default()
        );
        assert_eq!(state.player.entity.hp(), 100);
        assert_eq!(state.player.entity.shield(), 3);
        assert!(state.player.entity.buffs.has(BuffId::Guard));
        assert!(state.events().is_empty());
    }

    #[test]
    fn kill_is_reported_once() {
        let mut state = state();
        assert!(apply_damage(&mut state, ENEMY, 45.0).killed);
        assert_eq!(state.enemies[0].entity.hp(), 0);
        assert!(!apply_damage(&mut state, ENEMY, 5.0).killed);
    }

    #[test]
    fn rounds_half_up() {
        let mut state = state();
        apply_damage(&mut state, EntityId::PLAYER, 2.5);
        assert_eq!(state.player.entity.hp(), 97);
        assert_eq!(round_half_up(1.49), 1);
    }

    #[test]
    fn guard_blocks_only_the_first_hit() {
        let mut state = state();
        state
            .player
            .entity
            .buffs
            .add(Buff::new(BuffKind::Guard, 1, 2));
        apply_damage(&mut state, EntityId::PLAYER, 30.0);
        assert_eq!(state.player.entity.hp(), 100);
        assert!(state.player.entity.buffs.is_empty());
        apply_damage(&mut state, EntityId::PLAYER, 30.0);
        assert_eq!(state.player.entity.hp(), 70);
    }

    #[test]
    fn cursed_blocks_healing_and_heal_caps_at_max() {
        let mut state = state();
        apply_damage(&mut state, EntityId::PLAYER, 10.0);
        assert_eq!(apply_healing(&mut state, EntityId::PLAYER, 50.0), 10);
        assert_eq!(state.player.entity.hp(), 100);

        apply_damage(&mut state, EntityId::PLAYER, 10.0);
        state
            .player
            .entity
            .buffs
            .add(Buff::new(BuffKind::Cursed, 1, 1));
        assert_eq!(apply_healing(&mut state, EntityId::PLAYER, 5.0), 0);
        assert_eq!(state.player.entity.hp(), 90);
    }

    #[test]
    fn strike_applies_outgoing_fold_and_lifesteel() {
        let mut state = state();
        apply_damage(&mut state, EntityId::PLAYER, 50.0);
        let buffs = &mut state.player.entity.buffs;
        buffs.add(Buff::new(BuffKind::IncreaseDmg { percent: 50.0 }, 1, 2));
        buffs.add(Buff::new(
            BuffKind::Lifesteel {
                percent: 50.0,
                triggered: false,
            },
            1,
            2,
        ));

        let report = strike(&mut state, EntityId::PLAYER, ENEMY, 10.0);
        assert_eq!(report.hp_lost, 15);
        assert_eq!(state.enemies[0].entity.hp(), 25);
        // 15 * 50% = 7.5 → 8
        assert_eq!(state.player.entity.hp(), 58);
        assert!(!state.player.entity.buffs.has(BuffId::Lifesteel));

        strike(&mut state, EntityId::PLAYER, ENEMY, 10.0);
        assert_eq!(state.player.entity.hp(), 58);
    }
}
