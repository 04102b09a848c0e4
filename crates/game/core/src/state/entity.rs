use std::fmt;

use crate::buff::BuffList;

/// Battle-local entity handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl EntityId {
    /// Reserved identifier for the player. Enemies are numbered from 1.
    pub const PLAYER: Self = Self(0);

    #[inline]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }

    /// Id of the enemy at `index` in battle order.
    pub const fn enemy(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Battle-order index of an enemy id.
    pub const fn enemy_index(self) -> Option<usize> {
        match self.0 {
            0 => None,
            n => Some(n as usize - 1),
        }
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::PLAYER
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Player,
    Enemy,
}

/// HP, shield and buffs shared by the player and every enemy.
///
/// `0 <= hp <= max_hp` and `shield >= 0` hold after every mutation; the
/// fields are private so that only the clamping mutators can touch them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleEntity {
    pub id: EntityId,
    pub kind: EntityKind,
    hp: i32,
    max_hp: i32,
    shield: i32,
    pub buffs: BuffList,
}

impl BattleEntity {
    /// Creates an entity at full health. `max_hp` is raised to at least 1.
    pub fn new(id: EntityId, kind: EntityKind, max_hp: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            id,
            kind,
            hp: max_hp,
            max_hp,
            shield: 0,
            buffs: BuffList::new(),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn shield(&self) -> i32 {
        self.shield
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_player(&self) -> bool {
        self.kind == EntityKind::Player
    }

    /// HP as a percentage of max HP.
    pub fn hp_percent(&self) -> f32 {
        self.hp as f32 * 100.0 / self.max_hp as f32
    }

    pub fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.max_hp);
    }

    pub fn add_shield(&mut self, amount: i32) {
        self.shield = self.shield.saturating_add(amount.max(0));
    }

    /// Lets the shield soak up `amount`; returns `(absorbed, remainder)`.
    pub(crate) fn absorb(&mut self, amount: i32) -> (i32, i32) {
        let absorbed = self.shield.min(amount.max(0));
        self.shield -= absorbed;
        (absorbed, amount - absorbed)
    }

    /// Subtracts HP, floored at 0. Returns the HP actually lost.
    pub(crate) fn lose_hp(&mut self, amount: i32) -> i32 {
        let lost = self.hp.min(amount.max(0));
        self.hp -= lost;
        lost
    }

    /// Adds HP, capped at max HP. Returns the HP actually restored.
    pub(crate) fn restore_hp(&mut self, amount: i32) -> i32 {
        let restored = (self.max_hp - self.hp).min(amount.max(0));
        self.hp += restored;
        restored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enemy_ids_round_trip_to_indices() {
        assert_eq!(EntityId::enemy(0), EntityId(1));
        assert_eq!(EntityId(3).enemy_index(), Some(2));
        assert_eq!(EntityId::PLAYER.enemy_index(), None);
        assert!(EntityId::PLAYER.is_player());
    }

    #[test]
    fn hp_and_shield_stay_in_bounds() {
        let mut entity = BattleEntity::new(EntityId::PLAYER, EntityKind::Player, 20);
        entity.add_shield(5);
        assert_eq!(entity.absorb(8), (5, 3));
        assert_eq!(entity.shield(), 0);

        assert_eq!(entity.lose_hp(50), 20);
        assert_eq!(entity.hp(), 0);
        assert!(!entity.is_alive());

        assert_eq!(entity.restore_hp(100), 20);
        assert_eq!(entity.hp(), 20);

        entity.set_hp(-4);
        assert_eq!(entity.hp(), 0);
    }
}
