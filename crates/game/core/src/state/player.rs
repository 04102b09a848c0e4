use super::entity::{BattleEntity, EntityId, EntityKind};
use super::piles::DeckPiles;
use crate::config::BattleConfig;

/// The player: a battle entity plus gauges, action points and card piles.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub entity: BattleEntity,
    angel_gauge: i32,
    demon_gauge: i32,
    action_point: i32,
    max_action_point: i32,
    pub piles: DeckPiles,
}

impl PlayerState {
    pub fn new(max_hp: i32, piles: DeckPiles, config: &BattleConfig) -> Self {
        let gauge = BattleConfig::clamp_gauge(config.gauge_default);
        Self {
            entity: BattleEntity::new(EntityId::PLAYER, EntityKind::Player, max_hp),
            angel_gauge: gauge,
            demon_gauge: gauge,
            action_point: 0,
            max_action_point: config.max_action_point.max(0),
            piles,
        }
    }

    pub fn angel_gauge(&self) -> i32 {
        self.angel_gauge
    }

    pub fn demon_gauge(&self) -> i32 {
        self.demon_gauge
    }

    pub fn action_point(&self) -> i32 {
        self.action_point
    }

    pub fn max_action_point(&self) -> i32 {
        self.max_action_point
    }

    /// Shifts the angel gauge, clamped to the gauge bounds.
    pub fn shift_angel(&mut self, delta: i32) -> i32 {
        self.angel_gauge = BattleConfig::clamp_gauge(self.angel_gauge.saturating_add(delta));
        self.angel_gauge
    }

    /// Shifts the demon gauge, clamped to the gauge bounds.
    pub fn shift_demon(&mut self, delta: i32) -> i32 {
        self.demon_gauge = BattleConfig::clamp_gauge(self.demon_gauge.saturating_add(delta));
        self.demon_gauge
    }

    pub fn gain_action(&mut self, amount: i32) -> i32 {
        self.action_point = (self.action_point.saturating_add(amount)).max(0);
        self.action_point
    }

    /// Spends action points if enough are available.
    pub fn spend_action(&mut self, cost: i32) -> bool {
        if cost > self.action_point {
            return false;
        }
        self.action_point -= cost.max(0);
        true
    }

    pub fn reset_action_points(&mut self) {
        self.action_point = self.max_action_point;
    }
}
