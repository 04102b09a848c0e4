use std::fmt;
use std::sync::Arc;

use crate::env::CardRow;

/// Runtime identity of a card within one battle. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstanceId(pub u32);

impl fmt::Display for CardInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

/// A card in one of the player's piles.
///
/// The static row is shared; only the action cost can change at runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardInstance {
    pub id: CardInstanceId,
    pub row: Arc<CardRow>,
    cost_override: Option<i32>,
}

impl CardInstance {
    pub fn new(id: CardInstanceId, row: Arc<CardRow>) -> Self {
        Self {
            id,
            row,
            cost_override: None,
        }
    }

    /// Current action cost, including reductions.
    pub fn cost(&self) -> i32 {
        self.cost_override.unwrap_or(self.row.action_cost).max(0)
    }

    /// Lowers the cost by `amount`, floored at 0. Returns the new cost.
    pub fn reduce_cost(&mut self, amount: i32) -> i32 {
        let cost = self.cost().saturating_sub(amount).max(0);
        self.cost_override = Some(cost);
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cost_reduction_floors_at_zero() {
        let row = Arc::new(CardRow::new("bolt", "Bolt", 2));
        let mut card = CardInstance::new(CardInstanceId(1), row);
        assert_eq!(card.cost(), 2);
        assert_eq!(card.reduce_cost(1), 1);
        assert_eq!(card.reduce_cost(5), 0);
        assert_eq!(card.row.action_cost, 2);
    }

    #[test]
    fn extreme_reductions_saturate() {
        let row = Arc::new(CardRow::new("bolt", "Bolt", 2));
        let mut card = CardInstance::new(CardInstanceId(1), row);
        assert_eq!(card.reduce_cost(i32::MIN), i32::MAX);
        assert_eq!(card.reduce_cost(i32::MAX), 0);
    }
}
