//! Cost and cardinality estimates consumed by query planners.

use serde::{Deserialize, Serialize};

/// Opaque cost unit. Only relative magnitudes are meaningful.
pub type Cost = u64;

/// `next_cost` of an iterator that must never drive enumeration.
///
/// This is a sentinel, not a measurement; planners summing costs have to use
/// saturating arithmetic (see [`IteratorStats::enumeration_cost`]).
pub const UNNEXTABLE_COST: Cost = Cost::MAX;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IteratorStats {
    /// Cost of a single `check` call.
    pub check_cost: Cost,
    /// Cost of a single `next` call.
    pub next_cost: Cost,
    /// Upper bound on the number of values the iterator can match.
    pub size: u64,
}

impl IteratorStats {
    pub const fn new(check_cost: Cost, next_cost: Cost, size: u64) -> Self {
        Self { check_cost, next_cost, size }
    }

    /// Stats for an iterator that only supports lookup mode.
    pub const fn unnextable(check_cost: Cost, size: u64) -> Self {
        Self { check_cost, next_cost: UNNEXTABLE_COST, size }
    }

    pub const fn is_nextable(&self) -> bool {
        self.next_cost != UNNEXTABLE_COST
    }

    /// Estimated cost of enumerating every value, saturating at
    /// [`UNNEXTABLE_COST`].
    pub const fn enumeration_cost(&self) -> Cost {
        self.next_cost.saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unnextable_stats_use_sentinel() {
        let stats = IteratorStats::unnextable(3, 10);
        assert_eq!(stats.next_cost, UNNEXTABLE_COST);
        assert!(!stats.is_nextable());
        assert_eq!(stats.enumeration_cost(), UNNEXTABLE_COST);
    }

    #[test]
    fn enumeration_cost_multiplies_next_cost() {
        let stats = IteratorStats::new(1, 2, 50);
        assert!(stats.is_nextable());
        assert_eq!(stats.enumeration_cost(), 100);
    }

    #[test]
    fn stats_serialize_with_field_names() {
        let json = serde_json::to_value(IteratorStats::new(1, 2, 3)).unwrap();
        assert_eq!(json, serde_json::json!({ "check_cost": 1, "next_cost": 2, "size": 3 }));
    }
}
