use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-dish usage counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishStat {
    /// How many times the user confirmed this dish
    pub selection_count: u32,
    /// How many times the engine has surfaced this dish
    pub recommendation_count: u32,
}

/// Aggregate preference state for the single local user
///
/// Invariant: `total_selections` equals the sum of all `selection_count`
/// values. Counters only grow; the whole state is replaced on reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceState {
    pub dishes: HashMap<String, DishStat>,
    pub total_selections: u64,
}

impl PreferenceState {
    /// Creates an empty preference state
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for a dish, zeroed when the dish has never been touched
    pub fn stat(&self, dish: &str) -> DishStat {
        self.dishes.get(dish).copied().unwrap_or_default()
    }

    /// Marks a dish as surfaced to the user, creating its entry if needed
    pub fn note_recommended(&mut self, dish: &str) {
        self.dishes
            .entry(dish.to_string())
            .or_default()
            .recommendation_count += 1;
    }

    /// Marks a dish as confirmed by the user, creating its entry if needed
    pub fn note_selected(&mut self, dish: &str) {
        self.dishes
            .entry(dish.to_string())
            .or_default()
            .selection_count += 1;
        self.total_selections += 1;
    }
}
