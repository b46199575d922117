//! Rotation counters: which split and which variation come next

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::split::Split;

/// Persisted rotation position
///
/// Both counters only grow and saturate at `u64::MAX`; the chosen split or
/// variation is the counter modulo the cycle length or variation count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    pub day_index: u64,
    pub variation_index_by_split: BTreeMap<Split, u64>,
}

impl RotationState {
    /// Split for the current day without advancing
    pub fn peek_split(&self, cycle: &[Split]) -> Option<Split> {
        if cycle.is_empty() {
            return None;
        }
        Some(cycle[(self.day_index % cycle.len() as u64) as usize])
    }

    /// Pick the current split and move the day counter forward
    pub fn advance_day(&mut self, cycle: &[Split]) -> Option<Split> {
        let split = self.peek_split(cycle)?;
        self.day_index = self.day_index.saturating_add(1);
        Some(split)
    }

    pub fn variation_counter(&self, split: Split) -> u64 {
        self.variation_index_by_split.get(&split).copied().unwrap_or(0)
    }

    /// Pick the current variation index of `split` and move its counter
    /// forward. Nothing to rotate when the split has no variations.
    pub fn advance_variation(&mut self, split: Split, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        let counter = self.variation_counter(split);
        self.variation_index_by_split.insert(split, counter.saturating_add(1));
        Some((counter % count as u64) as usize)
    }

    /// Back to the first day; variation counters are kept
    pub fn reset_day(&mut self) {
        self.day_index = 0;
    }
}
