use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{sum_items, LineItem, Money};

/// Revenue lost and carrying costs for one rehab year (1-based).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LostRevenueYear {
    pub year: u32,
    pub items: Vec<LineItem>,
}

/// Lost revenue summed per holding year.
///
/// Index 0 holds year 1. The length always equals the holding period:
/// missing years are zero, year 0 and years past the holding period are
/// dropped, and repeated years accumulate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LostRevenueSchedule {
    by_year: Vec<Money>,
}

impl LostRevenueSchedule {
    pub fn from_entries(entries: &[LostRevenueYear], hold_period: u32) -> Self {
        let mut by_year = vec![Decimal::ZERO; hold_period as usize];
        for entry in entries {
            if entry.year == 0 || entry.year > hold_period {
                continue;
            }
            by_year[(entry.year - 1) as usize] += sum_items(&entry.items);
        }
        Self { by_year }
    }

    /// Amount for a 1-based year; zero outside the holding period.
    pub fn year(&self, year: u32) -> Money {
        year.checked_sub(1)
            .and_then(|idx| self.by_year.get(idx as usize))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn total(&self) -> Money {
        self.by_year.iter().copied().sum()
    }

    pub fn as_slice(&self) -> &[Money] {
        &self.by_year
    }

    pub fn len(&self) -> usize {
        self.by_year.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_year.is_empty()
    }
}

/// Entries whose year falls outside 1..=hold_period.
pub fn out_of_range_years(entries: &[LostRevenueYear], hold_period: u32) -> Vec<u32> {
    entries
        .iter()
        .map(|e| e.year)
        .filter(|&y| y == 0 || y > hold_period)
        .collect()
}
