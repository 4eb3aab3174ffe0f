//! The per-day output record.

use seirs_agent::StatusCounts;
use seirs_core::Day;

/// Compartment sizes at the end of one simulated day.
///
/// The record for day 0 already reflects one full day of movement and
/// transitions, not the initial population.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DailyRecord {
    pub day:    Day,
    pub counts: StatusCounts,
}

impl DailyRecord {
    /// `(day, S, E, I, R)` in output column order.
    pub fn as_row(&self) -> (u32, u32, u32, u32, u32) {
        (
            self.day.0,
            self.counts.susceptible,
            self.counts.exposed,
            self.counts.infectious,
            self.counts.recovered,
        )
    }
}
