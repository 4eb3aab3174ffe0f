//! The per-agent record.

use crate::Status;

/// Dwell-time thresholds, in days, drawn once when the agent is created.
///
/// They are reused on every later visit to the same state; a second
/// exposure waits for the same `exposed` threshold as the first.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DwellTimes {
    pub exposed:    f64,
    pub infectious: f64,
    pub recovered:  f64,
}

/// One agent: epidemiological state plus its current lattice cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    pub status: Status,
    /// Days since the last transition.  Incremented at the start of every
    /// daily update, reset to 0 on a transition.
    pub time_in_status: u32,
    pub dwell: DwellTimes,
    pub x: u32,
    pub y: u32,
}

impl Agent {
    pub fn new(status: Status, dwell: DwellTimes, x: u32, y: u32) -> Self {
        Self { status, time_in_status: 0, dwell, x, y }
    }

    /// Threshold that ends the current state, or `None` while Susceptible
    /// (that exit depends on contacts, not on time).
    #[inline]
    pub fn dwell_threshold(&self) -> Option<f64> {
        match self.status {
            Status::Susceptible => None,
            Status::Exposed     => Some(self.dwell.exposed),
            Status::Infectious  => Some(self.dwell.infectious),
            Status::Recovered   => Some(self.dwell.recovered),
        }
    }

    #[inline]
    pub fn is_infectious(&self) -> bool {
        self.status == Status::Infectious
    }

    /// Move to `status` and restart the dwell clock.
    #[inline]
    pub fn enter(&mut self, status: Status) {
        self.status = status;
        self.time_in_status = 0;
    }
}
