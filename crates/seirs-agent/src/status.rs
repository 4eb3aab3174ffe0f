//! SEIRS compartment enum and per-compartment tallies.

use std::fmt;

/// Epidemiological state of one agent.
///
/// The only transitions are the cycle S → E → I → R → S.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Susceptible,
    Exposed,
    Infectious,
    Recovered,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Susceptible,
        Status::Exposed,
        Status::Infectious,
        Status::Recovered,
    ];

    /// The state that follows `self` in the cycle.
    #[inline]
    pub fn next(self) -> Status {
        match self {
            Status::Susceptible => Status::Exposed,
            Status::Exposed     => Status::Infectious,
            Status::Infectious  => Status::Recovered,
            Status::Recovered   => Status::Susceptible,
        }
    }

    /// Single-letter label used as the CSV column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Susceptible => "S",
            Status::Exposed     => "E",
            Status::Infectious  => "I",
            Status::Recovered   => "R",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of agents in each compartment.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusCounts {
    pub susceptible: u32,
    pub exposed:     u32,
    pub infectious:  u32,
    pub recovered:   u32,
}

impl StatusCounts {
    /// Count statuses in one pass.
    pub fn tally<I: IntoIterator<Item = Status>>(statuses: I) -> Self {
        let mut counts = Self::default();
        for status in statuses {
            counts.add(status);
        }
        counts
    }

    #[inline]
    pub fn add(&mut self, status: Status) {
        match status {
            Status::Susceptible => self.susceptible += 1,
            Status::Exposed     => self.exposed += 1,
            Status::Infectious  => self.infectious += 1,
            Status::Recovered   => self.recovered += 1,
        }
    }

    #[inline]
    pub fn get(&self, status: Status) -> u32 {
        match status {
            Status::Susceptible => self.susceptible,
            Status::Exposed     => self.exposed,
            Status::Infectious  => self.infectious,
            Status::Recovered   => self.recovered,
        }
    }

    /// Sum over all four compartments.  Equals the population size.
    #[inline]
    pub fn total(&self) -> u64 {
        u64::from(self.susceptible)
            + u64::from(self.exposed)
            + u64::from(self.infectious)
            + u64::from(self.recovered)
    }
}

impl fmt::Display for StatusCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "S={} E={} I={} R={}",
            self.susceptible, self.exposed, self.infectious, self.recovered
        )
    }
}
