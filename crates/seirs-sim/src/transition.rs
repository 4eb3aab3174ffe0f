//! The per-agent daily transition rule.
//!
//! ```text
//! time_in_status += 1
//! Susceptible: Ni = infectious agents in the 3×3 block
//!              if Ni > 0 and U < 1 - exp(-k·Ni)  → Exposed
//! Exposed:     time_in_status >= dE             → Infectious
//! Infectious:  time_in_status >= dI             → Recovered
//! Recovered:   time_in_status >= dR             → Susceptible
//! ```
//!
//! A Susceptible agent with no infectious neighbour draws nothing from the
//! stream.  Every transition resets `time_in_status` to 0.

use seirs_agent::{Agent, Status};
use seirs_core::{AgentId, SimRng};
use seirs_spatial::SpatialIndex;

/// A single state change made during an update pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Status,
    pub to:   Status,
}

/// Probability that a Susceptible agent with `infectious_neighbors`
/// infectious contacts becomes Exposed today.
#[inline]
pub fn infection_probability(contact_rate: f64, infectious_neighbors: u32) -> f64 {
    1.0 - (-contact_rate * f64::from(infectious_neighbors)).exp()
}

/// Apply one day's update to `agent`.
///
/// `index` must have been rebuilt from `agents` after today's movement.
/// Returns the transition made, if any.
pub fn advance_agent(
    agents:       &mut [Agent],
    agent:        AgentId,
    index:        &SpatialIndex,
    rng:          &mut SimRng,
    contact_rate: f64,
) -> Option<Transition> {
    agents[agent.index()].time_in_status += 1;

    let from = agents[agent.index()].status;
    let fires = match from {
        Status::Susceptible => {
            let ni = index.count_infectious_neighbors(agent, agents);
            ni > 0 && rng.next_unit_f64() < infection_probability(contact_rate, ni)
        }
        Status::Exposed | Status::Infectious | Status::Recovered => {
            let a = &agents[agent.index()];
            a.dwell_threshold()
                .is_some_and(|threshold| f64::from(a.time_in_status) >= threshold)
        }
    };

    if !fires {
        return None;
    }
    let to = from.next();
    agents[agent.index()].enter(to);
    Some(Transition { from, to })
}

/// Per-day transition counts, kept for diagnostics.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TransitionTally {
    /// S → E
    pub infections: u32,
    /// E → I
    pub onsets:     u32,
    /// I → R
    pub recoveries: u32,
    /// R → S
    pub waned:      u32,
}

impl TransitionTally {
    pub fn record(&mut self, transition: Transition) {
        match transition.from {
            Status::Susceptible => self.infections += 1,
            Status::Exposed     => self.onsets += 1,
            Status::Infectious  => self.recoveries += 1,
            Status::Recovered   => self.waned += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.infections + self.onsets + self.recoveries + self.waned
    }
}
