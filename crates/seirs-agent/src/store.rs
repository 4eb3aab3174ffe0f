//! Population storage.
//!
//! Agents live in one `Vec<Agent>`; the `AgentId` value is the index.  The
//! daily update pass mutates agents one at a time while the spatial index
//! reads neighbours from the same slice, so the store hands out plain
//! slices rather than per-field arrays.

use seirs_core::AgentId;

use crate::{Agent, StatusCounts};

/// All agents of one replication.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
}

impl Population {
    /// Wrap hand-built agents (tests, scripted scenarios).
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        Self { agents }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.agents.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&Agent> {
        self.agents.get(agent.index())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Agent] {
        &self.agents
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    /// Current compartment sizes.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(self.agents.iter().map(|a| a.status))
    }

    pub fn into_agents(self) -> Vec<Agent> {
        self.agents
    }
}

impl std::ops::Index<AgentId> for Population {
    type Output = Agent;

    #[inline]
    fn index(&self, agent: AgentId) -> &Agent {
        &self.agents[agent.index()]
    }
}

impl std::ops::IndexMut<AgentId> for Population {
    #[inline]
    fn index_mut(&mut self, agent: AgentId) -> &mut Agent {
        &mut self.agents[agent.index()]
    }
}
