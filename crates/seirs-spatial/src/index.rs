//! Per-cell agent buckets.
//!
//! # Lifecycle
//!
//! The index is rebuilt from scratch once per simulated day, right after
//! every agent has been re-placed and before any agent is updated.  During
//! the update pass it is only read: positions do not change within a day,
//! but statuses do, and neighbour counts read statuses live from the agent
//! slice.  An agent visited late in the day therefore sees infections that
//! happened earlier the same day.
//!
//! Buckets are plain `Vec`s that are cleared, not dropped, between days, so
//! after the first few days rebuilding allocates nothing.

use seirs_agent::Agent;
use seirs_core::{AgentId, CellId};

use crate::{SpatialResult, ToroidalGrid};

/// Cell → agents index over a [`ToroidalGrid`].
#[derive(Clone, Debug)]
pub struct SpatialIndex {
    grid:  ToroidalGrid,
    cells: Vec<Vec<AgentId>>,
}

impl SpatialIndex {
    pub fn new(grid: ToroidalGrid) -> Self {
        Self {
            grid,
            cells: vec![Vec::new(); grid.cell_count()],
        }
    }

    /// Convenience constructor validating the side length.
    pub fn with_size(size: u32) -> SpatialResult<Self> {
        Ok(Self::new(ToroidalGrid::new(size)?))
    }

    #[inline]
    pub fn grid(&self) -> &ToroidalGrid {
        &self.grid
    }

    /// Clear every bucket, then append each agent's id to the bucket of its
    /// cell, in ascending id order.
    pub fn rebuild(&mut self, agents: &[Agent]) {
        for bucket in &mut self.cells {
            bucket.clear();
        }
        for (i, agent) in agents.iter().enumerate() {
            let cell = self.grid.cell_of(agent.x, agent.y);
            self.cells[cell.index()].push(AgentId(i as u32));
        }
    }

    /// Agents currently bucketed in `cell`.
    #[inline]
    pub fn cell(&self, cell: CellId) -> &[AgentId] {
        &self.cells[cell.index()]
    }

    /// Agents bucketed in the cell containing `(x, y)`.
    #[inline]
    pub fn agents_at(&self, x: u32, y: u32) -> &[AgentId] {
        self.cell(self.grid.cell_of(x, y))
    }

    /// Number of indexed agents across all buckets.
    pub fn total_len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    /// Infectious agents in the 3×3 block around `agent`'s cell, excluding
    /// `agent` itself.
    ///
    /// `agents` must be the slice the index was last rebuilt from (positions
    /// unchanged since); statuses are read as they are now.
    pub fn count_infectious_neighbors(&self, agent: AgentId, agents: &[Agent]) -> u32 {
        let me = &agents[agent.index()];
        let mut count = 0;
        for cell in self.grid.moore_cells(me.x, me.y) {
            count += self.cells[cell.index()]
                .iter()
                .filter(|&&other| other != agent && agents[other.index()].is_infectious())
                .count() as u32;
        }
        count
    }
}
