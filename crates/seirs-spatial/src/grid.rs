//! Toroidal lattice geometry.
//!
//! Cells are numbered row-major: `CellId = y * size + x`.  Both axes wrap,
//! so every cell has a full 3×3 Moore block.

use seirs_core::CellId;

use crate::{SpatialError, SpatialResult};

/// Square lattice of `size × size` cells with wraparound on both axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ToroidalGrid {
    size: u32,
}

impl ToroidalGrid {
    pub fn new(size: u32) -> SpatialResult<Self> {
        if size == 0 {
            return Err(SpatialError::EmptyGrid);
        }
        if size.checked_mul(size).is_none() {
            return Err(SpatialError::GridTooLarge(size));
        }
        Ok(Self { size })
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Cell containing `(x, y)`; coordinates are reduced modulo the side.
    #[inline]
    pub fn cell_of(&self, x: u32, y: u32) -> CellId {
        CellId((y % self.size) * self.size + (x % self.size))
    }

    /// `coord + delta` on a wrapped axis.
    #[inline]
    pub fn wrap(&self, coord: u32, delta: i32) -> u32 {
        let size = i64::from(self.size);
        (i64::from(coord) + i64::from(delta)).rem_euclid(size) as u32
    }

    /// The 9 cells of the 3×3 block centred on `(x, y)`, offsets −1..=1 on
    /// each axis.
    ///
    /// On grids narrower than 3 cells some offsets land on the same cell and
    /// that cell is yielded more than once.
    pub fn moore_cells(&self, x: u32, y: u32) -> impl Iterator<Item = CellId> + '_ {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).map(move |dy| self.cell_of(self.wrap(x, dx), self.wrap(y, dy)))
        })
    }

    /// Chebyshev distance on the torus.
    pub fn distance(&self, (ax, ay): (u32, u32), (bx, by): (u32, u32)) -> u32 {
        let axis = |a: u32, b: u32| {
            let (a, b) = (a % self.size, b % self.size);
            let d = a.abs_diff(b);
            d.min(self.size - d)
        };
        axis(ax, bx).max(axis(ay, by))
    }
}
