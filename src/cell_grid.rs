//! Uniform cell grid over the atom bounding box.
//!
//! Cells have edge length `d = 2 * max(r + probe)`, so any two atoms whose
//! probe-inflated spheres can touch lie in the same or directly adjacent
//! cells. Each cell carries the indices of its atoms and the indices of its
//! *forward* neighbor cells: offsets `(dix, diy, diz)` in `{-1, 0, 1}^3`
//! whose component sum is positive, plus self, plus a lexicographic
//! tie-break for offsets on the zero-sum diagonal. Traversing only forward
//! neighbors visits every unordered cell pair exactly once.
//!
//! The grid is a transient scaffold for the neighbor list and is dropped as
//! soon as the list is built.

use crate::coords::CoordArena;
use crate::error::SasaError;

/// Half of the 26-neighborhood plus self survives the forward cut.
const MAX_FORWARD: usize = 14;

/// Forward-cone test: the offset's scalar product with (1, 1, 1) must be
/// positive, so each unordered cell pair is seen from exactly one side.
/// Offsets summing to zero (the diagonal ties, e.g. `(1, -1, 0)` versus
/// `(-1, 1, 0)`) are kept from their lexicographically positive side only;
/// the zero offset (self) is always kept.
const fn points_forward(dx: isize, dy: isize, dz: isize) -> bool {
    let sum = dx + dy + dz;
    if sum != 0 {
        return sum > 0;
    }
    if dx != 0 {
        return dx > 0;
    }
    if dy != 0 {
        return dy > 0;
    }
    true
}

#[derive(Debug, Default)]
pub struct GridCell {
    /// Atom indices assigned to this cell.
    pub atoms: Vec<usize>,
    /// Flat indices of forward neighbor cells, self first.
    pub forward: Vec<usize>,
}

#[derive(Debug)]
pub struct CellGrid {
    cells: Vec<GridCell>,
    nx: usize,
    ny: usize,
    nz: usize,
    d: f64,
    x_min: f64,
    y_min: f64,
    z_min: f64,
}

impl CellGrid {
    /// Build the grid and assign every atom to its cell.
    ///
    /// # Errors
    /// [`SasaError::OutOfMemory`] if cell storage cannot be allocated.
    pub fn new(arena: &CoordArena, cell_size: f64) -> Result<Self, SasaError> {
        debug_assert!(cell_size > 0.0);
        debug_assert!(!arena.is_empty());

        // Bounding box, expanded by d/2 on every face so each atom maps to
        // an interior cell.
        let half = cell_size / 2.0;
        let (mut x_min, mut x_max) = (arena.x(0), arena.x(0));
        let (mut y_min, mut y_max) = (arena.y(0), arena.y(0));
        let (mut z_min, mut z_max) = (arena.z(0), arena.z(0));
        for i in 1..arena.len() {
            x_min = x_min.min(arena.x(i));
            x_max = x_max.max(arena.x(i));
            y_min = y_min.min(arena.y(i));
            y_max = y_max.max(arena.y(i));
            z_min = z_min.min(arena.z(i));
            z_max = z_max.max(arena.z(i));
        }
        x_min -= half;
        x_max += half;
        y_min -= half;
        y_max += half;
        z_min -= half;
        z_max += half;

        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let count = |min: f64, max: f64| ((max - min) / cell_size).ceil().max(1.0) as usize;
        let nx = count(x_min, x_max);
        let ny = count(y_min, y_max);
        let nz = count(z_min, z_max);
        let n = nx
            .checked_mul(ny)
            .and_then(|v| v.checked_mul(nz))
            .ok_or(SasaError::OutOfMemory)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(n)?;
        cells.resize_with(n, GridCell::default);

        let mut grid = Self {
            cells,
            nx,
            ny,
            nz,
            d: cell_size,
            x_min,
            y_min,
            z_min,
        };

        for i in 0..arena.len() {
            let c = grid.cell_index_of(arena.x(i), arena.y(i), arena.z(i));
            let atoms = &mut grid.cells[c].atoms;
            if atoms.len() == atoms.capacity() {
                atoms.try_reserve(1)?;
            }
            atoms.push(i);
        }

        grid.link_forward_neighbors()?;
        Ok(grid)
    }

    /// Flat cell index for a point; the expanded bounds keep every atom
    /// strictly interior, the clamp only absorbs float rounding at the faces.
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn cell_index_of(&self, x: f64, y: f64, z: f64) -> usize {
        let ix = (((x - self.x_min) / self.d) as usize).min(self.nx - 1);
        let iy = (((y - self.y_min) / self.d) as usize).min(self.ny - 1);
        let iz = (((z - self.z_min) / self.d) as usize).min(self.nz - 1);
        self.flat_index(ix, iy, iz)
    }

    #[inline]
    fn flat_index(&self, ix: usize, iy: usize, iz: usize) -> usize {
        ix + self.nx * (iy + self.ny * iz)
    }

    fn link_forward_neighbors(&mut self) -> Result<(), SasaError> {
        for iz in 0..self.nz {
            for iy in 0..self.ny {
                for ix in 0..self.nx {
                    let mut forward = Vec::new();
                    forward.try_reserve_exact(MAX_FORWARD)?;

                    let xs = ix.saturating_sub(1)..=(ix + 1).min(self.nx - 1);
                    for jx in xs {
                        for jy in iy.saturating_sub(1)..=(iy + 1).min(self.ny - 1) {
                            for jz in iz.saturating_sub(1)..=(iz + 1).min(self.nz - 1) {
                                #[allow(clippy::cast_possible_wrap)]
                                let keep = points_forward(
                                    jx as isize - ix as isize,
                                    jy as isize - iy as isize,
                                    jz as isize - iz as isize,
                                );
                                if keep {
                                    forward.push(self.flat_index(jx, jy, jz));
                                }
                            }
                        }
                    }

                    debug_assert!(!forward.is_empty() && forward.len() <= MAX_FORWARD);
                    let here = self.flat_index(ix, iy, iz);
                    self.cells[here].forward = forward;
                }
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.d
    }
}
