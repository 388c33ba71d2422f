//! Symmetric neighbor list over probe-inflated spheres.
//!
//! A pair `(i, j)` is recorded iff the squared center distance is strictly
//! below `(rᵢ + rⱼ + 2p)²`. Each unordered pair is discovered once through
//! the forward-cell traversal and inserted into both endpoint lists, with
//! the xy-plane projections (`dx`, `dy`, `√(dx²+dy²)`) cached for the
//! Lee-Richards inner loop; the stored deltas on the two sides are negations
//! of each other.
//!
//! Per-atom lists grow in fixed chunks to bound reallocation frequency.

use crate::cell_grid::CellGrid;
use crate::coords::CoordArena;
use crate::error::SasaError;

/// Per-atom list growth granularity.
pub const NB_CHUNK: usize = 32;

/// One directed edge of the neighbor list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighborEntry {
    /// Index of the neighboring atom.
    pub index: usize,
    /// `x_j - x_i`
    pub dx: f64,
    /// `y_j - y_i`
    pub dy: f64,
    /// `sqrt(dx^2 + dy^2)`, identical on both sides of the edge.
    pub dxy: f64,
}

#[derive(Debug)]
pub struct NeighborList {
    lists: Vec<Vec<NeighborEntry>>,
}

impl NeighborList {
    /// Build the neighbor list for all atoms with the given probe radius.
    ///
    /// The cell grid used for discovery is dropped before this returns; it
    /// is a scaffold, not part of the list.
    ///
    /// # Errors
    /// [`SasaError::OutOfMemory`] if grid or list storage cannot be
    /// allocated.
    pub fn build(arena: &CoordArena, probe: f64) -> Result<Self, SasaError> {
        let n = arena.len();
        let cell_size = 2.0 * arena.max_inflated_radius(probe);
        let grid = CellGrid::new(arena, cell_size)?;

        let mut lists = Vec::new();
        lists.try_reserve_exact(n)?;
        for _ in 0..n {
            let mut list = Vec::new();
            list.try_reserve_exact(NB_CHUNK)?;
            lists.push(list);
        }
        let mut nb = Self { lists };

        let cells = grid.cells();
        for (ci, cell) in cells.iter().enumerate() {
            for &cj in &cell.forward {
                nb.record_cell_pair(arena, probe, &cell.atoms, &cells[cj].atoms, ci == cj)?;
            }
        }

        Ok(nb)
    }

    /// Record all contacts between two cells' atoms. When the cells are the
    /// same, the inner loop starts past the outer atom so no pair is seen
    /// twice and no atom pairs with itself.
    fn record_cell_pair(
        &mut self,
        arena: &CoordArena,
        probe: f64,
        a_atoms: &[usize],
        b_atoms: &[usize],
        same_cell: bool,
    ) -> Result<(), SasaError> {
        for (k, &ia) in a_atoms.iter().enumerate() {
            let ri = arena.radius(ia) + probe;
            let (xi, yi, zi) = (arena.x(ia), arena.y(ia), arena.z(ia));
            let start = if same_cell { k + 1 } else { 0 };

            // performance critical
            for &ja in &b_atoms[start..] {
                debug_assert_ne!(ia, ja);
                let cut = ri + arena.radius(ja) + probe;
                let cut2 = cut * cut;
                let dx = arena.x(ja) - xi;
                let dy = arena.y(ja) - yi;
                let dz = arena.z(ja) - zi;
                if dx * dx > cut2 || dy * dy > cut2 || dz * dz > cut2 {
                    continue;
                }
                if dx * dx + dy * dy + dz * dz < cut2 {
                    self.add_pair(ia, ja, dx, dy)?;
                }
            }
        }
        Ok(())
    }

    /// Insert an edge symmetrically into both endpoint lists.
    fn add_pair(&mut self, i: usize, j: usize, dx: f64, dy: f64) -> Result<(), SasaError> {
        let dxy = dx.hypot(dy);
        push_chunked(
            &mut self.lists[i],
            NeighborEntry {
                index: j,
                dx,
                dy,
                dxy,
            },
        )?;
        push_chunked(
            &mut self.lists[j],
            NeighborEntry {
                index: i,
                dx: -dx,
                dy: -dy,
                dxy,
            },
        )
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn neighbors(&self, i: usize) -> &[NeighborEntry] {
        &self.lists[i]
    }

    /// Whether `j` appears in `i`'s neighbor list (linear scan).
    #[must_use]
    pub fn contact(&self, i: usize, j: usize) -> bool {
        self.lists[i].iter().any(|e| e.index == j)
    }
}

fn push_chunked(list: &mut Vec<NeighborEntry>, entry: NeighborEntry) -> Result<(), SasaError> {
    if list.len() == list.capacity() {
        list.try_reserve_exact(NB_CHUNK)?;
    }
    list.push(entry);
    Ok(())
}
