//! Uniform grid spatial index.
//!
//! Boids are bucketed into square cells keyed by their truncated position,
//! so a neighbor query only visits one cell and its 8 adjacent cells instead
//! of scanning the full agent set.
//!
//! The index is a point-in-time snapshot: it is rebuilt wholesale at the
//! start of every dirty step and is not kept consistent with position
//! changes inside a step. All following non-dirty steps reuse it as-is.

use murmuration_data::{Boid, Vec2};
use std::collections::HashMap;

/// Identifies one grid cell: `floor(pos / cell_size)` per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellKey(pub i32, pub i32);

/// Groups boid IDs into neighboring bins.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cells: HashMap<CellKey, Vec<usize>>,
    cell_size: f64,
}

impl SpatialIndex {
    /// Creates an empty index with the given cell size.
    ///
    /// The cell size must be at least as large as the biggest interaction
    /// range consulted through [`SpatialIndex::iter_neighbours`]; config
    /// validation enforces this before a swarm is built.
    #[must_use]
    pub fn new(cell_size: f64) -> Self {
        Self {
            cells: HashMap::new(),
            cell_size,
        }
    }

    #[must_use]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of non-empty bins, as last rebuilt.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Returns the key of the bin a boid belongs to.
    #[must_use]
    pub fn key(&self, b: &Boid) -> CellKey {
        self.key_at(b.pos)
    }

    fn key_at(&self, pos: Vec2) -> CellKey {
        let v = pos.div(self.cell_size);
        CellKey(v.x.floor() as i32, v.y.floor() as i32)
    }

    /// Clears the index and reinserts every boid into the bin for its
    /// current position. Old contents are discarded wholesale.
    pub fn rebuild(&mut self, boids: &[Boid]) {
        self.cells.clear();
        for b in boids {
            let k = self.key(b);
            self.cells.entry(k).or_default().push(b.id);
        }
    }

    /// Visits every boid in the same bin as `b` and the 8 adjacent bins,
    /// excluding `b` itself.
    ///
    /// Within a bin, IDs come in insertion order from the last rebuild;
    /// callers must not depend on iteration order for correctness.
    pub fn iter_neighbours<F>(&self, b: &Boid, mut visit: F)
    where
        F: FnMut(usize),
    {
        let k = self.key(b);
        for dx in -1..=1 {
            for dy in -1..=1 {
                self.iter_bin(CellKey(k.0 + dx, k.1 + dy), b.id, &mut visit);
            }
        }
    }

    fn iter_bin<F>(&self, k: CellKey, skip: usize, visit: &mut F)
    where
        F: FnMut(usize),
    {
        if let Some(bin) = self.cells.get(&k) {
            for &id in bin {
                if id != skip {
                    visit(id);
                }
            }
        }
    }

    /// Visits every boid in every bin whose key lies within the cell range
    /// spanned by the two corner points. Used by renderers to cull
    /// off-screen boids; not limited to the 3x3 neighborhood.
    pub fn iter_bounds<F>(&self, min: Vec2, max: Vec2, mut visit: F)
    where
        F: FnMut(usize),
    {
        let lo = self.key_at(min);
        let hi = self.key_at(max);
        for (k, bin) in &self.cells {
            if k.0 < lo.0 || k.1 < lo.1 || k.0 > hi.0 || k.1 > hi.1 {
                continue;
            }
            for &id in bin {
                visit(id);
            }
        }
    }
}
