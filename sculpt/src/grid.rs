use glam::Vec3;

use crate::mesh::GridSnapshot;

// Side length of the square the grid covers in world units
pub const DEFAULT_EXTENT: f64 = 100.0;

// One vertex of the terrain: fixed (x, z), mutable height and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub normal: Vec3,
}

// NxN row-major grid of cells, index(i, j) = resolution * j + i
// Positions are fixed at construction; stages only touch `y` and `normal`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    resolution: usize,
    cells: Vec<Cell>,
}

impl HeightGrid {
    // Flat grid spanning a 100×100 square
    pub fn new(resolution: usize) -> Self {
        Self::with_extent(resolution, DEFAULT_EXTENT)
    }

    pub fn with_extent(resolution: usize, extent: f64) -> Self {
        // (1 / 100) * r is the same double as 0.01 * r, so the default
        // extent lands on exactly the reference cell positions
        let scale = (1.0 / extent) * resolution as f64;
        let mut cells = Vec::with_capacity(resolution * resolution);
        for j in 0..resolution {
            for i in 0..resolution {
                cells.push(Cell {
                    x: (i as f64 / scale) as f32,
                    y: 0.0,
                    z: (j as f64 / scale) as f32,
                    normal: Vec3::Y,
                });
            }
        }

        Self { resolution, cells }
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    // Grids smaller than 2×2 have no quads; every stage treats them as a no-op
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.resolution < 2
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        self.resolution * j + i
    }

    #[inline]
    pub fn cell(&self, i: usize, j: usize) -> &Cell {
        &self.cells[self.index(i, j)]
    }

    #[inline]
    pub fn height(&self, i: usize, j: usize) -> f32 {
        self.cells[self.index(i, j)].y
    }

    #[inline]
    pub fn set_height(&mut self, i: usize, j: usize, height: f32) {
        let idx = self.index(i, j);
        self.cells[idx].y = height;
    }

    #[inline]
    pub fn add_height(&mut self, i: usize, j: usize, delta: f32) {
        let idx = self.index(i, j);
        self.cells[idx].y += delta;
    }

    #[inline]
    pub(crate) fn set_normal(&mut self, i: usize, j: usize, normal: Vec3) {
        let idx = self.index(i, j);
        self.cells[idx].normal = normal;
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    // Copy of every height in row-major order
    pub fn heights(&self) -> Vec<f32> {
        self.cells.iter().map(|c| c.y).collect()
    }

    // Immutable view handed to downstream mesh builders
    pub fn snapshot(&self) -> GridSnapshot<'_> {
        GridSnapshot::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::HeightGrid;

    #[test]
    fn grid_positions_span_hundred_units() {
        let g = HeightGrid::new(4);
        assert_eq!(g.cells().len(), 16);
        assert_eq!(g.cell(0, 0).x, 0.0);
        assert_eq!(g.cell(1, 0).x, 25.0);
        assert_eq!(g.cell(3, 2).x, 75.0);
        assert_eq!(g.cell(3, 2).z, 50.0);
        assert!(g.cells().iter().all(|c| c.y == 0.0));
    }

    #[test]
    fn grid_index_is_row_major() {
        let mut g = HeightGrid::new(5);
        assert_eq!(g.index(2, 3), 17);
        g.set_height(2, 3, 4.5);
        g.add_height(2, 3, 0.5);
        assert_eq!(g.heights()[17], 5.0);
        assert_eq!(g.height(2, 3), 5.0);
    }

    #[test]
    fn grid_custom_extent() {
        let g = HeightGrid::with_extent(3, 6.0);
        assert!((g.cell(1, 0).x - 2.0).abs() < 1e-6);
        assert!((g.cell(0, 2).z - 4.0).abs() < 1e-6);
    }

    #[test]
    fn grid_degenerate_resolutions() {
        assert!(HeightGrid::new(0).is_degenerate());
        assert!(HeightGrid::new(1).is_degenerate());
        assert!(!HeightGrid::new(2).is_degenerate());
        assert!(HeightGrid::new(0).cells().is_empty());
    }
}
