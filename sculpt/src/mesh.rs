use glam::Vec3;

use crate::grid::HeightGrid;

// Corner offsets of the triangle each quad (i, j) contributes to the normals,
// (i, j), (i + 1, j), (i, j + 1). Renderers that triangulate the quads
// differently should still shade with normals built from this winding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleWinding {
    pub corners: [(usize, usize); 3],
}

impl TriangleWinding {
    pub const NORMALS: TriangleWinding = TriangleWinding {
        corners: [(0, 0), (1, 0), (0, 1)],
    };

    // Absolute corner coordinates for quad (i, j)
    pub fn at(&self, i: usize, j: usize) -> [(usize, usize); 3] {
        self.corners.map(|(di, dj)| (i + di, j + dj))
    }
}

// Read-only view of a finished grid for whatever builds a mesh from it
#[derive(Debug, Clone, Copy)]
pub struct GridSnapshot<'a> {
    grid: &'a HeightGrid,
}

impl<'a> GridSnapshot<'a> {
    pub fn new(grid: &'a HeightGrid) -> Self {
        Self { grid }
    }

    pub fn resolution(&self) -> usize {
        self.grid.resolution()
    }

    pub fn position(&self, i: usize, j: usize) -> Vec3 {
        let c = self.grid.cell(i, j);
        Vec3::new(c.x, c.y, c.z)
    }

    pub fn height(&self, i: usize, j: usize) -> f32 {
        self.grid.height(i, j)
    }

    pub fn normal(&self, i: usize, j: usize) -> Vec3 {
        self.grid.cell(i, j).normal
    }

    // (position, normal) per vertex, row-major
    pub fn vertices(&self) -> impl Iterator<Item = (Vec3, Vec3)> + 'a {
        self.grid
            .cells()
            .iter()
            .map(|c| (Vec3::new(c.x, c.y, c.z), c.normal))
    }

    pub fn winding(&self) -> TriangleWinding {
        TriangleWinding::NORMALS
    }
}

// Consumer side of the pipeline: turns a snapshot into vertex buffers,
// an image, a file, anything. Builders may keep state between builds.
pub trait MeshBuilder {
    type Output;

    fn build(&mut self, snapshot: &GridSnapshot<'_>) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::{GridSnapshot, MeshBuilder, TriangleWinding};
    use crate::grid::HeightGrid;

    // Collects a plain index buffer of two triangles per quad
    struct IndexedTriangles;

    impl MeshBuilder for IndexedTriangles {
        type Output = (Vec<Vec3>, Vec<[u32; 3]>);

        fn build(&mut self, snapshot: &GridSnapshot<'_>) -> Self::Output {
            let res = snapshot.resolution();
            let positions = snapshot.vertices().map(|(p, _)| p).collect();
            let mut indices = Vec::new();
            let idx = |(i, j): (usize, usize)| (res * j + i) as u32;
            for j in 0..res.saturating_sub(1) {
                for i in 0..res.saturating_sub(1) {
                    indices.push(snapshot.winding().at(i, j).map(idx));
                    indices.push([idx((i + 1, j)), idx((i + 1, j + 1)), idx((i, j + 1))]);
                }
            }
            (positions, indices)
        }
    }

    #[test]
    fn winding_corners() {
        assert_eq!(TriangleWinding::NORMALS.at(2, 5), [(2, 5), (3, 5), (2, 6)]);
    }

    #[test]
    fn snapshot_reads_grid() {
        let mut g = HeightGrid::new(3);
        g.set_height(1, 2, 4.0);
        let snap = g.snapshot();
        assert_eq!(snap.resolution(), 3);
        assert_eq!(snap.height(1, 2), 4.0);
        assert_eq!(snap.position(1, 2), Vec3::new(g.cell(1, 2).x, 4.0, g.cell(1, 2).z));
        assert_eq!(snap.normal(0, 0), Vec3::Y);
        assert_eq!(snap.vertices().count(), 9);
    }

    #[test]
    fn builder_consumes_snapshot() {
        let g = HeightGrid::new(3);
        let (positions, indices) = IndexedTriangles.build(&g.snapshot());
        assert_eq!(positions.len(), 9);
        assert_eq!(indices.len(), 8);
        assert_eq!(indices[0], [0, 1, 3]);
    }
}
