use glam::Vec3;

use crate::error::TerrainError;
use crate::grid::HeightGrid;

// Per-vertex normals from the triangulated grid.
//
// Every quad (i, j) contributes the unnormalised normal of its triangle
// (i, j), (i + 1, j), (i, j + 1). A vertex averages the faces of the up to four
// quads touching it and is then normalised. Must run after every height edit.
pub fn reconstruct_normals(grid: &mut HeightGrid) -> Result<(), TerrainError> {
    let res = grid.resolution();
    if grid.is_degenerate() {
        log::debug!("normals: resolution {res} has no faces, using up vector");
        for j in 0..res {
            for i in 0..res {
                grid.set_normal(i, j, Vec3::Y);
            }
        }
        return Ok(());
    }

    let quads = res - 1;
    let faces = face_normals(grid, quads)?;

    for j in 0..res {
        for i in 0..res {
            let mut sum = Vec3::ZERO;
            let mut count = 0u32;
            // Quads below-left, below-right, above-left, above-right of the vertex
            let touching = [
                (i.checked_sub(1), j.checked_sub(1)),
                ((i < quads).then_some(i), j.checked_sub(1)),
                (i.checked_sub(1), (j < quads).then_some(j)),
                ((i < quads).then_some(i), (j < quads).then_some(j)),
            ];
            for (qi, qj) in touching {
                if let (Some(qi), Some(qj)) = (qi, qj) {
                    sum += faces[qj * quads + qi];
                    count += 1;
                }
            }

            let avg = sum / count as f32;
            grid.set_normal(i, j, unit_or_up(avg));
        }
    }

    Ok(())
}

// Scoped face buffer, (res - 1)² entries, released when the caller is done
fn face_normals(grid: &HeightGrid, quads: usize) -> Result<Vec<Vec3>, TerrainError> {
    let count = quads * quads;
    let mut faces = Vec::new();
    faces
        .try_reserve_exact(count)
        .map_err(|source| TerrainError::FaceBufferAllocation {
            faces: count,
            source,
        })?;

    for j in 0..quads {
        for i in 0..quads {
            let v1 = position(grid, i, j);
            let v2 = position(grid, i + 1, j);
            let v3 = position(grid, i, j + 1);
            let edge1 = v1 - v3;
            let edge2 = v3 - v2;
            faces.push(edge1.cross(edge2));
        }
    }

    Ok(faces)
}

#[inline]
fn position(grid: &HeightGrid, i: usize, j: usize) -> Vec3 {
    let c = grid.cell(i, j);
    Vec3::new(c.x, c.y, c.z)
}

// Faces that cancel out (or overflow) leave nothing to normalise; point up instead
fn unit_or_up(v: Vec3) -> Vec3 {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        v / length
    } else {
        Vec3::Y
    }
}
