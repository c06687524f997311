use tracing::debug;

use crate::color::classify;
use crate::heightfield::HeightField;

// Interleaved layout: position (3), normal (3), color (3) per vertex
pub const ELEMENTS_PER_VERTEX: usize = 9;
pub const INDICES_PER_POLYGON: usize = 3;

// Candidate faces incident to a vertex, as (dx, dz, offset) relative to the
// vertex cell. Each entry names the cell a face normal is evaluated at and
// the step direction of its two edges; entries whose cells fall outside the
// grid are skipped during accumulation, so border and corner vertices
// average fewer faces.
const INCIDENT_FACES: [(isize, isize, isize); 6] = [
    (0, 0, -1),
    (0, -1, 1),
    (1, 0, -1),
    (0, 0, 1),
    (0, 1, -1),
    (-1, 0, 1),
];

// Triangle mesh generated from a height field
//
// One vertex per height field cell, two triangles per unit grid cell. The
// vertex buffer is interleaved (position, normal, color) f32 data ready for
// upload by a rendering collaborator; the index buffer uses u32 indices with
// uniform winding so back faces can be culled mesh-wide.
pub struct TerrainMesh {
    vertex_data: Vec<f32>,
    index_data: Vec<u32>,
    polygon_count: usize,
}

impl TerrainMesh {
    // Build the mesh for a height field
    //
    // A field with width or depth below 2 produces a valid mesh with zero
    // triangles.
    pub fn new(map: &HeightField) -> Self {
        let polygon_count = map.width().saturating_sub(1) * map.depth().saturating_sub(1) * 2;
        let vertex_data = Self::generate_vertex_data(map);
        let index_data = Self::generate_index_data(map);
        debug!(
            polygon_count,
            vertices = map.width() * map.depth(),
            "built terrain mesh"
        );
        Self {
            vertex_data,
            index_data,
            polygon_count,
        }
    }

    // Interleaved vertex attributes, ELEMENTS_PER_VERTEX floats per vertex
    pub fn vertex_data(&self) -> &[f32] {
        &self.vertex_data
    }

    // Triangle indices, INDICES_PER_POLYGON per polygon
    pub fn index_data(&self) -> &[u32] {
        &self.index_data
    }

    pub fn polygon_count(&self) -> usize {
        self.polygon_count
    }

    fn generate_vertex_data(map: &HeightField) -> Vec<f32> {
        let vertex_count = map.width() * map.depth();
        debug_assert!(vertex_count <= u32::MAX as usize);
        let mut vertex_data = Vec::with_capacity(vertex_count * ELEMENTS_PER_VERTEX);
        for i in 0..vertex_count {
            let x = i / map.depth();
            let z = i % map.depth();
            let height = map.height(x, z);
            vertex_data.extend_from_slice(&[x as f32, height, z as f32]);

            let normal = Self::vertex_normal(map, x, z);
            vertex_data.extend_from_slice(&normal);

            let color = classify(height, map.scale() as f32);
            vertex_data.extend_from_slice(&color);
        }
        vertex_data
    }

    fn generate_index_data(map: &HeightField) -> Vec<u32> {
        let polygon_count = map.width().saturating_sub(1) * map.depth().saturating_sub(1) * 2;
        let mut index_data = Vec::with_capacity(polygon_count * INDICES_PER_POLYGON);
        for x in 0..map.width().saturating_sub(1) {
            for z in 0..map.depth().saturating_sub(1) {
                let index0 = (x * map.depth() + z) as u32;
                let index1 = ((x + 1) * map.depth() + z) as u32;
                let index2 = (x * map.depth() + z + 1) as u32;
                let index3 = ((x + 1) * map.depth() + z + 1) as u32;
                index_data.extend_from_slice(&[index0, index2, index1]);
                index_data.extend_from_slice(&[index1, index2, index3]);
            }
        }
        index_data
    }

    // Average the normals of every incident face that exists within grid
    // bounds. Faces touching out-of-bounds cells are excluded rather than
    // clamped, so border vertices get valid normals from fewer faces.
    fn vertex_normal(map: &HeightField, x: usize, z: usize) -> [f32; 3] {
        let width = map.width() as isize;
        let depth = map.depth() as isize;
        let mut sum = [0.0f32; 3];
        for &(dx, dz, offset) in &INCIDENT_FACES {
            let cx = x as isize + dx;
            let cz = z as isize + dz;
            let in_bounds = |v: isize, limit: isize| (0..limit).contains(&v);
            if in_bounds(cx, width)
                && in_bounds(cz, depth)
                && in_bounds(cx + offset, width)
                && in_bounds(cz + offset, depth)
            {
                let face = Self::face_normal(map, cx as usize, cz as usize, offset);
                sum[0] += face[0];
                sum[1] += face[1];
                sum[2] += face[2];
            }
        }
        // No incident face exists on 1×N grids
        normalize_or_up(sum)
    }

    // Face orientation from the elevation deltas between a cell and its two
    // neighbors one step away along x and z. Both edge vectors are
    // normalized before the cross product, and the result normalized again.
    fn face_normal(map: &HeightField, x: usize, z: usize, offset: isize) -> [f32; 3] {
        let height = map.height(x, z);
        let adjacent_x = (x as isize + offset) as usize;
        let adjacent_z = (z as isize + offset) as usize;
        let delta_x = map.height(adjacent_x, z) - height;
        let delta_z = map.height(x, adjacent_z) - height;

        let x_vec = normalize_or_up([offset as f32, delta_x, 0.0]);
        let z_vec = normalize_or_up([0.0, delta_z, offset as f32]);
        normalize_or_up(cross(z_vec, x_vec))
    }
}

#[inline]
fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
fn normalize_or_up(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len < 1e-12 {
        return [0.0, 1.0, 0.0];
    }
    [v[0] / len, v[1] / len, v[2] / len]
}

#[cfg(test)]
mod tests {
    use super::{ELEMENTS_PER_VERTEX, INDICES_PER_POLYGON, TerrainMesh};
    use crate::color::classify;
    use crate::heightfield::HeightField;
    use crate::noise::NoiseField;
    use crate::params::TerrainParams;

    fn noisy_field(width: usize, depth: usize, scale: u32) -> HeightField {
        let mut staged = TerrainParams::builder();
        staged.width = width;
        staged.depth = depth;
        staged.scale = scale;
        staged.frequency = 0.3;
        staged.octaves = 4;
        staged.persistence = 0.5;
        staged.exponent = 1.0;
        HeightField::generate(&NoiseField::new(2025), &staged.build().unwrap())
    }

    fn positions(mesh: &TerrainMesh) -> Vec<[f32; 3]> {
        mesh.vertex_data()
            .chunks(ELEMENTS_PER_VERTEX)
            .map(|v| [v[0], v[1], v[2]])
            .collect()
    }

    #[test]
    fn counts_match_grid() {
        let mesh = TerrainMesh::new(&noisy_field(4, 4, 1));
        assert_eq!(mesh.vertex_data().len(), 16 * ELEMENTS_PER_VERTEX);
        assert_eq!(mesh.polygon_count(), 18);
        assert_eq!(mesh.index_data().len(), 18 * INDICES_PER_POLYGON);
    }

    #[test]
    fn rectangular_counts() {
        let mesh = TerrainMesh::new(&noisy_field(5, 3, 8));
        assert_eq!(mesh.vertex_data().len(), 15 * ELEMENTS_PER_VERTEX);
        assert_eq!(mesh.polygon_count(), (5 - 1) * (3 - 1) * 2);
    }

    #[test]
    fn degenerate_grid_has_no_triangles() {
        for (w, d) in [(1, 1), (1, 5), (5, 1)] {
            let mesh = TerrainMesh::new(&noisy_field(w, d, 1));
            assert_eq!(mesh.polygon_count(), 0);
            assert!(mesh.index_data().is_empty());
            assert_eq!(mesh.vertex_data().len(), w * d * ELEMENTS_PER_VERTEX);
        }
    }

    #[test]
    fn vertex_positions_follow_grid() {
        let field = noisy_field(3, 4, 2);
        let mesh = TerrainMesh::new(&field);
        for (i, pos) in positions(&mesh).iter().enumerate() {
            let x = i / 4;
            let z = i % 4;
            assert_eq!(pos[0], x as f32);
            assert_eq!(pos[1], field.height(x, z));
            assert_eq!(pos[2], z as f32);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mesh = TerrainMesh::new(&noisy_field(8, 8, 16));
        for v in mesh.vertex_data().chunks(ELEMENTS_PER_VERTEX) {
            let len = (v[3] * v[3] + v[4] * v[4] + v[5] * v[5]).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal length {}", len);
        }
    }

    #[test]
    fn flat_field_normals_point_up() {
        let field = HeightField::from_heights(4, 4, 1, vec![0.5; 16]);
        let mesh = TerrainMesh::new(&field);
        for v in mesh.vertex_data().chunks(ELEMENTS_PER_VERTEX) {
            assert!((v[3]).abs() < 1e-6);
            assert!((v[4] - 1.0).abs() < 1e-6);
            assert!((v[5]).abs() < 1e-6);
        }
    }

    #[test]
    fn slope_tilts_normals() {
        // A ramp rising along +x tilts interior normals toward -x
        let mut heights = vec![0.0; 16];
        for x in 0..4 {
            for z in 0..4 {
                heights[x * 4 + z] = x as f32;
            }
        }
        let field = HeightField::from_heights(4, 4, 4, heights);
        let mesh = TerrainMesh::new(&field);
        let v = mesh.vertex_data();
        // interior vertex (1, 1) is index 5
        let n = &v[5 * ELEMENTS_PER_VERTEX + 3..5 * ELEMENTS_PER_VERTEX + 6];
        assert!(n[0] < 0.0);
        assert!(n[1] > 0.0);
        assert!(n[2].abs() < 1e-5);
    }

    #[test]
    fn winding_is_uniform() {
        let mesh = TerrainMesh::new(&noisy_field(6, 5, 4));
        let pos = positions(&mesh);
        for tri in mesh.index_data().chunks(INDICES_PER_POLYGON) {
            let a = pos[tri[0] as usize];
            let b = pos[tri[1] as usize];
            let c = pos[tri[2] as usize];
            // signed area of the triangle projected onto the horizontal plane
            let area = (b[0] - a[0]) * (c[2] - a[2]) - (b[2] - a[2]) * (c[0] - a[0]);
            assert!(area < 0.0, "winding flipped: signed area {}", area);
        }
    }

    #[test]
    fn indices_stay_in_range() {
        let field = noisy_field(7, 9, 2);
        let mesh = TerrainMesh::new(&field);
        let vertex_count = (field.width() * field.depth()) as u32;
        assert!(mesh.index_data().iter().all(|&i| i < vertex_count));
    }

    #[test]
    fn colors_come_from_classifier() {
        let field = noisy_field(6, 6, 32);
        let mesh = TerrainMesh::new(&field);
        for (i, v) in mesh.vertex_data().chunks(ELEMENTS_PER_VERTEX).enumerate() {
            let x = i / 6;
            let z = i % 6;
            let expected = classify(field.height(x, z), 32.0);
            assert_eq!([v[6], v[7], v[8]], expected);
        }
    }

    #[test]
    fn quad_triangulation_layout() {
        // 2×2 grid: one quad, two triangles sharing the i1–i2 diagonal
        let field = HeightField::from_heights(2, 2, 1, vec![0.0; 4]);
        let mesh = TerrainMesh::new(&field);
        assert_eq!(mesh.index_data(), &[0, 1, 2, 2, 1, 3]);
    }
}
