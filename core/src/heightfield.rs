use tracing::debug;

use crate::noise::NoiseField;
use crate::params::TerrainParams;

// 2D map of elevations built from multi-octave Perlin noise
//
// Heights are generated in [0, 1] then scaled by the vertical scale
// parameter, so every elevation lies in [0, scale]. The flat storage is
// row-major with index x * depth + z; the mesh builder relies on the same
// formula when deriving adjacency.
pub struct HeightField {
    width: usize,
    depth: usize,
    scale: u32,
    heights: Vec<f32>,
}

impl HeightField {
    // Generate a height field for the given parameters
    //
    // Raw noise is clamped to [0, 1] before the exponent is applied, so the
    // shaping step is well defined for non-integer exponents.
    pub fn generate(noise: &NoiseField, params: &TerrainParams) -> Self {
        let width = params.width();
        let depth = params.depth();
        let scale = params.scale();
        let mut heights = vec![0.0f32; width * depth];
        for (i, height) in heights.iter_mut().enumerate() {
            let x = i / depth;
            let z = i % depth;
            let raw = noise.sample(
                x as f64 * params.frequency(),
                0.0,
                z as f64 * params.frequency(),
                params.octaves(),
                params.persistence(),
            );
            *height = (raw.clamp(0.0, 1.0).powf(params.exponent()) * scale as f64) as f32;
        }
        debug!(width, depth, scale, "generated height field");
        Self {
            width,
            depth,
            scale,
            heights,
        }
    }

    // Construct from precomputed elevations (row-major, x * depth + z)
    pub fn from_heights(width: usize, depth: usize, scale: u32, heights: Vec<f32>) -> Self {
        assert_eq!(
            heights.len(),
            width * depth,
            "heights length must be width * depth"
        );
        Self {
            width,
            depth,
            scale,
            heights,
        }
    }

    // Elevation at grid cell (x, z); callers must keep both in bounds
    #[inline]
    pub fn height(&self, x: usize, z: usize) -> f32 {
        debug_assert!(x < self.width, "x {} out of bounds (width {})", x, self.width);
        debug_assert!(z < self.depth, "z {} out of bounds (depth {})", z, self.depth);
        self.heights[x * self.depth + z]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }
}
