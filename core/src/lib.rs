// core holds the terrain generation pipeline: noise sampling, height field
// synthesis, and triangle mesh derivation
pub mod color;
pub mod heightfield;
pub mod mesh;
pub mod noise;
pub mod params;

pub use color::classify;
pub use heightfield::HeightField;
pub use mesh::{ELEMENTS_PER_VERTEX, INDICES_PER_POLYGON, TerrainMesh};
pub use noise::NoiseField;
pub use params::{ParameterError, TerrainParams, TerrainParamsBuilder};
