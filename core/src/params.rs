use serde::{Deserialize, Serialize};
use thiserror::Error;

// Invalid generation parameters are rejected when a snapshot is built,
// never silently clamped
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ParameterError {
    #[error("width must be at least 1")]
    ZeroWidth,
    #[error("depth must be at least 1")]
    ZeroDepth,
    #[error("frequency must be positive and finite, got {0}")]
    InvalidFrequency(f64),
    #[error("octaves must be at least 1")]
    ZeroOctaves,
    #[error("persistence must be non-negative and finite, got {0}")]
    InvalidPersistence(f64),
    #[error("exponent must be positive and finite, got {0}")]
    InvalidExponent(f64),
}

// Immutable, validated snapshot of terrain generation parameters
// Only obtainable through TerrainParamsBuilder::build(), so any value of
// this type is known to be valid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParams {
    width: usize,
    depth: usize,
    scale: u32,
    frequency: f64,
    octaves: usize,
    persistence: f64,
    exponent: f64,
}

impl TerrainParams {
    pub fn builder() -> TerrainParamsBuilder {
        TerrainParamsBuilder::default()
    }

    // Width of the grid, in cells
    pub fn width(&self) -> usize {
        self.width
    }

    // Depth of the grid, in cells
    pub fn depth(&self) -> usize {
        self.depth
    }

    // Vertical multiplier applied to shaped noise
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn octaves(&self) -> usize {
        self.octaves
    }

    pub fn persistence(&self) -> f64 {
        self.persistence
    }

    // Exponent applied to raw noise to shape the elevation curve
    pub fn exponent(&self) -> f64 {
        self.exponent
    }
}

impl Default for TerrainParams {
    fn default() -> Self {
        // Same values as TerrainParamsBuilder::default(), which are known valid
        Self {
            width: 10,
            depth: 10,
            scale: 1,
            frequency: 0.01,
            octaves: 1,
            persistence: 1.0,
            exponent: 1.0,
        }
    }
}

// Mutable staging value for parameter edits, owned by the configuration/UI
// collaborator. Fields are public so hosts can bind them to widgets and
// update them incrementally; build() validates the whole set at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainParamsBuilder {
    pub width: usize,
    pub depth: usize,
    pub scale: u32,
    pub frequency: f64,
    pub octaves: usize,
    pub persistence: f64,
    pub exponent: f64,
}

impl Default for TerrainParamsBuilder {
    fn default() -> Self {
        Self {
            width: 10,
            depth: 10,
            scale: 1,
            frequency: 0.01,
            octaves: 1,
            persistence: 1.0,
            exponent: 1.0,
        }
    }
}

impl TerrainParamsBuilder {
    pub fn build(&self) -> Result<TerrainParams, ParameterError> {
        if self.width < 1 {
            return Err(ParameterError::ZeroWidth);
        }
        if self.depth < 1 {
            return Err(ParameterError::ZeroDepth);
        }
        if !(self.frequency.is_finite() && self.frequency > 0.0) {
            return Err(ParameterError::InvalidFrequency(self.frequency));
        }
        if self.octaves < 1 {
            return Err(ParameterError::ZeroOctaves);
        }
        if !(self.persistence.is_finite() && self.persistence >= 0.0) {
            return Err(ParameterError::InvalidPersistence(self.persistence));
        }
        if !(self.exponent.is_finite() && self.exponent > 0.0) {
            return Err(ParameterError::InvalidExponent(self.exponent));
        }
        Ok(TerrainParams {
            width: self.width,
            depth: self.depth,
            scale: self.scale,
            frequency: self.frequency,
            octaves: self.octaves,
            persistence: self.persistence,
            exponent: self.exponent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ParameterError, TerrainParams, TerrainParamsBuilder};

    #[test]
    fn defaults_build() {
        let params = TerrainParams::builder().build().unwrap();
        assert_eq!(params.width(), 10);
        assert_eq!(params.depth(), 10);
        assert_eq!(params.scale(), 1);
        assert_eq!(params.frequency(), 0.01);
        assert_eq!(params.octaves(), 1);
        assert_eq!(params.persistence(), 1.0);
        assert_eq!(params.exponent(), 1.0);
    }

    #[test]
    fn staged_edits_then_build() {
        let mut staged = TerrainParamsBuilder::default();
        staged.width = 800;
        staged.depth = 800;
        staged.scale = 128;
        staged.frequency = 0.012;
        staged.octaves = 6;
        staged.persistence = 0.4;
        staged.exponent = 1.16;
        let params = staged.build().unwrap();
        assert_eq!(params.width(), 800);
        assert_eq!(params.octaves(), 6);
        assert_eq!(params.exponent(), 1.16);
    }

    #[test]
    fn invalid_fields_rejected() {
        let mut staged = TerrainParamsBuilder::default();
        staged.width = 0;
        assert_eq!(staged.build(), Err(ParameterError::ZeroWidth));

        let mut staged = TerrainParamsBuilder::default();
        staged.depth = 0;
        assert_eq!(staged.build(), Err(ParameterError::ZeroDepth));

        let mut staged = TerrainParamsBuilder::default();
        staged.frequency = 0.0;
        assert_eq!(
            staged.build(),
            Err(ParameterError::InvalidFrequency(0.0))
        );

        let mut staged = TerrainParamsBuilder::default();
        staged.frequency = f64::NAN;
        assert!(matches!(
            staged.build(),
            Err(ParameterError::InvalidFrequency(_))
        ));

        let mut staged = TerrainParamsBuilder::default();
        staged.octaves = 0;
        assert_eq!(staged.build(), Err(ParameterError::ZeroOctaves));

        let mut staged = TerrainParamsBuilder::default();
        staged.persistence = -0.1;
        assert_eq!(
            staged.build(),
            Err(ParameterError::InvalidPersistence(-0.1))
        );

        let mut staged = TerrainParamsBuilder::default();
        staged.exponent = 0.0;
        assert_eq!(staged.build(), Err(ParameterError::InvalidExponent(0.0)));
    }

    #[test]
    fn error_messages_are_descriptive() {
        let mut staged = TerrainParamsBuilder::default();
        staged.exponent = -2.0;
        let err = staged.build().unwrap_err();
        assert_eq!(
            err.to_string(),
            "exponent must be positive and finite, got -2"
        );
    }
}
