use thiserror::Error;

/// Failures that abort height-field generation or configuration loading.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid terrain config: {0}")]
    InvalidConfig(String),

    #[error("noise returned non-finite value {value} at grid cell ({x}, {z})")]
    NonFiniteNoise { x: usize, z: usize, value: f32 },

    #[error("height buffer holds {actual} entries, expected {expected}")]
    HeightMapShape { expected: usize, actual: usize },

    #[error("height {height} at grid cell ({x}, {z}) is below the 1-voxel minimum")]
    HeightOutOfRange { x: usize, z: usize, height: u32 },

    #[error("failed to read terrain config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse terrain config: {0}")]
    Parse(#[from] toml::de::Error),
}
