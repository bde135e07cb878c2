//! Terrain configuration, noise sampling, and height-field generation.
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod heightfield;
pub mod heightmap;
pub mod noise;

pub use config::{AtlasParams, TerrainConfig, TerrainParams, load_params_from_path};
pub use error::TerrainError;
pub use heightfield::{
    combine_layers, generate, generate_height_map, generate_height_map_parallel, sample_height,
};
pub use heightmap::HeightMap;
pub use noise::{FnNoise, NoiseSource, SimplexNoise};
