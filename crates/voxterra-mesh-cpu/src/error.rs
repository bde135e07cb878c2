use thiserror::Error;
use voxterra_world::TerrainError;

#[derive(Debug, Error)]
pub enum MeshError {
    #[error(transparent)]
    Config(#[from] TerrainError),

    #[error("height map is {actual}x{actual} but the grid is configured as {expected}x{expected}")]
    GridMismatch { expected: usize, actual: usize },

    #[error("mesh needs {vertices} vertices, more than 32-bit indices can address")]
    IndexOverflow { vertices: usize },
}
