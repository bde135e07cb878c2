//! CPU surface extraction: height map in, flat vertex/index buffers out.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod error;
pub mod exposure;
pub mod extract;
pub mod mesh_build;
pub mod template;
pub mod vertex;

pub use atlas::{AtlasCell, AtlasLayout, CubeTexcoords, UvRect};
pub use error::MeshError;
pub use exposure::{SIDE_NEIGHBORS, exposure_floor, is_exposed};
pub use extract::{MeshStats, TerrainMesh, extract, extract_surface, extract_surface_parallel};
pub use mesh_build::MeshBuild;
pub use template::{CUBE_TEMPLATE, CubeFace, CubeTemplate, INDICES_PER_CUBE, VERTICES_PER_CUBE};
pub use vertex::{VERTEX_ATTRIBUTES, VERTEX_STRIDE_BYTES, VERTEX_STRIDE_FLOATS, VertexAttribute};
