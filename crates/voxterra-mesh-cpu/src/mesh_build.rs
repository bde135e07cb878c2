use voxterra_geom::{Aabb, Vec3};

use crate::atlas::CubeTexcoords;
use crate::error::MeshError;
use crate::template::{CUBE_TEMPLATE, INDICES_PER_CUBE, VERTICES_PER_CUBE};
use crate::vertex::VERTEX_STRIDE_FLOATS;

/// Floats written per emitted cube.
pub(crate) const FLOATS_PER_CUBE: usize = VERTICES_PER_CUBE * VERTEX_STRIDE_FLOATS;

/// First index of a block of `extra` vertices placed after `base` existing ones.
/// Fails once any index in the block would not fit in a `u32`.
pub(crate) fn checked_base(base: usize, extra: usize) -> Result<u32, MeshError> {
    let needed = base.saturating_add(extra);
    if needed > u32::MAX as usize {
        return Err(MeshError::IndexOverflow { vertices: needed });
    }
    Ok(base as u32)
}

/// Writes one cube into exactly-sized slots: `FLOATS_PER_CUBE` floats and
/// `INDICES_PER_CUBE` indices biased by `base`.
pub(crate) fn write_cube(
    vertices: &mut [f32],
    indices: &mut [u32],
    base: u32,
    center: Vec3,
    height: f32,
    texcoords: &CubeTexcoords,
) {
    debug_assert_eq!(vertices.len(), FLOATS_PER_CUBE);
    debug_assert_eq!(indices.len(), INDICES_PER_CUBE);
    let records = vertices.chunks_exact_mut(VERTEX_STRIDE_FLOATS);
    for ((v, p), uv) in records.zip(&CUBE_TEMPLATE.positions).zip(texcoords) {
        v.copy_from_slice(&[
            p[0] + center.x,
            p[1] + center.y,
            p[2] + center.z,
            height,
            uv[0],
            uv[1],
        ]);
    }
    for (dst, &i) in indices.iter_mut().zip(&CUBE_TEMPLATE.indices) {
        *dst = i + base;
    }
}

/// Geometry bounds for unit cubes whose centers span `centers`.
pub(crate) fn cube_bounds(centers: Aabb) -> Aabb {
    if centers.is_empty() {
        return Aabb::EMPTY;
    }
    let half = Vec3::new(0.5, 0.5, 0.5);
    Aabb::new(centers.min - half, centers.max + half)
}

/// Append-only interleaved vertex buffer plus triangle indices.
///
/// Indices are based on the number of vertices already in `vertices`, so the
/// running offset is always `vertices.len() / VERTEX_STRIDE_FLOATS`.
#[derive(Default, Clone, Debug)]
pub struct MeshBuild {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub cubes: usize,
    /// Bounds of the emitted cube centers.
    centers: Aabb,
}

impl MeshBuild {
    /// Pre-reserve capacity for approximately `n_cubes` cubes worth of data.
    #[inline]
    pub fn reserve_cubes(&mut self, n_cubes: usize) {
        self.vertices.reserve(n_cubes * FLOATS_PER_CUBE);
        self.indices.reserve(n_cubes * INDICES_PER_CUBE);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE_FLOATS
    }

    /// Appends one unit cube centered at `center`.
    ///
    /// Every vertex carries `height` as its fourth attribute and the matching
    /// entry of `texcoords`.
    pub fn add_cube(
        &mut self,
        center: Vec3,
        height: f32,
        texcoords: &CubeTexcoords,
    ) -> Result<(), MeshError> {
        let base = checked_base(self.vertex_count(), VERTICES_PER_CUBE)?;
        let v0 = self.vertices.len();
        let i0 = self.indices.len();
        self.vertices.resize(v0 + FLOATS_PER_CUBE, 0.0);
        self.indices.resize(i0 + INDICES_PER_CUBE, 0);
        write_cube(
            &mut self.vertices[v0..],
            &mut self.indices[i0..],
            base,
            center,
            height,
            texcoords,
        );
        self.cubes += 1;
        self.centers.include(center);
        Ok(())
    }

    /// Bounding box of all emitted geometry; empty if no cube was added.
    pub fn bounds(&self) -> Aabb {
        cube_bounds(self.centers)
    }
}
