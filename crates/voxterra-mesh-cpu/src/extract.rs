//! Surface mesh extraction over a finished height map.
//!
//! Per column the top voxel is always emitted; interior voxels are emitted only
//! when a lateral neighbor leaves one of their sides open. Columns are visited in
//! `x`-major, `z`-minor order and, within a column, the top voxel comes first
//! followed by exposed interior levels bottom-up.

use std::time::Instant;

use rayon::prelude::*;
use voxterra_geom::{Aabb, Vec3};
use voxterra_world::{HeightMap, TerrainParams};

use crate::atlas::{AtlasLayout, CubeTexcoords};
use crate::error::MeshError;
use crate::exposure::exposure_floor;
use crate::mesh_build::{FLOATS_PER_CUBE, MeshBuild, checked_base, cube_bounds, write_cube};
use crate::template::{INDICES_PER_CUBE, VERTICES_PER_CUBE};
use crate::vertex::VERTEX_STRIDE_FLOATS;

/// Final buffers plus bookkeeping for one terrain configuration.
#[derive(Clone, Debug)]
pub struct TerrainMesh {
    /// `[x, y, z, height, u, v]` per vertex.
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
    pub cubes: usize,
    pub buried_voxels: u64,
    pub bbox: Aabb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MeshStats {
    pub cubes: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub buried_voxels: u64,
    pub bytes: usize,
}

impl TerrainMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / VERTEX_STRIDE_FLOATS
    }

    pub fn stats(&self) -> MeshStats {
        MeshStats {
            cubes: self.cubes,
            vertices: self.vertex_count(),
            triangles: self.indices.len() / 3,
            buried_voxels: self.buried_voxels,
            bytes: (self.vertices.len() + self.indices.len()) * 4,
        }
    }
}

fn check_inputs(map: &HeightMap, params: &TerrainParams) -> Result<(), MeshError> {
    params.validate()?;
    if map.size() != params.size {
        return Err(MeshError::GridMismatch {
            expected: params.size,
            actual: map.size(),
        });
    }
    Ok(())
}

/// Top level of column `(x, z)` and the lowest exposed level below it.
#[inline]
fn column_span(map: &HeightMap, x: usize, z: usize) -> (u32, u32) {
    let top = map.get(x, z) - 1;
    (top, exposure_floor(map, x, z).min(top))
}

/// Cubes emitted and voxels skipped for row `x`.
fn row_counts(map: &HeightMap, x: usize) -> (usize, u64) {
    let mut cubes = 0usize;
    let mut buried = 0u64;
    for z in 0..map.size() {
        let (top, floor) = column_span(map, x, z);
        cubes += 1 + (top - floor) as usize;
        buried += u64::from(floor);
    }
    (cubes, buried)
}

/// Walks the cubes of row `x` in emission order: per column the top voxel,
/// then exposed interior levels bottom-up. `emit` gets the center and level.
fn visit_row<F>(map: &HeightMap, x: usize, origin: i64, mut emit: F) -> Result<u64, MeshError>
where
    F: FnMut(Vec3, f32) -> Result<(), MeshError>,
{
    let wx = (x as i64 - origin) as f32;
    let mut buried = 0u64;
    for z in 0..map.size() {
        let wz = (z as i64 - origin) as f32;
        let (top, floor) = column_span(map, x, z);
        emit(Vec3::new(wx, top as f32, wz), top as f32)?;
        buried += u64::from(floor);
        for y in floor..top {
            emit(Vec3::new(wx, y as f32, wz), y as f32)?;
        }
    }
    Ok(buried)
}

/// Row `x`'s share of the output buffers.
struct RowSlots<'a> {
    x: usize,
    first_cube: usize,
    vertices: &'a mut [f32],
    indices: &'a mut [u32],
}

fn fill_row(
    map: &HeightMap,
    origin: i64,
    texcoords: &CubeTexcoords,
    slots: RowSlots<'_>,
) -> Result<Aabb, MeshError> {
    let RowSlots {
        x,
        first_cube,
        vertices,
        indices,
    } = slots;
    let mut centers = Aabb::EMPTY;
    let mut n = 0usize;
    visit_row(map, x, origin, |center, level| {
        let base = checked_base((first_cube + n) * VERTICES_PER_CUBE, VERTICES_PER_CUBE)?;
        write_cube(
            &mut vertices[n * FLOATS_PER_CUBE..(n + 1) * FLOATS_PER_CUBE],
            &mut indices[n * INDICES_PER_CUBE..(n + 1) * INDICES_PER_CUBE],
            base,
            center,
            level,
            texcoords,
        );
        centers.include(center);
        n += 1;
        Ok(())
    })?;
    debug_assert_eq!(n * INDICES_PER_CUBE, indices.len());
    Ok(centers)
}

fn finish(
    vertices: Vec<f32>,
    indices: Vec<u32>,
    cubes: usize,
    buried_voxels: u64,
    bbox: Aabb,
    start: Instant,
) -> TerrainMesh {
    let mesh = TerrainMesh {
        vertices,
        indices,
        cubes,
        buried_voxels,
        bbox,
    };
    debug_assert_eq!(mesh.vertex_count(), mesh.cubes * VERTICES_PER_CUBE);
    debug_assert_eq!(mesh.indices.len(), mesh.cubes * INDICES_PER_CUBE);
    log::info!(
        "surface mesh: {} cubes, {} vertices, {} triangles, {} buried voxels skipped in {:.1} ms",
        mesh.cubes,
        mesh.vertex_count(),
        mesh.indices.len() / 3,
        mesh.buried_voxels,
        start.elapsed().as_secs_f64() * 1000.0
    );
    mesh
}

/// Meshes the whole height map on the calling thread.
pub fn extract_surface(map: &HeightMap, params: &TerrainParams) -> Result<TerrainMesh, MeshError> {
    check_inputs(map, params)?;
    let start = Instant::now();
    let texcoords = AtlasLayout::from(&params.atlas).resolve();
    let mut build = MeshBuild::default();
    // Every column contributes at least its top voxel
    build.reserve_cubes(map.size() * map.size());
    let mut buried = 0u64;
    for x in 0..map.size() {
        buried += visit_row(map, x, params.origin_offset, |center, level| {
            build.add_cube(center, level, &texcoords)
        })?;
    }
    let bbox = build.bounds();
    Ok(finish(build.vertices, build.indices, build.cubes, buried, bbox, start))
}

/// Two passes on the rayon pool: count each row's cubes, then let every row
/// write into its own range of one pre-sized buffer. The result matches
/// [`extract_surface`] exactly.
pub fn extract_surface_parallel(
    map: &HeightMap,
    params: &TerrainParams,
) -> Result<TerrainMesh, MeshError> {
    check_inputs(map, params)?;
    let start = Instant::now();
    let texcoords = AtlasLayout::from(&params.atlas).resolve();
    let counts: Vec<(usize, u64)> = (0..map.size())
        .into_par_iter()
        .map(|x| row_counts(map, x))
        .collect();
    let cubes: usize = counts.iter().map(|&(c, _)| c).sum();
    let buried: u64 = counts.iter().map(|&(_, b)| b).sum();
    checked_base(0, cubes.saturating_mul(VERTICES_PER_CUBE))?;

    let mut vertices = vec![0.0f32; cubes * FLOATS_PER_CUBE];
    let mut indices = vec![0u32; cubes * INDICES_PER_CUBE];
    let mut rows = Vec::with_capacity(counts.len());
    let mut v_rest: &mut [f32] = &mut vertices;
    let mut i_rest: &mut [u32] = &mut indices;
    let mut first_cube = 0usize;
    for (x, &(n, _)) in counts.iter().enumerate() {
        let (v, v_tail) = std::mem::take(&mut v_rest).split_at_mut(n * FLOATS_PER_CUBE);
        let (i, i_tail) = std::mem::take(&mut i_rest).split_at_mut(n * INDICES_PER_CUBE);
        rows.push(RowSlots {
            x,
            first_cube,
            vertices: v,
            indices: i,
        });
        v_rest = v_tail;
        i_rest = i_tail;
        first_cube += n;
    }

    let centers = rows
        .into_par_iter()
        .map(|slots| fill_row(map, params.origin_offset, &texcoords, slots))
        .try_reduce(|| Aabb::EMPTY, |a, b| Ok(a.union(b)))?;
    Ok(finish(vertices, indices, cubes, buried, cube_bounds(centers), start))
}

/// Runs the serial or parallel pass as configured.
pub fn extract(map: &HeightMap, params: &TerrainParams) -> Result<TerrainMesh, MeshError> {
    if params.parallel {
        extract_surface_parallel(map, params)
    } else {
        extract_surface(map, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_for(size: usize) -> TerrainParams {
        let mut p = TerrainParams::default().with_size(size);
        p.parallel = false;
        p
    }

    #[test]
    fn rejects_mismatched_grid() {
        let map = HeightMap::filled(4, 1).unwrap();
        let err = extract_surface(&map, &params_for(5)).unwrap_err();
        assert!(matches!(err, MeshError::GridMismatch { expected: 5, actual: 4 }));
    }

    #[test]
    fn rejects_invalid_params() {
        let map = HeightMap::filled(4, 1).unwrap();
        let mut p = params_for(4);
        p.max_height = 0;
        assert!(matches!(extract_surface(&map, &p), Err(MeshError::Config(_))));
    }

    #[test]
    fn single_column_is_centered_on_origin() {
        let map = HeightMap::filled(1, 3).unwrap();
        let mut p = params_for(1);
        p.origin_offset = 0;
        let mesh = extract_surface(&map, &p).unwrap();
        assert_eq!(mesh.cubes, 3);
        assert_eq!(mesh.buried_voxels, 0);
        assert_eq!(mesh.bbox.min, Vec3::new(-0.5, -0.5, -0.5));
        assert_eq!(mesh.bbox.max, Vec3::new(0.5, 2.5, 0.5));
        // Top voxel is emitted first and carries its own level
        assert_eq!(mesh.vertices[1], 1.5);
        assert_eq!(mesh.vertices[3], 2.0);
    }

    #[test]
    fn stats_report_buffer_sizes() {
        let map = HeightMap::filled(2, 1).unwrap();
        let mesh = extract_surface(&map, &params_for(2)).unwrap();
        let s = mesh.stats();
        assert_eq!(s.cubes, 4);
        assert_eq!(s.vertices, 96);
        assert_eq!(s.triangles, 48);
        assert_eq!(s.bytes, (96 * 6 + 4 * 36) * 4);
    }

    #[test]
    fn row_counts_match_visited_cubes() {
        let map = HeightMap::from_fn(6, |x, z| ((x * 7 + z * 3) % 5 + 1) as u32).unwrap();
        for x in 0..map.size() {
            let mut visited = 0usize;
            let buried = visit_row(&map, x, 3, |_, _| {
                visited += 1;
                Ok(())
            })
            .unwrap();
            assert_eq!(row_counts(&map, x), (visited, buried));
        }
    }

    #[test]
    fn parallel_fill_places_uneven_rows_in_order() {
        // Rows carry very different cube counts
        let map = HeightMap::from_fn(5, |x, z| if x == 2 { (z + 1) as u32 * 3 } else { 1 }).unwrap();
        let params = params_for(5);
        let serial = extract_surface(&map, &params).unwrap();
        let parallel = extract_surface_parallel(&map, &params).unwrap();
        assert_eq!(parallel.cubes, serial.cubes);
        assert_eq!(parallel.buried_voxels, serial.buried_voxels);
        assert_eq!(parallel.vertices, serial.vertices);
        assert_eq!(parallel.indices, serial.indices);
        assert_eq!(parallel.bbox, serial.bbox);
        assert_eq!(parallel.vertices.len(), parallel.cubes * FLOATS_PER_CUBE);
    }

    #[test]
    fn parallel_single_column() {
        let map = HeightMap::filled(1, 4).unwrap();
        let mut p = params_for(1);
        p.origin_offset = 0;
        let mesh = extract_surface_parallel(&map, &p).unwrap();
        assert_eq!(mesh.cubes, 4);
        assert_eq!(mesh.indices[INDICES_PER_CUBE * 3], 3 * VERTICES_PER_CUBE as u32);
        assert_eq!(mesh.bbox.max, Vec3::new(0.5, 3.5, 0.5));
    }
}
