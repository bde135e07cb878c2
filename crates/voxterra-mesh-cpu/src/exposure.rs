//! Side-exposure test for voxels inside a height-map column.

use voxterra_world::HeightMap;

/// The four lateral neighbors `(dx, dz)`: -X, +X, -Z, +Z.
pub const SIDE_NEIGHBORS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Height of a neighbor column; cells outside the grid are open air.
#[inline]
fn neighbor_height(map: &HeightMap, x: usize, z: usize, dx: i64, dz: i64) -> u32 {
    map.get_signed(x as i64 + dx, z as i64 + dz).unwrap_or(0)
}

/// True when voxel `y` of column `(x, z)` has at least one side open to air,
/// i.e. some lateral neighbor column is no taller than `y`.
pub fn is_exposed(map: &HeightMap, x: usize, z: usize, y: u32) -> bool {
    SIDE_NEIGHBORS
        .iter()
        .any(|&(dx, dz)| neighbor_height(map, x, z, dx, dz) <= y)
}

/// Lowest exposed level of column `(x, z)`: the shortest lateral neighbor.
///
/// Voxel `y` is exposed exactly when `y >= exposure_floor(..)`; levels below it
/// are buried on all four sides.
#[inline]
pub fn exposure_floor(map: &HeightMap, x: usize, z: usize) -> u32 {
    SIDE_NEIGHBORS
        .iter()
        .map(|&(dx, dz)| neighbor_height(map, x, z, dx, dz))
        .min()
        .unwrap_or(0)
}
