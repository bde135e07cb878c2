use proptest::prelude::*;
use voxterra_mesh_cpu::{
    INDICES_PER_CUBE, VERTEX_STRIDE_FLOATS, VERTICES_PER_CUBE, exposure_floor, extract_surface,
    is_exposed,
};
use voxterra_world::{HeightMap, TerrainParams};

fn arb_height_map() -> impl Strategy<Value = HeightMap> {
    (1usize..=7).prop_flat_map(|size| {
        prop::collection::vec(1u32..=9, size * size)
            .prop_map(move |heights| HeightMap::from_heights(size, heights).unwrap())
    })
}

fn params_for(map: &HeightMap) -> TerrainParams {
    let mut p = TerrainParams::default().with_size(map.size());
    p.parallel = false;
    p
}

/// Brute-force count of cubes a column should produce.
fn reference_cubes(map: &HeightMap) -> usize {
    let mut n = 0;
    for x in 0..map.size() {
        for z in 0..map.size() {
            let h = map.get(x, z);
            n += 1;
            n += (0..h - 1).filter(|&y| is_exposed(map, x, z, y)).count();
        }
    }
    n
}

proptest! {
    // The per-column floor agrees with the per-level neighbor test
    #[test]
    fn floor_matches_per_level_test(map in arb_height_map()) {
        for x in 0..map.size() {
            for z in 0..map.size() {
                let floor = exposure_floor(&map, x, z);
                for y in 0..map.get(x, z) {
                    prop_assert_eq!(is_exposed(&map, x, z, y), y >= floor);
                }
            }
        }
    }

    // Cube count equals the brute-force visibility count
    #[test]
    fn cube_count_matches_reference(map in arb_height_map()) {
        let mesh = extract_surface(&map, &params_for(&map)).unwrap();
        prop_assert_eq!(mesh.cubes, reference_cubes(&map));
        prop_assert!(mesh.cubes >= map.size() * map.size());
    }

    // Every index references an existing vertex, cube-local and 24/36 per cube
    #[test]
    fn buffers_are_consistent(map in arb_height_map()) {
        let mesh = extract_surface(&map, &params_for(&map)).unwrap();
        prop_assert_eq!(mesh.vertices.len() % VERTEX_STRIDE_FLOATS, 0);
        prop_assert_eq!(mesh.vertex_count(), mesh.cubes * VERTICES_PER_CUBE);
        prop_assert_eq!(mesh.indices.len(), mesh.cubes * INDICES_PER_CUBE);
        let n = mesh.vertex_count() as u32;
        for (i, &ix) in mesh.indices.iter().enumerate() {
            prop_assert!(ix < n);
            let cube = (i / INDICES_PER_CUBE) as u32;
            prop_assert_eq!(ix / VERTICES_PER_CUBE as u32, cube);
        }
    }
}
