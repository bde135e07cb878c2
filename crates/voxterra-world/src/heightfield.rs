use std::time::Instant;

use rayon::prelude::*;

use crate::config::TerrainParams;
use crate::error::TerrainError;
use crate::heightmap::HeightMap;
use crate::noise::{NoiseSource, SimplexNoise};

/// Blends the coarse and weighted detail layers and maps the result to voxels.
///
/// The blend is clamped to `[-1, 1]`, normalized to `[0, 1]`, scaled by
/// `max_height`, rounded, and floored at 1.
#[inline]
pub fn combine_layers(coarse: f32, detail: f32, detail_weight: f32, max_height: u32) -> u32 {
    let combined = (coarse + detail_weight * detail).clamp(-1.0, 1.0);
    let norm = (combined + 1.0) / 2.0;
    let h = (norm * max_height as f32).round() as u32;
    h.max(1)
}

/// Column height for grid cell `(x, z)`.
pub fn sample_height(
    noise: &impl NoiseSource,
    params: &TerrainParams,
    x: usize,
    z: usize,
) -> Result<u32, TerrainError> {
    let wx = (x as i64 - params.origin_offset) as f32;
    let wz = (z as i64 - params.origin_offset) as f32;
    let n1 = noise.sample_2d(wx * params.coarse_scale, wz * params.coarse_scale);
    let n2 = noise.sample_2d(wx * params.detail_scale, wz * params.detail_scale);
    for value in [n1, n2] {
        if !value.is_finite() {
            return Err(TerrainError::NonFiniteNoise { x, z, value });
        }
    }
    Ok(combine_layers(n1, n2, params.detail_weight, params.max_height))
}

fn fill_row(
    noise: &impl NoiseSource,
    params: &TerrainParams,
    x: usize,
    row: &mut [u32],
) -> Result<(), TerrainError> {
    for (z, h) in row.iter_mut().enumerate() {
        *h = sample_height(noise, params, x, z)?;
    }
    Ok(())
}

/// Computes the whole grid on the calling thread.
pub fn generate_height_map(
    params: &TerrainParams,
    noise: &impl NoiseSource,
) -> Result<HeightMap, TerrainError> {
    params.validate()?;
    let size = params.size;
    let mut heights = vec![0u32; size * size];
    for (x, row) in heights.chunks_mut(size).enumerate() {
        fill_row(noise, params, x, row)?;
    }
    HeightMap::from_heights(size, heights)
}

/// Computes the grid with one rayon task per `x` row; each task owns its row slice.
pub fn generate_height_map_parallel(
    params: &TerrainParams,
    noise: &impl NoiseSource,
) -> Result<HeightMap, TerrainError> {
    params.validate()?;
    let size = params.size;
    let mut heights = vec![0u32; size * size];
    heights
        .par_chunks_mut(size)
        .enumerate()
        .try_for_each(|(x, row)| fill_row(noise, params, x, row))?;
    HeightMap::from_heights(size, heights)
}

/// Builds the seeded simplex source from `params` and runs the configured pass.
pub fn generate(params: &TerrainParams) -> Result<HeightMap, TerrainError> {
    params.validate()?;
    log::debug!("height field params: {:?}", params);
    let noise = SimplexNoise::new(params.seed);
    let start = Instant::now();
    let map = if params.parallel {
        generate_height_map_parallel(params, &noise)?
    } else {
        generate_height_map(params, &noise)?
    };
    let (lo, hi) = map.min_max().unwrap_or((0, 0));
    log::info!(
        "height field {}x{} generated in {:.1} ms (heights {}..={})",
        params.size,
        params.size,
        start.elapsed().as_secs_f64() * 1000.0,
        lo,
        hi
    );
    Ok(map)
}
