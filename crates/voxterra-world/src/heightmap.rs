use crate::error::TerrainError;

/// Square grid of column heights in voxels, stored row-major by `x` then `z`.
///
/// Every entry is at least 1. The map is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeightMap {
    size: usize,
    heights: Vec<u32>,
}

impl HeightMap {
    /// Wraps an already-computed buffer of `size * size` heights.
    pub fn from_heights(size: usize, heights: Vec<u32>) -> Result<Self, TerrainError> {
        let expected = size * size;
        if heights.len() != expected {
            return Err(TerrainError::HeightMapShape {
                expected,
                actual: heights.len(),
            });
        }
        if let Some(i) = heights.iter().position(|&h| h == 0) {
            return Err(TerrainError::HeightOutOfRange {
                x: i / size,
                z: i % size,
                height: 0,
            });
        }
        Ok(Self { size, heights })
    }

    /// Builds a map by evaluating `f(x, z)` for every cell.
    pub fn from_fn(
        size: usize,
        mut f: impl FnMut(usize, usize) -> u32,
    ) -> Result<Self, TerrainError> {
        let mut heights = Vec::with_capacity(size * size);
        for x in 0..size {
            for z in 0..size {
                heights.push(f(x, z));
            }
        }
        Self::from_heights(size, heights)
    }

    /// Every column `height` voxels tall.
    pub fn filled(size: usize, height: u32) -> Result<Self, TerrainError> {
        Self::from_fn(size, |_, _| height)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn idx(&self, x: usize, z: usize) -> usize {
        x * self.size + z
    }

    #[inline]
    pub fn get(&self, x: usize, z: usize) -> u32 {
        self.heights[self.idx(x, z)]
    }

    /// Height at a possibly out-of-grid cell; `None` outside the grid.
    #[inline]
    pub fn get_signed(&self, x: i64, z: i64) -> Option<u32> {
        let n = self.size as i64;
        if x < 0 || z < 0 || x >= n || z >= n {
            return None;
        }
        Some(self.get(x as usize, z as usize))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.heights
    }

    /// Lowest and highest column; `None` for an empty grid.
    pub fn min_max(&self) -> Option<(u32, u32)> {
        let min = *self.heights.iter().min()?;
        let max = *self.heights.iter().max()?;
        Some((min, max))
    }

    /// Sum of all column heights, i.e. the solid voxel count.
    pub fn solid_voxels(&self) -> u64 {
        self.heights.iter().map(|&h| u64::from(h)).sum()
    }
}
