use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::TerrainError;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct TerrainConfig {
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub noise: Noise,
    #[serde(default)]
    pub height: Height,
    #[serde(default)]
    pub atlas: Atlas,
    #[serde(default)]
    pub runtime: Runtime,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Grid {
    #[serde(default = "default_grid_size")]
    pub size: usize,
    /// Defaults to `size / 2` so the grid is centered on the world origin.
    #[serde(default)]
    pub origin_offset: Option<i64>,
}
fn default_grid_size() -> usize {
    1000
}
impl Default for Grid {
    fn default() -> Self {
        Self {
            size: default_grid_size(),
            origin_offset: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Noise {
    #[serde(default)]
    pub seed: i32,
    #[serde(default = "default_coarse_scale")]
    pub coarse_scale: f32,
    #[serde(default = "default_detail_scale")]
    pub detail_scale: f32,
    #[serde(default = "default_detail_weight")]
    pub detail_weight: f32,
}
fn default_coarse_scale() -> f32 {
    0.01
}
fn default_detail_scale() -> f32 {
    0.02
}
fn default_detail_weight() -> f32 {
    0.3
}
impl Default for Noise {
    fn default() -> Self {
        Self {
            seed: 0,
            coarse_scale: default_coarse_scale(),
            detail_scale: default_detail_scale(),
            detail_weight: default_detail_weight(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Height {
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}
fn default_max_height() -> u32 {
    20
}
impl Default for Height {
    fn default() -> Self {
        Self {
            max_height: default_max_height(),
        }
    }
}

/// Atlas grid and the `[column, row]` cell assigned to each cube face.
#[derive(Clone, Debug, Deserialize)]
pub struct Atlas {
    #[serde(default = "default_atlas_columns")]
    pub columns: u32,
    #[serde(default = "default_atlas_rows")]
    pub rows: u32,
    #[serde(default = "default_front")]
    pub front: [u32; 2],
    #[serde(default = "default_back")]
    pub back: [u32; 2],
    #[serde(default = "default_left")]
    pub left: [u32; 2],
    #[serde(default = "default_right")]
    pub right: [u32; 2],
    #[serde(default = "default_top")]
    pub top: [u32; 2],
    #[serde(default = "default_bottom")]
    pub bottom: [u32; 2],
}
fn default_atlas_columns() -> u32 {
    4
}
fn default_atlas_rows() -> u32 {
    2
}
fn default_front() -> [u32; 2] {
    [0, 0]
}
fn default_back() -> [u32; 2] {
    [1, 0]
}
fn default_left() -> [u32; 2] {
    [2, 0]
}
fn default_right() -> [u32; 2] {
    [3, 0]
}
fn default_top() -> [u32; 2] {
    [0, 1]
}
fn default_bottom() -> [u32; 2] {
    [1, 1]
}
impl Default for Atlas {
    fn default() -> Self {
        Self {
            columns: default_atlas_columns(),
            rows: default_atlas_rows(),
            front: default_front(),
            back: default_back(),
            left: default_left(),
            right: default_right(),
            top: default_top(),
            bottom: default_bottom(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Runtime {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}
fn default_parallel() -> bool {
    true
}
impl Default for Runtime {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}

/// Atlas cells in face order front, back, left, right, top, bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasParams {
    pub columns: u32,
    pub rows: u32,
    pub cells: [[u32; 2]; 6],
}

impl Default for AtlasParams {
    fn default() -> Self {
        AtlasParams::from(&Atlas::default())
    }
}

impl From<&Atlas> for AtlasParams {
    fn from(a: &Atlas) -> Self {
        Self {
            columns: a.columns,
            rows: a.rows,
            cells: [a.front, a.back, a.left, a.right, a.top, a.bottom],
        }
    }
}

// Flattened params used in tight loops (snapshot of config)
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    pub size: usize,
    pub origin_offset: i64,
    pub seed: i32,
    pub coarse_scale: f32,
    pub detail_scale: f32,
    pub detail_weight: f32,
    pub max_height: u32,
    pub atlas: AtlasParams,
    pub parallel: bool,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self::from_config(&TerrainConfig::default())
    }
}

impl TerrainParams {
    pub fn from_config(cfg: &TerrainConfig) -> Self {
        let size = cfg.grid.size;
        Self {
            size,
            origin_offset: cfg.grid.origin_offset.unwrap_or((size / 2) as i64),
            seed: cfg.noise.seed,
            coarse_scale: cfg.noise.coarse_scale,
            detail_scale: cfg.noise.detail_scale,
            detail_weight: cfg.noise.detail_weight,
            max_height: cfg.height.max_height,
            atlas: AtlasParams::from(&cfg.atlas),
            parallel: cfg.runtime.parallel,
        }
    }

    /// Changes the grid size and re-centers the origin on it.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self.origin_offset = (size / 2) as i64;
        self
    }

    /// Checks every option before generation starts. Nothing falls back to a default.
    pub fn validate(&self) -> Result<(), TerrainError> {
        let invalid = |msg: String| Err(TerrainError::InvalidConfig(msg));
        if self.size == 0 {
            return invalid("grid size must be at least 1".into());
        }
        if self.size > i32::MAX as usize {
            return invalid(format!("grid size {} exceeds {}", self.size, i32::MAX));
        }
        if self.origin_offset < 0 || self.origin_offset > self.size as i64 {
            return invalid(format!(
                "origin offset {} outside grid [0, {}]",
                self.origin_offset, self.size
            ));
        }
        if self.max_height == 0 {
            return invalid("max height must be at least 1".into());
        }
        for (name, scale) in [("coarse", self.coarse_scale), ("detail", self.detail_scale)] {
            if !scale.is_finite() || scale <= 0.0 {
                return invalid(format!("{} noise scale must be finite and > 0, got {}", name, scale));
            }
        }
        if !self.detail_weight.is_finite() || self.detail_weight < 0.0 {
            return invalid(format!(
                "detail weight must be finite and >= 0, got {}",
                self.detail_weight
            ));
        }
        let atlas = &self.atlas;
        if atlas.columns == 0 || atlas.rows == 0 {
            return invalid(format!(
                "atlas grid {}x{} has no cells",
                atlas.columns, atlas.rows
            ));
        }
        for [col, row] in atlas.cells {
            if col >= atlas.columns || row >= atlas.rows {
                return invalid(format!(
                    "atlas cell [{}, {}] outside {}x{} grid",
                    col, row, atlas.columns, atlas.rows
                ));
            }
        }
        Ok(())
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, TerrainError> {
    let s = fs::read_to_string(path)?;
    let cfg: TerrainConfig = toml::from_str(&s)?;
    let params = TerrainParams::from_config(&cfg);
    params.validate()?;
    Ok(params)
}
