use std::path::PathBuf;

use clap::Parser;
use voxterra_world::TerrainParams;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "voxterra",
    version,
    about = "Generate a noise height field and extract its visible voxel surface mesh"
)]
pub struct CliOptions {
    /// TOML terrain config; every key is optional.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Grid side length in columns (re-centers the origin).
    #[arg(long)]
    pub size: Option<usize>,
    #[arg(long = "max-height")]
    pub max_height: Option<u32>,
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i32>,
    #[arg(long = "coarse-scale", allow_negative_numbers = true)]
    pub coarse_scale: Option<f32>,
    #[arg(long = "detail-scale", allow_negative_numbers = true)]
    pub detail_scale: Option<f32>,
    /// Run both passes on the calling thread.
    #[arg(long)]
    pub serial: bool,
}

impl CliOptions {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Layers command-line values over `params`.
    pub fn apply(&self, mut params: TerrainParams) -> TerrainParams {
        if let Some(size) = self.size {
            params = params.with_size(size);
        }
        if let Some(h) = self.max_height {
            params.max_height = h;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        if let Some(s) = self.coarse_scale {
            params.coarse_scale = s;
        }
        if let Some(s) = self.detail_scale {
            params.detail_scale = s;
        }
        if self.serial {
            params.parallel = false;
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxterra_world::TerrainError;

    #[test]
    fn no_flags_keep_params() {
        let opts = CliOptions::try_parse_from(["voxterra"]).unwrap();
        let p = opts.apply(TerrainParams::default());
        assert_eq!(p.size, 1000);
        assert!(p.parallel);
    }

    #[test]
    fn flags_override_params() {
        let opts = CliOptions::try_parse_from([
            "voxterra",
            "--size",
            "64",
            "--max-height",
            "32",
            "--seed",
            "-7",
            "--serial",
        ])
        .unwrap();
        let p = opts.apply(TerrainParams::default());
        assert_eq!(p.size, 64);
        assert_eq!(p.origin_offset, 32);
        assert_eq!(p.max_height, 32);
        assert_eq!(p.seed, -7);
        assert!(!p.parallel);
    }

    #[test]
    fn negative_scale_reaches_validation() {
        let opts =
            CliOptions::try_parse_from(["voxterra", "--coarse-scale", "-0.5", "--detail-scale", "-1"])
                .unwrap();
        let p = opts.apply(TerrainParams::default());
        assert_eq!(p.coarse_scale, -0.5);
        assert_eq!(p.detail_scale, -1.0);
        assert!(matches!(p.validate(), Err(TerrainError::InvalidConfig(_))));
    }
}
