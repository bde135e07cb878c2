use std::error::Error;
use std::time::Instant;

use voxterra_mesh_cpu::{VERTEX_ATTRIBUTES, VERTEX_STRIDE_BYTES, extract};
use voxterra_world::{TerrainParams, generate, load_params_from_path};

mod cli;

use cli::CliOptions;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = CliOptions::parse();

    let base = match opts.config.as_deref() {
        Some(path) => {
            log::info!("loading terrain config from {}", path.display());
            load_params_from_path(path)?
        }
        None => TerrainParams::default(),
    };
    let params = opts.apply(base);
    params.validate()?;

    let start = Instant::now();
    let heights = generate(&params)?;
    let mesh = extract(&heights, &params)?;
    let stats = mesh.stats();

    log::info!(
        "terrain {}x{} (max height {}, seed {}) ready in {:.1} ms",
        params.size,
        params.size,
        params.max_height,
        params.seed,
        start.elapsed().as_secs_f64() * 1000.0
    );
    log::info!(
        "buffers: {} vertices x {} bytes, {} indices, {:.1} MiB total",
        stats.vertices,
        VERTEX_STRIDE_BYTES,
        mesh.indices.len(),
        stats.bytes as f64 / (1024.0 * 1024.0)
    );
    log::info!(
        "bounds: ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
        mesh.bbox.min.x,
        mesh.bbox.min.y,
        mesh.bbox.min.z,
        mesh.bbox.max.x,
        mesh.bbox.max.y,
        mesh.bbox.max.z
    );
    for a in VERTEX_ATTRIBUTES {
        log::debug!(
            "attribute {} '{}': {} floats at byte {}",
            a.location,
            a.name,
            a.components,
            a.offset_bytes()
        );
    }
    Ok(())
}
