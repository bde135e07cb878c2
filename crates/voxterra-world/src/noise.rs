use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic, coherent 2D noise in roughly `[-1, 1]`.
///
/// The height-field pass samples from several threads, so sources must be `Sync`
/// and free of interior mutation: the same `(x, z)` must always give the same value.
pub trait NoiseSource: Sync {
    fn sample_2d(&self, x: f32, z: f32) -> f32;
}

/// OpenSimplex2 noise at unit frequency; callers pre-scale coordinates.
pub struct SimplexNoise {
    inner: FastNoiseLite,
}

impl SimplexNoise {
    pub fn new(seed: i32) -> Self {
        let mut inner = FastNoiseLite::with_seed(seed);
        inner.set_noise_type(Some(NoiseType::OpenSimplex2));
        inner.set_frequency(Some(1.0));
        Self { inner }
    }
}

impl NoiseSource for SimplexNoise {
    #[inline]
    fn sample_2d(&self, x: f32, z: f32) -> f32 {
        self.inner.get_noise_2d(x, z)
    }
}

/// Adapts a plain function or closure into a noise source (stubs, fixed fields).
pub struct FnNoise<F>(pub F);

impl<F> NoiseSource for FnNoise<F>
where
    F: Fn(f32, f32) -> f32 + Sync,
{
    #[inline]
    fn sample_2d(&self, x: f32, z: f32) -> f32 {
        (self.0)(x, z)
    }
}
