use ndarray::Array2;

use ccdsim_core::electrons::ShotNoise;
use ccdsim_core::params::SensorOverrides;
use ccdsim_core::pipeline::config::SimulationConfig;

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

/// Config with every noise source switched off.
pub fn noiseless_config() -> SimulationConfig {
    SimulationConfig {
        params: SensorOverrides::default()
            .with_read_noise(0.0)
            .with_dark_current(0.0),
        shot_noise: ShotNoise::Disabled,
        ..SimulationConfig::default()
    }
}

pub fn make_image(h: usize, w: usize, fill: f64) -> Array2<f64> {
    Array2::from_elem((h, w), fill)
}

/// Row-major ramp from 0.0 to 1.0 inclusive.
pub fn make_ramp(h: usize, w: usize) -> Array2<f64> {
    let n = (h * w).max(2) - 1;
    Array2::from_shape_fn((h, w), |(row, col)| (row * w + col) as f64 / n as f64)
}

pub fn sample_variance(values: &Array2<f64>) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.sum() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, var)
}
