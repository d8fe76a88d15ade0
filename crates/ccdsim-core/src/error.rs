use thiserror::Error;

#[derive(Error, Debug)]
pub enum SensorError {
    #[error("Irradiance image must be 2-dimensional, got {ndim} dimension(s)")]
    Shape { ndim: usize },

    #[error("Irradiance values must lie in [0, 1] after normalization (min {min}, max {max})")]
    Normalization { min: f64, max: f64 },

    #[error("Total signal power is zero; cannot derive a photon distribution")]
    ZeroPower,

    #[error("Invalid sensor parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Noise distribution error: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, SensorError>;
