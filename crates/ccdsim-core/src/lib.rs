pub mod consts;
pub mod electrons;
pub mod error;
pub mod irradiance;
pub mod params;
pub mod photons;
pub mod pipeline;
pub mod quantize;
pub mod sampling;

pub use error::{Result, SensorError};
pub use pipeline::config::SimulationConfig;
pub use pipeline::{simulate_sensor_noise, simulate_sensor_noise_seeded, SimulationOutput};
