pub mod config;
mod orchestrator;
mod types;

pub use orchestrator::{
    simulate_sensor_noise, simulate_sensor_noise_reported, simulate_sensor_noise_seeded,
};
pub(crate) use types::NoOpReporter;
pub use types::{Diagnostic, PipelineStage, ProgressReporter, SimulationOutput};
