use serde::{Deserialize, Serialize};

use crate::electrons::ShotNoise;
use crate::irradiance::IrradianceNormalization;
use crate::params::SensorOverrides;
use crate::photons::PhotonConversion;

/// Everything a single simulated readout needs besides the image and RNG.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Sensor constants; unset fields take the physical defaults.
    pub params: SensorOverrides,
    pub normalization: IrradianceNormalization,
    pub photon_conversion: PhotonConversion,
    pub shot_noise: ShotNoise,
    /// Seed for [`simulate_sensor_noise_seeded`](super::simulate_sensor_noise_seeded).
    /// Entry points that take a caller's generator ignore it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn with_params(params: SensorOverrides) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }
}
