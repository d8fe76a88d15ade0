use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MICROMETRE;
use crate::error::{Result, SensorError};
use crate::params::SensorParams;

/// How irradiance is turned into an expected photon count.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum PhotonConversion {
    /// Per-pixel mapping scaled by full-well capacity and exposure time.
    #[default]
    FullWell,
    /// Distribute the photons of a total optical power over the image's
    /// spatial profile. `None` derives the power from the image itself,
    /// reading it as irradiance in W/m² over the pixel area.
    TotalPower { total_power: Option<f64> },
}

impl std::fmt::Display for PhotonConversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FullWell => write!(f, "Full Well"),
            Self::TotalPower { total_power: Some(w) } => write!(f, "Total Power ({w} W)"),
            Self::TotalPower { total_power: None } => write!(f, "Total Power (from image)"),
        }
    }
}

/// Photon flux in photons/s: `I * (full_well_capacity / quantum_efficiency)`.
pub fn photon_flux(irradiance: &Array2<f64>, params: &SensorParams) -> Array2<f64> {
    let scale = params.full_well_capacity / params.quantum_efficiency;
    irradiance.mapv(|v| v * scale)
}

/// Expected photon count per pixel over one exposure.
pub fn irradiance_to_photons(irradiance: &Array2<f64>, params: &SensorParams) -> Array2<f64> {
    let mut photons = photon_flux(irradiance, params);
    photons.mapv_inplace(|v| v * params.exposure_time);
    photons
}

/// Energy of a single photon in joules, `h * c / wavelength`.
pub fn photon_energy(params: &SensorParams) -> f64 {
    params.h * params.c / params.wavelength
}

/// Optical power collected by the image when pixel values are read as W/m².
pub fn image_power(irradiance: &Array2<f64>, params: &SensorParams) -> f64 {
    let side = params.pixel_size * MICROMETRE;
    irradiance.sum() * side * side
}

/// Photon counts whose total matches the photons delivered by `total_power`
/// watts over the exposure, shaped like `irradiance`.
///
/// Returns the photon array together with the target total.
pub fn photons_from_total_power(
    irradiance: &Array2<f64>,
    params: &SensorParams,
    total_power: Option<f64>,
) -> Result<(Array2<f64>, f64)> {
    if let Some(w) = total_power {
        if !w.is_finite() || w < 0.0 {
            return Err(SensorError::InvalidParameter {
                name: "total_power",
                value: w,
                reason: "must be finite and not negative",
            });
        }
    }

    let profile_sum = irradiance.sum();
    if profile_sum <= 0.0 {
        return Err(SensorError::ZeroPower);
    }
    let power = total_power.unwrap_or_else(|| image_power(irradiance, params));
    if power <= 0.0 {
        return Err(SensorError::ZeroPower);
    }

    let target = power * params.exposure_time / photon_energy(params);
    if !target.is_finite() {
        return Err(SensorError::InvalidParameter {
            name: "total_power",
            value: power,
            reason: "photon total overflows",
        });
    }
    debug!(power, target, "Photon total from optical power");

    let scale = target / profile_sum;
    Ok((irradiance.mapv(|v| v * scale), target))
}
