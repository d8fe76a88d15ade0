use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_ADC_MAX, DEFAULT_DARK_CURRENT, DEFAULT_EXPOSURE_TIME_S, DEFAULT_FULL_WELL_CAPACITY,
    DEFAULT_GAIN, DEFAULT_PIXEL_SIZE_UM, DEFAULT_QUANTUM_EFFICIENCY, DEFAULT_READ_NOISE,
    DEFAULT_WAVELENGTH_M, PLANCK_CONSTANT, SPEED_OF_LIGHT,
};
use crate::error::{Result, SensorError};

/// Complete set of physical sensor constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorParams {
    /// Pixel pitch in micrometres.
    pub pixel_size: f64,
    /// Integration time in seconds.
    pub exposure_time: f64,
    /// Photon-to-electron conversion probability, in (0, 1].
    pub quantum_efficiency: f64,
    /// Maximum electrons a pixel can hold.
    pub full_well_capacity: f64,
    /// ADU per electron.
    pub gain: f64,
    /// Read noise sigma in electrons RMS.
    pub read_noise: f64,
    /// Thermally generated electrons per second.
    pub dark_current: f64,
    /// Largest ADC output code.
    pub adc_max: f64,
    /// Planck's constant (J·s).
    pub h: f64,
    /// Speed of light (m/s).
    pub c: f64,
    /// Wavelength of the incident light (m).
    pub wavelength: f64,
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            pixel_size: DEFAULT_PIXEL_SIZE_UM,
            exposure_time: DEFAULT_EXPOSURE_TIME_S,
            quantum_efficiency: DEFAULT_QUANTUM_EFFICIENCY,
            full_well_capacity: DEFAULT_FULL_WELL_CAPACITY,
            gain: DEFAULT_GAIN,
            read_noise: DEFAULT_READ_NOISE,
            dark_current: DEFAULT_DARK_CURRENT,
            adc_max: DEFAULT_ADC_MAX,
            h: PLANCK_CONSTANT,
            c: SPEED_OF_LIGHT,
            wavelength: DEFAULT_WAVELENGTH_M,
        }
    }
}

impl SensorParams {
    /// Mean dark electrons accumulated per pixel over one exposure.
    pub fn dark_electrons(&self) -> f64 {
        self.dark_current * self.exposure_time
    }

    /// Check the physical invariants of every field.
    ///
    /// Resolution never calls this; the pipeline runs it as its own step.
    pub fn validate(&self) -> Result<()> {
        let fields: [(&'static str, f64); 11] = [
            ("pixel_size", self.pixel_size),
            ("exposure_time", self.exposure_time),
            ("quantum_efficiency", self.quantum_efficiency),
            ("full_well_capacity", self.full_well_capacity),
            ("gain", self.gain),
            ("read_noise", self.read_noise),
            ("dark_current", self.dark_current),
            ("adc_max", self.adc_max),
            ("h", self.h),
            ("c", self.c),
            ("wavelength", self.wavelength),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(invalid(name, value, "must be finite"));
            }
        }

        if self.quantum_efficiency <= 0.0 || self.quantum_efficiency > 1.0 {
            return Err(invalid(
                "quantum_efficiency",
                self.quantum_efficiency,
                "must lie in (0, 1]",
            ));
        }

        let strictly_positive = [
            ("full_well_capacity", self.full_well_capacity),
            ("gain", self.gain),
            ("adc_max", self.adc_max),
            ("pixel_size", self.pixel_size),
            ("wavelength", self.wavelength),
            ("h", self.h),
            ("c", self.c),
        ];
        for (name, value) in strictly_positive {
            if value <= 0.0 {
                return Err(invalid(name, value, "must be greater than zero"));
            }
        }

        let non_negative = [
            ("exposure_time", self.exposure_time),
            ("read_noise", self.read_noise),
            ("dark_current", self.dark_current),
        ];
        for (name, value) in non_negative {
            if value < 0.0 {
                return Err(invalid(name, value, "must not be negative"));
            }
        }

        Ok(())
    }
}

fn invalid(name: &'static str, value: f64, reason: &'static str) -> SensorError {
    SensorError::InvalidParameter {
        name,
        value,
        reason,
    }
}

/// Caller-supplied subset of [`SensorParams`]. Unset fields fall back to the
/// physical defaults on [`SensorOverrides::resolve`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposure_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum_efficiency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_well_capacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gain: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_noise: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_current: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adc_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength: Option<f64>,
}

macro_rules! override_setters {
    ($($setter:ident => $field:ident),* $(,)?) => {
        $(
            pub fn $setter(mut self, value: f64) -> Self {
                self.$field = Some(value);
                self
            }
        )*
    };
}

impl SensorOverrides {
    override_setters! {
        with_pixel_size => pixel_size,
        with_exposure_time => exposure_time,
        with_quantum_efficiency => quantum_efficiency,
        with_full_well_capacity => full_well_capacity,
        with_gain => gain,
        with_read_noise => read_noise,
        with_dark_current => dark_current,
        with_adc_max => adc_max,
        with_planck_constant => h,
        with_speed_of_light => c,
        with_wavelength => wavelength,
    }

    /// Merge with the defaults and stamp the result with the image shape
    /// `(rows, cols)`. Set fields are kept verbatim; nothing is range-checked.
    pub fn resolve(&self, shape: (usize, usize)) -> ResolvedParams {
        let d = SensorParams::default();
        let params = SensorParams {
            pixel_size: self.pixel_size.unwrap_or(d.pixel_size),
            exposure_time: self.exposure_time.unwrap_or(d.exposure_time),
            quantum_efficiency: self.quantum_efficiency.unwrap_or(d.quantum_efficiency),
            full_well_capacity: self.full_well_capacity.unwrap_or(d.full_well_capacity),
            gain: self.gain.unwrap_or(d.gain),
            read_noise: self.read_noise.unwrap_or(d.read_noise),
            dark_current: self.dark_current.unwrap_or(d.dark_current),
            adc_max: self.adc_max.unwrap_or(d.adc_max),
            h: self.h.unwrap_or(d.h),
            c: self.c.unwrap_or(d.c),
            wavelength: self.wavelength.unwrap_or(d.wavelength),
        };
        ResolvedParams { params, shape }
    }
}

impl From<SensorParams> for SensorOverrides {
    fn from(p: SensorParams) -> Self {
        Self {
            pixel_size: Some(p.pixel_size),
            exposure_time: Some(p.exposure_time),
            quantum_efficiency: Some(p.quantum_efficiency),
            full_well_capacity: Some(p.full_well_capacity),
            gain: Some(p.gain),
            read_noise: Some(p.read_noise),
            dark_current: Some(p.dark_current),
            adc_max: Some(p.adc_max),
            h: Some(p.h),
            c: Some(p.c),
            wavelength: Some(p.wavelength),
        }
    }
}

/// Fully resolved parameters for one pipeline invocation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedParams {
    pub params: SensorParams,
    /// Image shape as `(rows, cols)`; noise frames are generated at this size.
    pub shape: (usize, usize),
}

impl std::ops::Deref for ResolvedParams {
    type Target = SensorParams;

    fn deref(&self) -> &SensorParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_resolve_to_defaults() {
        let resolved = SensorOverrides::default().resolve((3, 4));
        assert_eq!(resolved.params, SensorParams::default());
        assert_eq!(resolved.shape, (3, 4));
    }

    #[test]
    fn resolve_does_not_validate() {
        let resolved = SensorOverrides::default()
            .with_quantum_efficiency(-1.0)
            .resolve((1, 1));
        assert_eq!(resolved.quantum_efficiency, -1.0);
        assert!(resolved.validate().is_err());
    }
}
