use ndarray::{Array2, ArrayView, Dimension, Ix2};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, SensorError};
use crate::pipeline::Diagnostic;

/// Policy applied to an irradiance image before range checking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrradianceNormalization {
    /// Clamp negative values to zero, leave everything else untouched.
    #[default]
    ClipNegative,
    /// Shift by the minimum and divide by the new maximum.
    MinMax,
}

impl std::fmt::Display for IrradianceNormalization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ClipNegative => write!(f, "Clip Negative"),
            Self::MinMax => write!(f, "Min/Max"),
        }
    }
}

/// A 2-D irradiance image guaranteed to lie in [0, 1].
#[derive(Clone, Debug)]
pub struct ValidatedIrradiance {
    pub data: Array2<f64>,
    /// Advisory messages raised while normalizing (at most one per kind).
    pub diagnostics: Vec<Diagnostic>,
}

/// Check dimensionality, apply `mode`, then require every value in [0, 1].
pub fn validate_irradiance<D: Dimension>(
    image: ArrayView<'_, f64, D>,
    mode: IrradianceNormalization,
) -> Result<ValidatedIrradiance> {
    let ndim = image.ndim();
    let image = image
        .into_dimensionality::<Ix2>()
        .map_err(|_| SensorError::Shape { ndim })?;

    let mut diagnostics = Vec::new();
    let (min, count) = negative_summary(&image.view());
    if count > 0 {
        warn!(min, count, "Negative irradiance values detected");
        diagnostics.push(Diagnostic::NegativeIrradiance { min, count });
    }

    let data = match mode {
        IrradianceNormalization::ClipNegative => image.mapv(|v| if v < 0.0 { 0.0 } else { v }),
        IrradianceNormalization::MinMax => min_max_normalize(&image.view()),
    };

    let (lo, hi) = value_range(&data.view());
    if data.iter().any(|v| !(0.0..=1.0).contains(v)) {
        return Err(SensorError::Normalization { min: lo, max: hi });
    }

    Ok(ValidatedIrradiance { data, diagnostics })
}

/// Rescale to [0, 1]. A constant image becomes all zeros.
pub fn min_max_normalize(image: &ndarray::ArrayView2<'_, f64>) -> Array2<f64> {
    if image.is_empty() {
        return image.to_owned();
    }
    let (min, _) = value_range(image);
    let shifted = image.mapv(|v| v - min);
    let (_, max) = value_range(&shifted.view());
    if max > 0.0 {
        shifted.mapv(|v| v / max)
    } else {
        shifted
    }
}

/// Minimum negative value and how many pixels are negative.
fn negative_summary(image: &ndarray::ArrayView2<'_, f64>) -> (f64, usize) {
    image
        .iter()
        .filter(|&&v| v < 0.0)
        .fold((0.0f64, 0usize), |(min, n), &v| (min.min(v), n + 1))
}

fn value_range(image: &ndarray::ArrayView2<'_, f64>) -> (f64, f64) {
    image.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    })
}
