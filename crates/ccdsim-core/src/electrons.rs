use ndarray::Array2;
use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MAX_POISSON_MEAN;
use crate::error::{Result, SensorError};
use crate::params::ResolvedParams;
use crate::pipeline::{NoOpReporter, PipelineStage, ProgressReporter};
use crate::sampling::process_chunks;

/// Whether photon-to-electron conversion is sampled or taken at its mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotNoise {
    /// Poisson draw per pixel.
    #[default]
    Enabled,
    /// Expected value `photons * quantum_efficiency`, no randomness.
    Disabled,
}

impl std::fmt::Display for ShotNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "Enabled"),
            Self::Disabled => write!(f, "Disabled"),
        }
    }
}

/// Convert expected photons to electrons with per-pixel Poisson shot noise.
pub fn apply_shot_noise<R: Rng + ?Sized>(
    photons: &Array2<f64>,
    quantum_efficiency: f64,
    mode: ShotNoise,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let mut electrons = photons.mapv(|p| p * quantum_efficiency);
    if mode == ShotNoise::Disabled {
        return Ok(electrons);
    }

    process_chunks(&mut electrons, rng, |mut chunk, rng| {
        for pixel in chunk.iter_mut() {
            *pixel = sample_poisson(*pixel, rng)?;
        }
        Ok(())
    })?;
    Ok(electrons)
}

/// Thermally generated electrons: Poisson with mean `dark_current * exposure_time`
/// at every pixel, independent of the signal.
pub fn dark_frame<R: Rng + ?Sized>(resolved: &ResolvedParams, rng: &mut R) -> Result<Array2<f64>> {
    let mut frame = Array2::<f64>::zeros(resolved.shape);
    let mean = resolved.dark_electrons();
    if mean == 0.0 {
        return Ok(frame);
    }
    if mean > MAX_POISSON_MEAN {
        frame.fill(mean);
        return Ok(frame);
    }

    let dist = Poisson::new(mean)
        .map_err(|e| SensorError::Distribution(format!("dark Poisson (mean {mean}): {e}")))?;
    process_chunks(&mut frame, rng, |mut chunk, rng| {
        chunk.iter_mut().for_each(|v| *v = dist.sample(rng));
        Ok(())
    })?;
    Ok(frame)
}

/// Zero-mean Gaussian readout noise with sigma `read_noise`.
pub fn read_frame<R: Rng + ?Sized>(resolved: &ResolvedParams, rng: &mut R) -> Result<Array2<f64>> {
    let mut frame = Array2::<f64>::zeros(resolved.shape);
    let sigma = resolved.read_noise;
    if sigma == 0.0 {
        return Ok(frame);
    }

    let dist = Normal::new(0.0, sigma)
        .map_err(|e| SensorError::Distribution(format!("read noise (sigma {sigma}): {e}")))?;
    process_chunks(&mut frame, rng, |mut chunk, rng| {
        chunk.iter_mut().for_each(|v| *v = dist.sample(rng));
        Ok(())
    })?;
    Ok(frame)
}

/// Shot noise, then dark signal, then read noise. The result is not clipped.
pub fn sample_electrons<R: Rng + ?Sized>(
    photons: &Array2<f64>,
    resolved: &ResolvedParams,
    shot_noise: ShotNoise,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let sampled = sample_electrons_reported(photons, resolved, shot_noise, rng, &NoOpReporter)?;
    Ok(sampled.electrons)
}

/// Pre-clip electrons plus the shot-noise total before dark and read noise.
pub(crate) struct SampledElectrons {
    pub electrons: Array2<f64>,
    pub shot_total: f64,
}

/// [`sample_electrons`] with one reporter stage per noise source.
pub(crate) fn sample_electrons_reported<R: Rng + ?Sized>(
    photons: &Array2<f64>,
    resolved: &ResolvedParams,
    shot_noise: ShotNoise,
    rng: &mut R,
    reporter: &dyn ProgressReporter,
) -> Result<SampledElectrons> {
    let pixels = Some(photons.len());

    reporter.begin_stage(PipelineStage::ShotNoise, pixels);
    let mut electrons = apply_shot_noise(photons, resolved.quantum_efficiency, shot_noise, rng)?;
    let shot_total = electrons.sum();
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::DarkSignal, pixels);
    electrons += &dark_frame(resolved, rng)?;
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::ReadNoise, pixels);
    electrons += &read_frame(resolved, rng)?;
    reporter.finish_stage();

    debug!(shot_total, total = electrons.sum(), "Electrons sampled");
    Ok(SampledElectrons {
        electrons,
        shot_total,
    })
}

/// Clamp every pixel to `[0, full_well]`.
pub fn clip_full_well(electrons: Array2<f64>, full_well: f64) -> Array2<f64> {
    electrons.mapv_into(|e| e.max(0.0).min(full_well))
}

fn sample_poisson<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> Result<f64> {
    if mean == 0.0 {
        return Ok(0.0);
    }
    if mean > MAX_POISSON_MEAN {
        return Ok(mean);
    }
    let dist = Poisson::new(mean)
        .map_err(|e| SensorError::Distribution(format!("shot Poisson (mean {mean}): {e}")))?;
    Ok(dist.sample(rng))
}
