use std::sync::Arc;

use ndarray::{ArrayView, Dimension};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::consts::PHOTON_TOTAL_TOLERANCE;
use crate::electrons::{clip_full_well, sample_electrons_reported};
use crate::error::Result;
use crate::irradiance::validate_irradiance;
use crate::photons::{irradiance_to_photons, photons_from_total_power, PhotonConversion};
use crate::quantize::quantize_reported;

use super::config::SimulationConfig;
use super::types::{Diagnostic, NoOpReporter, PipelineStage, ProgressReporter, SimulationOutput};

/// Simulate a sensor readout of `image` with a thread-safe progress reporter.
///
/// Any failure aborts the whole run; there are no partial results. All noise
/// comes from `rng`; `config.seed` is not consulted here.
pub fn simulate_sensor_noise_reported<D, R>(
    image: ArrayView<'_, f64, D>,
    config: &SimulationConfig,
    rng: &mut R,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<SimulationOutput>
where
    D: Dimension,
    R: Rng + ?Sized,
{
    reporter.begin_stage(PipelineStage::Validated, None);
    let validated = validate_irradiance(image, config.normalization)?;
    let mut diagnostics = validated.diagnostics;
    let irradiance = validated.data;
    let resolved = config.params.resolve(irradiance.dim());
    resolved.validate()?;
    if let Some(seed) = config.seed {
        debug!(seed, "Configured seed ignored; using the supplied generator");
    }
    reporter.finish_stage();

    let (rows, cols) = resolved.shape;
    let pixels = rows * cols;
    info!(
        rows,
        cols,
        photon_conversion = %config.photon_conversion,
        shot_noise = %config.shot_noise,
        "Simulating sensor readout"
    );

    reporter.begin_stage(PipelineStage::Photons, Some(pixels));
    let (photons, photon_target) = match &config.photon_conversion {
        PhotonConversion::FullWell => (irradiance_to_photons(&irradiance, &resolved), None),
        PhotonConversion::TotalPower { total_power } => {
            let (photons, target) = photons_from_total_power(&irradiance, &resolved, *total_power)?;
            (photons, Some(target))
        }
    };
    drop(irradiance);
    debug!(total = photons.sum(), "Photon conversion complete");
    reporter.finish_stage();

    let sampled = sample_electrons_reported(
        &photons,
        &resolved,
        config.shot_noise,
        rng,
        reporter.as_ref(),
    )?;
    drop(photons);
    if let Some(target) = photon_target {
        let expected = target * resolved.quantum_efficiency;
        diagnostics.extend(photon_total_deviation(sampled.shot_total, expected));
    }

    reporter.begin_stage(PipelineStage::Clipped, Some(pixels));
    let electrons = clip_full_well(sampled.electrons, resolved.full_well_capacity);
    reporter.finish_stage();

    let signal = quantize_reported(&electrons, &resolved, reporter.as_ref());

    info!(
        warnings = diagnostics.len(),
        mean_signal = signal.mean().unwrap_or(0.0),
        "Sensor readout complete"
    );

    Ok(SimulationOutput {
        signal,
        diagnostics,
        seed: None,
    })
}

/// Simulate a sensor readout of `image`, drawing all noise from `rng`.
///
/// The same generator state always yields a bit-identical signal.
/// `config.seed` only applies to [`simulate_sensor_noise_seeded`].
pub fn simulate_sensor_noise<D, R>(
    image: ArrayView<'_, f64, D>,
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationOutput>
where
    D: Dimension,
    R: Rng + ?Sized,
{
    simulate_sensor_noise_reported(image, config, rng, Arc::new(NoOpReporter))
}

/// Simulate with a generator built from `config.seed`, or a fresh seed when
/// none is configured. The seed used is returned in the output.
pub fn simulate_sensor_noise_seeded<D: Dimension>(
    image: ArrayView<'_, f64, D>,
    config: &SimulationConfig,
) -> Result<SimulationOutput> {
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    debug!(seed, "Seeding sensor noise generator");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut output = simulate_sensor_noise(image, config, &mut rng)?;
    output.seed = Some(seed);
    Ok(output)
}

fn photon_total_deviation(actual: f64, expected: f64) -> Option<Diagnostic> {
    if expected <= 0.0 {
        return None;
    }
    let relative = (actual - expected).abs() / expected;
    if relative <= PHOTON_TOTAL_TOLERANCE {
        return None;
    }
    warn!(expected, actual, relative, "Photon total deviates from target");
    Some(Diagnostic::PhotonTotalDeviation {
        expected,
        actual,
        relative,
    })
}
