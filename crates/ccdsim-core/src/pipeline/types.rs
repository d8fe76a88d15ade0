use ndarray::Array2;

/// Pipeline state, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Validated,
    Photons,
    ShotNoise,
    DarkSignal,
    ReadNoise,
    Clipped,
    Voltage,
    Signal,
}

impl PipelineStage {
    /// Every stage in execution order.
    pub const ALL: &[PipelineStage] = &[
        PipelineStage::Validated,
        PipelineStage::Photons,
        PipelineStage::ShotNoise,
        PipelineStage::DarkSignal,
        PipelineStage::ReadNoise,
        PipelineStage::Clipped,
        PipelineStage::Voltage,
        PipelineStage::Signal,
    ];
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validated => write!(f, "Validating input"),
            Self::Photons => write!(f, "Converting to photons"),
            Self::ShotNoise => write!(f, "Sampling shot noise"),
            Self::DarkSignal => write!(f, "Adding dark signal"),
            Self::ReadNoise => write!(f, "Adding read noise"),
            Self::Clipped => write!(f, "Clipping to full well"),
            Self::Voltage => write!(f, "Digitizing"),
            Self::Signal => write!(f, "Normalizing signal"),
        }
    }
}

/// Non-fatal condition noticed during a run.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// The input held `count` negative pixels, the lowest being `min`.
    NegativeIrradiance { min: f64, count: usize },
    /// Total-power mode: sampled electron total missed its expected value by
    /// more than the tolerance.
    PhotonTotalDeviation {
        expected: f64,
        actual: f64,
        relative: f64,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativeIrradiance { min, count } => write!(
                f,
                "{count} negative irradiance value(s) (min {min}) were normalized"
            ),
            Self::PhotonTotalDeviation {
                expected,
                actual,
                relative,
            } => write!(
                f,
                "photon total {actual:.1} deviates from target {expected:.1} by {:.2}%",
                relative * 100.0
            ),
        }
    }
}

/// Result of one simulated readout.
#[derive(Clone, Debug)]
pub struct SimulationOutput {
    /// Normalized ADC signal in [0, 1], same shape as the input.
    pub signal: Array2<f64>,
    pub diagnostics: Vec<Diagnostic>,
    /// Seed used to build the generator, when the pipeline built it.
    pub seed: Option<u64>,
}

/// Thread-safe progress reporting for the pipeline.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A stage has started. `total_items` is the pixel count, if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when no reporter is supplied.
pub(crate) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
