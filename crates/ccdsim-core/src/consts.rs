/// Default pixel pitch in micrometres.
pub const DEFAULT_PIXEL_SIZE_UM: f64 = 10.0;

/// Default integration time in seconds.
pub const DEFAULT_EXPOSURE_TIME_S: f64 = 0.1;

/// Default probability that an incident photon yields a detected electron.
pub const DEFAULT_QUANTUM_EFFICIENCY: f64 = 0.7;

/// Default full-well capacity in electrons.
pub const DEFAULT_FULL_WELL_CAPACITY: f64 = 30_000.0;

/// Default conversion gain in ADU per electron.
pub const DEFAULT_GAIN: f64 = 2.0;

/// Default read noise in electrons RMS.
pub const DEFAULT_READ_NOISE: f64 = 5.0;

/// Default dark current in electrons per second.
pub const DEFAULT_DARK_CURRENT: f64 = 0.1;

/// Default ADC full-scale code (14-bit converter).
pub const DEFAULT_ADC_MAX: f64 = ((1u32 << 14) - 1) as f64;

/// Planck's constant in J·s.
pub const PLANCK_CONSTANT: f64 = 6.626_070_15e-34;

/// Speed of light in vacuum in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Default wavelength in metres (green, 550 nm).
pub const DEFAULT_WAVELENGTH_M: f64 = 550e-9;

/// Micrometres to metres.
pub const MICROMETRE: f64 = 1e-6;

/// Relative deviation of the sampled photon total from its target above which
/// the total-power mode reports a diagnostic (1%).
pub const PHOTON_TOTAL_TOLERANCE: f64 = 0.01;

/// Minimum pixel count (h*w) to sample noise chunks with Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of image rows sharing one derived RNG seed during noise sampling.
pub const NOISE_CHUNK_ROWS: usize = 64;

/// Largest Poisson mean that is actually sampled. Above it the relative
/// spread is below 1e-9 and the mean is used as the count; `rand_distr`
/// rejects means past ~1.8e19.
pub const MAX_POISSON_MEAN: f64 = 1e18;
