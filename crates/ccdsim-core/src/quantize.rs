use ndarray::Array2;

use crate::params::SensorParams;
use crate::pipeline::{NoOpReporter, PipelineStage, ProgressReporter};

/// Analog voltage in ADU: `round(electrons * gain)`, ties to even.
pub fn electrons_to_voltage(electrons: &Array2<f64>, gain: f64) -> Array2<f64> {
    electrons.mapv(|e| (e * gain).round_ties_even())
}

/// Saturate at the ADC full-scale code. Applied after rounding.
pub fn clamp_to_adc(voltage: Array2<f64>, adc_max: f64) -> Array2<f64> {
    voltage.mapv_into(|v| v.min(adc_max))
}

/// Map ADC codes to [0, 1].
pub fn normalize_adc(voltage: Array2<f64>, adc_max: f64) -> Array2<f64> {
    voltage.mapv_into(|v| v / adc_max)
}

/// Full quantization of clipped electron counts into a normalized signal.
pub fn quantize(electrons: &Array2<f64>, params: &SensorParams) -> Array2<f64> {
    quantize_reported(electrons, params, &NoOpReporter)
}

/// [`quantize`] reporting the voltage and signal stages.
pub(crate) fn quantize_reported(
    electrons: &Array2<f64>,
    params: &SensorParams,
    reporter: &dyn ProgressReporter,
) -> Array2<f64> {
    let pixels = Some(electrons.len());

    reporter.begin_stage(PipelineStage::Voltage, pixels);
    let voltage = clamp_to_adc(electrons_to_voltage(electrons, params.gain), params.adc_max);
    reporter.finish_stage();

    reporter.begin_stage(PipelineStage::Signal, pixels);
    let signal = normalize_adc(voltage, params.adc_max);
    reporter.finish_stage();
    signal
}
