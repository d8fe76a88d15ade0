use approx::assert_abs_diff_eq;
use ndarray::{array, Array2};

use ccdsim_core::params::SensorParams;
use ccdsim_core::quantize::{clamp_to_adc, electrons_to_voltage, normalize_adc, quantize};

#[test]
fn test_voltage_is_rounded_gain() {
    let v = electrons_to_voltage(&array![[0.0, 1.2, 1.3, 100.0]], 2.0);
    assert_eq!(v, array![[0.0, 2.0, 3.0, 200.0]]);
}

#[test]
fn test_voltage_ties_round_to_even() {
    let v = electrons_to_voltage(&array![[0.25, 0.75]], 2.0);
    assert_eq!(v, array![[0.0, 2.0]]);
}

#[test]
fn test_clamp_to_adc() {
    let v = clamp_to_adc(array![[10.0, 16_383.0, 60_000.0]], 16_383.0);
    assert_eq!(v, array![[10.0, 16_383.0, 16_383.0]]);
}

#[test]
fn test_normalize_adc() {
    let s = normalize_adc(array![[0.0, 16_383.0]], 16_383.0);
    assert_eq!(s, array![[0.0, 1.0]]);
}

#[test]
fn test_quantize_saturated_well() {
    let params = SensorParams::default();
    let electrons = Array2::from_elem((2, 2), params.full_well_capacity);
    let s = quantize(&electrons, &params);
    let expected = (params.full_well_capacity * params.gain)
        .round()
        .min(params.adc_max)
        / params.adc_max;
    assert!(s.iter().all(|&v| v == expected));
    assert_eq!(expected, 1.0);
}

#[test]
fn test_quantize_mid_scale() {
    let params = SensorParams::default();
    let s = quantize(&array![[3000.0]], &params);
    assert_abs_diff_eq!(s[[0, 0]], 6000.0 / 16_383.0, epsilon = 1e-12);
}
