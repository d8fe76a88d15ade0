use ndarray::{array, Array1, Array2, Array3};

use ccdsim_core::error::SensorError;
use ccdsim_core::irradiance::{min_max_normalize, validate_irradiance, IrradianceNormalization};
use ccdsim_core::pipeline::Diagnostic;

// ---------------------------------------------------------------------------
// Dimensionality
// ---------------------------------------------------------------------------

#[test]
fn test_rejects_one_dimensional() {
    let line = Array1::from_elem(8, 0.5);
    let err = validate_irradiance(line.view(), IrradianceNormalization::ClipNegative).unwrap_err();
    assert!(matches!(err, SensorError::Shape { ndim: 1 }), "got {err:?}");
}

#[test]
fn test_rejects_color_cube() {
    let rgb = Array3::from_elem((4, 4, 3), 0.5);
    let err = validate_irradiance(rgb.view(), IrradianceNormalization::ClipNegative).unwrap_err();
    assert!(matches!(err, SensorError::Shape { ndim: 3 }), "got {err:?}");
}

#[test]
fn test_accepts_dynamic_2d() {
    let image = Array2::from_elem((3, 5), 0.25).into_dyn();
    let v = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap();
    assert_eq!(v.data.dim(), (3, 5));
    assert!(v.diagnostics.is_empty());
}

#[test]
fn test_empty_image_is_valid() {
    let image = Array2::<f64>::zeros((0, 4));
    let v = validate_irradiance(image.view(), IrradianceNormalization::MinMax).unwrap();
    assert_eq!(v.data.dim(), (0, 4));
}

// ---------------------------------------------------------------------------
// Clip-negative policy
// ---------------------------------------------------------------------------

#[test]
fn test_clip_negative_values() {
    let image = array![[-0.1, 0.5], [0.5, -0.3]];
    let v = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap();
    assert_eq!(v.data, array![[0.0, 0.5], [0.5, 0.0]]);
}

#[test]
fn test_negative_warning_emitted_once() {
    let mut image = Array2::from_elem((10, 10), 0.5);
    for i in 0..10 {
        image[[i, i]] = -0.05 * (i + 1) as f64;
    }
    let v = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap();
    assert_eq!(v.diagnostics.len(), 1);
    match &v.diagnostics[0] {
        Diagnostic::NegativeIrradiance { min, count } => {
            assert_eq!(*count, 10);
            assert!((*min + 0.5).abs() < 1e-12, "min = {min}");
        }
        other => panic!("unexpected diagnostic {other:?}"),
    }
}

#[test]
fn test_no_warning_for_valid_input() {
    let image = array![[0.0, 1.0], [0.25, 0.75]];
    let v = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap();
    assert!(v.diagnostics.is_empty());
    assert_eq!(v.data, image);
}

#[test]
fn test_values_above_one_fail() {
    let image = array![[0.2, 1.5]];
    let err = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap_err();
    match err {
        SensorError::Normalization { max, .. } => assert_eq!(max, 1.5),
        other => panic!("expected Normalization, got {other:?}"),
    }
}

#[test]
fn test_nan_fails() {
    let image = array![[0.2, f64::NAN]];
    let err = validate_irradiance(image.view(), IrradianceNormalization::ClipNegative).unwrap_err();
    assert!(matches!(err, SensorError::Normalization { .. }));
}

// ---------------------------------------------------------------------------
// Min/max policy
// ---------------------------------------------------------------------------

#[test]
fn test_min_max_rescales_to_unit_range() {
    let image = array![[-0.5, 0.0], [0.5, 1.5]];
    let v = validate_irradiance(image.view(), IrradianceNormalization::MinMax).unwrap();
    assert_eq!(v.data, array![[0.0, 0.25], [0.5, 1.0]]);
    assert_eq!(v.diagnostics.len(), 1);
}

#[test]
fn test_min_max_applies_without_negatives() {
    let image = array![[0.2, 0.4], [0.6, 0.6]];
    let v = validate_irradiance(image.view(), IrradianceNormalization::MinMax).unwrap();
    let expected = array![[0.0, 0.5], [1.0, 1.0]];
    for (a, b) in v.data.iter().zip(expected.iter()) {
        assert!((a - b).abs() < 1e-12, "{a} vs {b}");
    }
    assert!(v.diagnostics.is_empty());
}

#[test]
fn test_min_max_constant_image_is_zero() {
    let image = Array2::from_elem((3, 3), 0.8);
    let out = min_max_normalize(&image.view());
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn test_normalization_display() {
    assert_eq!(format!("{}", IrradianceNormalization::ClipNegative), "Clip Negative");
    assert_eq!(format!("{}", IrradianceNormalization::MinMax), "Min/Max");
    assert_eq!(
        IrradianceNormalization::default(),
        IrradianceNormalization::ClipNegative
    );
}
