//! Tests for point field transforms.
//!
//! The Euler order is easy to get silently wrong, so the order tests pin
//! down exactly which axis each angle turns about and which goes first.

use std::f64::consts::FRAC_PI_2;

use approx::assert_abs_diff_eq;
use config::constants::DEFAULT_ROTATION_ORDER;
use glam::DVec3;

use super::*;

fn assert_vec_eq(actual: DVec3, expected: DVec3) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = 1e-12);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = 1e-12);
    assert_abs_diff_eq!(actual.z, expected.z, epsilon = 1e-12);
}

fn sample_field() -> PointField {
    PointField::from_fn(3, 4, |r, c| {
        ((r, c) != (1, 2)).then(|| DVec3::new(c as f64 + 0.5, r as f64 - 3.0, (r * c) as f64 + 2.0))
    })
}

// =============================================================================
// ROTATION ORDER
// =============================================================================

#[test]
fn test_default_order_matches_config() {
    assert_eq!(RotationOrder::default().to_string(), DEFAULT_ROTATION_ORDER);
}

#[test]
fn test_parse_order_case_insensitive() {
    let order: RotationOrder = "ZxY".parse().unwrap();
    assert_eq!(order.axes(), [Axis::Z, Axis::X, Axis::Y]);
    assert_eq!(order.to_string(), "zxy");
}

#[test]
fn test_parse_order_rejects_garbage() {
    for bad in ["", "xy", "xyzz", "abc"] {
        assert!(
            matches!(bad.parse::<RotationOrder>(), Err(MeshError::Configuration { .. })),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_rotation_spec_rejects_bad_order() {
    assert!(RotationSpec::new(0.1, 0.0, 0.0, "xq").is_err());
}

// =============================================================================
// EULER COMPOSITION
// =============================================================================

/// phi about X goes first: Y -> Z, then omega about Y: Z -> X.
#[test]
fn test_xyz_applies_x_then_y() {
    let spec = RotationSpec::new(FRAC_PI_2, FRAC_PI_2, 0.0, "xyz").unwrap();
    assert_vec_eq(spec.matrix() * DVec3::Y, DVec3::X);
}

/// phi about Y leaves Y alone, then omega about X: Y -> Z.
#[test]
fn test_yxz_applies_y_then_x() {
    let spec = RotationSpec::new(FRAC_PI_2, FRAC_PI_2, 0.0, "yxz").unwrap();
    assert_vec_eq(spec.matrix() * DVec3::Y, DVec3::Z);
}

/// kappa is the last rotation and turns about the third axis.
#[test]
fn test_kappa_about_third_axis() {
    let spec = RotationSpec::new(0.0, 0.0, FRAC_PI_2, "xyz").unwrap();
    assert_vec_eq(spec.matrix() * DVec3::X, DVec3::Y);

    let spec = RotationSpec::new(0.0, 0.0, FRAC_PI_2, "zyx").unwrap();
    assert_vec_eq(spec.matrix() * DVec3::Y, DVec3::Z);
}

#[test]
fn test_repeated_axes_compose() {
    // Two quarter turns about Z is a half turn.
    let spec = RotationSpec::new(FRAC_PI_2, 0.0, FRAC_PI_2, "zxz").unwrap();
    assert_vec_eq(spec.matrix() * DVec3::X, DVec3::NEG_X);
}

#[test]
fn test_from_degrees_matches_radians() {
    let deg = RotationSpec::from_degrees(30.0, -45.0, 60.0, "xyz").unwrap();
    let rad = RotationSpec::new(30f64.to_radians(), (-45f64).to_radians(), 60f64.to_radians(), "xyz").unwrap();
    assert_vec_eq(deg.matrix() * DVec3::ONE, rad.matrix() * DVec3::ONE);
}

#[test]
fn test_identity() {
    let spec = RotationSpec::identity();
    assert!(spec.is_identity());
    assert_vec_eq(spec.matrix() * DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 2.0, 3.0));
    assert!(!RotationSpec::new(0.0, 1e-9, 0.0, "xyz").unwrap().is_identity());
}

// =============================================================================
// FIELD TRANSFORMS
// =============================================================================

#[test]
fn test_rotate_round_trip() {
    let field = sample_field();
    let spec = RotationSpec::new(0.3, -1.1, 2.4, "zyx").unwrap();

    let rotated = rotate(&field, &spec);
    let restored = apply_matrix(&rotated, spec.inverse_matrix());

    for r in 0..field.rows() {
        for c in 0..field.cols() {
            if field.is_valid(r, c) {
                assert_vec_eq(restored.get(r, c), field.get(r, c));
            } else {
                assert_eq!(rotated.get(r, c), DVec3::ZERO);
                assert_eq!(restored.get(r, c), DVec3::ZERO);
            }
        }
    }
    assert_eq!(restored.mask(), field.mask());
}

#[test]
fn test_translate_skips_missing() {
    let field = sample_field();
    let moved = translate(&field, DVec3::new(1.0, 2.0, 3.0));
    assert_eq!(moved.get(1, 2), DVec3::ZERO);
    assert_eq!(moved.get(0, 0), DVec3::new(1.5, -1.0, 5.0));
}

#[test]
fn test_center_moves_midpoint_to_origin() {
    let field = sample_field();
    let (centered, offset) = center(&field).unwrap();
    let midpoint = bounding_box(&centered).midpoint().unwrap();
    assert_vec_eq(midpoint, DVec3::ZERO);
    assert_vec_eq(offset, -bounding_box(&field).midpoint().unwrap());
}

#[test]
fn test_center_is_idempotent() {
    let (once, _) = center(&sample_field()).unwrap();
    let (twice, second_offset) = center(&once).unwrap();
    assert_vec_eq(second_offset, DVec3::ZERO);
    assert_vec_eq(bounding_box(&twice).midpoint().unwrap(), DVec3::ZERO);
}

#[test]
fn test_center_keeps_point_landing_on_origin_valid() {
    // The middle point sits exactly on the bounding box midpoint.
    let field = PointField::from_points(
        1,
        3,
        vec![DVec3::splat(1.0), DVec3::splat(2.0), DVec3::splat(3.0)],
    )
    .unwrap();
    let (centered, _) = center(&field).unwrap();
    assert_eq!(centered.get(0, 1), DVec3::ZERO);
    assert!(centered.is_valid(0, 1));
}

#[test]
fn test_center_all_missing_fails() {
    let field = PointField::from_points(2, 2, vec![DVec3::ZERO; 4]).unwrap();
    assert!(matches!(center(&field), Err(MeshError::DegenerateInput { .. })));
}

#[test]
fn test_rotation_order_serializes_as_string() {
    let spec = RotationSpec::new(0.5, -0.25, 1.0, "ZXY").unwrap();
    let json = serde_json::to_string(&spec).unwrap();
    assert_eq!(json, r#"{"phi":0.5,"omega":-0.25,"kappa":1.0,"order":"zxy"}"#);
    let back: RotationSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, spec);
}

#[test]
fn test_rotation_order_rejects_bad_string_on_deserialize() {
    let json = r#"{"phi":0.0,"omega":0.0,"kappa":0.0,"order":"xqz"}"#;
    let err = serde_json::from_str::<RotationSpec>(json).unwrap_err();
    assert!(err.to_string().contains("rotation order"));
}
