//! Round-trip and rejection properties of the conversion layer
//!
//! - Point round trip within single-precision rounding
//! - Mat round trip keeps shape, type and payload bytes
//! - Scalar channel defaulting
//! - Rect collection ordering
//! - Shape mismatch rejection
//! - Empty Mat contract

use cvbridge_core::mat::{CV_16UC1, CV_32FC3, CV_64FC1, CV_8UC1, CV_8UC4};
use cvbridge_core::{
    from_external, safe_call, to_external, BridgeConfig, Error, ExternalObject, ExternalValue,
    HostErrorKind, Mat, MatType, Point2f, Rect, Scalar,
};
use rand::{Rng, SeedableRng};

#[test]
fn test_roundtrip_points() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let x: f64 = rng.gen_range(-1e6..1e6);
        let y: f64 = rng.gen_range(-1e6..1e6);
        let point = Point2f::new(x as f32, y as f32);

        let back: Point2f = from_external(&to_external(&point)).unwrap();
        assert_eq!(back, point);
        assert!((f64::from(back.x) - x).abs() <= x.abs() * f64::from(f32::EPSILON));
    }
}

#[test]
fn test_roundtrip_mats() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let cases: Vec<(&str, i32, i32, MatType)> = vec![
        ("gray", 5, 7, CV_8UC1),
        ("rgba", 3, 2, CV_8UC4),
        ("depth16", 4, 4, CV_16UC1),
        ("float3", 2, 9, CV_32FC3),
        ("double", 1, 1, CV_64FC1),
        ("single_row", 1, 64, CV_8UC1),
    ];

    for (name, rows, cols, typ) in cases {
        let mut mat = Mat::new(rows, cols, typ).unwrap();
        rng.fill(mat.data_mut());

        let external = to_external(&mat);
        let back: Mat = from_external(&external)
            .unwrap_or_else(|e| panic!("{}: failed to convert back: {}", name, e));

        assert_eq!(back.rows(), rows, "{}: rows", name);
        assert_eq!(back.cols(), cols, "{}: cols", name);
        assert_eq!(back.typ(), typ, "{}: type", name);
        assert_eq!(back.data(), mat.data(), "{}: payload", name);
    }
}

#[test]
fn test_mat_copies_do_not_alias() {
    let mut mat = Mat::new(2, 2, CV_8UC1).unwrap();
    mat.data_mut().copy_from_slice(&[1, 2, 3, 4]);

    let external = to_external(&mat);
    mat.data_mut()[0] = 99;

    assert_eq!(
        external.get("data").and_then(ExternalValue::as_buffer),
        Some(&[1u8, 2, 3, 4][..])
    );
}

#[test]
fn test_scalar_channel_defaulting() {
    let single: Scalar = from_external(&ExternalValue::from(5)).unwrap();
    assert_eq!(single.channels(), &[5.0, 0.0, 0.0, 0.0]);

    let pair: Scalar = from_external(&ExternalValue::Array(vec![1.into(), 2.into()])).unwrap();
    assert_eq!(pair.channels(), &[1.0, 2.0, 0.0, 0.0]);
}

#[test]
fn test_rect_collection_order() {
    let rects: Vec<Rect> = (0..25).map(|i| Rect::new(i, 2 * i, 10 + i, 30 - i)).collect();
    let back: Vec<Rect> = from_external(&to_external(&rects)).unwrap();
    assert_eq!(back.len(), rects.len());
    assert_eq!(back, rects);
}

#[test]
fn test_rect_rejects_bare_number() {
    let result: Result<Rect, Error> = from_external(&ExternalValue::from(42));
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
}

#[test]
fn test_empty_mat_contract() {
    let external = to_external(&Mat::default());

    assert_eq!(external.get("empty"), Some(&ExternalValue::Bool(true)));
    assert!(external.get("data").is_none());
    assert_eq!(external.get("rows"), Some(&ExternalValue::Number(0.0)));

    let back: Mat = from_external(&external).unwrap();
    assert!(back.is_empty());
    assert_eq!(back.typ(), CV_8UC1);
    assert!(back.data().is_empty());
}

#[test]
fn test_empty_mat_with_columns_keeps_shape() {
    let mat = Mat::new(0, 5, CV_32FC3).unwrap();
    let external = to_external(&mat);
    assert_eq!(external.get("empty"), Some(&ExternalValue::Bool(true)));
    assert!(external.get("data").is_none());

    let back: Mat = from_external(&external).unwrap();
    assert_eq!(back.cols(), 5);
    assert_eq!(back.typ(), CV_32FC3);
}

#[test]
fn test_mat_survives_json_view() -> anyhow::Result<()> {
    let mut mat = Mat::new(3, 3, CV_8UC1)?;
    mat.data_mut().copy_from_slice(&[0, 10, 20, 30, 40, 50, 60, 70, 255]);

    let text = serde_json::to_string(&to_external(&mat).to_json())?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(json["rows"], 3);
    assert_eq!(json["data"]["__buffer__"], true);

    let back: Mat = from_external(&ExternalValue::from_json(&json)?)?;
    assert_eq!(back, mat);
    Ok(())
}

#[test]
fn test_oversized_shape_fails_the_call_only() {
    let shape: ExternalValue = ExternalObject::new()
        .with("rows", i32::MAX)
        .with("cols", i32::MAX)
        .with("type", 0)
        .into();

    let direct: Result<Mat, Error> = from_external(&shape);
    assert!(matches!(direct, Err(Error::InvalidArgument(_))));

    let config = BridgeConfig::default();
    let err = safe_call(&config, || from_external::<Mat>(&shape)).unwrap_err();
    assert_eq!(err.kind, HostErrorKind::Error);
    assert!(err.message.starts_with("Error: Invalid argument: Mat of"), "{}", err.message);
}
