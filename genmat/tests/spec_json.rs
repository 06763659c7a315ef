//! Feature specifications read from JSON

use genmat::{
    ConfigError, Density, Dim, ElementType, ErrorCategory, Format, MatrixArgs, MatrixGenerator,
    MatrixSpec, ResolvedConfig, Shape,
};

#[test]
fn band_spec_from_json() {
    let json = r#"{
        "element_type": "f32",
        "structure": {
            "shape": {
                "kind": "band_diag",
                "order": {"static": 5},
                "diags": {"static": 3},
                "format": "dia"
            },
            "density": {"sparse": {"ratio": 0.2}},
            "malloc": {"dynamic": {"check_errors": true}}
        },
        "bounds_checking": false
    }"#;
    let spec: MatrixSpec = serde_json::from_str(json).unwrap();
    let ty = MatrixGenerator::new().generate::<f32>(&spec).unwrap();
    let config = ty.config();
    assert_eq!(config.element_type, ElementType::F32);
    assert_eq!(config.shape, Shape::BandDiag);
    assert_eq!(config.density, Density::Sparse);
    assert_eq!(config.format, Some(Format::Dia));
    assert_eq!(config.order, Dim::Static(5));
    assert_eq!(config.diags, Dim::Static(3));
    assert!(config.malloc_err_checking);
    assert!(!config.bounds_checking);
    assert!(config.compat_checking);

    let mut band = ty.create(MatrixArgs::new()).unwrap();
    band.set_element(4, 3, 2.5).unwrap();
    assert_eq!(band.get_element(4, 3), Ok(2.5));
}

#[test]
fn element_types_use_lowercase_names() {
    for (name, ty) in [
        ("i32", ElementType::I32),
        ("u32", ElementType::U32),
        ("i64", ElementType::I64),
        ("u64", ElementType::U64),
        ("f32", ElementType::F32),
        ("f64", ElementType::F64),
    ] {
        assert_eq!(serde_json::to_string(&ty).unwrap(), format!("\"{name}\""));
        let parsed: ElementType = serde_json::from_str(&format!("\"{name}\"")).unwrap();
        assert_eq!(parsed, ty);
    }
    assert!(serde_json::from_str::<ElementType>("\"F64\"").is_err());
}

#[test]
fn static_dimension_without_value_is_rejected() {
    let json = r#"{"structure": {"shape": {"kind": "rect", "rows": {"static": null}}}}"#;
    let spec: MatrixSpec = serde_json::from_str(json).unwrap();
    let err = MatrixGenerator::new().generate::<f64>(&spec).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Configuration);

    let json = r#"{"structure": {"shape": {"kind": "rect", "format": {"array": {}}}, "density": {"sparse": {}}}}"#;
    let spec: MatrixSpec = serde_json::from_str(json).unwrap();
    let err = MatrixGenerator::new().generate::<f64>(&spec).unwrap_err();
    assert!(matches!(
        err,
        genmat::MatrixError::Configuration(ConfigError::DensityFormatMismatch { .. })
    ));
}

#[test]
fn resolved_config_serializes() {
    let ty = MatrixGenerator::new()
        .generate::<i64>(&MatrixSpec::new())
        .unwrap();
    let json = serde_json::to_string(ty.config()).unwrap();
    let config: ResolvedConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(&config, ty.config());
}
