use super::*;

#[test]
fn default_config_is_valid() {
    EngineConfig::default().validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let json = r#"{ "seed": 42, "zoom": 1.5 }"#;
    let cfg = EngineConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.zoom, 1.5);
    assert_eq!(cfg.head_decay_ms, 260.0);
    assert_eq!(cfg.classes, ClassTable::default());
    cfg.validate().unwrap();
}

#[test]
fn json_roundtrip_preserves_class_overrides() {
    let mut cfg = EngineConfig::default();
    cfg.classes.standard.branch_probability = 0.3;
    cfg.classes.meta.checkpoint_spawn_chance = 0.03;
    let json = cfg.to_json_pretty().unwrap();
    let back = EngineConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, cfg);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = EngineConfig::from_reader("{ nope".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn missing_file_is_reported_with_path() {
    let err = EngineConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn validation_rejects_bad_globals() {
    for cfg in [
        EngineConfig {
            zoom: 0.0,
            ..EngineConfig::default()
        },
        EngineConfig {
            head_decay_ms: f64::INFINITY,
            ..EngineConfig::default()
        },
        EngineConfig {
            safety_buffer_ms: -1.0,
            ..EngineConfig::default()
        },
    ] {
        assert!(cfg.validate().is_err());
    }
}

#[test]
fn resolve_applies_zoom() {
    let cfg = EngineConfig {
        zoom: 0.5,
        ..EngineConfig::default()
    };
    let p = cfg.resolve(TraceClass::Meta);
    assert_eq!(p.cell_size, 60.0);
    assert_eq!(p.tail_length, 180.0);
}
