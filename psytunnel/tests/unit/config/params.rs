use super::*;

#[test]
fn defaults_match_documented_configuration() {
    let p = ParameterSet::default();
    assert_eq!(p.frame_count, 60);
    assert_eq!(p.rotation_direction, RotationDirection::Clockwise);
    assert_eq!(p.max_layers, 10);
    assert_eq!(p.global_zoom_mode, GlobalZoomMode::Oscillating);
    assert_eq!(p.working_size, Canvas::new(600, 600));
    p.validate().unwrap();
}

#[test]
fn json_uses_ui_strings_for_enums() {
    let p = ParameterSet::from_reader(
        r#"{
            "frame_count": 12,
            "rotation_direction": "Counter-Clockwise",
            "starfield_pattern": "Spiral",
            "wave_direction": "Vertical",
            "global_zoom_mode": "Linear"
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(p.frame_count, 12);
    assert_eq!(p.rotation_direction, RotationDirection::CounterClockwise);
    assert_eq!(p.starfield_pattern, StarfieldPattern::Spiral);
    assert_eq!(p.wave_direction, WaveDirection::Vertical);
    assert_eq!(p.global_zoom_mode, GlobalZoomMode::Linear);
    // Untouched fields keep their defaults.
    assert_eq!(p.scale_decay, 0.85);
}

#[test]
fn json_round_trips_through_to_json() {
    let mut p = ParameterSet::default();
    p.blur_radius = 0.4;
    p.wave_direction = WaveDirection::Horizontal;
    let back = ParameterSet::from_reader(p.to_json().unwrap().as_bytes()).unwrap();
    assert_eq!(back, p);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = ParameterSet::from_reader(r#"{ "num_frames": 3 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn validate_rejects_out_of_range_fields() {
    let bad = [
        ParameterSet {
            frame_count: 0,
            ..ParameterSet::default()
        },
        ParameterSet {
            scale_decay: 0.0,
            ..ParameterSet::default()
        },
        ParameterSet {
            scale_decay: 1.5,
            ..ParameterSet::default()
        },
        ParameterSet {
            blur_radius: -1.0,
            ..ParameterSet::default()
        },
        ParameterSet {
            hue_speed: f64::NAN,
            ..ParameterSet::default()
        },
        ParameterSet {
            working_size: Canvas::new(0, 10),
            ..ParameterSet::default()
        },
        ParameterSet {
            max_layers: u32::MAX,
            ..ParameterSet::default()
        },
    ];
    for p in bad {
        assert!(p.validate().is_err(), "{p:?}");
    }
}

#[test]
fn rotation_budget_rounds_to_whole_turns() {
    let mut p = ParameterSet {
        frame_count: 60,
        rotation_speed: 3.6,
        ..ParameterSet::default()
    };
    assert_eq!(p.total_rotation_degrees(), 720.0);
    assert_eq!(p.angle_per_frame(), 12.0);

    p.rotation_direction = RotationDirection::CounterClockwise;
    assert_eq!(p.angle_per_frame(), -12.0);

    p.rotation_direction = RotationDirection::None;
    assert_eq!(p.angle_per_frame(), 0.0);

    p.rotation_direction = RotationDirection::Clockwise;
    p.rotation_speed = 0.9;
    assert_eq!(p.total_rotation_degrees(), 0.0);
}

#[test]
fn layer_count_is_capped() {
    let at_cap = ParameterSet {
        max_layers: MAX_LAYERS,
        ..ParameterSet::default()
    };
    assert!(at_cap.validate().is_ok());

    let err = ParameterSet {
        max_layers: MAX_LAYERS + 1,
        ..ParameterSet::default()
    }
    .validate()
    .unwrap_err();
    assert!(matches!(err, TunnelError::Validation(_)));
    assert!(err.to_string().contains("max_layers"), "{err}");
}
