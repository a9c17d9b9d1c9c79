use super::*;
use serde_json::json;

#[test]
fn defaults_follow_widget_attributes() {
    let cfg = IndicatorConfig::default();
    assert_eq!(cfg.wave_height, 20.0);
    assert_eq!(cfg.wave_width_rate, WaveWidthRate::Middle);
    assert_eq!(cfg.wave_hz.px_per_tick(), 10.0);
    assert_eq!(cfg.progress, 0);
    assert!(!cfg.progress_text_visible);
    assert_eq!(cfg.stroke_width, 0.0);
    assert_eq!(cfg.refresh_interval_ms, 20);
    cfg.validate().unwrap();
}

#[test]
fn empty_json_object_yields_defaults() {
    let cfg = IndicatorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, IndicatorConfig::default());
}

#[test]
fn parses_presets_and_numbers() {
    let cfg: IndicatorConfig = serde_json::from_value(json!({
        "wave_width_rate": "small",
        "wave_hz": "fast",
        "above_wave_color": "#3366ff",
        "progress_text_visible": true
    }))
    .unwrap();
    assert_eq!(cfg.wave_width_rate, WaveWidthRate::Small);
    assert_eq!(cfg.wave_hz, WaveSpeed::Fast);
    assert_eq!(cfg.above_wave_color, Rgba8::rgb(0x33, 0x66, 0xff));
    assert!(cfg.progress_text_visible);

    let cfg: IndicatorConfig =
        serde_json::from_value(json!({ "wave_width_rate": 1, "wave_hz": 7.5 })).unwrap();
    assert_eq!(cfg.wave_width_rate, WaveWidthRate::Large);
    assert_eq!(cfg.wave_hz.px_per_tick(), 7.5);
}

#[test]
fn rejects_out_of_range_width_rate() {
    assert!(serde_json::from_value::<IndicatorConfig>(json!({ "wave_width_rate": 4 })).is_err());
    assert!(
        serde_json::from_value::<IndicatorConfig>(json!({ "wave_width_rate": "huge" })).is_err()
    );
}

#[test]
fn rejects_unknown_fields() {
    let err = IndicatorConfig::from_json_str(r##"{ "wave_colour": "#fff" }"##).unwrap_err();
    assert!(matches!(err, WaveError::Serde(_)));
}

#[test]
fn validate_rejects_bad_numbers() {
    let cases = [
        IndicatorConfig {
            wave_height: -1.0,
            ..IndicatorConfig::default()
        },
        IndicatorConfig {
            wave_hz: WaveSpeed::Custom(0.0),
            ..IndicatorConfig::default()
        },
        IndicatorConfig {
            wave_hz: WaveSpeed::Custom(f64::NAN),
            ..IndicatorConfig::default()
        },
        IndicatorConfig {
            stroke_width: f64::INFINITY,
            ..IndicatorConfig::default()
        },
        IndicatorConfig {
            progress_text_size: -2.0,
            ..IndicatorConfig::default()
        },
        IndicatorConfig {
            refresh_interval_ms: 0,
            ..IndicatorConfig::default()
        },
    ];
    for cfg in cases {
        assert!(
            matches!(cfg.validate(), Err(WaveError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn json_roundtrip_keeps_presets_readable() {
    let cfg = IndicatorConfig {
        wave_hz: WaveSpeed::Slow,
        wave_width_rate: WaveWidthRate::Large,
        ..IndicatorConfig::default()
    };
    let text = cfg.to_json_pretty().unwrap();
    assert!(text.contains("\"slow\""));
    assert!(text.contains("\"large\""));
    assert_eq!(IndicatorConfig::from_json_str(&text).unwrap(), cfg);
}

#[test]
fn wave_view_carries_colors_and_speed() {
    let cfg = IndicatorConfig {
        wave_hz: WaveSpeed::Fast,
        ..IndicatorConfig::default()
    };
    let wave = cfg.wave();
    assert_eq!(wave.wave_hz, 15.0);
    assert_eq!(wave.above_color, cfg.above_wave_color);
    assert_eq!(wave.below_color, cfg.below_wave_color);
}
