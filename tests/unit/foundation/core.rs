use super::*;
use serde_json::json;

#[test]
fn view_size_diameter_is_smaller_side() {
    assert_eq!(ViewSize::new(300, 200).diameter(), 200);
    assert_eq!(ViewSize::new(120, 400).diameter(), 120);
    assert!(ViewSize::new(0, 50).is_empty());
    assert!(!ViewSize::new(50, 0).is_empty());
}

#[test]
fn clip_circle_sits_in_top_left_square() {
    let c = ViewSize::new(300, 200).clip_circle();
    assert_eq!(c.center, Point::new(100.0, 100.0));
    assert_eq!(c.radius, 100.0);
}

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Rgba8 = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Rgba8::rgb(255, 0, 0));

    let c: Rgba8 = serde_json::from_value(json!("0000FF80")).unwrap();
    assert_eq!(c, Rgba8::new(0, 0, 255, 0x80));

    assert!(serde_json::from_value::<Rgba8>(json!("#12345")).is_err());
    assert!(serde_json::from_value::<Rgba8>(json!("#gg0000")).is_err());
}

#[test]
fn parses_object_and_array() {
    let c: Rgba8 = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Rgba8::new(1, 2, 3, 255));

    let c: Rgba8 = serde_json::from_value(json!([10, 20, 30, 40])).unwrap();
    assert_eq!(c, Rgba8::new(10, 20, 30, 40));

    assert!(serde_json::from_value::<Rgba8>(json!([1, 2])).is_err());
}

#[test]
fn serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(Rgba8::rgb(0x88, 0xff, 0x00)).unwrap(),
        json!("#88ff00")
    );
    assert_eq!(
        serde_json::to_value(Rgba8::new(1, 2, 3, 4)).unwrap(),
        json!("#01020304")
    );
}

#[test]
fn premul_rounds_to_nearest() {
    assert_eq!(Rgba8::rgb(200, 100, 0).to_premul(), [200, 100, 0, 255]);
    assert_eq!(Rgba8::new(255, 128, 0, 128).to_premul(), [128, 64, 0, 128]);
    assert_eq!(Rgba8::TRANSPARENT.to_premul(), [0, 0, 0, 0]);
}

#[test]
fn fps_from_interval_stays_rational() {
    let fps = Fps::from_interval(Duration::from_millis(30)).unwrap();
    assert_eq!(fps, Fps { num: 100, den: 3 });
    assert_eq!(fps.to_string(), "100/3");
    assert!((fps.as_f64() - 33.333).abs() < 0.001);

    assert_eq!(
        Fps::from_interval(Duration::from_millis(20)).unwrap(),
        Fps { num: 50, den: 1 }
    );
    assert!(Fps::from_interval(Duration::from_micros(500)).is_err());
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn rgba_len_does_not_wrap() {
    assert_eq!(rgba_len(3, 2), Some(24));
    assert_eq!(rgba_len(33_000, 33_000), Some(4_356_000_000));
}
