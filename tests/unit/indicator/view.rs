use super::*;
use crate::animation::scheduler::Clock;
use crate::animation::virtual_host::VirtualHost;
use crate::foundation::core::Rgba8;
use std::time::Duration;

fn view() -> WaveProgress {
    WaveProgress::new(IndicatorConfig::default()).unwrap()
}

fn shown(size: ViewSize) -> (WaveProgress, VirtualHost) {
    let mut host = VirtualHost::new(size);
    let mut v = view();
    v.on_resize(size);
    v.on_visibility_changed(Visibility::Visible, &mut host);
    v.on_focus_changed(true, &mut host);
    (v, host)
}

fn run_tick(v: &mut WaveProgress, host: &mut VirtualHost) -> TickOutcome {
    let h = host.advance_to_next_tick().expect("a tick is pending");
    v.on_tick(h, host)
}

#[test]
fn rejects_invalid_config() {
    let cfg = IndicatorConfig {
        refresh_interval_ms: 0,
        ..IndicatorConfig::default()
    };
    assert!(WaveProgress::new(cfg).is_err());
}

#[test]
fn initial_progress_comes_from_config_and_is_clamped() {
    let v = WaveProgress::new(IndicatorConfig {
        progress: 250,
        ..IndicatorConfig::default()
    })
    .unwrap();
    assert_eq!(v.progress(), 100);
}

#[test]
fn becoming_visible_initializes_and_starts() {
    let (v, host) = shown(ViewSize::square(200));
    assert_eq!(v.driver_state(), DriverState::Running);
    let m = v.metrics().unwrap();
    assert_eq!(m.wavelength, 800.0);
    assert_eq!(v.offsets(), PhaseOffsets::new(0.0, 320.0));
    assert_eq!(host.timers().len(), 1);
}

#[test]
fn zero_size_defers_start_until_next_event() {
    let mut host = VirtualHost::new(ViewSize::ZERO);
    let mut v = view();
    v.on_visibility_changed(Visibility::Visible, &mut host);
    v.on_focus_changed(true, &mut host);
    assert_eq!(v.driver_state(), DriverState::Idle);
    assert!(v.metrics().is_none());
    assert!(host.timers().is_empty());

    host.set_size(ViewSize::new(200, 200));
    v.on_focus_changed(true, &mut host);
    assert_eq!(v.driver_state(), DriverState::Running);
    assert_eq!(v.metrics().unwrap().wavelength, 800.0);
    assert_eq!(host.timers().len(), 1);
}

#[test]
fn focus_without_visibility_does_not_start() {
    let mut host = VirtualHost::new(ViewSize::square(200));
    let mut v = view();
    v.on_focus_changed(true, &mut host);
    assert_eq!(v.driver_state(), DriverState::Idle);
    assert!(host.timers().is_empty());
}

#[test]
fn tick_produces_geometry_at_current_progress() {
    let (mut v, mut host) = shown(ViewSize::square(200));
    v.set_progress(50);
    assert_eq!(v.wave_top_height(), 100.0);
    assert!(matches!(
        run_tick(&mut v, &mut host),
        TickOutcome::Ran { .. }
    ));
    assert!(host.take_redraw());

    let g = v.geometry().unwrap();
    assert_eq!(g.wave_top, 100.0);
    assert_eq!(g.offsets, PhaseOffsets::new(10.0, 330.0));
    let omega = std::f64::consts::TAU / 800.0;
    assert_eq!(g.above.samples[0].y, 20.0 * (omega * 10.0).sin() + 100.0);
}

#[test]
fn hidden_then_visible_keeps_a_single_chain() {
    let (mut v, mut host) = shown(ViewSize::square(120));
    run_tick(&mut v, &mut host);
    run_tick(&mut v, &mut host);

    v.on_visibility_changed(Visibility::Hidden, &mut host);
    assert_eq!(v.driver_state(), DriverState::Idle);
    assert!(host.timers().is_empty());

    v.on_visibility_changed(Visibility::Visible, &mut host);
    v.on_focus_changed(true, &mut host);
    v.on_visibility_changed(Visibility::Visible, &mut host);
    assert_eq!(v.driver_state(), DriverState::Running);
    assert_eq!(host.timers().len(), 1);
    assert_eq!(host.timers().len(), usize::from(v.pending_tick().is_some()));
}

#[test]
fn detach_cancels_and_late_ticks_are_stale() {
    let (mut v, mut host) = shown(ViewSize::square(120));
    let handle = v.pending_tick().unwrap();
    v.on_detached(&mut host);
    assert!(host.timers().is_empty());
    assert_eq!(v.on_tick(handle, &mut host), TickOutcome::Stale);
    assert!(!host.take_redraw());
}

#[test]
fn cadence_holds_at_fifty_hertz() {
    let (mut v, mut host) = shown(ViewSize::square(100));
    for _ in 0..51 {
        run_tick(&mut v, &mut host);
    }
    assert_eq!(host.now(), Duration::from_millis(1000));
    assert_eq!(host.redraws(), 51);
}

#[test]
fn resize_moves_water_line_without_remeasuring() {
    let (mut v, mut host) = shown(ViewSize::square(200));
    v.set_progress(25);
    host.set_size(ViewSize::new(200, 400));
    v.on_resize(ViewSize::new(200, 400));
    assert_eq!(v.wave_top_height(), 300.0);
    run_tick(&mut v, &mut host);
    assert_eq!(v.geometry().unwrap().wave_top, 300.0);
    assert_eq!(v.metrics().unwrap().wavelength, 800.0);
}

#[test]
fn tick_refreshes_water_line_from_host_size() {
    let (mut v, mut host) = shown(ViewSize::square(200));
    v.set_progress(50);
    host.set_size(ViewSize::new(200, 300));
    assert_eq!(v.wave_top_height(), 100.0);

    run_tick(&mut v, &mut host);
    assert_eq!(v.geometry().unwrap().wave_top, 150.0);
    assert_eq!(v.wave_top_height(), 150.0);
}

#[test]
fn wave_config_carries_configured_colors() {
    let cfg = IndicatorConfig {
        above_wave_color: Rgba8::rgb(1, 2, 3),
        below_wave_color: Rgba8::rgb(4, 5, 6),
        ..IndicatorConfig::default()
    };
    let v = WaveProgress::new(cfg).unwrap();
    assert_eq!(v.wave_config().above_color, Rgba8::rgb(1, 2, 3));
    assert_eq!(v.wave_config().below_color, Rgba8::rgb(4, 5, 6));
}
