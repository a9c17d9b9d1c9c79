use super::*;
use crate::animation::scheduler::Clock;
use crate::animation::virtual_host::VirtualHost;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn running_driver(host: &mut VirtualHost) -> AnimationDriver {
    let mut d = AnimationDriver::new(ms(20), 10.0);
    d.start(host);
    d
}

#[test]
fn next_delay_subtracts_compute_time() {
    let d = AnimationDriver::new(ms(20), 10.0);
    assert_eq!(d.next_delay(ms(5)), ms(15));
    assert_eq!(d.next_delay(ms(20)), Duration::ZERO);
    assert_eq!(d.next_delay(ms(25)), Duration::ZERO);
}

#[test]
fn tick_reschedules_net_of_compute_cost() {
    let mut host = VirtualHost::new(ViewSize::square(100)).with_redraw_cost(ms(5));
    let mut d = running_driver(&mut host);

    let h = host.advance_to_next_tick().unwrap();
    assert_eq!(host.now(), Duration::ZERO);
    let out = d.on_tick(h, &mut host, |_, _| {});
    assert_eq!(out, TickOutcome::Ran { next_delay: ms(15) });
    assert_eq!(host.timers().next_due(), Some(ms(20)));

    let mut host = VirtualHost::new(ViewSize::square(100)).with_redraw_cost(ms(25));
    let mut d = running_driver(&mut host);
    let h = host.advance_to_next_tick().unwrap();
    let out = d.on_tick(h, &mut host, |_, _| {});
    assert_eq!(
        out,
        TickOutcome::Ran {
            next_delay: Duration::ZERO
        }
    );
    assert_eq!(host.timers().next_due(), Some(ms(25)));
}

#[test]
fn tick_advances_offsets_and_requests_redraw() {
    let mut host = VirtualHost::new(ViewSize::new(120, 80));
    let mut d = AnimationDriver::new(ms(20), 10.0);
    d.reset_offsets(PhaseOffsets::new(0.0, 320.0));
    d.start(&mut host);

    let mut seen = None;
    let h = host.advance_to_next_tick().unwrap();
    d.on_tick(h, &mut host, |offsets, size| seen = Some((offsets, size)));

    assert_eq!(
        seen,
        Some((PhaseOffsets::new(10.0, 330.0), ViewSize::new(120, 80)))
    );
    assert!(host.take_redraw());
    assert_eq!(d.ticks(), 1);
    assert_eq!(d.offsets(), PhaseOffsets::new(10.0, 330.0));
}

#[test]
fn only_one_tick_is_ever_pending() {
    let mut host = VirtualHost::new(ViewSize::square(100));
    let mut d = running_driver(&mut host);
    for _ in 0..50 {
        assert_eq!(host.timers().len(), 1);
        let h = host.advance_to_next_tick().unwrap();
        assert!(matches!(
            d.on_tick(h, &mut host, |_, _| {}),
            TickOutcome::Ran { .. }
        ));
    }
    assert_eq!(host.timers().len(), 1);
    assert_eq!(host.now(), ms(49 * 20));
}

#[test]
fn stop_cancels_pending_tick() {
    let mut host = VirtualHost::new(ViewSize::square(100));
    let mut d = running_driver(&mut host);
    assert!(d.stop(&mut host));
    assert_eq!(d.state(), DriverState::Idle);
    assert!(host.timers().is_empty());
    assert!(d.pending().is_none());
    assert!(!d.stop(&mut host));
}

#[test]
fn restart_leaves_exactly_one_chain() {
    let mut host = VirtualHost::new(ViewSize::square(100));
    let mut d = running_driver(&mut host);
    let h = host.advance_to_next_tick().unwrap();
    d.on_tick(h, &mut host, |_, _| {});

    d.stop(&mut host);
    d.start(&mut host);
    d.start(&mut host);
    assert_eq!(host.timers().len(), 1);
    assert_eq!(d.state(), DriverState::Running);
}

#[test]
fn stale_handles_are_ignored() {
    let mut host = VirtualHost::new(ViewSize::square(100));
    let mut d = running_driver(&mut host);
    let first = d.pending().unwrap();
    d.start(&mut host);

    let out = d.on_tick(first, &mut host, |_, _| panic!("stale tick must not recompute"));
    assert_eq!(out, TickOutcome::Stale);
    assert!(!host.take_redraw());
    assert_eq!(d.ticks(), 0);

    let current = d.pending().unwrap();
    d.stop(&mut host);
    assert_eq!(
        d.on_tick(current, &mut host, |_, _| {}),
        TickOutcome::Stale
    );
    assert!(host.timers().is_empty());
}
