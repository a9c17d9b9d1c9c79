use super::*;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn handles_are_unique_and_increasing() {
    let mut q = TimerQueue::new();
    let a = q.insert(ms(5));
    let b = q.insert(ms(5));
    let c = q.insert(ms(0));
    assert!(a < b && b < c);
    assert_eq!(q.len(), 3);
}

#[test]
fn pops_in_due_order_then_handle_order() {
    let mut q = TimerQueue::new();
    let late = q.insert(ms(20));
    let first = q.insert(ms(10));
    let second = q.insert(ms(10));
    assert_eq!(q.next_due(), Some(ms(10)));
    assert_eq!(q.pop_next(), Some((ms(10), first)));
    assert_eq!(q.pop_next(), Some((ms(10), second)));
    assert_eq!(q.pop_next(), Some((ms(20), late)));
    assert!(q.pop_next().is_none());
}

#[test]
fn pop_due_respects_now() {
    let mut q = TimerQueue::new();
    let h = q.insert(ms(15));
    assert!(q.pop_due(ms(14)).is_none());
    assert_eq!(q.pop_due(ms(15)), Some(h));
    assert!(q.is_empty());
}

#[test]
fn cancel_removes_only_that_handle() {
    let mut q = TimerQueue::new();
    let a = q.insert(ms(1));
    let b = q.insert(ms(2));
    assert!(q.cancel(a));
    assert!(!q.cancel(a));
    assert!(!q.contains(a));
    assert!(q.contains(b));
    assert!(!q.cancel(TickHandle(99)));
}
