use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn fires_after_delay_elapses() {
    let mut s = Scheduler::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let c = counter.clone();
    s.after_func("hl", Duration::from_millis(1), move || {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let fired = s.tick(Instant::now() + Duration::from_millis(2));
    assert_eq!(fired, vec!["hl".to_string()]);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn rescheduling_same_id_cancels_the_pending_closure() {
    let mut s = Scheduler::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let c1 = counter.clone();
    s.after_func("hl", Duration::from_millis(100), move || {
        c1.fetch_add(1, Ordering::SeqCst);
    });
    let c2 = counter.clone();
    s.after_func("hl", Duration::from_millis(1), move || {
        c2.fetch_add(10, Ordering::SeqCst);
    });
    let fired = s.tick(Instant::now() + Duration::from_millis(5));
    assert_eq!(fired, vec!["hl".to_string()]);
    assert_eq!(counter.load(Ordering::SeqCst), 10);
}

#[test]
fn cancel_removes_without_firing() {
    let mut s = Scheduler::new();
    s.after_func("rebuild", Duration::from_millis(1), || panic!("should not fire"));
    assert!(s.cancel("rebuild"));
    let fired = s.tick(Instant::now() + Duration::from_millis(5));
    assert!(fired.is_empty());
}

#[test]
fn tick_ignores_not_yet_due_entries() {
    let mut s = Scheduler::new();
    s.after_func("completion", Duration::from_millis(300), || {});
    let fired = s.tick(Instant::now());
    assert!(fired.is_empty());
    assert!(s.is_pending("completion"));
}
