//! Scheduler: `after_func(id, delay, f)` debounced by key. A
//! second call with the same id before the delay elapses cancels the
//! pending invocation and reschedules from the new call's delay.
//!
//! This doesn't own a thread of its own — `tick(now)` is driven by the
//! main loop, consistent with the single-threaded cooperative model:
//! nothing here spawns a timer thread, it's the caller's job to poll.

use std::collections::HashMap;
use std::time::{Duration, Instant};

type BoxedFn = Box<dyn FnOnce() + Send>;

struct Pending {
    fire_at: Instant,
    f: BoxedFn,
}

#[derive(Default)]
pub struct Scheduler {
    pending: HashMap<String, Pending>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `f` to run after `delay`. A prior pending call under the
    /// same `id` is replaced (its closure is dropped, never invoked).
    pub fn after_func(&mut self, id: impl Into<String>, delay: Duration, f: impl FnOnce() + Send + 'static) {
        self.pending.insert(id.into(), Pending { fire_at: Instant::now() + delay, f: Box::new(f) });
    }

    pub fn cancel(&mut self, id: &str) -> bool {
        self.pending.remove(id).is_some()
    }

    pub fn is_pending(&self, id: &str) -> bool {
        self.pending.contains_key(id)
    }

    /// Run and remove every pending closure whose `fire_at` has passed.
    /// Returns the ids that fired.
    pub fn tick(&mut self, now: Instant) -> Vec<String> {
        let ready: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, p)| p.fire_at <= now)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &ready {
            if let Some(p) = self.pending.remove(id) {
                (p.f)();
            }
        }
        ready
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
