//! Panic capture for the main loop: catch an invariant-breaking panic,
//! write it out as the `<editor>.panic` / `.panic-logs` / `.panic-gortns`
//! triple, then re-raise so the process still dies — capture is for
//! forensics, not recovery.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::PanicReport;

/// Abstraction over "write this named payload somewhere durable" —
/// filesystem I/O is an external collaborator, so the main loop is
/// handed a sink rather than reaching for `std::fs` directly.
pub trait PanicSink {
    fn write_file(&self, name: &str, contents: &str);
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Run `f`; if it panics, assemble a `PanicReport` (message plus
/// whatever debug ring buffer / task stack snapshots the caller already
/// had on hand), write the three report files through `sink`, and
/// resume unwinding so the panic still propagates.
pub fn capture_and_report<F, R>(
    editor_name: &str,
    debug_ring_buffer: Vec<String>,
    task_stacks: Vec<String>,
    sink: &dyn PanicSink,
    f: F,
) -> R
where
    F: FnOnce() -> R,
{
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    match result {
        Ok(value) => value,
        Err(payload) => {
            let mut report = PanicReport::new(panic_message(&payload));
            report.debug_ring_buffer = debug_ring_buffer;
            report.task_stacks = task_stacks;
            for (name, contents) in report.file_payloads(editor_name) {
                sink.write_file(&name, &contents);
            }
            panic::resume_unwind(payload);
        }
    }
}
