//! Device error channel
//!
//! Turns silent device-side failures into observable diagnostics. Reporting
//! never halts anything: callers decide whether a failed call is fatal.

use crate::log::LogSeverity;
use crate::prism::Engine;
use crate::render::Device;

/// Drain and discard every pending device error flag
pub fn clear_errors(device: &dyn Device) {
    while device.get_error().is_some() {}
}

/// Report the next pending device error, if any
///
/// Emits one Error diagnostic carrying the error code, the call description
/// and the call site, then returns `false`. Returns `true` when no error is
/// pending.
pub fn check_and_report(device: &dyn Device, call: &str, file: &'static str, line: u32) -> bool {
    match device.get_error() {
        Some(code) => {
            Engine::log_detailed(
                LogSeverity::Error,
                "prism::device",
                format!("[device error] ({}): {}", code, call),
                file,
                line,
            );
            false
        }
        None => true,
    }
}

/// Wrap a device call with clear, call, check-and-report
///
/// Evaluates to the wrapped expression's value.
///
/// # Example
///
/// ```no_run
/// # use prism_engine::prism::render::{Device, BufferTarget, BufferHandle};
/// # fn f(device: &dyn Device, handle: BufferHandle) {
/// prism_engine::device_call!(device, device.bind_buffer(BufferTarget::Array, handle));
/// # }
/// ```
#[macro_export]
macro_rules! device_call {
    ($device:expr, $call:expr) => {{
        $crate::prism::render::clear_errors($device);
        let value = $call;
        $crate::prism::render::check_and_report($device, stringify!($call), file!(), line!());
        value
    }};
}

#[cfg(test)]
#[path = "error_channel_tests.rs"]
mod tests;
