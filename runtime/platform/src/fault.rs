//! Fault reporting
//!
//! A fault is a broken programming contract, not a resource shortage. The
//! reporter never returns: on the device the panic handler halts and the
//! watchdog resets the board, on the host the test harness sees a panic.

use core::fmt::Display;

/// Capability to report an unrecoverable invariant violation
pub trait FaultReporter {
    /// Report `condition` and stop normal execution
    fn report(&self, condition: &dyn Display) -> !;
}

impl<F: FaultReporter + ?Sized> FaultReporter for &F {
    fn report(&self, condition: &dyn Display) -> ! {
        (**self).report(condition)
    }
}

/// Reporter that logs the condition and panics
///
/// Release profiles build with `panic = "abort"`, so on the device this is a
/// hard stop.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicReporter;

impl FaultReporter for PanicReporter {
    #[cold]
    fn report(&self, condition: &dyn Display) -> ! {
        log::error!("fault: {}", condition);
        panic!("fault: {}", condition)
    }
}
