//! Report transport trait and error types.

use controller_proto::OutputState;
use core::future::Future;

/// Error type for report transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputError {
    /// USB/communication I/O error.
    Io,
    /// Host not ready (e.g. USB not enumerated, viewer port closed).
    NotReady,
    /// Report dropped (e.g. the console stopped polling mid-exchange).
    Dropped,
    /// Endpoint busy.
    Busy,
    /// The console sent something the transport cannot answer.
    Protocol,
}

/// Async trait for the wire side of a protocol backend.
///
/// A transport owns the timing of its protocol: a joybus transport waits
/// for the console's poll and answers it, a USB transport waits for the
/// endpoint. One call sends exactly one report; failed reports are not
/// retried.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportTransport {
    /// Transmit one report.
    fn send(&mut self, report: &OutputState) -> impl Future<Output = Result<(), OutputError>>;

    /// Check if the host side is ready to accept data.
    fn is_ready(&self) -> bool;
}
