//! Core traits for the TIDE layer.
//!
//! The handshake session never depends on a concrete network driver, only on
//! the [`Transport`] capability set below.

use super::error::TransportError;

/// Abstract transport consumed by the handshake session.
///
/// Models the raw client interface of embedded network stacks: `write` and
/// `read` return a signed byte count, negative on failure. The signed
/// contract is kept on purpose rather than converted to `io::Result` at this
/// boundary, because classifying the sign of the write result is the whole
/// job of this crate — some controllers report a negative result for writes
/// that actually succeeded.
///
/// # Requirements
///
/// - `write` MUST NOT consume bytes it does not report as written; a
///   negative result means zero bytes were accepted.
/// - Calls are issued from a single logical thread per session; no
///   synchronization is required of implementations.
pub trait Transport {
    /// Open a connection to the target (host:port or driver-specific).
    fn connect(&mut self, target: &str) -> Result<(), TransportError>;

    /// Write bytes from `buf`. Returns the number of bytes accepted, or a
    /// negative value on failure.
    fn write(&mut self, buf: &[u8]) -> isize;

    /// Read bytes into `buf`. Returns the number of bytes read, or a
    /// negative value on failure.
    fn read(&mut self, buf: &mut [u8]) -> isize;

    /// Number of bytes available to read without blocking.
    fn available(&self) -> usize;

    /// Flush any buffered outbound data to the wire.
    fn flush(&mut self);

    /// Tear down the connection and release driver resources.
    fn stop(&mut self);

    /// Whether the transport currently holds an open connection.
    fn connected(&self) -> bool;
}
