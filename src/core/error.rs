//! Error types for the TIDE handshake layer.
//!
//! The taxonomy follows the propagation policy: transient write faults are
//! absorbed inside the write adapter and never appear here; everything in
//! this module is fatal to the session that raises it.

use thiserror::Error;

/// Errors reported at the transport boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection attempt failed.
    #[error("connect failed: {0}")]
    ConnectFailed(String),

    /// A write reported a negative result that was not (or no longer)
    /// tolerable.
    #[error("write failed with transport code {code}")]
    WriteFailed {
        /// Raw negative result returned by the transport.
        code: isize,
    },

    /// A read reported a negative result.
    #[error("read failed with transport code {code}")]
    ReadFailed {
        /// Raw negative result returned by the transport.
        code: isize,
    },

    /// Operation attempted on a transport that is not connected.
    #[error("transport is not connected")]
    NotConnected,
}

/// Fatal outcome of a mediated write.
///
/// Produced by the write adapter once a negative write result can no longer
/// be classified as a transient controller quirk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WriteFault {
    /// Plain transport failure (workaround disabled, or a non-write fault).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Consecutive tolerated write faults exceeded the configured budget.
    #[error("write fault tolerance exceeded after {threshold} consecutive failures")]
    ToleranceExceeded {
        /// The tolerance threshold that was exceeded.
        threshold: u32,
    },
}

/// Errors surfaced by the handshake session.
#[derive(Debug, Error)]
pub enum HandshakeError {
    /// Transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Consecutive false-negative writes exceeded the configured tolerance.
    #[error("write fault tolerance exceeded after {threshold} consecutive failures")]
    ToleranceExceeded {
        /// The tolerance threshold that was exceeded.
        threshold: u32,
    },

    /// The external record engine rejected input or failed to produce a
    /// record.
    #[error("record engine error: {0}")]
    Engine(String),

    /// The session already failed; no further I/O will be attempted on it.
    #[error("session is in the failed state")]
    SessionFailed,
}

impl From<WriteFault> for HandshakeError {
    fn from(fault: WriteFault) -> Self {
        match fault {
            WriteFault::Transport(e) => HandshakeError::Transport(e),
            WriteFault::ToleranceExceeded { threshold } => {
                HandshakeError::ToleranceExceeded { threshold }
            }
        }
    }
}
