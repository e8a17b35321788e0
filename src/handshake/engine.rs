//! Seam to the external TLS record engine.
//!
//! The cryptographic handshake (key exchange, certificates, record
//! encryption) lives outside this crate and is assumed correct. The session
//! only moves the engine's bytes: it asks for the outbound flight of each
//! sending phase and feeds it whatever the transport yields while waiting
//! for the server.

use thiserror::Error;

use super::session::HandshakePhase;
use crate::core::HandshakeError;

/// Error reported by the external record engine. Always fatal to the
/// session.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EngineError {
    message: String,
}

impl EngineError {
    /// Create an engine error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<EngineError> for HandshakeError {
    fn from(e: EngineError) -> Self {
        HandshakeError::Engine(e.message)
    }
}

/// The record engine driven by a [`HandshakeSession`].
///
/// Implementations produce already-encoded record bytes; the session never
/// inspects, re-encodes, or splits them. If transmission stalls, the exact
/// same bytes are resubmitted to the transport until accepted.
///
/// [`HandshakeSession`]: super::HandshakeSession
pub trait RecordEngine {
    /// Encoded outbound flight for a sending phase
    /// ([`SendingClientHello`], [`KeyExchange`], or [`Finished`]).
    ///
    /// Called once per phase; the session buffers the returned bytes and
    /// handles retries itself. An empty flight is valid and completes the
    /// phase without touching the transport.
    ///
    /// [`SendingClientHello`]: HandshakePhase::SendingClientHello
    /// [`KeyExchange`]: HandshakePhase::KeyExchange
    /// [`Finished`]: HandshakePhase::Finished
    fn outbound_flight(&mut self, phase: HandshakePhase) -> Result<Vec<u8>, EngineError>;

    /// Feed bytes read from the transport while awaiting the server's
    /// flight.
    ///
    /// Returns `true` once the server flight is complete and the handshake
    /// may advance to the key exchange.
    fn ingest(&mut self, data: &[u8]) -> Result<bool, EngineError>;
}
