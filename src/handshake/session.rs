//! Handshake session state machine.
//!
//! One [`HandshakeSession`] per TLS connection attempt. The session is a
//! cooperative step function: an external driver loop calls [`step`]
//! repeatedly, each call does a bounded amount of non-blocking I/O and
//! returns. A [`StepOutcome::Pending`] result means the transport could not
//! make progress this round; re-invocation timing and backoff belong to the
//! caller.
//!
//! [`step`]: HandshakeSession::step

use tracing::{debug, trace};

use super::config::SessionConfig;
use super::engine::RecordEngine;
use crate::core::constants::READ_CHUNK_SIZE;
use crate::core::{HandshakeError, Transport, TransportError};
use crate::transport::{WriteAdapter, WriteProgress};

/// Phase of the TLS client handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakePhase {
    /// Nothing sent yet.
    Idle,
    /// Transmitting the ClientHello flight.
    SendingClientHello,
    /// Draining the server's reply flight.
    AwaitingServerResponse,
    /// Transmitting the key-exchange flight.
    KeyExchange,
    /// Transmitting the Finished record.
    Finished,
    /// Handshake complete, session keys in place.
    Established,
    /// Terminal failure; no further I/O is attempted. Reachable from any
    /// phase.
    Failed,
}

/// Result of one successful call to [`HandshakeSession::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The state machine advanced.
    Progressed,
    /// No progress this round; call `step` again later with the same
    /// session.
    Pending,
    /// The handshake is established.
    Established,
}

/// Per-connection handshake session.
///
/// Holds a non-owning reference to the transport: the caller supplies and
/// owns the driver object, and the borrow is valid only for the session's
/// lifetime. All tolerance state lives inside the session and is discarded
/// with it; nothing leaks into a later handshake reusing the same transport.
#[derive(Debug)]
pub struct HandshakeSession<'t, T: Transport, E: RecordEngine> {
    transport: &'t mut T,
    engine: E,
    phase: HandshakePhase,
    adapter: WriteAdapter,
    /// Record currently being transmitted, if any.
    outbound: Option<Vec<u8>>,
}

impl<'t, T: Transport, E: RecordEngine> HandshakeSession<'t, T, E> {
    /// Create a session over an already-connected transport.
    ///
    /// Tolerance state is created here and reset points are exactly the
    /// session boundaries: [`reset`](Self::reset) and
    /// [`abort`](Self::abort).
    pub fn new(transport: &'t mut T, engine: E, config: SessionConfig) -> Self {
        let adapter = WriteAdapter::new(
            config.workaround_enabled,
            config.tolerance_threshold.get(),
        );
        Self {
            transport,
            engine,
            phase: HandshakePhase::Idle,
            adapter,
            outbound: None,
        }
    }

    /// Current handshake phase.
    pub fn phase(&self) -> HandshakePhase {
        self.phase
    }

    /// Whether the handshake has completed.
    pub fn is_established(&self) -> bool {
        self.phase == HandshakePhase::Established
    }

    /// Consecutive tolerated write faults since the last successful write.
    pub fn tolerated_faults(&self) -> u32 {
        self.adapter.fault_count()
    }

    /// Advance the handshake by one bounded, non-blocking unit of work.
    ///
    /// Once the session has failed, every further call returns
    /// [`HandshakeError::SessionFailed`] without touching the transport.
    pub fn step(&mut self) -> Result<StepOutcome, HandshakeError> {
        match self.phase {
            HandshakePhase::Failed => Err(HandshakeError::SessionFailed),
            HandshakePhase::Established => Ok(StepOutcome::Established),
            HandshakePhase::Idle => {
                if !self.transport.connected() {
                    self.phase = HandshakePhase::Failed;
                    return Err(TransportError::NotConnected.into());
                }
                self.begin_flight(HandshakePhase::SendingClientHello)?;
                Ok(StepOutcome::Progressed)
            }
            HandshakePhase::SendingClientHello
            | HandshakePhase::KeyExchange
            | HandshakePhase::Finished => self.drive_write(),
            HandshakePhase::AwaitingServerResponse => self.drive_read(),
        }
    }

    /// Abort the session: discard tolerance state and stop the transport.
    pub fn abort(&mut self) {
        self.adapter.reset();
        self.outbound = None;
        self.transport.stop();
        self.phase = HandshakePhase::Failed;
    }

    /// Prepare for a new handshake on the same transport.
    ///
    /// Clears the tolerance counter and any pending retry state; the phase
    /// returns to [`HandshakePhase::Idle`].
    pub fn reset(&mut self) {
        self.adapter.reset();
        self.outbound = None;
        self.phase = HandshakePhase::Idle;
    }

    /// Enter a sending phase and fetch its flight from the engine.
    fn begin_flight(&mut self, phase: HandshakePhase) -> Result<(), HandshakeError> {
        match self.engine.outbound_flight(phase) {
            Ok(record) => {
                trace!(?phase, len = record.len(), "entering sending phase");
                self.phase = phase;
                self.outbound = Some(record);
                Ok(())
            }
            Err(e) => {
                self.phase = HandshakePhase::Failed;
                Err(e.into())
            }
        }
    }

    /// Push the in-flight record through the write adapter.
    fn drive_write(&mut self) -> Result<StepOutcome, HandshakeError> {
        let Some(record) = self.outbound.as_deref() else {
            self.advance_after_flight()?;
            return Ok(StepOutcome::Progressed);
        };

        match self.adapter.write_step(&mut *self.transport, record) {
            Ok(WriteProgress::Complete) => {
                self.outbound = None;
                self.transport.flush();
                self.advance_after_flight()?;
                Ok(StepOutcome::Progressed)
            }
            Ok(WriteProgress::Pending) => Ok(StepOutcome::Pending),
            Err(fault) => {
                self.phase = HandshakePhase::Failed;
                Err(fault.into())
            }
        }
    }

    /// Phase transition after the current flight is fully on the wire.
    fn advance_after_flight(&mut self) -> Result<(), HandshakeError> {
        match self.phase {
            HandshakePhase::SendingClientHello => {
                self.phase = HandshakePhase::AwaitingServerResponse;
                Ok(())
            }
            HandshakePhase::KeyExchange => self.begin_flight(HandshakePhase::Finished),
            HandshakePhase::Finished => {
                debug!("handshake established");
                self.phase = HandshakePhase::Established;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Drain available server bytes into the engine.
    fn drive_read(&mut self) -> Result<StepOutcome, HandshakeError> {
        let available = self.transport.available();
        if available == 0 {
            return Ok(StepOutcome::Pending);
        }

        let mut buf = [0u8; READ_CHUNK_SIZE];
        let want = available.min(buf.len());
        let n = self.transport.read(&mut buf[..want]);
        if n < 0 {
            self.phase = HandshakePhase::Failed;
            return Err(TransportError::ReadFailed { code: n }.into());
        }

        match self.engine.ingest(&buf[..n as usize]) {
            Ok(true) => {
                self.begin_flight(HandshakePhase::KeyExchange)?;
                Ok(StepOutcome::Progressed)
            }
            Ok(false) => Ok(StepOutcome::Progressed),
            Err(e) => {
                self.phase = HandshakePhase::Failed;
                Err(e.into())
            }
        }
    }
}
