//! # TIDE
//!
//! **T**olerant **I**/O **D**uring **E**stablishment
//!
//! TIDE is a transport-resilience layer for TLS client handshakes on
//! resource-constrained network hardware. Some embedded Ethernet controllers
//! (the W5500 family is the reference case) occasionally report a negative
//! write result during a handshake even though the bytes were transmitted or
//! will go through on retry. Treated naively, that false negative aborts a
//! connection that is actually healthy.
//!
//! TIDE sits between the TLS record engine and the network driver and
//! provides:
//!
//! - **Fault classification**: a negative write result is either a transient
//!   controller quirk (absorbed, same bytes resubmitted verbatim) or a
//!   genuine transport failure (escalated exactly once)
//! - **Bounded tolerance**: a per-session counter caps consecutive absorbed
//!   faults, so the workaround never masks a really broken link
//! - **Cooperative scheduling**: a non-blocking step function driven by the
//!   caller's loop, no internal threads or blocking waits
//!
//! ## Modules
//!
//! - [`core`]: the [`Transport`](core::Transport) capability set, errors,
//!   and calibration constants
//! - [`tolerance`]: the consecutive-fault counter and its decision rule
//! - [`transport`]: the write adapter applying the tolerance policy
//! - [`handshake`]: the session state machine and record-engine seam
//!
//! ## Example Usage
//!
//! ```rust
//! use tide_tls::prelude::*;
//!
//! // Minimal in-memory transport standing in for a network driver.
//! struct LoopTransport {
//!     connected: bool,
//!     served: bool,
//! }
//!
//! impl Transport for LoopTransport {
//!     fn connect(&mut self, _target: &str) -> Result<(), TransportError> {
//!         self.connected = true;
//!         Ok(())
//!     }
//!     fn write(&mut self, buf: &[u8]) -> isize {
//!         buf.len() as isize
//!     }
//!     fn read(&mut self, buf: &mut [u8]) -> isize {
//!         self.served = true;
//!         buf[0] = 0;
//!         1
//!     }
//!     fn available(&self) -> usize {
//!         if self.served { 0 } else { 1 }
//!     }
//!     fn flush(&mut self) {}
//!     fn stop(&mut self) {
//!         self.connected = false;
//!     }
//!     fn connected(&self) -> bool {
//!         self.connected
//!     }
//! }
//!
//! // Stand-in for the external TLS record engine.
//! struct StubEngine;
//!
//! impl RecordEngine for StubEngine {
//!     fn outbound_flight(&mut self, _phase: HandshakePhase) -> Result<Vec<u8>, EngineError> {
//!         Ok(vec![0x16, 0x03, 0x03])
//!     }
//!     fn ingest(&mut self, _data: &[u8]) -> Result<bool, EngineError> {
//!         Ok(true)
//!     }
//! }
//!
//! let mut transport = LoopTransport { connected: false, served: false };
//! transport.connect("example.com:443").unwrap();
//!
//! let config = SessionConfig::builder().workaround_enabled(true).build();
//! let mut session = HandshakeSession::new(&mut transport, StubEngine, config);
//!
//! while !session.is_established() {
//!     session.step().unwrap();
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod core;
pub mod handshake;
pub mod tolerance;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    // Core trait, errors, and constants
    pub use crate::core::*;

    // Handshake session and engine seam
    pub use crate::handshake::{
        EngineError, HandshakePhase, HandshakeSession, RecordEngine, SessionConfig,
        SessionConfigBuilder, StepOutcome,
    };

    // Tolerance policy
    pub use crate::tolerance::{Decision, ToleranceCounter};

    // Write path
    pub use crate::transport::{WriteAdapter, WriteProgress};
}
