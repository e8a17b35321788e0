//! TIDE - Handshake Session
//!
//! The per-connection state machine that drives a TLS client handshake over
//! an abstract [`Transport`], routing every outbound write through the
//! fault-tolerant write path. Provides:
//!
//! - **Session state machine**: [`HandshakeSession`] with the
//!   `Idle -> SendingClientHello -> AwaitingServerResponse -> KeyExchange ->
//!   Finished -> Established` phase sequence and a `Failed` sink.
//! - **Engine seam**: [`RecordEngine`], the boundary to the external TLS
//!   record engine.
//! - **Configuration**: [`SessionConfig`] and its builder.
//!
//! [`Transport`]: crate::core::Transport

mod config;
mod engine;
mod session;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use engine::{EngineError, RecordEngine};
pub use session::{HandshakePhase, HandshakeSession, StepOutcome};
