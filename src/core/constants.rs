//! Calibration constants for the tolerance policy.
//!
//! The threshold default comes from observed fault bursts on affected
//! Ethernet controllers (W5500 family). It is a starting calibration, not a
//! guaranteed constant for every controller revision; deployments can
//! override it per session.

use std::num::NonZeroU32;

/// Default number of consecutive false-negative write results absorbed
/// before a fault is escalated.
///
/// Matches the empirically observed burst length of the spurious `-1`
/// returns during bursty handshake phases.
pub const DEFAULT_TOLERANCE_THRESHOLD: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Scratch buffer size used when draining the server's handshake flight
/// from the transport.
pub const READ_CHUNK_SIZE: usize = 512;
