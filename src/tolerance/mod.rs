//! Bounded absorption of false-negative write results.
//!
//! Some embedded Ethernet controllers (the W5500 family is the reference
//! case) occasionally report a negative write result during a TLS handshake
//! even though the bytes were transmitted or will go through on retry. The
//! [`ToleranceCounter`] tracks how many of these have been seen in a row for
//! one session, so the write path can distinguish a busy controller from an
//! actually broken link.
//!
//! The counter is per-session mutable state. Handshake writes are issued
//! synchronously, one at a time, by the session step function, so no
//! synchronization is needed.

/// Classification of a negative write result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Transient controller quirk: resubmit the same bytes, do not fail.
    Tolerate,
    /// Consecutive-fault budget exhausted: treat as a genuine failure.
    Escalate,
}

/// Consecutive false-negative write counter for one session.
///
/// Resets to zero on every successful write; escalates once the count passes
/// the configured threshold. The bound is what keeps the workaround from
/// masking real faults indefinitely.
#[derive(Debug, Clone)]
pub struct ToleranceCounter {
    /// Consecutive negative results since the last successful write.
    count: u32,
    /// Maximum consecutive negative results absorbed.
    threshold: u32,
}

impl ToleranceCounter {
    /// Create a counter with the given threshold (must be at least 1; the
    /// configuration layer guarantees this via `NonZeroU32`).
    pub fn new(threshold: u32) -> Self {
        debug_assert!(threshold >= 1);
        Self {
            count: 0,
            threshold,
        }
    }

    /// Record a successful write. Always resets the consecutive count.
    pub fn on_write_succeeded(&mut self) {
        self.count = 0;
    }

    /// Record a negative write result and classify it.
    ///
    /// Returns [`Decision::Tolerate`] while the new count stays within the
    /// threshold, [`Decision::Escalate`] once it passes it.
    pub fn on_write_failed(&mut self) -> Decision {
        self.count = self.count.saturating_add(1);
        if self.count <= self.threshold {
            Decision::Tolerate
        } else {
            Decision::Escalate
        }
    }

    /// Explicitly zero the counter (new handshake or session teardown).
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// Current consecutive fault count.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Configured threshold.
    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
