//! The fault-tolerant write path.
//!
//! Every outbound record the handshake session sends goes through
//! [`WriteAdapter::write_step`], which applies the tolerance policy to
//! negative write results and tracks partial-write progress so that
//! resubmission is exact: the same unacknowledged bytes, never reordered,
//! merged, or duplicated.

use tracing::{debug, warn};

use crate::core::{Transport, TransportError, WriteFault};
use crate::tolerance::{Decision, ToleranceCounter};

/// Progress of the in-flight outbound record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteProgress {
    /// The whole record has been accepted by the transport.
    Complete,
    /// Not all bytes were accepted this round; call `write_step` again with
    /// the same record on the next scheduling opportunity.
    Pending,
}

/// Mediates outbound writes issued during the handshake.
///
/// Owns the per-session tolerance state and the offset into the record
/// currently being transmitted. One adapter per session; the caller must
/// keep submitting the same record bytes until [`WriteProgress::Complete`]
/// is returned.
#[derive(Debug)]
pub struct WriteAdapter {
    counter: ToleranceCounter,
    workaround_enabled: bool,
    /// Bytes of the in-flight record already accepted by the transport.
    offset: usize,
}

impl WriteAdapter {
    /// Create an adapter with the session's workaround flag and threshold.
    pub fn new(workaround_enabled: bool, threshold: u32) -> Self {
        Self {
            counter: ToleranceCounter::new(threshold),
            workaround_enabled,
            offset: 0,
        }
    }

    /// Submit the unwritten portion of `record` to the transport and
    /// classify the result.
    ///
    /// - Full or partial acceptance advances the internal offset and resets
    ///   the tolerance counter (the controller demonstrably took bytes).
    /// - A zero result is plain backpressure: no counter change, try again.
    /// - A negative result is either absorbed (workaround enabled, within
    ///   budget) or returned as a fatal [`WriteFault`].
    pub fn write_step<T: Transport>(
        &mut self,
        transport: &mut T,
        record: &[u8],
    ) -> Result<WriteProgress, WriteFault> {
        let remaining = &record[self.offset..];
        if remaining.is_empty() {
            self.offset = 0;
            return Ok(WriteProgress::Complete);
        }

        let result = transport.write(remaining);

        if result < 0 {
            if !self.workaround_enabled {
                return Err(TransportError::WriteFailed { code: result }.into());
            }
            return match self.counter.on_write_failed() {
                Decision::Tolerate => {
                    debug!(
                        code = result,
                        count = self.counter.count(),
                        threshold = self.counter.threshold(),
                        "absorbed false-negative write result"
                    );
                    // Zero bytes accepted this round; the exact same
                    // remainder is resubmitted on the next step.
                    Ok(WriteProgress::Pending)
                }
                Decision::Escalate => {
                    warn!(
                        code = result,
                        threshold = self.counter.threshold(),
                        "consecutive write faults exceeded tolerance, escalating"
                    );
                    Err(WriteFault::ToleranceExceeded {
                        threshold: self.counter.threshold(),
                    })
                }
            };
        }

        if result == 0 {
            return Ok(WriteProgress::Pending);
        }

        let written = (result as usize).min(remaining.len());
        self.counter.on_write_succeeded();
        self.offset += written;

        if self.offset == record.len() {
            self.offset = 0;
            Ok(WriteProgress::Complete)
        } else {
            Ok(WriteProgress::Pending)
        }
    }

    /// Whether a record is partially transmitted.
    pub fn in_flight(&self) -> bool {
        self.offset > 0
    }

    /// Consecutive tolerated faults since the last successful write.
    pub fn fault_count(&self) -> u32 {
        self.counter.count()
    }

    /// Discard tolerance and partial-write state (session reset/teardown).
    pub fn reset(&mut self) {
        self.counter.reset();
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Transport that replays a scripted list of write results.
    struct ScriptedTransport {
        /// Result returned per write call, in order; repeats the last entry
        /// once exhausted.
        script: Vec<isize>,
        calls: usize,
        /// Byte slices the transport was asked to write.
        submitted: Vec<Vec<u8>>,
    }

    impl ScriptedTransport {
        fn new(script: Vec<isize>) -> Self {
            Self {
                script,
                calls: 0,
                submitted: Vec::new(),
            }
        }
    }

    impl Transport for ScriptedTransport {
        fn connect(&mut self, _target: &str) -> Result<(), TransportError> {
            Ok(())
        }

        fn write(&mut self, buf: &[u8]) -> isize {
            self.submitted.push(buf.to_vec());
            let idx = self.calls.min(self.script.len() - 1);
            self.calls += 1;
            self.script[idx]
        }

        fn read(&mut self, _buf: &mut [u8]) -> isize {
            0
        }

        fn available(&self) -> usize {
            0
        }

        fn flush(&mut self) {}

        fn stop(&mut self) {}

        fn connected(&self) -> bool {
            true
        }
    }

    const RECORD: &[u8] = b"client hello record";

    #[test]
    fn test_full_write_completes() {
        let mut transport = ScriptedTransport::new(vec![RECORD.len() as isize]);
        let mut adapter = WriteAdapter::new(false, 5);

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Complete);
        assert_eq!(adapter.fault_count(), 0);
        assert!(!adapter.in_flight());
    }

    #[test]
    fn test_negative_fatal_without_workaround() {
        let mut transport = ScriptedTransport::new(vec![-1]);
        let mut adapter = WriteAdapter::new(false, 5);

        let fault = adapter.write_step(&mut transport, RECORD).unwrap_err();
        assert_eq!(
            fault,
            WriteFault::Transport(TransportError::WriteFailed { code: -1 })
        );
    }

    #[test]
    fn test_negatives_within_budget_are_absorbed() {
        let mut transport =
            ScriptedTransport::new(vec![-1, -1, -1, -1, -1, RECORD.len() as isize]);
        let mut adapter = WriteAdapter::new(true, 5);

        for _ in 0..5 {
            let progress = adapter.write_step(&mut transport, RECORD).unwrap();
            assert_eq!(progress, WriteProgress::Pending);
        }
        assert_eq!(adapter.fault_count(), 5);

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Complete);
        assert_eq!(adapter.fault_count(), 0);
    }

    #[test]
    fn test_escalates_past_budget() {
        let mut transport = ScriptedTransport::new(vec![-1]);
        let mut adapter = WriteAdapter::new(true, 5);

        for _ in 0..5 {
            adapter.write_step(&mut transport, RECORD).unwrap();
        }

        let fault = adapter.write_step(&mut transport, RECORD).unwrap_err();
        assert_eq!(fault, WriteFault::ToleranceExceeded { threshold: 5 });
        assert_eq!(transport.calls, 6);
    }

    #[test]
    fn test_resubmits_identical_bytes_after_tolerate() {
        let mut transport = ScriptedTransport::new(vec![-1, RECORD.len() as isize]);
        let mut adapter = WriteAdapter::new(true, 5);

        adapter.write_step(&mut transport, RECORD).unwrap();
        adapter.write_step(&mut transport, RECORD).unwrap();

        // Same bytes both times, verbatim
        assert_eq!(transport.submitted[0], RECORD);
        assert_eq!(transport.submitted[1], RECORD);
    }

    #[test]
    fn test_partial_write_resubmits_remainder_only() {
        let mut transport = ScriptedTransport::new(vec![7, (RECORD.len() - 7) as isize]);
        let mut adapter = WriteAdapter::new(true, 5);

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Pending);
        assert!(adapter.in_flight());

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Complete);

        assert_eq!(transport.submitted[0], RECORD);
        assert_eq!(transport.submitted[1], &RECORD[7..]);
    }

    #[test]
    fn test_partial_write_never_increments_counter() {
        let mut transport = ScriptedTransport::new(vec![1, 1, 1]);
        let mut adapter = WriteAdapter::new(true, 5);

        adapter.write_step(&mut transport, RECORD).unwrap();
        adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(adapter.fault_count(), 0);
    }

    #[test]
    fn test_partial_write_breaks_fault_run() {
        // Threshold 2: a partial acceptance between faults restarts the run
        let mut transport = ScriptedTransport::new(vec![-1, 3, -1, -1, 16]);
        let mut adapter = WriteAdapter::new(true, 2);

        assert_eq!(
            adapter.write_step(&mut transport, RECORD).unwrap(),
            WriteProgress::Pending
        );
        assert_eq!(adapter.fault_count(), 1);

        // Partial write of 3 bytes resets the counter
        adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(adapter.fault_count(), 0);

        adapter.write_step(&mut transport, RECORD).unwrap();
        adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(adapter.fault_count(), 2);

        // 16 remaining bytes accepted, record complete
        assert_eq!(
            adapter.write_step(&mut transport, RECORD).unwrap(),
            WriteProgress::Complete
        );
        assert_eq!(adapter.fault_count(), 0);
    }

    #[test]
    fn test_zero_result_is_backpressure() {
        let mut transport = ScriptedTransport::new(vec![0, RECORD.len() as isize]);
        let mut adapter = WriteAdapter::new(true, 5);

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Pending);
        assert_eq!(adapter.fault_count(), 0);

        let progress = adapter.write_step(&mut transport, RECORD).unwrap();
        assert_eq!(progress, WriteProgress::Complete);
    }

    #[test]
    fn test_reset_clears_partial_and_faults() {
        let mut transport = ScriptedTransport::new(vec![5, -1]);
        let mut adapter = WriteAdapter::new(true, 5);

        adapter.write_step(&mut transport, RECORD).unwrap();
        adapter.write_step(&mut transport, RECORD).unwrap();
        assert!(adapter.in_flight());
        assert_eq!(adapter.fault_count(), 1);

        adapter.reset();
        assert!(!adapter.in_flight());
        assert_eq!(adapter.fault_count(), 0);
    }

    #[test]
    fn test_empty_record_is_immediately_complete() {
        let mut transport = ScriptedTransport::new(vec![-1]);
        let mut adapter = WriteAdapter::new(true, 5);

        let progress = adapter.write_step(&mut transport, &[]).unwrap();
        assert_eq!(progress, WriteProgress::Complete);
        assert_eq!(transport.calls, 0);
    }
}
