//! TIDE - Transport Write Path
//!
//! Wraps every outbound write issued during the handshake with fault
//! classification. A negative write result from the driver is either a
//! transient controller quirk (absorbed, same bytes resubmitted) or a
//! genuine transport failure (escalated exactly once).
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Handshake Session               │
//! ├─────────────────────────────────────────┤
//! │         Write Adapter                   │  ← This module
//! │   tolerance policy, partial writes      │
//! ├─────────────────────────────────────────┤
//! │         Transport driver                │
//! └─────────────────────────────────────────┘
//! ```

mod adapter;

pub use adapter::{WriteAdapter, WriteProgress};
