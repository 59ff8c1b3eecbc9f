//! # acr-trail
//!
//! Append-only decision trail for aicomplyr governance.
//!
//! Every recorded decision, detected conflict, and conflict resolution is
//! written as a [`TrailEvent`] to a JSONL file, one JSON object per line.
//! Events are hash-chained: each carries the SHA-256 of the preceding raw
//! line, so any edit to the file is detectable with
//! [`DecisionTrail::verify_chain`].
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use acr_trail::{DecisionTrail, TrailEvent, TrailKind};
//!
//! let mut trail = DecisionTrail::open("/tmp/trail.jsonl").unwrap();
//! let mut event = TrailEvent::new("scope-us", TrailKind::DecisionRecorded)
//!     .with_policy("eps-1.3")
//!     .with_actor("auto-check");
//! trail.append(&mut event).unwrap();
//! ```

pub mod error;
pub mod event;
pub mod hash;
pub mod trail;

pub use error::TrailError;
pub use event::{TrailEvent, TrailKind};
pub use trail::DecisionTrail;
