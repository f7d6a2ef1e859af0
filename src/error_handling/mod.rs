//! Error taxonomy for the batch run.
//!
//! Failures fall into two tiers:
//! - **Fatal to the batch**: initialization problems and any
//!   [`GeocodeError`] -- an API-level failure (bad credential, quota,
//!   transport) will recur for every subsequent row, so the run stops.
//! - **Recoverable per row**: not-found lookups, empty or incomplete
//!   extractions, and insert conflicts/failures. These are reported as
//!   outcome values, never as errors, and the batch continues.

mod types;

pub use types::{DatabaseError, GeocodeError, InitializationError, InputError};
