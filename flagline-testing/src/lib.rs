//! Testing utilities for Flagline
//!
//! Stand-ins for the remote evaluation service and the diagnostic sink, so
//! flag checks can be exercised without a live backend.

pub mod mock;
pub mod sink;

pub use mock::{MockEvaluator, RecordedCall};
pub use sink::RecordingSink;
