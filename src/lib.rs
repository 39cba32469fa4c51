// Flagline - defensive feature flag checks for Rust
//
// This library wraps three remote flag checks (by key, by key and date, by key
// and comparison value) behind a client that never propagates errors.

// Re-export core functionality
pub use flagline_client::*;

// Re-export optional crates
#[cfg(feature = "http")]
pub use flagline_http;

#[cfg(feature = "testing")]
pub use flagline_testing;

// Prelude for common imports
pub mod prelude {
    pub use flagline_client::prelude::*;

    #[cfg(feature = "http")]
    pub use flagline_http::{HttpEvaluator, HttpEvaluatorConfig};
}
