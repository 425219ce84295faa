//! Business services containing domain logic and use cases.

pub mod cleanup;
pub mod rate_limit;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use cleanup::{CleanupConfig, CleanupResult, CleanupService};
pub use rate_limit::{FixedWindowLimiter, RateDecision};
pub use session::{SessionConfig, SessionService};
pub use token::{TokenCodec, TokenCodecConfig};
