//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → bearer.rs (require `Authorization: Bearer ...`)
//!     → handler (token forwarded upstream unchanged)
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject before any upstream I/O
//! - The relay never inspects or validates the token itself; Google does

pub mod bearer;

pub use bearer::{BearerToken, MISSING_BEARER_MESSAGE};
