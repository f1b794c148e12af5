//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → handlers.rs (bearer guard, one upstream call)
//!     → response.rs (JSON / media passthrough) or error.rs (relayed failure)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use error::RelayError;
pub use request::X_REQUEST_ID;
pub use server::{build_router, AppState, HttpServer};
