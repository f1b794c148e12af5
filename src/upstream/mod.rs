//! Upstream Google API access.
//!
//! # Data Flow
//! ```text
//! handler (validated BearerToken)
//!     → drive.rs (query projection for the endpoint)
//!     → client.rs (one GET, per-endpoint deadline, status check)
//!     → 200: body handed back for relay
//!     → other: UpstreamError carrying status + body
//! ```
//!
//! # Design Decisions
//! - Exactly one attempt per inbound request; no retries
//! - Deadlines are fixed per endpoint (see `Endpoint::timeout`)
//! - Only HTTP 200 counts as success; everything else is relayed as an error

pub mod client;
pub mod drive;
pub mod endpoint;
pub mod error;

pub use client::GoogleClient;
pub use drive::{ListFilesQuery, DEFAULT_PAGE_SIZE, FILE_METADATA_FIELDS, LIST_FILES_FIELDS};
pub use endpoint::Endpoint;
pub use error::{UpstreamError, UpstreamResult};
