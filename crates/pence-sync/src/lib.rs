//! pence-sync
//!
//! The remote REST boundary: wire DTOs for the bulk-fetch and item
//! endpoints, translation of bulk payloads into cache snapshots, and the
//! blocking HTTP client implementing [`pence_core::RemoteStore`].

pub mod client;
pub mod dto;
pub mod error;
pub mod translate;

pub use client::ApiClient;
pub use error::SyncError;
pub use translate::translate;
