//! pence-core
//!
//! Business logic for the budget client: the per-page item caches, the
//! overview cost cache, the forecast engine that derives spend and
//! predicted-balance columns, and the reconciler that keeps all of it
//! consistent when a line item is added or edited.
//!
//! Depends on pence-domain. No networking and no terminal I/O; the remote
//! service is reached only through the [`remote::RemoteStore`] trait.

pub mod caches;
pub mod error;
pub mod forecast;
pub mod form;
pub mod overview;
pub mod page_cache;
pub mod reconciler;
pub mod remote;

pub use caches::*;
pub use error::{CoreError, Result};
pub use forecast::*;
pub use form::*;
pub use overview::*;
pub use page_cache::*;
pub use reconciler::*;
pub use remote::*;
