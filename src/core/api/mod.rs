//! Access to the remote gym store
//!
//! Every call takes a [`Session`] explicitly. A missing credential fails
//! with [`ApiError::NotAuthenticated`] before any request is made, and a 401
//! from any endpoint clears the session and yields [`ApiError::Unauthorized`].

pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use error::ApiError;
pub use http::HttpStore;
pub use session::Session;
pub use store::{MemoryStore, SnapshotStore};
