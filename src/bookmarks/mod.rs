//! Bookmarks Module
//!
//! CRUD over bookmark records. Request bodies go through
//! [`validation`](crate::validation) before they reach a [`BookmarkStore`];
//! every record on its way out goes through
//! [`sanitize_bookmark`](crate::sanitize::sanitize_bookmark).
//!
//! # Usage
//!
//! ```rust,ignore
//! use bookmarks::bookmarks;
//!
//! let app = Router::new()
//!     .merge(bookmarks::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;
mod store;

pub use routes::routes;
pub use store::{BookmarkStore, MemoryStore};
