//! Request validation for bookmark create and update bodies.
//!
//! Everything here is pure: no store access, no logging. Handlers call
//! [`validate_new`] or [`validate_patch`] and map the returned
//! [`ValidationError`](crate::error::ValidationError) onto a 400.

mod bookmark;
pub mod rating;

pub use bookmark::{validate_new, validate_patch};
pub use rating::{DEFAULT_RATING, normalize_rating};
