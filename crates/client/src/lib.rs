//! Car Finder client runtime.
//!
//! The pieces a front end needs beyond the pure pipeline:
//!
//! - [`wishlist`] - the persisted wishlist store with its two-channel
//!   change notification (in-process broadcast plus a storage watcher for
//!   changes made by other processes sharing the same file)
//! - [`debounce`] - cancel-and-restart debouncing for free-text input
//! - [`api`] - typed HTTP client for the two catalog endpoints
//!
//! None of this knows how results are rendered; the CLI (or any other
//! front end) composes these with the core pipeline.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod debounce;
pub mod wishlist;

pub use api::{ApiClient, ApiError};
pub use wishlist::{WishlistChange, WishlistError, WishlistStore};
