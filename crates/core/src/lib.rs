//! Car Finder Core - domain types and the search pipeline.
//!
//! This crate provides the pieces shared by every Car Finder component:
//! - `server` - HTTP service exposing the catalog
//! - `client` - wishlist store, debounce, and API client
//! - `cli` - command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no async,
//! no HTTP. The search pipeline is a deterministic function of the catalog
//! and a filter specification, which keeps it trivially testable and lets
//! any front end reproduce the exact same visible result set from the same
//! query parameters.
//!
//! # Modules
//!
//! - [`types`] - The `Car` record and the `CarId` newtype
//! - [`search`] - Filter specification and the filter-sort-paginate pipeline

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod search;
pub mod types;

pub use search::{FilterSpec, PAGE_SIZE, ResultsPage, SortMode, search};
pub use types::*;
