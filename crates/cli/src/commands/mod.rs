//! CLI command implementations.

pub mod search;
pub mod show;
pub mod wishlist;
