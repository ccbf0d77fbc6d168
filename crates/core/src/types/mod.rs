//! Core types for Car Finder.

pub mod car;
pub mod id;

pub use car::Car;
pub use id::CarId;
