//! Cache directory handling.
//!
//! This module owns the on-disk side of the stage cache:
//!
//! - [`guard`]: refuses directories that contain anything but cache artifacts
//! - [`detector`]: decides whether a directory holds a usable cache
//! - [`schema`]: the schema descriptor stored alongside cached documents

pub mod detector;
pub mod guard;
pub mod schema;

pub use detector::{detect, inspect, CacheInventory, CacheVerdict};
pub use guard::ensure_clean;
pub use schema::{SchemaDescriptor, FORMAT_VERSION, JSON_FORMAT};
