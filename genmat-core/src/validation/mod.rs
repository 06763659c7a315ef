//! Validation utilities
//!
//! Pure functions with no storage dependencies: configuration legality,
//! subscript ranges and storable patterns.

pub mod bounds;
pub mod format;
pub mod pattern;

pub use bounds::{validate_product_extent, validate_same_extent, validate_subscripts};
pub use format::{default_format, legal_formats, validate_density, validate_format_for_shape};
pub use pattern::validate_pattern_write;
