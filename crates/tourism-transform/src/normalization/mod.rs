//! Cell-level normalization functions.

pub mod numeric;

pub use numeric::{is_numeric, parse_numeric, transform_to_numeric};
