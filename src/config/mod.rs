/// Serde-backed indicator configuration.
pub mod model;
