//! Shared utilities and types used across the codec, state and API modules.

pub mod params;
pub mod types;

// Re-export commonly used items
pub use params::{parse_params, parse_params_or, serialize_params, ParamMap};
pub use types::*;
