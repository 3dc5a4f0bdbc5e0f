//! Error types for model operations.

mod model_error;

pub use model_error::{ModelError, Result};
