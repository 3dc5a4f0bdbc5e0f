//! Error types for preparation stages.

mod prep_error;

pub use prep_error::{PrepError, Result};
