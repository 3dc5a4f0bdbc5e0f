//! Model input and output types.

mod evaluation;
mod feature_matrix;

pub use evaluation::Evaluation;
pub use feature_matrix::FeatureMatrix;
