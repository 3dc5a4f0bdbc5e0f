//! Model Core
//!
//! Demand models and their evaluation:
//!
//! - [`LinearRegression`]: ridge-regularized least squares
//! - [`Arima`]: ARIMA(p, d, q) forecaster
//! - [`evaluate_regressor`]: chronological hold-out scoring
//! - [`resample`]: order rows to a daily or monthly demand series

pub mod arima;
pub mod evaluate;
pub mod linear;
pub mod metrics;
pub mod resample;

pub use arima::Arima;
pub use evaluate::{chronological_features, evaluate_regressor, train_test_split};
pub use linear::LinearRegression;
pub use metrics::{mae, mse, r2, rmse};
pub use resample::{future_periods, resample, Aggregation, Frequency};
