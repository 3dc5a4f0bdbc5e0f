//! Preparation Core
//!
//! Implementations of the order preparation stages:
//!
//! - [`DataCleaner`]: date parsing, positivity filter, IQR capping
//! - [`FeatureDeriver`]: calendar, holiday and promotion features
//! - [`OneHotEncoder`]: categorical expansion with fit/transform
//! - [`PrepPipeline`]: all three in order
//!
//! Holiday data comes from a [`HolidayCalendar`](prep_spi::HolidayCalendar):
//! [`ChinaHolidayCalendar`] for real runs, [`FixedHolidayCalendar`] for
//! explicit date lists.

pub mod calendar;
pub mod cleaner;
pub mod encoder;
pub mod features;
pub mod holidays;
pub mod outlier;
pub mod pipeline;

pub use calendar::{PromoCalendar, RowFeatures};
pub use cleaner::{clean, DataCleaner};
pub use encoder::{encode, EncodedColumn, OneHotEncoder};
pub use features::{derive_features, FeatureDeriver};
pub use holidays::{ChinaHolidayCalendar, FixedHolidayCalendar};
pub use outlier::{IqrBounds, OutlierCapper};
pub use pipeline::{PrepOutput, PrepPipeline};
