//! Holiday calendar trait definition.

use std::collections::BTreeSet;

use chrono::NaiveDate;

/// Source of public holiday dates for a country or region.
///
/// The feature deriver asks once, with every year present in the table, and
/// flags rows whose date is in the returned set.
pub trait HolidayCalendar: Send + Sync {
    /// Country or region code, e.g. `"CN"`.
    fn region(&self) -> &str;

    /// Union of the holiday dates of all requested years.
    fn holidays_for(&self, years: &BTreeSet<i32>) -> BTreeSet<NaiveDate>;
}
