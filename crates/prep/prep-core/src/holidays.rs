//! Holiday calendar implementations.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate};
use prep_spi::{HolidayCalendar, PrepError, Result};
use table_core::{parse_date, DEFAULT_DATE_FORMATS};

/// Calendar over an explicit set of dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedHolidayCalendar {
    region: String,
    dates: BTreeSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    pub fn new(region: impl Into<String>, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            region: region.into(),
            dates: dates.into_iter().collect(),
        }
    }

    /// Calendar without a region code.
    pub fn from_dates(dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self::new("custom", dates)
    }

    /// Read one date per line. Blank lines and `#` comments are skipped.
    pub fn from_file(region: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| PrepError::Config(format!("{}: {}", path.display(), e)))?;

        let formats: Vec<String> = DEFAULT_DATE_FORMATS.iter().map(|s| s.to_string()).collect();
        let mut dates = BTreeSet::new();
        for (index, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let date = parse_date(line, &formats).ok_or_else(|| {
                PrepError::Config(format!(
                    "{}:{}: unrecognized date '{}'",
                    path.display(),
                    index + 1,
                    line
                ))
            })?;
            dates.insert(date);
        }

        tracing::debug!(path = %path.display(), count = dates.len(), "loaded holiday dates");
        Ok(Self::new(region, dates))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn region(&self) -> &str {
        &self.region
    }

    fn holidays_for(&self, years: &BTreeSet<i32>) -> BTreeSet<NaiveDate> {
        self.dates
            .iter()
            .filter(|d| years.contains(&d.year()))
            .copied()
            .collect()
    }
}

/// (year, lunar new year, dragon boat festival, mid-autumn festival)
const LUNAR_FESTIVALS: [(i32, (u32, u32), (u32, u32), (u32, u32)); 12] = [
    (2015, (2, 19), (6, 20), (9, 27)),
    (2016, (2, 8), (6, 9), (9, 15)),
    (2017, (1, 28), (5, 30), (10, 4)),
    (2018, (2, 16), (6, 18), (9, 24)),
    (2019, (2, 5), (6, 7), (9, 13)),
    (2020, (1, 25), (6, 25), (10, 1)),
    (2021, (2, 12), (6, 14), (9, 21)),
    (2022, (2, 1), (6, 3), (9, 10)),
    (2023, (1, 22), (6, 22), (9, 29)),
    (2024, (2, 10), (6, 10), (9, 17)),
    (2025, (1, 29), (5, 31), (10, 6)),
    (2026, (2, 17), (6, 19), (9, 25)),
];

/// Days of Spring Festival counted from lunar new year.
const SPRING_FESTIVAL_DAYS: i64 = 3;

/// Public holidays of mainland China.
///
/// Solar holidays (New Year's Day, Labour Day, National Day) and
/// Tomb-Sweeping Day are computed for any year. Lunar festivals come from a
/// table; years it does not cover only get the computed holidays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChinaHolidayCalendar;

impl ChinaHolidayCalendar {
    pub fn new() -> Self {
        Self
    }

    /// True if lunar festival dates are known for `year`.
    pub fn covers(year: i32) -> bool {
        LUNAR_FESTIVALS.iter().any(|(y, ..)| *y == year)
    }

    fn year_holidays(year: i32) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = [(1, 1), (5, 1), (10, 1), (10, 2), (10, 3)]
            .iter()
            .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
            .collect();
        dates.extend(qingming(year));

        match LUNAR_FESTIVALS.iter().find(|(y, ..)| *y == year) {
            Some(&(_, new_year, dragon_boat, mid_autumn)) => {
                if let Some(first) = NaiveDate::from_ymd_opt(year, new_year.0, new_year.1) {
                    dates.extend((0..SPRING_FESTIVAL_DAYS).map(|i| first + Duration::days(i)));
                }
                for (m, d) in [dragon_boat, mid_autumn] {
                    dates.extend(NaiveDate::from_ymd_opt(year, m, d));
                }
            }
            None => {
                tracing::warn!(year, "no lunar festival dates for year, using solar holidays only");
            }
        }
        dates
    }
}

impl HolidayCalendar for ChinaHolidayCalendar {
    fn region(&self) -> &str {
        "CN"
    }

    fn holidays_for(&self, years: &BTreeSet<i32>) -> BTreeSet<NaiveDate> {
        years
            .iter()
            .flat_map(|&year| Self::year_holidays(year))
            .collect()
    }
}

/// Tomb-Sweeping Day (Qingming) in April, from the solar term formula
/// `floor(Y * 0.2422 + C) - floor(Y / 4)` with `Y` the last two digits of the
/// year.
fn qingming(year: i32) -> Option<NaiveDate> {
    let c = if year >= 2000 { 4.81 } else { 5.59 };
    let y = year.rem_euclid(100);
    let day = (y as f64 * 0.2422 + c).floor() as i32 - y / 4;
    NaiveDate::from_ymd_opt(year, 4, u32::try_from(day).ok()?)
}
