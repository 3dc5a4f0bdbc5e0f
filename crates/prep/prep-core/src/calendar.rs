//! Per-date calendar features.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use prep_api::DEFAULT_PROMO_DAYS;
use prep_spi::{MonthPhase, Season};

/// Recurring promotion days, matched on (month, day) in every year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCalendar {
    days: BTreeSet<(u32, u32)>,
}

impl PromoCalendar {
    pub fn new(days: &[(u32, u32)]) -> Self {
        Self {
            days: days.iter().copied().collect(),
        }
    }

    pub fn is_promo(&self, date: NaiveDate) -> bool {
        self.days.contains(&(date.month(), date.day()))
    }

    pub fn days(&self) -> impl Iterator<Item = &(u32, u32)> {
        self.days.iter()
    }
}

impl Default for PromoCalendar {
    fn default() -> Self {
        Self::new(&DEFAULT_PROMO_DAYS)
    }
}

/// Calendar features of one order date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFeatures {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// Monday = 0 .. Sunday = 6
    pub weekday: u32,
    pub season: Season,
    pub is_holiday: bool,
    pub month_phase: MonthPhase,
    pub is_promo: bool,
}

impl RowFeatures {
    pub fn derive(
        date: NaiveDate,
        holidays: &BTreeSet<NaiveDate>,
        promos: &PromoCalendar,
    ) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().num_days_from_monday(),
            season: Season::from_month(date.month()),
            is_holiday: holidays.contains(&date),
            month_phase: MonthPhase::from_day(date.day()),
            is_promo: promos.is_promo(date),
        }
    }
}
