//! Contracts for preparation stages.

mod holiday_calendar;
mod table_step;

pub use holiday_calendar::HolidayCalendar;
pub use table_step::TableStep;
