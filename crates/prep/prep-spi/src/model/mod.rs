//! Calendar label types produced by the feature deriver.

mod month_phase;
mod season;

pub use month_phase::MonthPhase;
pub use season::Season;

/// Names of the derived feature columns, in the order they are added.
pub mod feature_columns {
    pub const YEAR: &str = "year";
    pub const MONTH: &str = "month";
    pub const DAY: &str = "day";
    pub const WEEKDAY: &str = "weekday";
    pub const SEASON: &str = "season";
    pub const IS_HOLIDAY: &str = "is_holiday";
    pub const MONTH_PHASE: &str = "month_phase";
    pub const IS_PROMO: &str = "is_promo";

    pub const ALL: [&str; 8] = [
        YEAR,
        MONTH,
        DAY,
        WEEKDAY,
        SEASON,
        IS_HOLIDAY,
        MONTH_PHASE,
        IS_PROMO,
    ];
}
