//! Coarse position of a day within its month.

use serde::{Deserialize, Serialize};

/// Early (days 1-10), Mid (11-20) or End (21 onwards) of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonthPhase {
    Early,
    Mid,
    End,
}

impl MonthPhase {
    pub fn from_day(day: u32) -> Self {
        if day <= 10 {
            MonthPhase::Early
        } else if day <= 20 {
            MonthPhase::Mid
        } else {
            MonthPhase::End
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MonthPhase::Early => "Early",
            MonthPhase::Mid => "Mid",
            MonthPhase::End => "End",
        }
    }
}

impl std::fmt::Display for MonthPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
