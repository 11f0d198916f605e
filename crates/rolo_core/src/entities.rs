//! Structured values pulled out of free-form text.
//!
//! Every field is optional; absence triggers a regex fallback or a
//! clarifying question downstream, never an error.

use serde::{Deserialize, Serialize};

/// Relative time unit. Closed set; anything else fails to parse and the
/// timeframe is treated as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Day,
    Week,
    Month,
}

impl TimeUnit {
    /// Parse a unit word, accepting plurals ("days", "weeks", "months").
    pub fn parse(word: &str) -> Option<TimeUnit> {
        let w = word.trim().to_lowercase();
        if w.contains("day") {
            Some(TimeUnit::Day)
        } else if w.contains("week") {
            Some(TimeUnit::Week)
        } else if w.contains("month") {
            Some(TimeUnit::Month)
        } else {
            None
        }
    }
}

/// A relative time span, e.g. "3 days" or "2 weeks".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeframe {
    pub amount: u32,
    pub unit: TimeUnit,
}

impl Timeframe {
    pub fn new(amount: u32, unit: TimeUnit) -> Self {
        Self { amount, unit }
    }

    /// Flatten to a day count using the fixed multipliers (week = 7,
    /// month = 30). This is the cold-contacts threshold conversion;
    /// reminder due dates use true calendar arithmetic instead, and the
    /// two must stay separate.
    pub fn as_threshold_days(&self) -> i64 {
        let amount = i64::from(self.amount);
        match self.unit {
            TimeUnit::Day => amount,
            TimeUnit::Week => amount * 7,
            TimeUnit::Month => amount * 30,
        }
    }
}

/// The optional entities a query may carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityBag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<Timeframe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_type: Option<String>,
}

impl EntityBag {
    pub fn is_empty(&self) -> bool {
        self.contact_name.is_none()
            && self.team.is_none()
            && self.role.is_none()
            && self.timeframe.is_none()
            && self.report_type.is_none()
    }
}
