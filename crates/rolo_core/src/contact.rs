//! Contact and reminder records.
//!
//! These are owned by the store collaborators; the core reads contact
//! fields and constructs new reminders for the store to persist.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;
pub type ContactId = Uuid;
pub type ReminderId = Uuid;

/// Relationship warmth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temperature {
    #[default]
    Cold,
    Warm,
    Hot,
}

impl Temperature {
    pub fn label(&self) -> &'static str {
        match self {
            Temperature::Cold => "cold",
            Temperature::Warm => "warm",
            Temperature::Hot => "hot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationKind {
    Email,
    Phone,
    Meeting,
    Social,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviousCompany {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Months spent there.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Accomplishment {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Communication {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub kind: CommunicationKind,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub description: String,
}

/// A person in the user's professional network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub user: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Months in the current role.
    #[serde(default)]
    pub time_in_role: u32,
    #[serde(default)]
    pub time_at_company: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(default)]
    pub previous_companies: Vec<PreviousCompany>,
    #[serde(default)]
    pub accomplishments: Vec<Accomplishment>,
    #[serde(default)]
    pub communications: Vec<Communication>,
    #[serde(default)]
    pub temperature: Temperature,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_contacted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub overlap_points: Vec<OverlapPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Contact {
    /// Minimal contact for a user; the rest of the fields default.
    pub fn new(user: UserId, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            name: name.into(),
            team: None,
            role: None,
            time_in_role: 0,
            time_at_company: 0,
            current_company: None,
            previous_companies: Vec::new(),
            accomplishments: Vec::new(),
            communications: Vec::new(),
            temperature: Temperature::Cold,
            last_contacted_date: None,
            overlap_points: Vec::new(),
            notes: None,
            email: None,
            phone: None,
        }
    }

    /// Whole days since the last logged contact, or `None` if never
    /// contacted.
    pub fn days_since_last_contacted(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_contacted_date
            .map(|d| (now - d).num_days())
    }
}

/// A follow-up reminder to be persisted by the reminder store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub user: UserId,
    pub contact: ContactId,
    pub due_date: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub notification_sent: bool,
}

impl Reminder {
    pub fn new(
        user: UserId,
        contact: ContactId,
        due_date: DateTime<Utc>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user,
            contact,
            due_date,
            description: description.into(),
            completed: false,
            priority,
            notification_sent: false,
        }
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date < now
    }
}
