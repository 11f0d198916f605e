//! The closed intent set and the classification result passed to dispatch.

use crate::entities::EntityBag;
use serde::{Deserialize, Serialize};

/// What action a query is asking for.
///
/// Adding a variant is a compile-time-checked change: the dispatcher
/// matches exhaustively, so every new intent needs a handler before the
/// crate builds again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    #[serde(rename = "search_contacts_team")]
    SearchByTeam,
    #[serde(rename = "search_contacts_role")]
    SearchByRole,
    #[serde(rename = "set_reminder")]
    SetReminder,
    #[serde(rename = "cold_contacts")]
    ColdContacts,
    #[serde(rename = "generate_report")]
    GenerateReport,
    #[serde(rename = "engagement_advice")]
    EngagementAdvice,
    Unknown,
}

impl Intent {
    /// All trainable intents, in a fixed order. `Unknown` is excluded:
    /// it is the parse-failure default, never a classification target.
    pub const ALL: [Intent; 6] = [
        Intent::SearchByTeam,
        Intent::SearchByRole,
        Intent::SetReminder,
        Intent::ColdContacts,
        Intent::GenerateReport,
        Intent::EngagementAdvice,
    ];

    /// The wire label used by the remote classifier and the training
    /// corpus.
    pub fn label(&self) -> &'static str {
        match self {
            Intent::SearchByTeam => "search_contacts_team",
            Intent::SearchByRole => "search_contacts_role",
            Intent::SetReminder => "set_reminder",
            Intent::ColdContacts => "cold_contacts",
            Intent::GenerateReport => "generate_report",
            Intent::EngagementAdvice => "engagement_advice",
            Intent::Unknown => "unknown",
        }
    }

    /// Parse a wire label, case-insensitively. Anything unrecognized is
    /// `Unknown` — a malformed remote reply degrades, it does not fail.
    pub fn from_label(label: &str) -> Intent {
        match label.trim().to_lowercase().as_str() {
            "search_contacts_team" => Intent::SearchByTeam,
            "search_contacts_role" => Intent::SearchByRole,
            "set_reminder" => Intent::SetReminder,
            "cold_contacts" => Intent::ColdContacts,
            "generate_report" => Intent::GenerateReport,
            "engagement_advice" => Intent::EngagementAdvice,
            _ => Intent::Unknown,
        }
    }
}

/// Output of intent resolution, consumed exactly once by the dispatcher.
///
/// `entities` is `None` on the local-classifier path (it classifies
/// intent only); handlers then fall back to regex extraction.
/// `raw_text` carries the remote reply for debugging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub entities: Option<EntityBag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,
}

impl ClassificationResult {
    /// Result for a query nothing could make sense of.
    pub fn unknown() -> Self {
        Self {
            intent: Intent::Unknown,
            entities: None,
            raw_text: None,
        }
    }
}
