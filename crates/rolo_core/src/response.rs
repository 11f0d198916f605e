//! Typed response variants returned to the caller.
//!
//! Every handler composes exactly one of these. Not-found and
//! missing-entity conditions become `Text`, so the pipeline never looks
//! broken to the end user.

use crate::contact::{Contact, Reminder};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Bar,
    Pie,
}

/// The tagged response union. Serializes with the `type` discriminator
/// the frontend keys on: `text`, `contacts`, `reminder`, `chart`,
/// `advice`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Text {
        content: String,
    },
    Contacts {
        content: Vec<Contact>,
        message: String,
    },
    Reminder {
        content: Reminder,
        message: String,
    },
    Chart {
        chart_type: ChartType,
        title: String,
        labels: Vec<String>,
        data: Vec<u64>,
        message: String,
    },
    Advice {
        contact: Contact,
        advice: Vec<String>,
        message: String,
    },
}

impl Response {
    pub fn text(content: impl Into<String>) -> Self {
        Response::Text {
            content: content.into(),
        }
    }

    /// The fixed reply for queries nothing could make sense of.
    pub fn unknown_query() -> Self {
        Response::text(
            "I'm not sure how to process that query. \
             Try asking in a different way or use more specific language.",
        )
    }
}
