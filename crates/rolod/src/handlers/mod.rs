//! Per-intent handlers and the dispatcher.
//!
//! Each handler completes missing entities with the regex fallbacks,
//! queries the stores scoped to the requesting user, and composes
//! exactly one response variant. Not-found and missing-entity
//! conditions come back as text responses; only store failures
//! propagate as errors.

mod advice;
mod cold;
mod reminder;
mod report;
mod search;

use rolo_core::contact::UserId;
use rolo_core::entities::EntityBag;
use rolo_core::error::RoloError;
use rolo_core::intent::Intent;
use rolo_core::response::Response;
use std::sync::Arc;

use crate::llm::LlmClient;
use crate::store::{ContactStore, ReminderStore};

/// Collaborators the handlers act through.
#[derive(Clone)]
pub struct HandlerCx {
    pub contacts: Arc<dyn ContactStore>,
    pub reminders: Arc<dyn ReminderStore>,
    pub llm: Arc<LlmClient>,
}

/// Route a classified query to its handler.
///
/// The match is exhaustive over the closed intent set, so a new intent
/// cannot be added without deciding what handles it.
pub async fn dispatch(
    intent: Intent,
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    match intent {
        Intent::SearchByTeam => search::by_team(query, user, entities, cx).await,
        Intent::SearchByRole => search::by_role(query, user, entities, cx).await,
        Intent::SetReminder => reminder::set_reminder(query, user, entities, cx).await,
        Intent::ColdContacts => cold::cold_contacts(query, user, entities, cx).await,
        Intent::GenerateReport => report::generate_report(query, user, entities, cx).await,
        Intent::EngagementAdvice => advice::engagement_advice(query, user, entities, cx).await,
        Intent::Unknown => Ok(Response::unknown_query()),
    }
}
