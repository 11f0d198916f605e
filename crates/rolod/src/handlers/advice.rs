//! Engagement advice for a specific contact.

use rolo_core::advice::generate_advice;
use rolo_core::contact::UserId;
use rolo_core::entities::EntityBag;
use rolo_core::error::RoloError;
use rolo_core::extract;
use rolo_core::response::Response;
use tracing::{info, warn};

use super::HandlerCx;

pub async fn engagement_advice(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    let contact_name = entities
        .and_then(|e| e.contact_name.clone())
        .or_else(|| extract::advice_contact_name(query));

    let Some(contact_name) = contact_name else {
        return Ok(Response::text(
            "Which contact would you like engagement advice for?",
        ));
    };

    let Some(contact) = cx.contacts.find_one_by_name(user, &contact_name).await? else {
        return Ok(Response::text(format!(
            "I couldn't find a contact named \"{contact_name}\"."
        )));
    };

    // Primary path is the advice model; any external failure degrades
    // to the rule-based generator, never to an error.
    let advice = match cx.llm.engagement_advice(&contact).await {
        Ok(points) => {
            info!(contact = %contact.name, points = points.len(), "LLM advice");
            points
        }
        Err(e) => {
            warn!("Advice model unavailable, using rule-based advice: {e}");
            generate_advice(&contact)
        }
    };

    let message = format!("Here's my advice for engaging with {}:", contact.name);
    Ok(Response::Advice {
        contact,
        advice,
        message,
    })
}
