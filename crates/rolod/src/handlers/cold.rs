//! Contacts that haven't been reached out to recently.

use chrono::{Duration, Utc};
use rolo_core::contact::UserId;
use rolo_core::entities::EntityBag;
use rolo_core::error::RoloError;
use rolo_core::extract;
use rolo_core::response::Response;
use tracing::info;

use super::HandlerCx;

/// Threshold when the query names no timeframe.
const DEFAULT_THRESHOLD_DAYS: i64 = 30;

pub async fn cold_contacts(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    // Fixed multipliers here (week = 7, month = 30); reminder due dates
    // use calendar arithmetic instead.
    let threshold_days = entities
        .and_then(|e| e.timeframe)
        .or_else(|| extract::timeframe_with_for(query))
        .map(|tf| tf.as_threshold_days())
        .unwrap_or(DEFAULT_THRESHOLD_DAYS);

    let cutoff = Utc::now() - Duration::days(threshold_days);
    let contacts = cx.contacts.find_cold(user, cutoff).await?;
    info!(threshold_days, count = contacts.len(), "Cold contact query");

    if contacts.is_empty() {
        return Ok(Response::text(format!(
            "You don't have any contacts you haven't reached out to in the \
             last {threshold_days} days."
        )));
    }

    let message = format!(
        "Found {} contacts you haven't reached out to in the last {} days.",
        contacts.len(),
        threshold_days
    );
    Ok(Response::Contacts {
        content: contacts,
        message,
    })
}
