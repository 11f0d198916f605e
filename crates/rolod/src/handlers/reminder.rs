//! Follow-up reminder creation.

use chrono::{DateTime, Duration, Months, Utc};
use rolo_core::contact::{Priority, Reminder, UserId};
use rolo_core::entities::{EntityBag, TimeUnit, Timeframe};
use rolo_core::error::RoloError;
use rolo_core::extract;
use rolo_core::response::Response;
use tracing::info;

use super::HandlerCx;

/// Add a timeframe to `now`. Days and weeks are exact day counts;
/// months advance the calendar month (28-31 days depending on the
/// month). The cold-contacts threshold deliberately uses a different,
/// fixed-30-day conversion; do not unify them.
fn due_date_from(now: DateTime<Utc>, timeframe: Option<Timeframe>) -> DateTime<Utc> {
    match timeframe {
        Some(tf) => match tf.unit {
            TimeUnit::Day => now + Duration::days(i64::from(tf.amount)),
            TimeUnit::Week => now + Duration::days(i64::from(tf.amount) * 7),
            TimeUnit::Month => now
                .checked_add_months(Months::new(tf.amount))
                .unwrap_or(now),
        },
        // No timeframe anywhere in the query: one week out.
        None => now + Duration::days(7),
    }
}

pub async fn set_reminder(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    let contact_name = entities
        .and_then(|e| e.contact_name.clone())
        .or_else(|| extract::reminder_contact_name(query));

    let Some(contact_name) = contact_name else {
        return Ok(Response::text("For whom would you like to set a reminder?"));
    };

    let Some(contact) = cx.contacts.find_one_by_name(user, &contact_name).await? else {
        return Ok(Response::text(format!(
            "I couldn't find a contact named \"{contact_name}\"."
        )));
    };

    let timeframe = entities
        .and_then(|e| e.timeframe)
        .or_else(|| extract::timeframe(query));
    let due_date = due_date_from(Utc::now(), timeframe);

    let reminder = Reminder::new(
        user,
        contact.id,
        due_date,
        format!("Follow up with {}", contact.name),
        Priority::Medium,
    );
    let reminder = cx.reminders.insert(reminder).await?;
    info!(contact = %contact.name, due = %due_date.format("%Y-%m-%d"), "Reminder set");

    let message = format!(
        "I've set a reminder to contact {} on {}.",
        contact.name,
        due_date.format("%Y-%m-%d")
    );
    Ok(Response::Reminder {
        content: reminder,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::offline_cx;
    use chrono::{Datelike, TimeZone};
    use rolo_core::Contact;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_reminder_with_explicit_timeframe() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        store.add_contact(Contact::new(user, "John Smith")).await;

        let response = set_reminder("remind me to contact John in 3 days", user, None, &cx)
            .await
            .unwrap();

        let expected = (Utc::now() + Duration::days(3)).date_naive();
        match response {
            Response::Reminder { content, message } => {
                assert_eq!(content.description, "Follow up with John Smith");
                assert_eq!(content.priority, Priority::Medium);
                assert_eq!(content.due_date.date_naive(), expected);
                assert!(message.contains("John Smith"));
            }
            other => panic!("expected reminder, got {other:?}"),
        }

        // The reminder was actually persisted.
        assert_eq!(store.reminders().await.len(), 1);
    }

    #[tokio::test]
    async fn test_reminder_defaults_to_one_week() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        store.add_contact(Contact::new(user, "Jane")).await;

        let response = set_reminder("set a reminder for Jane", user, None, &cx)
            .await
            .unwrap();

        let expected = (Utc::now() + Duration::days(7)).date_naive();
        match response {
            Response::Reminder { content, .. } => {
                assert_eq!(content.due_date.date_naive(), expected);
            }
            other => panic!("expected reminder, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reminder_unknown_contact() {
        let (_store, cx) = offline_cx();
        let response = set_reminder("set a reminder for Jane", Uuid::new_v4(), None, &cx)
            .await
            .unwrap();
        match response {
            Response::Text { content } => {
                assert!(content.contains("couldn't find a contact named \"Jane\""));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reminder_missing_name_asks() {
        let (_store, cx) = offline_cx();
        let response = set_reminder("remind me", Uuid::new_v4(), None, &cx)
            .await
            .unwrap();
        match response {
            Response::Text { content } => assert!(content.contains("For whom")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_reminder_prefers_entity_bag() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        store.add_contact(Contact::new(user, "John Smith")).await;

        let entities = EntityBag {
            contact_name: Some("John".to_string()),
            timeframe: Some(Timeframe::new(2, TimeUnit::Week)),
            ..Default::default()
        };
        let response = set_reminder("follow up with him", user, Some(&entities), &cx)
            .await
            .unwrap();

        let expected = (Utc::now() + Duration::days(14)).date_naive();
        match response {
            Response::Reminder { content, .. } => {
                assert_eq!(content.due_date.date_naive(), expected);
            }
            other => panic!("expected reminder, got {other:?}"),
        }
    }

    #[test]
    fn test_due_date_calendar_months() {
        // Jan 31 + 1 calendar month clamps to Feb 29 (2024 is a leap
        // year), not Jan 31 + 30 days.
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let due = due_date_from(now, Some(Timeframe::new(1, TimeUnit::Month)));
        assert_eq!(due.date_naive().month(), 2);
        assert_eq!(due.date_naive().day(), 29);

        let due = due_date_from(now, Some(Timeframe::new(3, TimeUnit::Month)));
        assert_eq!(due.date_naive().month(), 4);
        assert_eq!(due.date_naive().day(), 30);
    }

    #[test]
    fn test_due_date_days_and_weeks() {
        let now = Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap();
        assert_eq!(
            due_date_from(now, Some(Timeframe::new(3, TimeUnit::Day))).date_naive(),
            now.date_naive() + Duration::days(3)
        );
        assert_eq!(
            due_date_from(now, Some(Timeframe::new(2, TimeUnit::Week))).date_naive(),
            now.date_naive() + Duration::days(14)
        );
        assert_eq!(
            due_date_from(now, None).date_naive(),
            now.date_naive() + Duration::days(7)
        );
    }
}
