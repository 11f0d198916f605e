//! Contact search by team and by role.

use rolo_core::contact::UserId;
use rolo_core::entities::EntityBag;
use rolo_core::error::RoloError;
use rolo_core::extract;
use rolo_core::response::Response;
use tracing::info;

use super::HandlerCx;
use crate::store::ContactField;

pub async fn by_team(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    let team = entities
        .and_then(|e| e.team.clone())
        .or_else(|| extract::team(query));

    let Some(team) = team else {
        return Ok(Response::text("Which team would you like to search for?"));
    };

    let contacts = cx
        .contacts
        .find_by_field(user, ContactField::Team, &team)
        .await?;
    info!(team = %team, count = contacts.len(), "Team search");

    if contacts.is_empty() {
        return Ok(Response::text(format!(
            "I couldn't find any contacts in the team \"{team}\"."
        )));
    }

    let message = format!("Found {} contacts in the team \"{}\".", contacts.len(), team);
    Ok(Response::Contacts {
        content: contacts,
        message,
    })
}

pub async fn by_role(
    query: &str,
    user: UserId,
    entities: Option<&EntityBag>,
    cx: &HandlerCx,
) -> Result<Response, RoloError> {
    let role = entities
        .and_then(|e| e.role.clone())
        .or_else(|| extract::role(query));

    let Some(role) = role else {
        return Ok(Response::text("Which role would you like to search for?"));
    };

    let contacts = cx
        .contacts
        .find_by_field(user, ContactField::Role, &role)
        .await?;
    info!(role = %role, count = contacts.len(), "Role search");

    if contacts.is_empty() {
        return Ok(Response::text(format!(
            "I couldn't find any contacts with the role \"{role}\"."
        )));
    }

    let message = format!(
        "Found {} contacts with the role \"{}\".",
        contacts.len(),
        role
    );
    Ok(Response::Contacts {
        content: contacts,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::offline_cx;
    use rolo_core::Contact;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_team_search_finds_scoped_matches() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        for (name, team) in [("Ann", "Marketing"), ("Bob", "Marketing"), ("Cy", "Sales")] {
            let mut c = Contact::new(user, name);
            c.team = Some(team.to_string());
            store.add_contact(c).await;
        }

        let response = by_team("Find contacts in team Marketing", user, None, &cx)
            .await
            .unwrap();
        match response {
            Response::Contacts { content, message } => {
                assert_eq!(content.len(), 2);
                assert!(message.contains("Marketing"));
                assert!(message.contains('2'));
            }
            other => panic!("expected contacts, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_team_search_prefers_classifier_entities() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        let mut c = Contact::new(user, "Ann");
        c.team = Some("Sales".to_string());
        store.add_contact(c).await;

        let entities = EntityBag {
            team: Some("Sales".to_string()),
            ..Default::default()
        };
        // The query text says Marketing; the entity bag wins.
        let response = by_team("contacts in team Marketing", user, Some(&entities), &cx)
            .await
            .unwrap();
        assert!(matches!(response, Response::Contacts { .. }));
    }

    #[tokio::test]
    async fn test_team_missing_asks_clarifying_question() {
        let (_store, cx) = offline_cx();
        let response = by_team("find my contacts", Uuid::new_v4(), None, &cx)
            .await
            .unwrap();
        match response {
            Response::Text { content } => assert!(content.contains("Which team")),
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_team_no_matches_is_informative_text() {
        let (_store, cx) = offline_cx();
        let response = by_team("contacts in team Marketing", Uuid::new_v4(), None, &cx)
            .await
            .unwrap();
        match response {
            Response::Text { content } => {
                assert!(content.contains("couldn't find"));
                assert!(content.contains("Marketing"));
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_role_search() {
        let (store, cx) = offline_cx();
        let user = Uuid::new_v4();
        let mut c = Contact::new(user, "Ann");
        c.role = Some("Engineering Manager".to_string());
        store.add_contact(c).await;

        let response = by_role("find contacts with role engineering", user, None, &cx)
            .await
            .unwrap();
        match response {
            Response::Contacts { content, message } => {
                assert_eq!(content.len(), 1);
                assert!(message.contains("engineering"));
            }
            other => panic!("expected contacts, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_role_missing_asks_clarifying_question() {
        let (_store, cx) = offline_cx();
        let response = by_role("search people", Uuid::new_v4(), None, &cx)
            .await
            .unwrap();
        match response {
            Response::Text { content } => assert!(content.contains("Which role")),
            other => panic!("expected text, got {other:?}"),
        }
    }
}
