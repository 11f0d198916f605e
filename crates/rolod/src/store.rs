//! Contact and reminder store collaborators.
//!
//! The traits are the seam the handlers query through: case-insensitive
//! substring match scoped to the owning user, the cold-contact cutoff
//! query, and a group-by count aggregation. `MemoryStore` backs the
//! daemon and the test suites; a persistent engine would implement the
//! same traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rolo_core::contact::{Contact, Reminder, UserId};
use rolo_core::error::RoloError;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Contact fields supporting substring search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Team,
    Role,
    CurrentCompany,
}

/// Fields supporting group-by count aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Team,
    CurrentCompany,
    Temperature,
}

/// Result ordering for `group_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// Largest group first; ties break on the key for determinism.
    CountDescending,
    /// Alphabetical by group key.
    KeyAscending,
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Contacts of `user` whose `field` contains `needle`,
    /// case-insensitively.
    async fn find_by_field(
        &self,
        user: UserId,
        field: ContactField,
        needle: &str,
    ) -> Result<Vec<Contact>, RoloError>;

    /// First contact of `user` whose name contains `needle`,
    /// case-insensitively.
    async fn find_one_by_name(
        &self,
        user: UserId,
        needle: &str,
    ) -> Result<Option<Contact>, RoloError>;

    /// Contacts of `user` last contacted on or before `cutoff`, or
    /// never contacted at all. Ascending by last-contacted date with
    /// never-contacted first.
    async fn find_cold(
        &self,
        user: UserId,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Contact>, RoloError>;

    /// Group `user`'s contacts by `key` and count each group. Contacts
    /// without a value for `key` group under "Unspecified".
    async fn group_count(
        &self,
        user: UserId,
        key: GroupKey,
        order: GroupOrder,
        limit: Option<usize>,
    ) -> Result<Vec<(String, u64)>, RoloError>;
}

#[async_trait]
pub trait ReminderStore: Send + Sync {
    /// Persist a new reminder and return it as stored.
    async fn insert(&self, reminder: Reminder) -> Result<Reminder, RoloError>;
}

/// In-memory store, shared behind `Arc`.
#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<Contact>>,
    reminders: RwLock<Vec<Reminder>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn add_contact(&self, contact: Contact) {
        self.contacts.write().await.push(contact);
    }

    /// Snapshot of stored reminders, for assertions and the startup log.
    pub async fn reminders(&self) -> Vec<Reminder> {
        self.reminders.read().await.clone()
    }

    fn field_value(contact: &Contact, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Name => Some(contact.name.as_str()),
            ContactField::Team => contact.team.as_deref(),
            ContactField::Role => contact.role.as_deref(),
            ContactField::CurrentCompany => contact.current_company.as_deref(),
        }
    }

    fn group_value(contact: &Contact, key: GroupKey) -> String {
        let value = match key {
            GroupKey::Team => contact.team.as_deref(),
            GroupKey::CurrentCompany => contact.current_company.as_deref(),
            GroupKey::Temperature => Some(contact.temperature.label()),
        };
        value.unwrap_or("Unspecified").to_string()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn find_by_field(
        &self,
        user: UserId,
        field: ContactField,
        needle: &str,
    ) -> Result<Vec<Contact>, RoloError> {
        let needle = needle.to_lowercase();
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .filter(|c| c.user == user)
            .filter(|c| {
                Self::field_value(c, field)
                    .map(|v| v.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    async fn find_one_by_name(
        &self,
        user: UserId,
        needle: &str,
    ) -> Result<Option<Contact>, RoloError> {
        let needle = needle.to_lowercase();
        let contacts = self.contacts.read().await;
        Ok(contacts
            .iter()
            .find(|c| c.user == user && c.name.to_lowercase().contains(&needle))
            .cloned())
    }

    async fn find_cold(
        &self,
        user: UserId,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Contact>, RoloError> {
        let contacts = self.contacts.read().await;
        let mut cold: Vec<Contact> = contacts
            .iter()
            .filter(|c| c.user == user)
            .filter(|c| match c.last_contacted_date {
                Some(date) => date <= cutoff,
                None => true,
            })
            .cloned()
            .collect();
        // Never-contacted first, then oldest first: `None` orders before
        // any `Some` date.
        cold.sort_by_key(|c| c.last_contacted_date);
        Ok(cold)
    }

    async fn group_count(
        &self,
        user: UserId,
        key: GroupKey,
        order: GroupOrder,
        limit: Option<usize>,
    ) -> Result<Vec<(String, u64)>, RoloError> {
        let contacts = self.contacts.read().await;
        let mut groups: HashMap<String, u64> = HashMap::new();
        for contact in contacts.iter().filter(|c| c.user == user) {
            *groups.entry(Self::group_value(contact, key)).or_default() += 1;
        }

        let mut counts: Vec<(String, u64)> = groups.into_iter().collect();
        match order {
            GroupOrder::CountDescending => {
                counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            }
            GroupOrder::KeyAscending => counts.sort_by(|a, b| a.0.cmp(&b.0)),
        }
        if let Some(limit) = limit {
            counts.truncate(limit);
        }
        Ok(counts)
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn insert(&self, reminder: Reminder) -> Result<Reminder, RoloError> {
        self.reminders.write().await.push(reminder.clone());
        Ok(reminder)
    }
}
