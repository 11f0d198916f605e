//! Shared types and pure logic for the rolo assistant.
//!
//! Everything here is side-effect free: intents and entities, the regex
//! extraction strategies, the local fallback classifier, the response
//! union, and the rule-based advice generator. The daemon crate wires
//! these to the remote LLM and the stores.

pub mod advice;
pub mod classifier;
pub mod contact;
pub mod entities;
pub mod error;
pub mod extract;
pub mod intent;
pub mod response;

pub use classifier::IntentClassifier;
pub use contact::{Contact, ContactId, Reminder, ReminderId, UserId};
pub use entities::{EntityBag, TimeUnit, Timeframe};
pub use error::{Result, RoloError};
pub use intent::{ClassificationResult, Intent};
pub use response::{ChartType, Response};
