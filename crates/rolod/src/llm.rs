//! Remote LLM client: query classification and engagement advice.
//!
//! Two fixed prompts against a chat-completions endpoint. The
//! classification reply is labeled lines (`intent: ...`, `team: ...`)
//! parsed tolerantly: any field the model omits or mangles is simply
//! absent, never an error. Missing credentials or any transport failure
//! surface as `RoloError::ExternalService` for the caller to recover
//! from.

use once_cell::sync::Lazy;
use regex::Regex;
use rolo_core::contact::Contact;
use rolo_core::entities::{EntityBag, TimeUnit, Timeframe};
use rolo_core::intent::{ClassificationResult, Intent};
use rolo_core::error::RoloError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LlmConfig;

const ANTHROPIC_VERSION: &str = "2023-06-01";

const CLASSIFIER_SYSTEM_PROMPT: &str = "\
You are an AI assistant for a CRM system. Your job is to help users manage \
their contacts, set reminders, and provide insights about their professional \
network.

You can help with the following tasks:
1. Finding contacts based on team, role, or other attributes
2. Setting reminders to follow up with contacts
3. Identifying contacts that haven't been reached out to recently
4. Generating reports about contact distribution
5. Providing advice on how to engage with specific contacts

When a user asks a question, determine their intent and extract relevant \
entities like names, teams, roles, time periods, etc.";

const ADVICE_SYSTEM_PROMPT: &str = "\
You are an expert CRM assistant helping with relationship building. Provide \
specific, actionable advice for engaging with contacts.";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    max_tokens: u32,
    system: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Client for the remote LLM, holding both model names.
pub struct LlmClient {
    http: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    classifier_model: String,
    advice_model: String,
    max_tokens: u32,
}

impl LlmClient {
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            classifier_model: config.classifier_model.clone(),
            advice_model: config.advice_model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    /// Whether the remote path is configured at all.
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Classify a query into intent + entities.
    ///
    /// At most one remote call; no retries. The resolver falls back to
    /// the local classifier on any error from here.
    pub async fn classify(&self, query: &str) -> Result<ClassificationResult, RoloError> {
        let user_prompt = format!(
            "Query: {query}\n\n\
             Analyze this query and reply with labeled lines:\n\
             intent: one of search_contacts_team, search_contacts_role, \
             set_reminder, cold_contacts, generate_report, engagement_advice\n\
             contact name: the person mentioned, if any\n\
             team: the team mentioned, if any\n\
             role: the role mentioned, if any\n\
             timeframe: a number followed by days, weeks or months, if any\n\
             report type: the subject of the requested report, if any\n\
             Omit any line you cannot fill."
        );

        let reply = self
            .send(&self.classifier_model, CLASSIFIER_SYSTEM_PROMPT, &user_prompt)
            .await?;
        debug!("Classifier reply: {}", reply);

        Ok(parse_classification(&reply))
    }

    /// Ask for 3-5 numbered talking points for a contact.
    pub async fn engagement_advice(&self, contact: &Contact) -> Result<Vec<String>, RoloError> {
        let reply = self
            .send(&self.advice_model, ADVICE_SYSTEM_PROMPT, &advice_prompt(contact))
            .await?;
        debug!("Advice reply: {}", reply);

        let points = parse_advice_points(&reply);
        if points.is_empty() {
            return Err(RoloError::ExternalService(
                "Advice reply contained no usable points".to_string(),
            ));
        }
        Ok(points)
    }

    async fn send(
        &self,
        model: &str,
        system: &str,
        user_prompt: &str,
    ) -> Result<String, RoloError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| RoloError::ExternalService("API key is not configured".to_string()))?;

        let request = ChatRequest {
            model: model.to_string(),
            max_tokens: self.max_tokens,
            system: system.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: user_prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| RoloError::ExternalService(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RoloError::ExternalService(format!(
                "Remote returned {status}: {body}"
            )));
        }

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| RoloError::ExternalService(format!("Malformed reply: {e}")))?;

        reply
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| RoloError::ExternalService("Empty reply".to_string()))
    }
}

static INTENT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)intent:\s*(\w+)").unwrap());

/// Labels that may carry a timeframe, tried in order.
const TIMEFRAME_LABELS: [&str; 3] = ["timeframe", "time period", "time frame"];

/// Parse a labeled-line classification reply. Partial replies are
/// valid: every field the reply lacks is `None`.
pub fn parse_classification(reply: &str) -> ClassificationResult {
    let intent = INTENT_LINE
        .captures(reply)
        .and_then(|caps| caps.get(1))
        .map(|m| Intent::from_label(m.as_str()))
        .unwrap_or(Intent::Unknown);

    let entities = EntityBag {
        contact_name: labeled_value(reply, "contact name")
            .or_else(|| labeled_value(reply, "name")),
        team: labeled_value(reply, "team"),
        role: labeled_value(reply, "role"),
        timeframe: labeled_timeframe(reply),
        report_type: labeled_value(reply, "report type"),
    };

    ClassificationResult {
        intent,
        entities: Some(entities),
        raw_text: Some(reply.to_string()),
    }
}

/// Pull the value off a `label: value` line, quoted variant first.
fn labeled_value(text: &str, label: &str) -> Option<String> {
    let patterns = [
        format!(r#"(?i){label}:\s*"([^"\n]+)""#),
        format!(r"(?i){label}:\s*([^\n]+)"),
    ];
    patterns
        .iter()
        .find_map(|pattern| {
            Regex::new(pattern)
                .expect("label pattern")
                .captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().trim_matches('"').to_string())
        })
        .filter(|v| !v.is_empty())
}

/// Timeframe needs both an integer and a unit word on the same labeled
/// line; either alone is treated as absent.
fn labeled_timeframe(text: &str) -> Option<Timeframe> {
    for label in TIMEFRAME_LABELS {
        let re = Regex::new(&format!(r"(?i){label}:.*?(\d+)\s+([a-z]+)"))
            .expect("timeframe pattern");
        if let Some(caps) = re.captures(text) {
            let amount: u32 = match caps.get(1).and_then(|m| m.as_str().parse().ok()) {
                Some(amount) => amount,
                None => continue,
            };
            if let Some(unit) = caps.get(2).and_then(|m| TimeUnit::parse(m.as_str())) {
                return Some(Timeframe::new(amount, unit));
            }
        }
    }
    None
}

/// Split free text on numbered markers (`1. `, `2. `) into trimmed,
/// non-empty points.
pub fn parse_advice_points(reply: &str) -> Vec<String> {
    static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\s+").unwrap());
    NUMBERED
        .split(reply)
        .map(|point| point.trim())
        .filter(|point| !point.is_empty())
        .map(|point| point.to_string())
        .collect()
}

/// The advice user prompt, embedding the contact's profile.
fn advice_prompt(contact: &Contact) -> String {
    let previous = if contact.previous_companies.is_empty() {
        "None recorded".to_string()
    } else {
        contact
            .previous_companies
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let accomplishments = if contact.accomplishments.is_empty() {
        "None recorded".to_string()
    } else {
        contact
            .accomplishments
            .iter()
            .map(|a| a.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let overlaps = if contact.overlap_points.is_empty() {
        "None recorded".to_string()
    } else {
        contact
            .overlap_points
            .iter()
            .map(|p| p.description.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let recent = {
        let comms = &contact.communications;
        let last_two = &comms[comms.len().saturating_sub(2)..];
        if last_two.is_empty() {
            "None recorded".to_string()
        } else {
            last_two
                .iter()
                .map(|c| format!("({}) {}", c.date.format("%Y-%m-%d"), c.content))
                .collect::<Vec<_>>()
                .join("; ")
        }
    };

    let last_contacted = contact
        .last_contacted_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Never".to_string());

    format!(
        "I need advice on engaging with this contact:\n\n\
         Name: {name}\n\
         Role: {role}\n\
         Company: {company}\n\
         Time in role: {time_in_role} months\n\
         Previous companies: {previous}\n\
         Temperature: {temperature}\n\
         Last contacted: {last_contacted}\n\n\
         Accomplishments: {accomplishments}\n\n\
         Overlap points: {overlaps}\n\n\
         Recent communications: {recent}\n\n\
         Notes: {notes}\n\n\
         Please provide 3-5 specific conversation points and engagement \
         strategies for my upcoming interaction with this contact.",
        name = contact.name,
        role = contact.role.as_deref().unwrap_or("Unknown"),
        company = contact.current_company.as_deref().unwrap_or("Unknown"),
        time_in_role = contact.time_in_role,
        temperature = contact.temperature.label(),
        notes = contact.notes.as_deref().unwrap_or("None"),
    )
}
