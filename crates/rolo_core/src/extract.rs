//! Regex fallback extraction, used by handlers when the classifier
//! produced no entities.
//!
//! Each entity kind has an ordered list of patterns; the first capture
//! wins. The lists are intent-specific (a contact name is phrased
//! differently in "remind me to contact John" than in "talking points
//! for John"), so the orderings are kept per call site rather than
//! shared.

use crate::entities::{TimeUnit, Timeframe};
use once_cell::sync::Lazy;
use regex::Regex;

static TEAM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)team\s+([a-zA-Z\s]+)").unwrap(),
        Regex::new(r"(?i)in\s+([a-zA-Z\s]+)").unwrap(),
    ]
});

static ROLE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)role\s+([a-zA-Z\s]+)").unwrap(),
        Regex::new(r"(?i)with\s+([a-zA-Z\s]+)\s+role").unwrap(),
    ]
});

static REMINDER_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)contact\s+([a-zA-Z\s]+)\s+in").unwrap(),
        Regex::new(r"(?i)reminder\s+for\s+([a-zA-Z\s]+)").unwrap(),
    ]
});

static ADVICE_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)with\s+([a-zA-Z\s]+)").unwrap(),
        Regex::new(r"(?i)for\s+([a-zA-Z\s]+)").unwrap(),
    ]
});

static REPORT_TYPE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)report\s+on\s+([a-zA-Z\s]+)").unwrap(),
        Regex::new(r"(?i)report\s+about\s+([a-zA-Z\s]+)").unwrap(),
        Regex::new(r"(?i)report\s+of\s+([a-zA-Z\s]+)").unwrap(),
    ]
});

static TIMEFRAME_IN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)in\s+(\d+)\s+(day|days|week|weeks|month|months)").unwrap());

static TIMEFRAME_FOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)for\s+(\d+)\s+(day|days|week|weeks|month|months)").unwrap());

/// Run ordered single-capture strategies over `text`; the first
/// non-empty trimmed capture wins.
pub fn first_match(patterns: &[Regex], text: &str) -> Option<String> {
    patterns
        .iter()
        .find_map(|re| {
            re.captures(text)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .filter(|s| !s.is_empty())
}

/// Team name: "team Marketing" or "in Marketing".
pub fn team(text: &str) -> Option<String> {
    first_match(&TEAM_PATTERNS, text)
}

/// Role: "role engineer" or "with engineer role".
pub fn role(text: &str) -> Option<String> {
    first_match(&ROLE_PATTERNS, text)
}

/// Contact name in a reminder phrasing: "contact John in ..." or
/// "reminder for John".
pub fn reminder_contact_name(text: &str) -> Option<String> {
    first_match(&REMINDER_NAME_PATTERNS, text)
}

/// Contact name in an advice phrasing: "with John" or "for John".
pub fn advice_contact_name(text: &str) -> Option<String> {
    first_match(&ADVICE_NAME_PATTERNS, text)
}

/// Report type, lower-cased: "report on teams" / "report about ..." /
/// "report of ...".
pub fn report_type(text: &str) -> Option<String> {
    first_match(&REPORT_TYPE_PATTERNS, text).map(|s| s.to_lowercase())
}

/// Timeframe from "in 3 days" phrasing.
pub fn timeframe(text: &str) -> Option<Timeframe> {
    timeframe_from(&TIMEFRAME_IN, text)
}

/// Timeframe accepting "for 2 weeks" as well; only the cold-contacts
/// handler uses the second phrasing.
pub fn timeframe_with_for(text: &str) -> Option<Timeframe> {
    timeframe_from(&TIMEFRAME_IN, text).or_else(|| timeframe_from(&TIMEFRAME_FOR, text))
}

fn timeframe_from(re: &Regex, text: &str) -> Option<Timeframe> {
    let caps = re.captures(text)?;
    let amount: u32 = caps.get(1)?.as_str().parse().ok()?;
    let unit = TimeUnit::parse(caps.get(2)?.as_str())?;
    Some(Timeframe::new(amount, unit))
}
