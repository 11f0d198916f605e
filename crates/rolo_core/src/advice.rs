//! Rule-based engagement advice.
//!
//! The degradation path for the advice LLM: every rule is pinned to a
//! contact field, emitted in a fixed order, ending with the
//! temperature-keyed closing script. Deterministic for a given contact.

use crate::contact::{Contact, Temperature};

/// Closing scripts, one per temperature.
const COLD_SCRIPT: &str =
    "This is a cold contact. Focus on establishing trust and providing value \
     before asking for anything.";
const WARM_SCRIPT: &str =
    "This is a warm contact. Deepen the relationship by finding ways to help \
     them achieve their goals.";
const HOT_SCRIPT: &str =
    "This is a hot contact. They're receptive to your outreach, so don't \
     hesitate to make specific requests or proposals.";

/// Months in role below which a contact counts as new.
const NEW_IN_ROLE_MONTHS: u32 = 6;
/// Months in role above which a contact counts as experienced.
const EXPERIENCED_MONTHS: u32 = 24;

/// Generate advice points from contact fields alone.
///
/// Order: most recent accomplishment, overlap points, time-in-role,
/// last communication, temperature script. The temperature script is
/// always present, so the list is never empty.
pub fn generate_advice(contact: &Contact) -> Vec<String> {
    let mut points = Vec::new();

    if let Some(recent) = contact.accomplishments.last() {
        points.push(format!(
            "Mention their recent accomplishment: \"{}\".",
            recent.title
        ));
    }

    if !contact.overlap_points.is_empty() {
        let overlaps = contact
            .overlap_points
            .iter()
            .map(|p| p.description.as_str())
            .collect::<Vec<_>>()
            .join("\" and \"");
        points.push(format!(
            "Connect over your shared background in \"{}\".",
            overlaps
        ));
    }

    if contact.time_in_role > 0 {
        if contact.time_in_role < NEW_IN_ROLE_MONTHS {
            points.push(
                "They're relatively new in their role. Ask how the transition \
                 has been going."
                    .to_string(),
            );
        } else if contact.time_in_role > EXPERIENCED_MONTHS {
            points.push(
                "They have significant experience in their current role. Ask \
                 about their biggest learnings or achievements."
                    .to_string(),
            );
        }
    }

    if let Some(last) = contact.communications.last() {
        points.push(format!(
            "In your last interaction on {}, you discussed: \"{}\". Follow up \
             on this topic.",
            last.date.format("%Y-%m-%d"),
            last.content
        ));
    }

    points.push(
        match contact.temperature {
            Temperature::Cold => COLD_SCRIPT,
            Temperature::Warm => WARM_SCRIPT,
            Temperature::Hot => HOT_SCRIPT,
        }
        .to_string(),
    );

    points
}
