//! Local bag-of-words intent classifier.
//!
//! Trained once at process startup from the frozen corpus below, then
//! shared read-only across requests. Used only when the remote
//! classifier is unreachable; it labels intent and nothing else.

use crate::intent::Intent;
use std::collections::HashMap;

/// The frozen training corpus: three phrases per intent.
pub const TRAINING_CORPUS: [(&str, Intent); 18] = [
    ("find contacts in team", Intent::SearchByTeam),
    ("search for contacts in team", Intent::SearchByTeam),
    ("show me contacts in team", Intent::SearchByTeam),
    ("find contacts with role", Intent::SearchByRole),
    ("search for contacts with role", Intent::SearchByRole),
    ("show me contacts with role", Intent::SearchByRole),
    ("remind me to contact", Intent::SetReminder),
    ("set a reminder for", Intent::SetReminder),
    ("create a reminder to", Intent::SetReminder),
    ("who have I not contacted recently", Intent::ColdContacts),
    ("contacts I haven't reached out to", Intent::ColdContacts),
    ("show me cold contacts", Intent::ColdContacts),
    ("generate a report on", Intent::GenerateReport),
    ("create a report about", Intent::GenerateReport),
    ("show me a report of", Intent::GenerateReport),
    ("how should I engage with", Intent::EngagementAdvice),
    ("what should I talk about with", Intent::EngagementAdvice),
    ("give me talking points for", Intent::EngagementAdvice),
];

/// Lowercase and split on non-alphanumeric characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

/// Naive-Bayes classifier over word counts with Laplace smoothing.
///
/// Immutable after `train`; safe for concurrent reads without locking.
/// There is no confidence threshold: `classify` always returns the
/// best-scoring label from the trained set.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    /// Per-intent token counts.
    token_counts: HashMap<Intent, HashMap<String, u32>>,
    /// Per-intent total token count.
    totals: HashMap<Intent, u32>,
    /// Per-intent document count, for the prior.
    doc_counts: HashMap<Intent, u32>,
    documents: u32,
    vocabulary: usize,
}

impl IntentClassifier {
    /// Build a classifier from labeled phrases. Invoked once during
    /// startup; the result is injected into request handling rather
    /// than living in ambient global state.
    pub fn train(corpus: &[(&str, Intent)]) -> Self {
        let mut token_counts: HashMap<Intent, HashMap<String, u32>> = HashMap::new();
        let mut totals: HashMap<Intent, u32> = HashMap::new();
        let mut doc_counts: HashMap<Intent, u32> = HashMap::new();
        let mut vocabulary: HashMap<String, ()> = HashMap::new();

        for (phrase, intent) in corpus {
            *doc_counts.entry(*intent).or_default() += 1;
            let counts = token_counts.entry(*intent).or_default();
            for token in tokenize(phrase) {
                vocabulary.entry(token.clone()).or_default();
                *counts.entry(token).or_default() += 1;
                *totals.entry(*intent).or_default() += 1;
            }
        }

        Self {
            token_counts,
            totals,
            doc_counts,
            documents: corpus.len() as u32,
            vocabulary: vocabulary.len(),
        }
    }

    /// Classifier over the default frozen corpus.
    pub fn with_default_corpus() -> Self {
        Self::train(&TRAINING_CORPUS)
    }

    /// Log-probability score of `tokens` under `intent`.
    fn score(&self, intent: Intent, tokens: &[String]) -> f64 {
        let docs = f64::from(*self.doc_counts.get(&intent).unwrap_or(&0));
        if docs == 0.0 {
            return f64::NEG_INFINITY;
        }
        let prior = (docs / f64::from(self.documents)).ln();
        let total = f64::from(*self.totals.get(&intent).unwrap_or(&0));
        let denom = total + self.vocabulary as f64;
        let counts = self.token_counts.get(&intent);

        tokens.iter().fold(prior, |acc, token| {
            let count = counts
                .and_then(|c| c.get(token))
                .copied()
                .unwrap_or(0);
            acc + ((f64::from(count) + 1.0) / denom).ln()
        })
    }

    /// Best-scoring intent for the text. Ties break toward the first
    /// intent in `Intent::ALL` order, which keeps classification
    /// deterministic for any input.
    pub fn classify(&self, text: &str) -> Intent {
        let tokens = tokenize(text);

        let mut best = Intent::ALL[0];
        let mut best_score = f64::NEG_INFINITY;
        for intent in Intent::ALL {
            let score = self.score(intent, &tokens);
            if score > best_score {
                best = intent;
                best_score = score;
            }
        }
        best
    }
}
