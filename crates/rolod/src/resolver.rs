//! Intent resolution: remote classifier first, local fallback second.

use rolo_core::intent::ClassificationResult;
use rolo_core::IntentClassifier;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::llm::LlmClient;

/// Turns raw query text into a `ClassificationResult`.
///
/// Contract: exactly one result per query, at most one remote call, no
/// retries. Worst case is `Unknown` with no entities; resolution never
/// fails. The local classifier labels intent only, so the fallback path
/// always carries `entities: None` and handlers re-extract from the
/// query text.
pub struct IntentResolver {
    llm: Arc<LlmClient>,
    local: IntentClassifier,
}

impl IntentResolver {
    pub fn new(llm: Arc<LlmClient>, local: IntentClassifier) -> Self {
        Self { llm, local }
    }

    pub async fn resolve(&self, query: &str) -> ClassificationResult {
        match self.llm.classify(query).await {
            Ok(result) => {
                debug!(intent = result.intent.label(), "Remote classification");
                result
            }
            Err(e) => {
                warn!("Remote classifier unavailable, using local fallback: {e}");
                let intent = self.local.classify(query);
                debug!(intent = intent.label(), "Local classification");
                ClassificationResult {
                    intent,
                    entities: None,
                    raw_text: None,
                }
            }
        }
    }
}
