//! Assistant bridge: forwards a question, plus optional case context, to a
//! chat-completion service.
//!
//! The bridge never fails from the caller's point of view. A missing
//! credential and a failed outbound call both come back as fixed text.

use async_trait::async_trait;
use tracing::warn;

use crate::clients::openai::{ChatCompletionClient, ChatMessage};
use crate::config::AssistantConfig;
use crate::constants::messages;
use crate::models::CaseContext;

#[async_trait]
pub trait Assistant: Send + Sync {
    async fn ask(&self, question: &str, context: Option<&CaseContext>) -> String;
}

/// System + user exchange sent for one question.
#[must_use]
pub fn build_messages(question: &str, context: Option<&CaseContext>) -> Vec<ChatMessage> {
    let system = context.map_or_else(
        || "You are a legal assistant. Answer legal questions.".to_string(),
        |context| format!("You are a legal assistant. Context: {}", context.summary()),
    );

    vec![ChatMessage::system(system), ChatMessage::user(question)]
}

pub struct OpenAiAssistant {
    /// `None` when no credential is configured.
    client: Option<ChatCompletionClient>,
}

impl OpenAiAssistant {
    pub fn new(config: &AssistantConfig) -> anyhow::Result<Self> {
        let client = match config.api_key.as_deref() {
            Some(key) => Some(ChatCompletionClient::new(config, key)?),
            None => None,
        };

        Ok(Self { client })
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

#[async_trait]
impl Assistant for OpenAiAssistant {
    async fn ask(&self, question: &str, context: Option<&CaseContext>) -> String {
        let messages = build_messages(question, context);

        let Some(client) = &self.client else {
            return messages::ASSISTANT_NOT_CONFIGURED.to_string();
        };

        match client.complete(&messages).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Assistant call failed");
                metrics::counter!("assistant_failures_total").increment(1);
                messages::ASSISTANT_UNAVAILABLE.to_string()
            }
        }
    }
}
