//! Mock generation adapter for testing without API calls.
//!
//! Plays back a script of replies in order and records every prompt it receives.

use crate::domain::DomainError;
use crate::ports::GenerationPort;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::info;

const UNSCRIPTED_REPLY: &str = "[MOCK] This is a simulated response. Configure an AI API key \
     (GEMINI_API_KEY or COPILOT_AI_API_KEY) to get real guidance.";

/// Mock generation adapter.
///
/// Returns scripted replies without making API calls; once the script is exhausted every call
/// answers with a fixed placeholder text.
pub struct MockGenerationAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    script: Mutex<VecDeque<Result<String, DomainError>>>,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerationAdapter {
    /// Create a new mock adapter with default delay (100ms) and an empty script.
    pub fn new() -> Self {
        Self::with_delay(100)
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Mock that answers with `replies` in order, without delay.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            delay_ms: 0,
            script: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a failure.
    pub async fn push_error(&self, error: DomainError) {
        self.script.lock().await.push_back(Err(error));
    }

    /// Prompts received so far, in call order.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn calls(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

impl Default for MockGenerationAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationPort for MockGenerationAdapter {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        info!(prompt_len = prompt.len(), "[MOCK] Simulating generation");

        self.prompts.lock().await.push(prompt.to_string());

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        match self.script.lock().await.pop_front() {
            Some(reply) => reply,
            None => Ok(UNSCRIPTED_REPLY.to_string()),
        }
    }
}
