//! Mentor chat: per-session history, one answer call and one follow-up call per question.

use crate::domain::entities::require;
use crate::domain::extract::{Shape, extract_as};
use crate::domain::prompts::{follow_up_prompt, mentor_prompt};
use crate::domain::{
    ConversationTurn, DomainError, MentorReply, Profile, ResetResponse, SuggestedQuestions,
};
use crate::ports::{ConversationPort, GenerationPort};
use crate::usecases::FailurePolicy;
use std::sync::Arc;
use tracing::{debug, info};

const FOLLOW_UP_COUNT: usize = 3;

const DEFAULT_FOLLOW_UPS: [&str; FOLLOW_UP_COUNT] = [
    "How do I find my first customers?",
    "What metrics should I focus on initially?",
    "How should I structure my founding team?",
];

const STARTER_QUESTIONS: &[&str] = &[
    "How do I find my first customers?",
    "When should I hire my first employee?",
    "How much equity should I give to co-founders?",
    "What metrics should I focus on in my first year?",
    "How do I create an effective pitch deck?",
    "What's the best way to approach investors?",
    "How do I know if my startup idea is viable?",
    "What legal structure is best for my startup?",
    "How should I price my product or service?",
    "What are the most common mistakes first-time founders make?",
];

fn default_follow_ups() -> Vec<String> {
    DEFAULT_FOLLOW_UPS.iter().map(|q| q.to_string()).collect()
}

/// Exactly three questions: extras are dropped, gaps filled from the defaults.
fn pad_follow_ups(mut questions: Vec<String>) -> Vec<String> {
    questions.retain(|q| !q.trim().is_empty());
    questions.truncate(FOLLOW_UP_COUNT);
    for default in DEFAULT_FOLLOW_UPS {
        if questions.len() >= FOLLOW_UP_COUNT {
            break;
        }
        if !questions.iter().any(|q| q == default) {
            questions.push(default.to_string());
        }
    }
    questions
}

pub struct MentorService {
    ai: Arc<dyn GenerationPort>,
    conversations: Arc<dyn ConversationPort>,
}

impl MentorService {
    const FOLLOW_UP_POLICY: FailurePolicy<Vec<String>> =
        FailurePolicy::Fallback(default_follow_ups);

    pub fn new(ai: Arc<dyn GenerationPort>, conversations: Arc<dyn ConversationPort>) -> Self {
        Self { ai, conversations }
    }

    /// Answer `message` in the context of the session's history.
    ///
    /// # Errors
    /// `MissingRequiredField` for a blank session id or message, `GenerationUnavailable` when
    /// the answer call fails. The user turn stays recorded in that case.
    pub async fn ask(
        &self,
        session_id: &str,
        message: &str,
        profile: Option<&Profile>,
    ) -> Result<MentorReply, DomainError> {
        require("sessionId", session_id)?;
        require("message", message)?;

        let history = self.conversations.history(session_id).await;
        info!(session_id, prior_turns = history.len(), "mentor question");

        let prompt = mentor_prompt(&history, message, profile);
        self.conversations
            .append(session_id, ConversationTurn::user(message))
            .await;

        let answer = self.ai.generate(&prompt).await?;
        self.conversations
            .append(session_id, ConversationTurn::assistant(answer.clone()))
            .await;

        let follow_up_questions = self.follow_ups(message, &answer).await;
        debug!(session_id, follow_ups = follow_up_questions.len(), "mentor answer ready");

        Ok(MentorReply {
            message: answer,
            follow_up_questions,
        })
    }

    async fn follow_ups(&self, question: &str, answer: &str) -> Vec<String> {
        let result = self.request_follow_ups(question, answer).await;
        let questions = Self::FOLLOW_UP_POLICY.resolve("follow_ups", result, default_follow_ups);
        pad_follow_ups(questions)
    }

    async fn request_follow_ups(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Vec<String>, DomainError> {
        let raw = self.ai.generate(&follow_up_prompt(question, answer)).await?;
        extract_as(&raw, Shape::Array)
    }

    /// Clear the session's history.
    ///
    /// # Errors
    /// `MissingRequiredField` for a blank session id.
    pub async fn reset(&self, session_id: &str) -> Result<ResetResponse, DomainError> {
        require("sessionId", session_id)?;
        self.conversations.reset(session_id).await;
        info!(session_id, "mentor conversation reset");
        Ok(ResetResponse {
            success: true,
            message: "Conversation reset successfully".to_string(),
        })
    }

    pub async fn history(&self, session_id: &str) -> Vec<ConversationTurn> {
        self.conversations.history(session_id).await
    }

    /// Static starter questions.
    pub fn suggested_questions(&self) -> SuggestedQuestions {
        SuggestedQuestions {
            questions: STARTER_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }
}
