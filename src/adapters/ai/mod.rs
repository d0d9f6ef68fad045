//! AI adapter module. Implements GenerationPort for LLM integration.
//!
//! Provides Gemini and OpenAI-compatible adapters, plus a scripted mock for testing.

pub mod gemini_adapter;
pub mod mock_adapter;
pub mod openai_adapter;

pub use gemini_adapter::GeminiAdapter;
pub use mock_adapter::MockGenerationAdapter;
pub use openai_adapter::OpenAiAdapter;
