//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: an interactive front end driving the artifact pipelines.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run until the user exits.
    async fn run(&self) -> Result<(), DomainError>;
}
