#[cfg(test)]
#[path = "exchange_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use super::AudioPayload;

/// Why an exchange with the dialogue backend did not produce a reply.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ExchangeFailure {
    #[error("could not build the backend request: {0}")]
    Request(String),

    #[error("could not reach the backend: {0}")]
    Transport(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("backend returned a malformed response: {0}")]
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExchangeResult {
    Continue {
        user_text: String,
        bot_text: String,
    },
    EndOfConversation {
        farewell_text: String,
    },
    Failure {
        reason: ExchangeFailure,
    },
}

impl From<ExchangeFailure> for ExchangeResult {
    fn from(reason: ExchangeFailure) -> ExchangeResult {
        return ExchangeResult::Failure { reason };
    }
}

#[async_trait]
pub trait ExchangeClient {
    /// Used at startup to check the dialogue backend can be reached at all.
    async fn health_check(&self) -> Result<()>;

    /// Sends one captured payload to the backend. Every transport, status, or
    /// parsing problem comes back as `ExchangeResult::Failure`, this never
    /// errors.
    async fn send(&self, payload: AudioPayload) -> ExchangeResult;
}

pub type SharedExchangeClient = Arc<dyn ExchangeClient + Send + Sync>;
