#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart;
use reqwest::redirect;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AudioPayload;
use crate::domain::models::ExchangeClient;
use crate::domain::models::ExchangeFailure;
use crate::domain::models::ExchangeResult;

/// Multipart field holding the recording.
pub const AUDIO_FIELD_NAME: &str = "file";
pub const AUDIO_FILE_NAME: &str = "recording.wav";
const AUDIO_MIME: &str = "audio/wav";

#[derive(Debug, Serialize, Deserialize)]
struct TranscribeResponse {
    query: String,
    response: String,
}

/// Talks to a `/transcribe_and_chat` style backend: the recording goes up as
/// a multipart upload, the transcription and reply come back as JSON, and a
/// redirect status means the caller hung up.
pub struct HttpExchange {
    url: String,
    timeout: Duration,
    health_check_timeout: Duration,
    farewell: String,
}

impl HttpExchange {
    pub fn new(
        url: &str,
        timeout: Duration,
        health_check_timeout: Duration,
        farewell: &str,
    ) -> HttpExchange {
        return HttpExchange {
            url: url.to_string(),
            timeout,
            health_check_timeout,
            farewell: farewell.to_string(),
        };
    }

    pub fn from_config() -> Result<HttpExchange> {
        return Ok(HttpExchange::new(
            &Config::get(ConfigKey::BackendURL),
            Config::get_duration(ConfigKey::BackendTimeout)?,
            Config::get_duration(ConfigKey::BackendHealthCheckTimeout)?,
            &Config::get(ConfigKey::Farewell),
        ));
    }

    async fn exchange(&self, payload: AudioPayload) -> Result<ExchangeResult, ExchangeFailure> {
        let client = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .timeout(self.timeout)
            .build()
            .map_err(|err| return ExchangeFailure::Request(err.to_string()))?;

        let part = multipart::Part::bytes(payload.into_bytes())
            .file_name(AUDIO_FILE_NAME)
            .mime_str(AUDIO_MIME)
            .map_err(|err| return ExchangeFailure::Request(err.to_string()))?;
        let form = multipart::Form::new().part(AUDIO_FIELD_NAME, part);

        let res = client
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| return ExchangeFailure::Transport(err.to_string()))?;

        let status = res.status();
        if status.is_redirection() {
            tracing::info!(status = status.as_u16(), "Backend ended the conversation");
            return Ok(ExchangeResult::EndOfConversation {
                farewell_text: self.farewell.to_string(),
            });
        }

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "Backend exchange failed");
            return Err(ExchangeFailure::Status(status.as_u16()));
        }

        let body = res
            .text()
            .await
            .map_err(|err| return ExchangeFailure::Transport(err.to_string()))?;
        let parsed = serde_json::from_str::<TranscribeResponse>(&body)
            .map_err(|err| return ExchangeFailure::Malformed(err.to_string()))?;

        tracing::debug!(body = ?parsed, "Exchange response");

        return Ok(ExchangeResult::Continue {
            user_text: parsed.query,
            bot_text: parsed.response,
        });
    }
}

#[async_trait]
impl ExchangeClient for HttpExchange {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::builder()
            .redirect(redirect::Policy::none())
            .build()?
            .get(&self.url)
            .timeout(self.health_check_timeout)
            .send()
            .await;

        // Any answer at all means the backend is up, it only accepts POST.
        if let Err(err) = res {
            tracing::error!(error = ?err, url = %self.url, "Backend is not reachable");
            bail!(format!("Dialogue backend at {} is not reachable", self.url));
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn send(&self, payload: AudioPayload) -> ExchangeResult {
        tracing::debug!(bytes = payload.len(), url = %self.url, "Sending capture");
        match self.exchange(payload).await {
            Ok(res) => return res,
            Err(reason) => {
                tracing::warn!(reason = %reason, "Exchange failed");
                return reason.into();
            }
        }
    }
}
