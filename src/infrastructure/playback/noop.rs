use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Playback;
use crate::domain::models::PlaybackName;

/// Text only mode, nothing is spoken and every call completes immediately.
#[derive(Default)]
pub struct NoopPlayback {}

#[async_trait]
impl Playback for NoopPlayback {
    fn name(&self) -> PlaybackName {
        return PlaybackName::None;
    }

    #[allow(clippy::implicit_return)]
    async fn speak(&self, text: &str) -> Result<()> {
        tracing::debug!(text, "Skipping speech");
        return Ok(());
    }
}
