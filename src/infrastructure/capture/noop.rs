#[cfg(test)]
#[path = "noop_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::AudioPayload;
use crate::domain::models::Capture;
use crate::domain::models::CaptureName;

/// No microphone at all. Every capture cycle yields the empty payload.
#[derive(Default)]
pub struct NoopCapture {}

#[async_trait]
impl Capture for NoopCapture {
    fn name(&self) -> CaptureName {
        return CaptureName::None;
    }

    #[allow(clippy::implicit_return)]
    async fn begin(&self) -> Result<()> {
        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn end(&self) -> AudioPayload {
        return AudioPayload::empty();
    }

    #[allow(clippy::implicit_return)]
    async fn cancel(&self) {}
}
