#[cfg(test)]
#[path = "capture_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum CaptureName {
    Command,
    None,
}

impl CaptureName {
    pub fn parse(text: String) -> Option<CaptureName> {
        return CaptureName::iter().find(|e| return e.to_string() == text);
    }
}

/// Recorded audio from one capture cycle. A zero length payload is the
/// sentinel for "nothing was captured".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>) -> AudioPayload {
        return AudioPayload { bytes };
    }

    pub fn empty() -> AudioPayload {
        return AudioPayload::default();
    }

    pub fn is_empty(&self) -> bool {
        return self.bytes.is_empty();
    }

    pub fn len(&self) -> usize {
        return self.bytes.len();
    }

    pub fn as_bytes(&self) -> &[u8] {
        return &self.bytes;
    }

    pub fn into_bytes(self) -> Vec<u8> {
        return self.bytes;
    }
}

#[async_trait]
pub trait Capture {
    /// Returns the name of the capture device.
    fn name(&self) -> CaptureName;

    /// Opens the device and starts buffering audio. An error means no audio
    /// will be buffered, `end` still has to be called and will return an
    /// empty payload.
    async fn begin(&self) -> Result<()>;

    /// Stops the device and returns everything buffered since `begin`, or an
    /// empty payload if nothing was captured.
    async fn end(&self) -> AudioPayload;

    /// Stops the device and throws away the buffered audio without waiting
    /// for it.
    async fn cancel(&self);
}

pub type SharedCapture = Arc<dyn Capture + Send + Sync>;
