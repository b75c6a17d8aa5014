use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum PlaybackName {
    Command,
    None,
}

impl PlaybackName {
    pub fn parse(text: String) -> Option<PlaybackName> {
        return PlaybackName::iter().find(|e| return e.to_string() == text);
    }
}

#[async_trait]
pub trait Playback {
    /// Returns the name of the speech output device.
    fn name(&self) -> PlaybackName;

    /// Speaks `text` and resolves once it has finished playing. Blank text
    /// resolves straight away without producing any audio.
    async fn speak(&self, text: &str) -> Result<()>;
}

pub type SharedPlayback = Arc<dyn Playback + Send + Sync>;
