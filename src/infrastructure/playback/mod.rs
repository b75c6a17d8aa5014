pub mod command;
pub mod noop;

use std::sync::Arc;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::PlaybackName;
use crate::domain::models::SharedPlayback;

pub struct PlaybackManager {}

impl PlaybackManager {
    pub fn get(name: PlaybackName) -> Result<SharedPlayback> {
        if name == PlaybackName::Command {
            let playback =
                command::CommandPlayback::new(&Config::get(ConfigKey::PlaybackCommand))?;
            return Ok(Arc::new(playback));
        }

        return Ok(Arc::new(noop::NoopPlayback::default()));
    }
}
