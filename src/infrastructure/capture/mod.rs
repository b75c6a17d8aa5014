pub mod command;
pub mod noop;

use std::sync::Arc;

use anyhow::Result;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CaptureName;
use crate::domain::models::SharedCapture;

pub struct CaptureManager {}

impl CaptureManager {
    pub fn get(name: CaptureName) -> Result<SharedCapture> {
        if name == CaptureName::Command {
            let capture = command::CommandCapture::new(&Config::get(ConfigKey::CaptureCommand))?;
            return Ok(Arc::new(capture));
        }

        return Ok(Arc::new(noop::NoopCapture::default()));
    }
}
