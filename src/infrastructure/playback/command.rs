#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::process::Stdio;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::Playback;
use crate::domain::models::PlaybackName;
use crate::infrastructure::CommandLine;

/// Speaks through an external text to speech program such as `espeak` or
/// `say`, passing the text as the last argument.
pub struct CommandPlayback {
    command: CommandLine,
}

impl CommandPlayback {
    pub fn new(command: &str) -> Result<CommandPlayback> {
        return Ok(CommandPlayback {
            command: CommandLine::parse(command).context("Invalid playback command")?,
        });
    }
}

#[async_trait]
impl Playback for CommandPlayback {
    fn name(&self) -> PlaybackName {
        return PlaybackName::Command;
    }

    #[allow(clippy::implicit_return)]
    async fn speak(&self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(());
        }

        tracing::debug!(program = %self.command.program, text, "Speaking");

        // Dropping this future (the call was reset) kills the speech program.
        let status = self
            .command
            .to_command()
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .with_context(|| {
                return format!("Unable to start speech program '{}'", self.command.program);
            })?;

        if !status.success() {
            bail!(format!(
                "Speech program '{}' exited with {status}",
                self.command.program
            ));
        }

        return Ok(());
    }
}
