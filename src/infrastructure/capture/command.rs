#[cfg(test)]
#[path = "command_test.rs"]
mod tests;

use std::process::Stdio;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Child;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::domain::models::AudioPayload;
use crate::domain::models::Capture;
use crate::domain::models::CaptureName;
use crate::infrastructure::CommandLine;

struct Recording {
    child: Child,
    reader: JoinHandle<std::io::Result<Vec<u8>>>,
}

/// Records by running an external program that writes audio to stdout, such
/// as `arecord` or `sox`. The program is killed when the capture ends.
pub struct CommandCapture {
    command: CommandLine,
    recording: Mutex<Option<Recording>>,
}

impl CommandCapture {
    pub fn new(command: &str) -> Result<CommandCapture> {
        return Ok(CommandCapture {
            command: CommandLine::parse(command).context("Invalid capture command")?,
            recording: Mutex::new(None),
        });
    }
}

#[async_trait]
impl Capture for CommandCapture {
    fn name(&self) -> CaptureName {
        return CaptureName::Command;
    }

    #[allow(clippy::implicit_return)]
    async fn begin(&self) -> Result<()> {
        let mut recording = self.recording.lock().await;
        if recording.is_some() {
            bail!("A capture is already in progress");
        }

        let mut child = self
            .command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| {
                return format!("Unable to start recorder '{}'", self.command.program);
            })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| return anyhow!("Recorder has no stdout"))?;

        let reader: JoinHandle<std::io::Result<Vec<u8>>> = tokio::spawn(async move {
            let mut buf: Vec<u8> = vec![];
            stdout.read_to_end(&mut buf).await?;
            return Ok(buf);
        });

        tracing::debug!(program = %self.command.program, "Recorder started");
        *recording = Some(Recording { child, reader });

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn end(&self) -> AudioPayload {
        let recording = self.recording.lock().await.take();
        let mut recording = match recording {
            Some(recording) => recording,
            None => {
                tracing::warn!("No recorder running, returning an empty payload");
                return AudioPayload::empty();
            }
        };

        if let Err(err) = recording.child.start_kill() {
            tracing::debug!(err = ?err, "Recorder already exited");
        }
        if let Err(err) = recording.child.wait().await {
            tracing::warn!(err = ?err, "Failed to wait for recorder to exit");
        }

        match recording.reader.await {
            Ok(Ok(bytes)) => {
                tracing::debug!(bytes = bytes.len(), "Recorder stopped");
                if bytes.is_empty() {
                    tracing::warn!("No audio data captured, check microphone access");
                }
                return AudioPayload::new(bytes);
            }
            Ok(Err(err)) => {
                tracing::error!(err = ?err, "Failed to read recorder output");
                return AudioPayload::empty();
            }
            Err(err) => {
                tracing::error!(err = ?err, "Recorder reader task failed");
                return AudioPayload::empty();
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn cancel(&self) {
        if let Some(mut recording) = self.recording.lock().await.take() {
            if let Err(err) = recording.child.start_kill() {
                tracing::debug!(err = ?err, "Recorder already exited");
            }
            recording.reader.abort();
            tracing::debug!("Recorder cancelled");
        }
    }
}
