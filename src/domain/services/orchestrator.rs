#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use super::SessionState;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::ExchangeResult;
use crate::domain::models::Phase;
use crate::domain::models::SharedCapture;
use crate::domain::models::SharedExchangeClient;
use crate::domain::models::SharedPlayback;
use crate::domain::models::Speaker;
use crate::domain::models::Utterance;

/// Fixed lines the bot speaks and how long a single capture may run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationSettings {
    pub greeting: String,
    pub apology: String,
    pub capture_timeout: Duration,
}

impl Default for ConversationSettings {
    fn default() -> ConversationSettings {
        return ConversationSettings {
            greeting: "Hi, I'm Callbot. How can I assist you?".to_string(),
            apology: "Sorry, something went wrong!".to_string(),
            capture_timeout: Duration::from_secs(8),
        };
    }
}

impl ConversationSettings {
    pub fn from_config() -> Result<ConversationSettings> {
        return Ok(ConversationSettings {
            greeting: Config::get(ConfigKey::Greeting),
            apology: Config::get(ConfigKey::Apology),
            capture_timeout: Config::get_duration(ConfigKey::CaptureTimeout)?,
        });
    }
}

#[derive(Debug)]
enum SignalKind {
    /// Carries the capture cycle the timer was armed for.
    CaptureTimeout(u64),
    Exchanged(ExchangeResult),
    Spoken(),
}

/// Completion of a timer or background worker, tagged with the generation
/// it was started in. Anything from an older generation is discarded.
#[derive(Debug)]
struct Signal {
    generation: u64,
    kind: SignalKind,
}

/// Owns the session and drives it through greeting, capture, exchange and
/// speech. Every transition runs on the orchestrator's own task, device and
/// network work runs on spawned workers that report back through signals.
pub struct TurnOrchestrator {
    capture: SharedCapture,
    playback: SharedPlayback,
    exchange: SharedExchangeClient,
    settings: ConversationSettings,
    state: SessionState,
    signal_tx: mpsc::UnboundedSender<Signal>,
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    generation: u64,
    capture_cycle: u64,
    capture_timer: Option<JoinHandle<()>>,
    worker: Option<JoinHandle<Result<()>>>,
}

impl TurnOrchestrator {
    pub fn new(
        capture: SharedCapture,
        playback: SharedPlayback,
        exchange: SharedExchangeClient,
        settings: ConversationSettings,
        tx: mpsc::UnboundedSender<Event>,
    ) -> TurnOrchestrator {
        let (signal_tx, signal_rx) = mpsc::unbounded_channel::<Signal>();

        return TurnOrchestrator {
            capture,
            playback,
            exchange,
            settings,
            state: SessionState::new(tx),
            signal_tx,
            signal_rx,
            generation: 0,
            capture_cycle: 0,
            capture_timer: None,
            worker: None,
        };
    }

    /// Runs until the action channel closes. Actions are preferred over
    /// pending signals so a reset always wins against a completion that
    /// arrives at the same time.
    pub async fn start(mut self, rx: &mut mpsc::UnboundedReceiver<Action>) -> Result<()> {
        tracing::info!(
            capture = %self.capture.name(),
            playback = %self.playback.name(),
            "Orchestrator started"
        );

        loop {
            tokio::select! {
                biased;

                action = rx.recv() => {
                    match action {
                        Some(action) => self.handle_action(action).await?,
                        None => {
                            tracing::debug!("Action channel closed, shutting down");
                            self.release_resources().await;
                            return Ok(());
                        }
                    }
                }
                Some(signal) = self.signal_rx.recv() => {
                    self.handle_signal(signal).await?;
                }
            }
        }
    }

    async fn handle_action(&mut self, action: Action) -> Result<()> {
        tracing::debug!(action = ?action, phase = ?self.state.phase(), "Action received");

        match action {
            Action::Start() => return self.start_chat(),
            Action::StopCapture() => {
                if self.state.phase() != Phase::Capturing {
                    tracing::debug!("Ignoring stop, nothing is being captured");
                    return Ok(());
                }

                tracing::info!("Capture stopped by the user");
                return self.stop_capture();
            }
            Action::Reset() => return self.reset().await,
        }
    }

    async fn handle_signal(&mut self, signal: Signal) -> Result<()> {
        if signal.generation != self.generation {
            tracing::debug!(
                signal = ?signal.kind,
                generation = signal.generation,
                current = self.generation,
                "Discarding stale signal"
            );
            return Ok(());
        }

        match signal.kind {
            SignalKind::CaptureTimeout(cycle) => {
                if self.state.phase() != Phase::Capturing || cycle != self.capture_cycle {
                    tracing::debug!(cycle, "Discarding timeout for a finished capture");
                    return Ok(());
                }

                tracing::info!(
                    timeout_ms = self.settings.capture_timeout.as_millis() as u64,
                    "Capture timed out"
                );
                self.capture_timer = None;
                return self.stop_capture();
            }
            SignalKind::Exchanged(result) => {
                self.worker = None;
                if self.state.phase() != Phase::Exchanging {
                    return self.fail_invariant("exchange completed outside of exchanging").await;
                }

                return self.finish_exchange(result);
            }
            SignalKind::Spoken() => {
                self.worker = None;
                match self.state.phase() {
                    Phase::Greeting => return self.begin_capture(false).await,
                    phase if phase.is_terminal_speech() => return self.end_chat().await,
                    Phase::Speaking(_) => return self.begin_capture(true).await,
                    _ => return self.fail_invariant("speech completed outside of speaking").await,
                }
            }
        }
    }

    fn start_chat(&mut self) -> Result<()> {
        if !self.state.phase().can_start() {
            tracing::debug!(phase = ?self.state.phase(), "Ignoring start, a call is in progress");
            return Ok(());
        }

        tracing::info!(generation = self.generation, "Starting chat");
        let greeting = self.settings.greeting.to_string();

        self.state.clear(Phase::Greeting);
        self.state.activate();
        self.state.push_turn(Speaker::Bot, &greeting);
        self.state.publish()?;

        self.speak(greeting);
        return Ok(());
    }

    async fn begin_capture(&mut self, auto_continue: bool) -> Result<()> {
        if self.state.session().recording || self.capture_timer.is_some() {
            return self.fail_invariant("capture started while another is in flight").await;
        }

        self.capture_cycle += 1;
        if let Err(err) = self.capture.begin().await {
            tracing::error!(error = ?err, "Capture device failed to start, this turn will be empty");
        }

        self.capture_timer = Some(self.arm_capture_timer());
        self.state.set_phase(Phase::Capturing);
        self.state.set_recording(true, auto_continue);
        return self.state.publish();
    }

    fn stop_capture(&mut self) -> Result<()> {
        self.disarm_capture_timer();
        self.state.set_recording(false, false);
        self.state.set_phase(Phase::Exchanging);
        self.state.publish()?;

        let capture = self.capture.clone();
        let exchange = self.exchange.clone();
        let tx = self.signal_tx.clone();
        let generation = self.generation;

        self.spawn_worker(async move {
            let payload = capture.end().await;
            tracing::debug!(bytes = payload.len(), "Capture ended");

            let result = exchange.send(payload).await;
            tx.send(Signal {
                generation,
                kind: SignalKind::Exchanged(result),
            })?;

            return Ok(());
        });

        return Ok(());
    }

    fn finish_exchange(&mut self, result: ExchangeResult) -> Result<()> {
        let (utterance, text) = match result {
            ExchangeResult::Continue {
                user_text,
                bot_text,
            } => {
                self.state.push_turn(Speaker::User, &user_text);
                self.state.push_turn(Speaker::Bot, &bot_text);
                (Utterance::Reply, bot_text)
            }
            ExchangeResult::EndOfConversation { farewell_text } => {
                self.state.push_turn(Speaker::Bot, &farewell_text);
                (Utterance::Farewell, farewell_text)
            }
            ExchangeResult::Failure { reason } => {
                tracing::warn!(reason = %reason, "Exchange failed");
                let apology = self.settings.apology.to_string();
                self.state.push_turn(Speaker::Bot, &apology);
                (Utterance::Apology, apology)
            }
        };

        tracing::info!(utterance = %utterance, "Speaking");
        self.state.set_phase(Phase::Speaking(utterance));
        self.state.publish()?;

        self.speak(text);
        return Ok(());
    }

    async fn end_chat(&mut self) -> Result<()> {
        tracing::info!("Conversation ended");
        self.release_resources().await;
        self.state.clear(Phase::Ended);
        return self.state.publish();
    }

    /// Abandons whatever is in flight. Completions already queued from the
    /// previous generation are discarded when they arrive.
    async fn reset(&mut self) -> Result<()> {
        self.generation += 1;
        tracing::info!(generation = self.generation, phase = ?self.state.phase(), "Resetting chat");

        self.release_resources().await;
        self.state.clear(Phase::Idle);
        return self.state.publish();
    }

    async fn fail_invariant(&mut self, message: &str) -> Result<()> {
        tracing::error!(phase = ?self.state.phase(), "{message}, forcing a reset");
        return self.reset().await;
    }

    fn speak(&mut self, text: String) {
        let playback = self.playback.clone();
        let tx = self.signal_tx.clone();
        let generation = self.generation;

        self.spawn_worker(async move {
            if let Err(err) = playback.speak(&text).await {
                tracing::error!(error = ?err, "Playback failed");
            }

            tx.send(Signal {
                generation,
                kind: SignalKind::Spoken(),
            })?;

            return Ok(());
        });
    }

    fn spawn_worker<F>(&mut self, future: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        if let Some(previous) = self.worker.replace(tokio::spawn(future)) {
            if !previous.is_finished() {
                tracing::error!("A worker was still running when another was spawned");
                previous.abort();
            }
        }
    }

    fn arm_capture_timer(&self) -> JoinHandle<()> {
        let tx = self.signal_tx.clone();
        let timeout = self.settings.capture_timeout;
        let signal = Signal {
            generation: self.generation,
            kind: SignalKind::CaptureTimeout(self.capture_cycle),
        };

        return tokio::spawn(async move {
            time::sleep(timeout).await;
            if tx.send(signal).is_err() {
                tracing::debug!("Capture timer fired after the orchestrator stopped");
            }
        });
    }

    fn disarm_capture_timer(&mut self) {
        if let Some(timer) = self.capture_timer.take() {
            timer.abort();
        }
    }

    async fn release_resources(&mut self) {
        self.disarm_capture_timer();
        if let Some(worker) = self.worker.take() {
            worker.abort();
        }
        self.capture.cancel().await;
    }
}
