#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Event;
use crate::domain::models::Phase;
use crate::domain::models::Session;
use crate::domain::models::Speaker;
use crate::domain::models::Turn;

/// The orchestrator's write handle on the session. Mutations are batched and
/// only become visible to the presentation layer on `publish`.
pub struct SessionState {
    session: Session,
    tx: mpsc::UnboundedSender<Event>,
}

impl SessionState {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> SessionState {
        return SessionState {
            session: Session::default(),
            tx,
        };
    }

    pub fn session(&self) -> &Session {
        return &self.session;
    }

    pub fn phase(&self) -> Phase {
        return self.session.phase;
    }

    pub fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.session.phase, to = ?phase, "Phase change");
        self.session.phase = phase;
    }

    pub fn activate(&mut self) {
        self.session.active = true;
    }

    pub fn set_recording(&mut self, recording: bool, auto_continue: bool) {
        self.session.recording = recording;
        self.session.auto_continue = auto_continue;
    }

    pub fn push_turn(&mut self, speaker: Speaker, text: &str) -> bool {
        return self.session.push_turn(Turn::new(speaker, text));
    }

    pub fn clear(&mut self, phase: Phase) {
        self.session.clear(phase);
    }

    pub fn publish(&self) -> Result<()> {
        self.tx.send(Event::SessionChanged(self.session.clone()))?;
        return Ok(());
    }
}
