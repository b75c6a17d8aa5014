#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use super::Turn;

/// What the bot is saying while the session is in `Phase::Speaking`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Utterance {
    Reply,
    Apology,
    /// Terminal. The session ends once it has been spoken.
    Farewell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Greeting,
    Capturing,
    Exchanging,
    Speaking(Utterance),
    Ended,
}

impl Phase {
    pub fn can_start(&self) -> bool {
        return matches!(self, Phase::Idle | Phase::Ended);
    }

    pub fn is_terminal_speech(&self) -> bool {
        return matches!(self, Phase::Speaking(Utterance::Farewell));
    }
}

/// The single live conversation. Cloned into `Event::SessionChanged` every
/// time the orchestrator finishes a transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub phase: Phase,
    pub active: bool,
    pub recording: bool,
    pub auto_continue: bool,
    pub transcript: Vec<Turn>,
}

impl Session {
    /// Appends a turn, dropping it if it has no text. Returns whether the turn
    /// was committed.
    pub fn push_turn(&mut self, turn: Turn) -> bool {
        if turn.is_blank() {
            tracing::debug!(speaker = %turn.speaker, "Skipping blank turn");
            return false;
        }

        self.transcript.push(turn);
        return true;
    }

    /// Clears every flag and the transcript, leaving the session in `phase`.
    pub fn clear(&mut self, phase: Phase) {
        self.phase = phase;
        self.active = false;
        self.recording = false;
        self.auto_continue = false;
        self.transcript.clear();
    }
}
