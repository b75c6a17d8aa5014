#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::Scroll;
use super::TranscriptList;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Session;

/// Everything the terminal UI draws from. Only ever holds the latest session
/// snapshot published by the orchestrator.
pub struct AppState {
    pub backend_warning: Option<String>,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub scroll: Scroll,
    pub session: Session,
    pub transcript_list: TranscriptList,
}

impl AppState {
    pub fn new(backend_warning: Option<String>) -> AppState {
        return AppState {
            backend_warning,
            last_known_height: 0,
            last_known_width: 0,
            scroll: Scroll::default(),
            session: Session::default(),
            transcript_list: TranscriptList::default(),
        };
    }

    pub fn set_session(&mut self, session: Session) {
        self.session = session;
        self.sync_dependants();
    }

    pub fn set_rect(&mut self, rect: Rect) {
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();
    }

    /// Applies a UI event and forwards call controls to the orchestrator.
    /// Returns true when the UI should quit.
    pub fn handle_event(&mut self, event: Event, tx: &mpsc::UnboundedSender<Action>) -> Result<bool> {
        match event {
            Event::SessionChanged(session) => {
                self.set_session(session);
            }
            Event::KeyboardEnter() => {
                if self.session.phase.can_start() {
                    tx.send(Action::Start())?;
                }
            }
            Event::KeyboardSpace() => {
                if self.session.recording {
                    tx.send(Action::StopCapture())?;
                }
            }
            Event::KeyboardEsc() => {
                if self.session.active {
                    tx.send(Action::Reset())?;
                }
            }
            Event::KeyboardCTRLC() => {
                if tx.send(Action::Reset()).is_err() {
                    tracing::debug!("Orchestrator already stopped");
                }
                return Ok(true);
            }
            Event::UIScrollDown() => {
                self.scroll.down();
            }
            Event::UIScrollUp() => {
                self.scroll.up();
            }
            Event::UIScrollPageDown() => {
                self.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                self.scroll.up_page();
            }
            Event::UIResize() | Event::UITick() => {}
        }

        return Ok(false);
    }

    fn sync_dependants(&mut self) {
        self.transcript_list
            .set_turns(&self.session.transcript, self.last_known_width as usize);

        self.scroll.set_state(
            self.transcript_list.len() as u16,
            self.last_known_height,
        );
    }
}
