#[cfg(test)]
#[path = "events_test.rs"]
mod tests;

use anyhow::Result;
use crossterm::event::Event as CrosstermEvent;
use crossterm::event::EventStream;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseEventKind;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::time;

use crate::domain::models::Event;

/// Merges terminal input, orchestrator session updates, and a redraw tick
/// into a single stream of `Event`s for the UI loop.
pub struct EventsService {
    crossterm_events: EventStream,
    events: mpsc::UnboundedReceiver<Event>,
}

fn handle_key(keyevent: KeyEvent) -> Option<Event> {
    if keyevent.kind == KeyEventKind::Release {
        return None;
    }

    let ctrl = keyevent.modifiers.contains(KeyModifiers::CONTROL);
    match keyevent.code {
        KeyCode::Char('c') if ctrl => return Some(Event::KeyboardCTRLC()),
        KeyCode::Char('d') if ctrl => return Some(Event::UIScrollPageDown()),
        KeyCode::Char('u') if ctrl => return Some(Event::UIScrollPageUp()),
        KeyCode::Char(' ') => return Some(Event::KeyboardSpace()),
        KeyCode::Enter => return Some(Event::KeyboardEnter()),
        KeyCode::Esc => return Some(Event::KeyboardEsc()),
        KeyCode::Down => return Some(Event::UIScrollDown()),
        KeyCode::Up => return Some(Event::UIScrollUp()),
        KeyCode::PageDown => return Some(Event::UIScrollPageDown()),
        KeyCode::PageUp => return Some(Event::UIScrollPageUp()),
        _ => return None,
    }
}

pub fn handle_crossterm(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Mouse(mouseevent) => match mouseevent.kind {
            MouseEventKind::ScrollUp => return Some(Event::UIScrollUp()),
            MouseEventKind::ScrollDown => return Some(Event::UIScrollDown()),
            _ => return None,
        },
        CrosstermEvent::Key(keyevent) => return handle_key(keyevent),
        CrosstermEvent::Resize(_, _) => return Some(Event::UIResize()),
        _ => return None,
    }
}

impl EventsService {
    pub fn new(events: mpsc::UnboundedReceiver<Event>) -> EventsService {
        return EventsService {
            crossterm_events: EventStream::new(),
            events,
        };
    }

    pub async fn next(&mut self) -> Result<Event> {
        loop {
            let evt = tokio::select! {
                event = self.events.recv() => event,
                event = self.crossterm_events.next() => match event {
                    Some(Ok(input)) => handle_crossterm(input),
                    Some(Err(err)) => {
                        tracing::warn!(error = ?err, "Failed to read terminal event");
                        None
                    },
                    None => None
                },
                _ = time::sleep(time::Duration::from_millis(500)) => Some(Event::UITick())
            };

            if let Some(event) = evt {
                return Ok(event);
            }
        }
    }
}
