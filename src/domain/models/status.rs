#[cfg(test)]
#[path = "status_test.rs"]
mod tests;

use ratatui::prelude::Alignment;
use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Phase;
use super::Session;

/// Bottom bar showing what the call is doing and which keys apply.
#[derive(Default)]
pub struct StatusLine {}

impl StatusLine {
    pub fn status_text(session: &Session) -> String {
        let status = match session.phase {
            Phase::Idle => "Press Enter to start CallLive.ai",
            Phase::Greeting => "Speaking...",
            Phase::Capturing => "Recording...",
            Phase::Exchanging => "Thinking...",
            Phase::Speaking(_) => "Speaking...",
            Phase::Ended => "Call ended. Press Enter to call again",
        };

        return status.to_string();
    }

    pub fn hint_text(session: &Session) -> String {
        if !session.active {
            return "Enter: start call | Ctrl+C: quit".to_string();
        }

        if session.recording {
            return "Space: done talking | Esc: end chat | Ctrl+C: quit".to_string();
        }

        return "Esc: end chat | Ctrl+C: quit".to_string();
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, session: &Session) {
        let mut style = Style::default();
        if session.recording {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }

        frame.render_widget(
            Paragraph::new(StatusLine::status_text(session))
                .style(style)
                .block(
                    Block::default()
                        .title(StatusLine::hint_text(session))
                        .title_alignment(Alignment::Right)
                        .borders(Borders::ALL)
                        .border_type(BorderType::Double)
                        .padding(Padding::new(1, 1, 0, 0)),
                )
                .alignment(Alignment::Left),
            rect,
        );
    }
}
