#[cfg(test)]
#[path = "transcript_list_test.rs"]
mod tests;

use std::collections::HashMap;

use ratatui::prelude::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::domain::models::Speaker;
use crate::domain::models::Turn;

/// Share of the line width a single turn may use before wrapping.
const TURN_WIDTH_PERCENTAGE: f32 = 0.75;

struct TranscriptCacheEntry {
    turn: Turn,
    lines: Vec<Line<'static>>,
}

/// Transcript rendered as lines, bot turns on the left and user turns on the
/// right. Lines are cached per turn since turns never change once appended.
#[derive(Default)]
pub struct TranscriptList {
    cache: HashMap<usize, TranscriptCacheEntry>,
    line_width: usize,
    lines_len: usize,
}

fn label(speaker: Speaker) -> (String, Style) {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match speaker {
        Speaker::Bot => return ("Bot:".to_string(), style.fg(Color::Cyan)),
        Speaker::User => return ("User:".to_string(), style.fg(Color::Green)),
    }
}

fn align(speaker: Speaker, span: Span<'static>, line_width: usize) -> Line<'static> {
    if speaker == Speaker::Bot {
        return Line::from(span);
    }

    let padding = line_width.saturating_sub(span.width());
    return Line::from(vec![Span::raw(" ".repeat(padding)), span]);
}

pub fn turn_lines(turn: &Turn, line_width: usize) -> Vec<Line<'static>> {
    let max_width = ((line_width as f32) * TURN_WIDTH_PERCENTAGE).floor() as usize;
    let (label_text, label_style) = label(turn.speaker);

    let mut lines = vec![align(
        turn.speaker,
        Span::styled(label_text, label_style),
        line_width,
    )];
    for text in turn.as_string_lines(max_width.max(1)) {
        lines.push(align(turn.speaker, Span::raw(text), line_width));
    }
    lines.push(Line::from(""));

    return lines;
}

impl TranscriptList {
    pub fn set_turns(&mut self, turns: &[Turn], line_width: usize) {
        if self.line_width != line_width || turns.len() < self.cache.len() {
            self.cache.clear();
            self.line_width = line_width;
        }

        self.lines_len = turns
            .iter()
            .enumerate()
            .map(|(idx, turn)| {
                if let Some(entry) = self.cache.get(&idx) {
                    if &entry.turn == turn {
                        return entry.lines.len();
                    }
                }

                let lines = turn_lines(turn, line_width);
                let lines_len = lines.len();
                self.cache.insert(
                    idx,
                    TranscriptCacheEntry {
                        turn: turn.clone(),
                        lines,
                    },
                );

                return lines_len;
            })
            .sum();
    }

    pub fn len(&self) -> usize {
        return self.lines_len;
    }

    pub fn is_empty(&self) -> bool {
        return self.lines_len == 0;
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut indexes: Vec<usize> = self.cache.keys().cloned().collect();
        indexes.sort();

        return indexes
            .iter()
            .filter_map(|idx| return self.cache.get(idx))
            .flat_map(|entry| return entry.lines.to_owned())
            .collect();
    }

    pub fn render(&self, frame: &mut Frame, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
