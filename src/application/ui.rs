use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Frame;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::StatusLine;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn render_landing(frame: &mut Frame, rect: Rect, backend_warning: &Option<String>) {
    let mut lines = vec![
        Line::from(Span::styled(
            "Callbot",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Press Enter to start CallLive.ai"),
    ];

    if let Some(warning) = backend_warning {
        lines.push(Line::from(""));
        for warning_line in warning.split('\n') {
            lines.push(Line::from(Span::styled(
                warning_line.to_string(),
                Style::default().fg(Color::Red),
            )));
        }
    }

    let top_padding = rect.height.saturating_sub(lines.len() as u16) / 2;
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::new(1, 1, top_padding, 0))),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let status_line = StatusLine::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Min(1), Constraint::Length(3)])
                .split(frame.size());

            let transcript_rect = layout[0].inner(&Margin {
                vertical: 0,
                horizontal: 1,
            });
            if transcript_rect.width != app_state.last_known_width
                || transcript_rect.height != app_state.last_known_height
            {
                app_state.set_rect(transcript_rect);
            }

            if app_state.transcript_list.is_empty() {
                render_landing(frame, layout[0], &app_state.backend_warning);
            } else {
                app_state
                    .transcript_list
                    .render(frame, transcript_rect, app_state.scroll.position);
                frame.render_stateful_widget(
                    Scrollbar::new(ScrollbarOrientation::VerticalRight),
                    layout[0].inner(&Margin {
                        vertical: 1,
                        horizontal: 0,
                    }),
                    &mut app_state.scroll.scrollbar_state,
                );
            }

            status_line.render(frame, layout[1], &app_state.session);
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event, &tx)? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
    backend_warning: Option<String>,
) -> Result<()> {
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut app_state = AppState::new(backend_warning);
    let mut events = EventsService::new(rx);

    let res = start_loop(&mut terminal, &mut app_state, tx, &mut events).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return res;
}
