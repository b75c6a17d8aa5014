use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::AppState;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Phase;
use crate::domain::models::Session;
use crate::domain::models::Speaker;
use crate::domain::models::Turn;

fn app_state() -> AppState {
    let mut app_state = AppState::new(None);
    app_state.set_rect(Rect::new(0, 0, 100, 5));
    return app_state;
}

fn capturing_session() -> Session {
    return Session {
        phase: Phase::Capturing,
        active: true,
        recording: true,
        auto_continue: false,
        transcript: vec![Turn::new(
            Speaker::Bot,
            "Hi, I'm Callbot. How can I assist you?",
        )],
    };
}

#[test]
fn it_starts_a_call_on_enter() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    let should_break = app_state.handle_event(Event::KeyboardEnter(), &tx)?;
    assert!(!should_break);
    assert_eq!(rx.try_recv()?, Action::Start());

    return Ok(());
}

#[test]
fn it_ignores_enter_during_a_call() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();
    app_state.set_session(capturing_session());

    app_state.handle_event(Event::KeyboardEnter(), &tx)?;
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[test]
fn it_stops_capture_on_space_only_while_recording() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    app_state.handle_event(Event::KeyboardSpace(), &tx)?;
    assert!(rx.try_recv().is_err());

    app_state.handle_event(Event::SessionChanged(capturing_session()), &tx)?;
    app_state.handle_event(Event::KeyboardSpace(), &tx)?;
    assert_eq!(rx.try_recv()?, Action::StopCapture());

    return Ok(());
}

#[test]
fn it_resets_on_esc_during_a_call() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();
    app_state.set_session(capturing_session());

    app_state.handle_event(Event::KeyboardEsc(), &tx)?;
    assert_eq!(rx.try_recv()?, Action::Reset());

    return Ok(());
}

#[test]
fn it_resets_and_quits_on_ctrl_c() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();

    let should_break = app_state.handle_event(Event::KeyboardCTRLC(), &tx)?;
    assert!(should_break);
    assert_eq!(rx.try_recv()?, Action::Reset());

    drop(rx);
    let should_break = app_state.handle_event(Event::KeyboardCTRLC(), &tx)?;
    assert!(should_break);

    return Ok(());
}

#[test]
fn it_scrolls_to_the_newest_turn() -> Result<()> {
    let (tx, _rx) = mpsc::unbounded_channel::<Action>();
    let mut app_state = app_state();
    app_state.set_session(capturing_session());
    assert_eq!(app_state.transcript_list.len(), 3);
    assert_eq!(app_state.scroll.position, 0);

    let mut session = capturing_session();
    session.transcript.push(Turn::new(Speaker::User, "book a flight"));
    session
        .transcript
        .push(Turn::new(Speaker::Bot, "Sure, where to?"));
    app_state.handle_event(Event::SessionChanged(session), &tx)?;

    assert_eq!(app_state.transcript_list.len(), 9);
    assert_eq!(app_state.scroll.position, 4);

    app_state.handle_event(Event::UIScrollUp(), &tx)?;
    assert_eq!(app_state.scroll.position, 3);

    return Ok(());
}

#[test]
fn it_clears_the_transcript_on_reset() {
    let mut app_state = app_state();
    app_state.set_session(capturing_session());
    app_state.set_session(Session::default());

    assert!(app_state.transcript_list.is_empty());
    assert_eq!(app_state.scroll.position, 0);
}
