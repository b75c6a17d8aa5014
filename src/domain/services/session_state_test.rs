use anyhow::bail;
use anyhow::Result;
use tokio::sync::mpsc;

use super::SessionState;
use crate::domain::models::Event;
use crate::domain::models::Phase;
use crate::domain::models::Speaker;

#[test]
fn it_only_notifies_on_publish() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let mut state = SessionState::new(tx);

    state.set_phase(Phase::Greeting);
    state.activate();
    state.push_turn(Speaker::Bot, "Hi, I'm Callbot. How can I assist you?");
    assert!(rx.try_recv().is_err());

    state.publish()?;
    match rx.try_recv()? {
        Event::SessionChanged(session) => {
            assert_eq!(session.phase, Phase::Greeting);
            assert!(session.active);
            assert_eq!(session.transcript.len(), 1);
        }
        _ => bail!("Wrong enum"),
    }

    return Ok(());
}

#[test]
fn it_sets_recording_and_auto_continue_together() {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let mut state = SessionState::new(tx);

    state.set_recording(true, true);
    assert!(state.session().recording);
    assert!(state.session().auto_continue);

    state.set_recording(false, false);
    assert!(!state.session().recording);
    assert!(!state.session().auto_continue);
}

#[test]
fn it_fails_to_publish_without_an_observer() {
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    drop(rx);

    let state = SessionState::new(tx);
    assert!(state.publish().is_err());
}

#[test]
fn it_clears_to_a_phase() {
    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let mut state = SessionState::new(tx);
    state.activate();
    state.push_turn(Speaker::User, "book a flight");

    state.clear(Phase::Idle);
    assert_eq!(state.phase(), Phase::Idle);
    assert!(!state.session().active);
    assert!(state.session().transcript.is_empty());
}
