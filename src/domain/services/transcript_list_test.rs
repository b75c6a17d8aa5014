use ratatui::text::Line;

use super::turn_lines;
use super::TranscriptList;
use crate::domain::models::Speaker;
use crate::domain::models::Turn;

fn as_text(lines: &[Line]) -> Vec<String> {
    return lines
        .iter()
        .map(|line| {
            return line
                .spans
                .iter()
                .map(|span| return span.content.to_string())
                .collect::<Vec<String>>()
                .join("");
        })
        .collect();
}

#[test]
fn it_renders_bot_turns_on_the_left() {
    let turn = Turn::new(Speaker::Bot, "Hi, I'm Callbot. How can I assist you?");
    let lines = as_text(&turn_lines(&turn, 40));

    assert_eq!(
        lines,
        vec![
            "Bot:".to_string(),
            "Hi, I'm Callbot. How can I".to_string(),
            "assist you?".to_string(),
            "".to_string(),
        ]
    );
}

#[test]
fn it_renders_user_turns_on_the_right() {
    let turn = Turn::new(Speaker::User, "book a flight to Lisbon");
    let lines = as_text(&turn_lines(&turn, 20));

    assert_eq!(
        lines,
        vec![
            format!("{:>20}", "User:"),
            format!("{:>20}", "book a flight"),
            format!("{:>20}", "to Lisbon"),
            "".to_string(),
        ]
    );
}

#[test]
fn it_counts_lines_across_turns() {
    let turns = vec![
        Turn::new(Speaker::Bot, "Hi, I'm Callbot. How can I assist you?"),
        Turn::new(Speaker::User, "book a flight"),
    ];

    let mut list = TranscriptList::default();
    list.set_turns(&turns, 100);

    assert_eq!(list.len(), 6);
    assert_eq!(list.lines().len(), 6);
}

#[test]
fn it_rebuilds_after_the_transcript_is_cleared() {
    let mut list = TranscriptList::default();
    list.set_turns(
        &[
            Turn::new(Speaker::Bot, "Hi"),
            Turn::new(Speaker::User, "bye"),
        ],
        100,
    );
    list.set_turns(&[], 100);
    assert!(list.is_empty());
    assert!(list.lines().is_empty());

    list.set_turns(&[Turn::new(Speaker::Bot, "Hello again")], 100);
    assert_eq!(as_text(&list.lines())[1], "Hello again");
}

#[test]
fn it_rewraps_when_the_width_changes() {
    let turns = vec![Turn::new(
        Speaker::Bot,
        "Sure, where would you like to fly to?",
    )];

    let mut list = TranscriptList::default();
    list.set_turns(&turns, 100);
    assert_eq!(list.len(), 3);

    list.set_turns(&turns, 20);
    assert_eq!(list.len(), 5);
}
