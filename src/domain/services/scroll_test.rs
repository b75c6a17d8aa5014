use super::Scroll;

#[test]
fn it_stays_at_the_top_when_everything_fits() {
    let mut scroll = Scroll::default();
    scroll.set_state(10, 40);
    scroll.down();
    scroll.down_page();

    assert_eq!(scroll.position, 0);
    assert!(scroll.is_at_bottom());
}

#[test]
fn it_follows_new_lines_from_the_bottom() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);
    assert_eq!(scroll.position, 30);

    scroll.set_state(55, 20);
    assert_eq!(scroll.position, 35);
}

#[test]
fn it_keeps_position_after_scrolling_up() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);
    scroll.up_page();
    assert_eq!(scroll.position, 20);

    scroll.set_state(55, 20);
    assert_eq!(scroll.position, 20);
    assert!(!scroll.is_at_bottom());
}

#[test]
fn it_clamps_scrolling() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);

    for _ in 0..10 {
        scroll.up_page();
    }
    assert_eq!(scroll.position, 0);

    scroll.down_page();
    scroll.down();
    assert_eq!(scroll.position, 11);

    scroll.down_page();
    scroll.down_page();
    scroll.down_page();
    assert_eq!(scroll.position, 30);
}

#[test]
fn it_clamps_when_the_transcript_shrinks() {
    let mut scroll = Scroll::default();
    scroll.set_state(50, 20);
    scroll.up();

    scroll.set_state(0, 20);
    assert_eq!(scroll.position, 0);

    scroll.set_state(30, 20);
    assert_eq!(scroll.position, 10);
}
