#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_SIZE: u16 = 10;

/// Scroll offset into the transcript. Sticks to the bottom while the user
/// hasn't scrolled away from it, so new turns stay in view.
#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub position: u16,
    pub scrollbar_state: ScrollbarState,
}

impl Scroll {
    fn max_position(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    fn sync_scrollbar(&mut self) {
        self.scrollbar_state = self
            .scrollbar_state
            .content_length(self.list_length.into())
            .viewport_content_length(self.viewport_length.into())
            .position(self.position.into());
    }

    pub fn is_at_bottom(&self) -> bool {
        return self.position >= self.max_position();
    }

    pub fn up(&mut self) {
        self.up_by(1);
    }

    pub fn up_page(&mut self) {
        self.up_by(PAGE_SIZE);
    }

    pub fn down(&mut self) {
        self.down_by(1);
    }

    pub fn down_page(&mut self) {
        self.down_by(PAGE_SIZE);
    }

    fn up_by(&mut self, lines: u16) {
        self.position = self.position.saturating_sub(lines);
        self.sync_scrollbar();
    }

    fn down_by(&mut self, lines: u16) {
        self.position = self
            .position
            .saturating_add(lines)
            .min(self.max_position());
        self.sync_scrollbar();
    }

    pub fn last(&mut self) {
        self.position = self.max_position();
        self.sync_scrollbar();
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        let follow = self.is_at_bottom();

        self.list_length = list_length;
        self.viewport_length = viewport_length;
        if follow {
            self.position = self.max_position();
        } else {
            self.position = self.position.min(self.max_position());
        }

        self.sync_scrollbar();
    }
}
