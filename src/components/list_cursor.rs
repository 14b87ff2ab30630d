//! Focus cursor shared by the list panels and the contact selector

use ratatui::widgets::ListState;

/// Wrapping cursor over a list whose length is owned elsewhere
#[derive(Debug, Default, Clone)]
pub struct ListCursor {
    pub state: ListState,
}

impl ListCursor {
    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    /// Select next item, wrapping to the first
    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let next = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(next));
    }

    /// Select previous item, wrapping to the last
    pub fn previous(&mut self, len: usize) {
        if len == 0 {
            self.state.select(None);
            return;
        }
        let prev = match self.state.selected() {
            Some(i) if i > 0 && i < len => i - 1,
            _ => len - 1,
        };
        self.state.select(Some(prev));
    }

    pub fn first(&mut self, len: usize) {
        self.state.select(if len == 0 { None } else { Some(0) });
    }

    pub fn last(&mut self, len: usize) {
        self.state.select(len.checked_sub(1));
    }

    /// Keep the cursor inside a list that may have shrunk or grown
    pub fn clamp(&mut self, len: usize) {
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        let mut cursor = ListCursor::default();
        cursor.next(3);
        assert_eq!(cursor.selected(), Some(0));
        cursor.previous(3);
        assert_eq!(cursor.selected(), Some(2));
        cursor.next(3);
        assert_eq!(cursor.selected(), Some(0));
    }

    #[test]
    fn test_clamp_follows_list_length() {
        let mut cursor = ListCursor::default();
        cursor.last(5);
        cursor.clamp(2);
        assert_eq!(cursor.selected(), Some(1));
        cursor.clamp(0);
        assert_eq!(cursor.selected(), None);
        cursor.clamp(4);
        assert_eq!(cursor.selected(), Some(0));
    }
}
