//! Text editing state for the focused box.

use crate::{
    input::{InputState, KeyCode},
    text::grapheme_boundaries,
};

/// Granularity of a mouse-driven selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Character by character.
    #[default]
    Characters,
    /// Whole words.
    Words,
    /// Whole lines.
    Lines,
}

/// What an editing step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditOutcome {
    /// The text changed.
    pub changed: bool,
    /// Enter was pressed.
    pub accepted: bool,
    /// Escape was pressed.
    pub cancelled: bool,
}

/// Cursor and selection for the one box that holds text focus. Positions
/// are grapheme indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditState {
    /// Insertion point.
    pub cursor: usize,
    /// Other end of the selection. Equal to `cursor` when nothing is
    /// selected.
    pub mark: usize,
    /// Selection granularity.
    pub selection_mode: SelectionMode,
    /// First grapheme shown when the text is wider than its box.
    pub first_displayed: usize,
}

impl EditState {
    /// Selected grapheme range, low to high.
    pub fn selection(&self) -> (usize, usize) {
        (self.cursor.min(self.mark), self.cursor.max(self.mark))
    }

    /// Is anything selected?
    pub fn has_selection(&self) -> bool {
        self.cursor != self.mark
    }

    /// Select everything in a text of `len` graphemes.
    pub fn select_all(&mut self, len: usize) {
        self.mark = 0;
        self.cursor = len;
    }

    /// Place the cursor, collapsing the selection.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos;
        self.mark = pos;
    }

    /// Replace the selection with `insert`.
    fn replace_selection(&mut self, text: &mut String, insert: &str) {
        let bounds = grapheme_boundaries(text);
        let (lo, hi) = self.selection();
        let lo_b = bounds[lo.min(bounds.len() - 1)];
        let hi_b = bounds[hi.min(bounds.len() - 1)];
        text.replace_range(lo_b..hi_b, insert);
        let prefix = &text[..lo_b + insert.len()];
        self.set_cursor(grapheme_boundaries(prefix).len() - 1);
    }

    /// Apply this frame's keys, typed text and paste to `text`.
    pub fn apply(&mut self, input: &InputState, text: &mut String) -> EditOutcome {
        let mut out = EditOutcome::default();
        let len = grapheme_boundaries(text).len() - 1;
        self.cursor = self.cursor.min(len);
        self.mark = self.mark.min(len);
        let mods = input.mods();

        if mods.shortcut() && input.key_pressed(KeyCode::A) > 0 {
            self.select_all(len);
        }
        for _ in 0..input.key_pressed_or_repeated(KeyCode::Left) {
            self.step(mods.shift, self.cursor.saturating_sub(1), true);
        }
        for _ in 0..input.key_pressed_or_repeated(KeyCode::Right) {
            self.step(mods.shift, (self.cursor + 1).min(len), false);
        }
        if input.key_pressed(KeyCode::Home) > 0 {
            self.jump(mods.shift, 0);
        }
        if input.key_pressed(KeyCode::End) > 0 {
            self.jump(mods.shift, len);
        }
        for _ in 0..input.key_pressed_or_repeated(KeyCode::Backspace) {
            if !self.has_selection() && self.cursor > 0 {
                self.mark = self.cursor - 1;
            }
            if self.has_selection() {
                self.replace_selection(text, "");
                out.changed = true;
            }
        }
        for _ in 0..input.key_pressed_or_repeated(KeyCode::Delete) {
            let len = grapheme_boundaries(text).len() - 1;
            if !self.has_selection() && self.cursor < len {
                self.mark = self.cursor + 1;
            }
            if self.has_selection() {
                self.replace_selection(text, "");
                out.changed = true;
            }
        }
        let typed: String = input.text().iter().filter(|c| !c.is_control()).collect();
        if !typed.is_empty() {
            self.replace_selection(text, &typed);
            out.changed = true;
        }
        if let Some(paste) = input.clipboard_pasted() {
            let paste: String = paste.chars().filter(|c| !c.is_control()).collect();
            self.replace_selection(text, &paste);
            out.changed = true;
        }
        out.accepted = input.key_pressed(KeyCode::Enter) > 0;
        out.cancelled = input.key_pressed(KeyCode::Escape) > 0;
        out
    }

    /// Move one step. Without `extend`, an existing selection collapses to
    /// the side in the direction of travel instead.
    fn step(&mut self, extend: bool, to: usize, backwards: bool) {
        if extend {
            self.cursor = to;
        } else if self.has_selection() {
            let (lo, hi) = self.selection();
            self.set_cursor(if backwards { lo } else { hi });
        } else {
            self.set_cursor(to);
        }
    }

    /// Move to an absolute position.
    fn jump(&mut self, extend: bool, to: usize) {
        if extend {
            self.cursor = to;
        } else {
            self.set_cursor(to);
        }
    }

    /// Adjust `first_displayed` so the cursor lies within `width` pixels.
    /// `offsets` holds the pen position at each grapheme boundary.
    pub fn scroll_to_cursor(&mut self, offsets: &[f32], width: f32) {
        let last = offsets.len().saturating_sub(1);
        let cursor = self.cursor.min(last);
        if cursor < self.first_displayed {
            self.first_displayed = cursor;
        }
        while self.first_displayed < cursor
            && offsets[cursor] - offsets[self.first_displayed] > width
        {
            self.first_displayed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Action, Event, Mods};

    fn press(input: &mut InputState, code: KeyCode, mods: Mods) {
        input.process_event(&Event::Key {
            code,
            action: Action::Press,
            mods,
        });
        input.process_event(&Event::Key {
            code,
            action: Action::Release,
            mods,
        });
    }

    #[test]
    fn typing_and_deleting() {
        let mut e = EditState::default();
        let mut s = String::new();
        let mut input = InputState::default();
        for c in "hello".chars() {
            input.process_event(&Event::Char(c));
        }
        assert!(e.apply(&input, &mut s).changed);
        assert_eq!(s, "hello");
        assert_eq!(e.cursor, 5);

        input.next_frame();
        press(&mut input, KeyCode::Backspace, Mods::NONE);
        press(&mut input, KeyCode::Left, Mods::NONE);
        e.apply(&input, &mut s);
        // Navigation is applied before deletion.
        assert_eq!(s, "helo");
        assert_eq!(e.cursor, 3);

        input.next_frame();
        press(&mut input, KeyCode::Delete, Mods::NONE);
        e.apply(&input, &mut s);
        assert_eq!(s, "hel");
    }

    #[test]
    fn shift_selection_replaced_by_text() {
        let mut e = EditState::default();
        let mut s = String::from("abcdef");
        e.set_cursor(6);
        let mut input = InputState::default();
        press(&mut input, KeyCode::Left, Mods::SHIFT);
        press(&mut input, KeyCode::Left, Mods::SHIFT);
        input.process_event(&Event::Char('X'));
        e.apply(&input, &mut s);
        assert_eq!(s, "abcdX");
        assert!(!e.has_selection());
    }

    #[test]
    fn select_all_and_paste() {
        let mut e = EditState::default();
        let mut s = String::from("old");
        let mut input = InputState::default();
        press(&mut input, KeyCode::A, Mods::CTRL + Mods::CMD);
        input.process_event(&Event::ClipboardPaste("new\n".into()));
        e.apply(&input, &mut s);
        assert_eq!(s, "new");
        assert_eq!(e.cursor, 3);
    }

    #[test]
    fn graphemes_move_as_units() {
        let mut e = EditState::default();
        let mut s = String::from("e\u{301}x");
        e.set_cursor(2);
        let mut input = InputState::default();
        press(&mut input, KeyCode::Left, Mods::NONE);
        press(&mut input, KeyCode::Backspace, Mods::NONE);
        e.apply(&input, &mut s);
        assert_eq!(s, "x");
    }

    #[test]
    fn enter_and_escape() {
        let mut e = EditState::default();
        let mut s = String::new();
        let mut input = InputState::default();
        press(&mut input, KeyCode::Enter, Mods::NONE);
        let out = e.apply(&input, &mut s);
        assert!(out.accepted && !out.cancelled && !out.changed);
    }

    #[test]
    fn scroll_follows_cursor() {
        let mut e = EditState::default();
        let offsets: Vec<f32> = (0..=20).map(|i| i as f32 * 10.0).collect();
        e.set_cursor(15);
        e.scroll_to_cursor(&offsets, 50.0);
        assert_eq!(e.first_displayed, 10);
        e.set_cursor(2);
        e.scroll_to_cursor(&offsets, 50.0);
        assert_eq!(e.first_displayed, 2);
    }
}
