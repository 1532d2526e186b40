//! # InputBox Component
//!
//! Single-line text field. Used twice: for the API key and for chat input.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter)
//! - Scroll horizontally so the cursor is always visible
//! - Optionally mask its contents (API key)
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. `focused` is a prop set by
//! the parent each frame.

mod edit;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use edit::{next_char_boundary, prev_char_boundary};

/// Borders on both sides
const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top border + one content line + bottom border
pub const HEIGHT: u16 = 3;

const MASK: char = '•';

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text content changed; carries the full new buffer
    Changed(String),
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Whether this field currently receives keystrokes (Prop)
    pub focused: bool,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    cursor: usize,
    title: &'static str,
    placeholder: &'static str,
    masked: bool,
    clear_on_submit: bool,
}

impl InputBox {
    pub fn new(title: &'static str, placeholder: &'static str) -> Self {
        Self {
            buffer: String::new(),
            focused: false,
            cursor: 0,
            title,
            placeholder,
            masked: false,
            clear_on_submit: true,
        }
    }

    /// Show `•` in place of each character while unfocused.
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Keep the buffer after Enter instead of handing it off.
    pub fn keep_on_submit(mut self) -> Self {
        self.clear_on_submit = false;
        self
    }

    /// Replace the buffer (e.g. when the value changed elsewhere) and move
    /// the cursor to the end.
    pub fn set_text(&mut self, text: &str) {
        if self.buffer != text {
            self.buffer = text.to_string();
            self.cursor = self.buffer.len();
        }
    }

    fn display_text(&self) -> String {
        if self.masked && !self.focused {
            MASK.to_string().repeat(self.buffer.chars().count())
        } else {
            self.buffer.clone()
        }
    }

    fn changed(&self) -> Option<InputEvent> {
        Some(InputEvent::Changed(self.buffer.clone()))
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(self.title);

        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);

        if self.buffer.is_empty() && !self.focused {
            let placeholder = Paragraph::new(self.placeholder)
                .block(block)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            frame.render_widget(placeholder, area);
            return;
        }

        // Horizontal scroll keeps the cursor inside the field
        let cursor_col = self.buffer[..self.cursor].width() as u16;
        let scroll_x = cursor_col.saturating_sub(inner_width.saturating_sub(1));

        let input = Paragraph::new(self.display_text())
            .block(block)
            .style(Style::default().fg(Color::Green))
            .scroll((0, scroll_x));
        frame.render_widget(input, area);

        if self.focused && inner_width > 0 {
            let x = area.x + 1 + (cursor_col - scroll_x);
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                self.changed()
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                self.changed()
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    self.changed()
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = next_char_boundary(&self.buffer, self.cursor);
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                if !self.clear_on_submit {
                    return Some(InputEvent::Submit(self.buffer.clone()));
                }
                if self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_handle_input() {
        let mut input = InputBox::new("Ask", "");

        let res = input.handle_event(&TuiEvent::InputChar('a'));
        assert_eq!(res, Some(InputEvent::Changed("a".into())));

        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        let res = input.handle_event(&TuiEvent::Backspace);
        assert_eq!(res, Some(InputEvent::Changed("a".into())));
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_cursor_editing_in_middle() {
        let mut input = InputBox::new("Ask", "");
        input.set_text("ac");
        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "abc");
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_submit_clears_buffer() {
        let mut input = InputBox::new("Ask", "");
        input.set_text("hello");

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".into())));
        assert!(input.buffer.is_empty(), "Buffer should be cleared after submit");
    }

    #[test]
    fn test_blank_submit_ignored() {
        let mut input = InputBox::new("Ask", "");
        input.set_text("   ");
        assert_eq!(input.handle_event(&TuiEvent::Submit), None);
        assert_eq!(input.buffer, "   ");
    }

    #[test]
    fn test_keep_on_submit() {
        let mut input = InputBox::new("Key", "").keep_on_submit();
        input.set_text("secret");
        assert_eq!(
            input.handle_event(&TuiEvent::Submit),
            Some(InputEvent::Submit("secret".into()))
        );
        assert_eq!(input.buffer, "secret");
    }

    #[test]
    fn test_masked_when_unfocused() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("API key", "").masked();
        input.set_text("abc");

        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("•••"));
        assert!(!text.contains("abc"));

        input.focused = true;
        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("abc"));
    }

    #[test]
    fn test_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = InputBox::new("Ask", "Type your question");

        terminal
            .draw(|f| {
                let area = f.area();
                input.render(f, area);
            })
            .unwrap();
        assert!(screen_text(&terminal).contains("Type your question"));
    }
}
