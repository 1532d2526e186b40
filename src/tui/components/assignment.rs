//! # Assignment Panel
//!
//! Displays the generated practice assignment once a session has ended.
//! The text goes through the same formatter as chat replies, so fenced
//! code in the assignment gets highlighted.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::format::format;
use crate::tui::blocks;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const TITLE: &str = "🎯 Your Practice Assignment";
const NEW_SESSION_HINT: &str = "Press Enter to start a new session";

/// Scroll position for the panel. Lives in TuiState, reset per session.
#[derive(Debug, Default)]
pub struct AssignmentState {
    pub scroll: u16,
    /// Rows that didn't fit during the last render
    max_scroll: u16,
    page: u16,
}

impl EventHandler for AssignmentState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll = self.scroll.saturating_sub(1),
            TuiEvent::ScrollDown => self.scroll = self.scroll.saturating_add(1).min(self.max_scroll),
            TuiEvent::ScrollPageUp => self.scroll = self.scroll.saturating_sub(self.page.max(1)),
            TuiEvent::ScrollPageDown => {
                self.scroll = self.scroll.saturating_add(self.page.max(1)).min(self.max_scroll)
            }
            _ => {}
        }
        None
    }
}

pub struct AssignmentPanel<'a> {
    state: &'a mut AssignmentState,
    text: &'a str,
}

impl<'a> AssignmentPanel<'a> {
    pub fn new(state: &'a mut AssignmentState, text: &'a str) -> Self {
        Self { state, text }
    }
}

impl<'a> Component for AssignmentPanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [body_area, hint_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));
        let inner = block.inner(body_area);

        let lines = blocks::render(&format(self.text.trim()), inner.width, Color::White);
        let total = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.state.page = inner.height;
        self.state.max_scroll = total.saturating_sub(inner.height);
        self.state.scroll = self.state.scroll.min(self.state.max_scroll);

        let body = Paragraph::new(lines)
            .block(block)
            .scroll((self.state.scroll, 0));
        frame.render_widget(body, body_area);

        let hint = Line::from(Span::styled(
            NEW_SESSION_HINT,
            Style::default().fg(Color::Cyan),
        ))
        .centered();
        frame.render_widget(hint, hint_area);
    }
}
