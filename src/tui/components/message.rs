use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::format::format;
use crate::core::state::{Message as ChatMessage, Role};
use crate::tui::blocks;
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat turn.
///
/// Created fresh each frame by `MessageList`. The content is run through
/// the formatter and pre-wrapped, so [`Message::calculate_height`] and the
/// rendered output always agree.
///
/// - **User** (green, titled "You 👤")
/// - **Assistant** (blue, titled "Tutor 🤖")
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a ChatMessage,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a ChatMessage) -> Self {
        Self { message }
    }

    fn content_lines(message: &ChatMessage, width: u16) -> Vec<Line<'static>> {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        blocks::render(&format(message.content.trim()), content_width, role_color(message.role))
    }

    /// Height required for this message given a width, borders included.
    pub fn calculate_height(message: &ChatMessage, width: u16) -> u16 {
        if width <= HORIZONTAL_OVERHEAD {
            // Degenerate case: terminal too narrow for borders + padding.
            return 1;
        }
        let lines = u16::try_from(Self::content_lines(message, width).len()).unwrap_or(u16::MAX);
        lines.max(1).saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn role_title(role: Role) -> &'static str {
    match role {
        Role::User => "You 👤",
        Role::Assistant => "Tutor 🤖",
    }
}

pub fn role_color(role: Role) -> Color {
    match role {
        Role::User => Color::Green,
        Role::Assistant => Color::Blue,
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let border_style = Style::default()
            .fg(role_color(self.message.role))
            .add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(role_title(self.message.role))
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style.remove_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let lines = Self::content_lines(self.message, area.width);
        Paragraph::new(lines).render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
