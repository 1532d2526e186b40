//! # Landing Page Component
//!
//! Shown while no session is running. Greets the user and explains how to
//! start; warns when no API key has been entered yet.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::Component;

const HELLO: &str = "Hello! I'm your friendly coding teacher. Ask me anything about the topic, \
and when you're ready, end the session to get a practice assignment.";

pub struct LandingPage<'a> {
    topic: &'a str,
    has_credential: bool,
}

impl<'a> LandingPage<'a> {
    pub fn new(topic: &'a str, has_credential: bool) -> Self {
        Self {
            topic,
            has_credential,
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                format!("🐍 {} Buddy - Your Friendly Coding Teacher! 🌟", self.topic),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(HELLO),
            Line::default(),
            Line::from(Span::styled(
                "Press Enter to start a learning session",
                Style::default().fg(Color::Cyan),
            )),
        ];
        if !self.has_credential {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "No API key yet: type or paste your key above",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        // Borders plus slack for the wrapped hello text
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(4);

        let [panel] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        let paragraph = Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Start Learning Session "),
            )
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, panel);
    }
}
