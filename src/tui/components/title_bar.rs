//! # TitleBar Component
//!
//! Top status bar: app name, topic, model, status message, and a spinner
//! while a request is in flight.
//!
//! Stateless: it receives all data as props and renders a single line.
//!
//! The title text changes based on state:
//!
//! 1. **Loading**: `"🐍 Python Buddy (model: gemini-pro) | Thinking... ⠋"`
//! 2. **Status message**: `"🐍 Python Buddy (model: gemini-pro) | Session started"`
//! 3. **Default**: `"🐍 Python Buddy (model: gemini-pro)"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub topic: String,
    pub model_name: String,
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(topic: String, model_name: String, status_message: String) -> Self {
        Self {
            topic,
            model_name,
            status_message,
            is_loading: false,
            spinner_frame: 0,
        }
    }

    fn title_text(&self) -> String {
        let base = format!("🐍 {} Buddy (model: {})", self.topic, self.model_name);
        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            format!("{} | {} {}", base, self.status_message, spinner)
        } else if self.status_message.is_empty() {
            base
        } else {
            format!("{} | {}", base, self.status_message)
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Line::from(Span::styled(self.title_text(), style)), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                title_bar.render(f, area);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let mut title_bar = TitleBar::new(
            "Python".to_string(),
            "gemini-pro".to_string(),
            "Session started".to_string(),
        );
        let text = render_to_text(&mut title_bar);
        assert!(text.contains("Python Buddy"));
        assert!(text.contains("gemini-pro"));
        assert!(text.contains("Session started"));
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let title_bar = TitleBar::new("Python".to_string(), "gemini-pro".to_string(), String::new());
        assert_eq!(title_bar.title_text(), "🐍 Python Buddy (model: gemini-pro)");
    }

    #[test]
    fn test_title_bar_spinner_while_loading() {
        let mut title_bar = TitleBar::new(
            "Rust".to_string(),
            "gemini-pro".to_string(),
            "Thinking...".to_string(),
        );
        title_bar.is_loading = true;
        title_bar.spinner_frame = 11;
        assert_eq!(
            title_bar.title_text(),
            "🐍 Rust Buddy (model: gemini-pro) | Thinking... ⠙"
        );
    }
}
