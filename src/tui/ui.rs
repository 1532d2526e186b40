use crate::core::state::{Phase, Tutor};
use crate::tui::component::Component;
use crate::tui::components::{
    AssignmentPanel, LandingPage, MessageList, TitleBar, input_box,
};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};

const ALERT_WIDTH: u16 = 50;
const QUIT_HINT: (&str, &str) = ("Ctrl+C", "quit");

pub fn draw_ui(frame: &mut Frame, tutor: &Tutor, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};

    let phase = tutor.phase();
    let input_height = if phase == Phase::Active {
        input_box::HEIGHT
    } else {
        0
    };
    let layout = Layout::vertical([
        Length(1),
        Length(input_box::HEIGHT),
        Min(0),
        Length(input_height),
        Length(1),
    ]);
    let [title_area, credential_area, main_area, input_area, footer_area] =
        layout.areas(frame.area());

    let mut title_bar = TitleBar::new(
        tutor.topic.clone(),
        tui.model_name.clone(),
        tutor.status_message.clone(),
    );
    title_bar.is_loading = tutor.is_loading();
    title_bar.spinner_frame = spinner_frame;
    title_bar.render(frame, title_area);

    tui.credential_box.focused = tui.focus == Focus::Credential && tutor.alert.is_none();
    tui.credential_box.render(frame, credential_area);

    match phase {
        Phase::Idle => {
            LandingPage::new(&tutor.topic, tutor.has_credential()).render(frame, main_area);
        }
        Phase::Active => {
            MessageList::new(&mut tui.message_list, &tutor.messages, tutor.generation)
                .render(frame, main_area);
            tui.input_box.focused = tui.focus == Focus::Chat && tutor.alert.is_none();
            tui.input_box.render(frame, input_area);
        }
        Phase::AssignmentShown => {
            AssignmentPanel::new(&mut tui.assignment, &tutor.assignment_text)
                .render(frame, main_area);
        }
    }

    frame.render_widget(footer(phase), footer_area);

    if let Some(alert) = &tutor.alert {
        draw_alert(frame, alert);
    }
}

/// Key hints for the current phase.
fn footer(phase: Phase) -> Line<'static> {
    let hints: &[(&str, &str)] = match phase {
        Phase::Idle => &[("Enter", "start"), ("Tab", "API key"), ("Ctrl+X", "clear key")],
        Phase::Active => &[
            ("Enter", "send"),
            ("Ctrl+E", "end session"),
            ("Tab", "API key"),
            ("↑↓", "scroll"),
        ],
        Phase::AssignmentShown => &[("Enter", "new session"), ("↑↓", "scroll")],
    };
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(Color::DarkGray);

    let mut spans = Vec::new();
    for (key, label) in hints.iter().chain(std::iter::once(&QUIT_HINT)) {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!("{}  ", label), text_style));
    }
    Line::from(spans)
}

fn draw_alert(frame: &mut Frame, message: &str) {
    let area = centered(frame.area(), ALERT_WIDTH, 5);
    let popup = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(Span::styled(
            "Enter / Esc to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Red))
            .title(" ⚠ "),
    )
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}
