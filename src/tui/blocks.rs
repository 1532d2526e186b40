//! Formatter blocks → ratatui `Line`s.
//!
//! Paragraphs are pre-wrapped with `textwrap` to the given width so the
//! caller knows the exact height before rendering. Code blocks get a
//! box-drawing border and syntect highlighting when the fence names a
//! language syntect knows; code lines are never wrapped.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::core::format::Block;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const THEME_NAME: &str = "base16-ocean.dark";

fn theme() -> Option<&'static Theme> {
    THEME_SET.themes.get(THEME_NAME)
}

fn wrap_options(width: usize) -> textwrap::Options<'static> {
    textwrap::Options::new(width)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// ratatui renders `\t` as zero-width.
fn expand_tabs(text: &str) -> String {
    text.replace('\t', "    ")
}

pub fn render(blocks: &[Block], width: u16, base_fg: Color) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Paragraph(text) => paragraph(&mut lines, text, width, base_fg),
            Block::Code { lang, code } => code_block(&mut lines, lang.as_deref(), code),
        }
    }
    lines
}

fn paragraph(lines: &mut Vec<Line<'static>>, text: &str, width: u16, base_fg: Color) {
    let style = Style::default().fg(base_fg);
    let text = expand_tabs(text);
    if text.trim().is_empty() || width == 0 {
        lines.push(Line::default());
        return;
    }
    for wrapped in textwrap::wrap(&text, wrap_options(width as usize)) {
        lines.push(Line::from(Span::styled(wrapped.into_owned(), style)));
    }
}

fn code_block(lines: &mut Vec<Line<'static>>, lang: Option<&str>, code: &str) {
    let bs = Style::default().fg(Color::DarkGray);

    // Top border: ╭── lang ──  or just ╭──
    let top = match lang {
        Some(lang) => Line::from(vec![
            Span::styled("╭── ", bs),
            Span::styled(lang.to_owned(), bs.add_modifier(Modifier::BOLD)),
            Span::styled(" ──", bs),
        ]),
        None => Line::from(Span::styled("╭──", bs)),
    };
    lines.push(top);

    let syntax = lang.and_then(|l| SYNTAX_SET.find_syntax_by_token(l));
    let mut highlighter = match (syntax, theme()) {
        (Some(syn), Some(theme)) => Some(HighlightLines::new(syn, theme)),
        _ => None,
    };

    let code = code.strip_suffix('\n').unwrap_or(code);
    for raw in LinesWithEndings::from(code) {
        let mut spans = vec![Span::styled("│ ", bs)];
        match highlighter.as_mut().and_then(|hl| hl.highlight_line(raw, &SYNTAX_SET).ok()) {
            Some(ranges) => {
                spans.extend(ranges.into_iter().filter_map(|(hl_style, frag)| {
                    let content = expand_tabs(frag.trim_end_matches(['\n', '\r']));
                    if content.is_empty() {
                        return None;
                    }
                    let fg = Color::Rgb(
                        hl_style.foreground.r,
                        hl_style.foreground.g,
                        hl_style.foreground.b,
                    );
                    Some(Span::styled(content, Style::default().fg(fg)))
                }));
            }
            None => {
                let content = expand_tabs(raw.trim_end_matches(['\n', '\r']));
                spans.push(Span::styled(content, Style::default().fg(Color::White)));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled("╰──", bs)));
}
