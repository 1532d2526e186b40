//! Splits message text into display blocks.
//!
//! A fenced region is three backticks, a run of non-backtick characters,
//! then three backticks. Everything outside fenced regions is broken into
//! one paragraph per line, keeping empty lines.

use std::sync::LazyLock;

use regex::Regex;

static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[^`]*```").expect("fence pattern is valid"));

const DELIMITER: &str = "```";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    Code { lang: Option<String>, code: String },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph(text.into())
    }
}

pub fn format(text: &str) -> Vec<Block> {
    if !text.contains(DELIMITER) {
        return paragraphs(text).collect();
    }

    let mut blocks = Vec::new();
    let mut last = 0;
    for fence in FENCE.find_iter(text) {
        push_plain(&mut blocks, &text[last..fence.start()]);
        let inner = &fence.as_str()[DELIMITER.len()..fence.len() - DELIMITER.len()];
        blocks.push(code_block(inner));
        last = fence.end();
    }
    push_plain(&mut blocks, &text[last..]);
    blocks
}

fn paragraphs(text: &str) -> impl Iterator<Item = Block> + '_ {
    text.split('\n').map(Block::paragraph)
}

fn push_plain(blocks: &mut Vec<Block>, segment: &str) {
    if !segment.is_empty() {
        blocks.extend(paragraphs(segment));
    }
}

/// "python\nprint(1)\n" → lang `python`, code "print(1)\n".
fn code_block(inner: &str) -> Block {
    if let Some((first, rest)) = inner.split_once('\n') {
        let tag = first.trim();
        if !tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-' | '#'))
        {
            return Block::Code {
                lang: Some(tag.to_string()),
                code: rest.to_string(),
            };
        }
    }
    Block::Code {
        lang: None,
        code: inner.to_string(),
    }
}
