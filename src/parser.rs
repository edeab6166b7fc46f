use std::sync::LazyLock;

use regex::Regex;

use crate::block::BlockType;
use crate::error::{Error, Result};
use crate::inline::IMAGE_RE;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6}) \S").expect("valid heading regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[*-][ \t]").expect("valid bullet regex"));

pub(crate) const FENCE: &str = "```";

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn split_blocks(markdown: &str) -> Result<Vec<String>> {
    if markdown.is_empty() {
        return Err(Error::EmptyInput);
    }

    let markdown = markdown.replace("\r\n", "\n");
    Ok(markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect())
}

/// Decide the structural type of a single block.
///
/// Checks run in a fixed order and the first match wins, so a block that
/// looks like several things resolves to the earliest rule.
pub fn classify(block: &str) -> BlockType {
    if let Some(caps) = HEADING_RE.captures(block) {
        return BlockType::Heading(caps[1].len() as u8);
    }

    if is_fenced(block) {
        return BlockType::Code;
    }

    if block.lines().all(|line| line.starts_with('>')) {
        return BlockType::Quote;
    }

    if BULLET_RE.is_match(block) {
        return BlockType::UnorderedList;
    }

    if IMAGE_RE.is_match(block) {
        return BlockType::Image;
    }

    if block.starts_with("1.") && is_numbered_sequence(block) {
        return BlockType::OrderedList;
    }

    BlockType::Paragraph
}

/// The block both opens and closes with a fence, and the two do not overlap.
pub(crate) fn is_fenced(block: &str) -> bool {
    block.len() >= 2 * FENCE.len() && block.starts_with(FENCE) && block.ends_with(FENCE)
}

/// Every line `i` starts with `{i + 1}.`.
fn is_numbered_sequence(block: &str) -> bool {
    block
        .lines()
        .enumerate()
        .all(|(i, line)| line.starts_with(&format!("{}.", i + 1)))
}
