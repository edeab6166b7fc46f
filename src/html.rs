use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::block::{BlockType, SpanKind, TextSpan};
use crate::error::{Error, Result};
use crate::inline::{IMAGE_RE, tokenize};
use crate::node::Node;
use crate::parser::{FENCE, classify, is_fenced, split_blocks};

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(\S.*)$").expect("valid title regex"));

/// Tag of the container that wraps a whole document.
pub const ROOT_TAG: &str = "div";

/// Compile a markdown document into a single root node.
pub fn compile_document(markdown: &str) -> Result<Node> {
    let blocks = split_blocks(markdown)?;
    debug!("compiling document with {} blocks", blocks.len());

    let children = blocks
        .iter()
        .map(|block| {
            let block_type = classify(block);
            debug!("block classified as {block_type}");
            compile_block(block, block_type)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Node::container(ROOT_TAG, children))
}

/// Convert one classified block into its node subtree.
pub fn compile_block(block: &str, block_type: BlockType) -> Result<Node> {
    match block_type {
        BlockType::Paragraph => paragraph_to_node(block),
        BlockType::Heading(_) => heading_to_node(block, block_type),
        BlockType::Code => code_to_node(block),
        BlockType::Quote => quote_to_node(block),
        BlockType::UnorderedList => list_to_node(block, BlockType::UnorderedList),
        BlockType::OrderedList => list_to_node(block, BlockType::OrderedList),
        BlockType::Image => image_to_node(block),
    }
}

/// Convert a single inline span into a leaf node.
pub fn span_to_node(span: TextSpan) -> Node {
    match span.kind {
        SpanKind::Plain => Node::text(span.content),
        SpanKind::Bold => Node::leaf("b", span.content),
        SpanKind::Italic => Node::leaf("i", span.content),
        SpanKind::Code => Node::leaf("code", span.content),
        SpanKind::Link => Node::leaf("a", span.content).with_attribute("href", span.target),
        SpanKind::Image => Node::leaf("img", "")
            .with_attribute("src", span.target)
            .with_attribute("alt", Some(span.content)),
    }
}

/// The first top-level heading anywhere in the document, without its marker.
pub fn extract_title(markdown: &str) -> Result<String> {
    TITLE_RE
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
        .ok_or(Error::NoTitle)
}

fn text_to_children(text: &str) -> Result<Vec<Node>> {
    Ok(tokenize(text)?.into_iter().map(span_to_node).collect())
}

fn paragraph_to_node(block: &str) -> Result<Node> {
    let text = block.lines().collect::<Vec<_>>().join(" ");
    Ok(Node::container("p", text_to_children(&text)?))
}

fn heading_to_node(block: &str, block_type: BlockType) -> Result<Node> {
    let hashes = block.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&hashes) {
        return Err(Error::invalid_block(
            block_type,
            format!("{hashes} `#` characters is not a heading level"),
        ));
    }

    let text = block[hashes..].trim();
    if text.is_empty() {
        return Err(Error::invalid_block(block_type, "heading has no text"));
    }

    Ok(Node::container(format!("h{hashes}"), text_to_children(text)?))
}

/// Code interiors are not tokenized; the body is one plain leaf.
fn code_to_node(block: &str) -> Result<Node> {
    if !is_fenced(block) {
        return Err(Error::invalid_block(
            BlockType::Code,
            "block is not wrapped in ``` fences",
        ));
    }

    let inner = &block[FENCE.len()..block.len() - FENCE.len()];
    let (language, body) = match inner.split_once('\n') {
        Some((info, rest)) => (info.trim(), rest),
        None => ("", inner),
    };
    let body = body.trim_matches('\n');

    let mut code = Node::container("code", vec![Node::text(body)]);
    if !language.is_empty() {
        code = code.with_attribute("class", Some(format!("language-{language}")));
    }
    Ok(Node::container("pre", vec![code]))
}

fn quote_to_node(block: &str) -> Result<Node> {
    let mut lines = Vec::new();
    for line in block.lines() {
        let Some(rest) = line.strip_prefix('>') else {
            return Err(Error::invalid_block(
                BlockType::Quote,
                format!("line does not start with `>`: {line:?}"),
            ));
        };
        lines.push(rest.trim());
    }

    let text = lines.join(" ");
    Ok(Node::container("blockquote", text_to_children(&text)?))
}

fn list_to_node(block: &str, block_type: BlockType) -> Result<Node> {
    let (tag, strip): (&str, fn(&str) -> Option<&str>) = match block_type {
        BlockType::OrderedList => ("ol", strip_number),
        _ => ("ul", strip_bullet),
    };

    let items = block
        .lines()
        .map(|line| -> Result<Node> {
            // Lines without a marker are kept as their own item.
            let text = strip(line).unwrap_or_else(|| line.trim_start());
            Ok(Node::container("li", text_to_children(text)?))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Node::container(tag, items))
}

/// `* item` or `- item`, marker followed by one space or tab.
fn strip_bullet(line: &str) -> Option<&str> {
    line.strip_prefix(['*', '-'])?.strip_prefix([' ', '\t'])
}

/// `N. item`, any number of digits.
fn strip_number(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

fn image_to_node(block: &str) -> Result<Node> {
    let caps = IMAGE_RE
        .captures(block)
        .ok_or_else(|| Error::invalid_block(BlockType::Image, "no image markup found"))?;
    let (alt, url) = (&caps[1], &caps[2]);
    if url.is_empty() {
        return Err(Error::invalid_block(BlockType::Image, "image has no URL"));
    }

    Ok(Node::leaf("img", "")
        .with_attribute("src", Some(url.to_string()))
        .with_attribute("alt", Some(alt.to_string())))
}
