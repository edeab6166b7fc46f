use std::sync::LazyLock;

use regex::Regex;

use crate::block::{SpanKind, TextSpan};
use crate::error::{Error, Result};

pub(crate) static IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[(.*?)\]\((.*?)\)").expect("valid image regex"));
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));

/// Delimiter passes, applied in this order. `**` must run before `*`.
const DELIMITERS: [(&str, SpanKind); 3] = [
    ("**", SpanKind::Bold),
    ("*", SpanKind::Italic),
    ("`", SpanKind::Code),
];

/// Split raw text into formatted spans.
///
/// Runs the bold, italic and code delimiter passes, then pulls out images and
/// finally links. Each pass only touches spans that are still plain.
pub fn tokenize(text: &str) -> Result<Vec<TextSpan>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let mut spans = vec![TextSpan::plain(text)];
    for (delimiter, kind) in DELIMITERS {
        spans = split_delimiter(spans, delimiter, kind)?;
    }
    spans = split_embedded(spans, SpanKind::Image)?;
    split_embedded(spans, SpanKind::Link)
}

/// Every `![alt](url)` in `text`, left to right.
pub fn extract_images(text: &str) -> Vec<(String, String)> {
    captures(&IMAGE_RE, text)
}

/// Every `[text](url)` in `text`, left to right. Image markup also matches.
pub fn extract_links(text: &str) -> Vec<(String, String)> {
    captures(&LINK_RE, text)
}

fn captures(pattern: &Regex, text: &str) -> Vec<(String, String)> {
    pattern
        .captures_iter(text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

fn split_delimiter(
    spans: Vec<TextSpan>,
    delimiter: &'static str,
    kind: SpanKind,
) -> Result<Vec<TextSpan>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let sections: Vec<&str> = span.content.split(delimiter).collect();
        if sections.len() % 2 == 0 {
            return Err(Error::MalformedMarkup { delimiter });
        }

        for (i, section) in sections.into_iter().enumerate() {
            if section.is_empty() {
                continue;
            }
            let kind = if i % 2 == 0 { SpanKind::Plain } else { kind };
            out.push(TextSpan::new(section, kind));
        }
    }

    Ok(out)
}

/// Shared image/link pass. `kind` must be `Image` or `Link`.
fn split_embedded(spans: Vec<TextSpan>, kind: SpanKind) -> Result<Vec<TextSpan>> {
    let (pattern, name) = match kind {
        SpanKind::Image => (&*IMAGE_RE, "image"),
        _ => (&*LINK_RE, "link"),
    };

    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        if !span.is_plain() {
            out.push(span);
            continue;
        }

        let found = captures(pattern, &span.content);
        if found.is_empty() {
            out.push(span);
            continue;
        }

        let mut remaining = span.content.as_str();
        for (text, url) in found {
            let markup = match kind {
                SpanKind::Image => format!("![{text}]({url})"),
                _ => format!("[{text}]({url})"),
            };
            // Matches come from `remaining` itself, so this only fires if the patterns drift.
            let Some((before, after)) = remaining.split_once(&markup) else {
                return Err(Error::UnterminatedSection { kind: name });
            };
            if !before.is_empty() {
                out.push(TextSpan::plain(before));
            }
            out.push(TextSpan {
                content: text,
                kind,
                target: Some(url),
            });
            remaining = after;
        }

        if !remaining.is_empty() {
            out.push(TextSpan::plain(remaining));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn empty_input() {
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[rstest]
    #[case("just some words")]
    #[case("punctuation, digits 123 and (parens)")]
    #[case("  leading and trailing  ")]
    fn plain_text_is_one_span(#[case] text: &str) {
        assert_eq!(tokenize(text).unwrap(), vec![TextSpan::plain(text)]);
    }

    #[rstest]
    #[case("**bold**", SpanKind::Bold, "bold")]
    #[case("*italic*", SpanKind::Italic, "italic")]
    #[case("`code`", SpanKind::Code, "code")]
    #[case("**two words**", SpanKind::Bold, "two words")]
    fn whole_text_delimited(#[case] text: &str, #[case] kind: SpanKind, #[case] inner: &str) {
        assert_eq!(tokenize(text).unwrap(), vec![TextSpan::new(inner, kind)]);
    }

    #[test]
    fn mixed_emphasis() {
        assert_eq!(
            tokenize("This is **bold** and *italic* with `code` here").unwrap(),
            vec![
                TextSpan::plain("This is "),
                TextSpan::new("bold", SpanKind::Bold),
                TextSpan::plain(" and "),
                TextSpan::new("italic", SpanKind::Italic),
                TextSpan::plain(" with "),
                TextSpan::new("code", SpanKind::Code),
                TextSpan::plain(" here"),
            ]
        );
    }

    #[rstest]
    #[case("**bold", "**")]
    #[case("an *italic", "*")]
    #[case("some `code", "`")]
    fn unterminated_delimiter(#[case] text: &str, #[case] delimiter: &'static str) {
        assert_eq!(tokenize(text), Err(Error::MalformedMarkup { delimiter }));
    }

    #[test]
    fn adjacent_delimiters_are_dropped() {
        assert_eq!(
            tokenize("a****b").unwrap(),
            vec![TextSpan::plain("a"), TextSpan::plain("b")]
        );
    }

    #[test]
    fn image_and_link() {
        assert_eq!(
            tokenize("An ![cat](https://x.io/cat.png) and a [site](https://x.io) end").unwrap(),
            vec![
                TextSpan::plain("An "),
                TextSpan::image("cat", "https://x.io/cat.png"),
                TextSpan::plain(" and a "),
                TextSpan::link("site", "https://x.io"),
                TextSpan::plain(" end"),
            ]
        );
    }

    #[test]
    fn repeated_links_keep_order() {
        assert_eq!(
            tokenize("[a](1)[b](2) tail [a](1)").unwrap(),
            vec![
                TextSpan::link("a", "1"),
                TextSpan::link("b", "2"),
                TextSpan::plain(" tail "),
                TextSpan::link("a", "1"),
            ]
        );
    }

    #[test]
    fn link_inside_bold_is_not_split() {
        assert_eq!(
            tokenize("**[a](b)** [c](d)").unwrap(),
            vec![
                TextSpan::new("[a](b)", SpanKind::Bold),
                TextSpan::plain(" "),
                TextSpan::link("c", "d"),
            ]
        );
    }

    #[test]
    fn extract_helpers() {
        let text = "![one](a.png) text [two](b) ![three](c.jpg)";
        assert_eq!(
            extract_images(text),
            vec![
                ("one".to_string(), "a.png".to_string()),
                ("three".to_string(), "c.jpg".to_string()),
            ]
        );
        assert_eq!(extract_links("no links here"), vec![]);
        assert_eq!(
            extract_links("[x](y)"),
            vec![("x".to_string(), "y".to_string())]
        );
    }
}
