use crate::error::{Error, Result};

/// Ordered HTML attributes. Pairs with no value are left out when rendering.
pub type Attributes = Vec<(String, Option<String>)>;

/// A node in the HTML tree built from a markdown document.
///
/// Text is written out verbatim. The input is trusted, so nothing is escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text, optionally wrapped in a tag. An untagged leaf is bare text.
    Leaf {
        tag: Option<String>,
        content: String,
        attributes: Attributes,
    },
    /// A tagged element that owns its children.
    Container {
        tag: String,
        children: Vec<Node>,
        attributes: Attributes,
    },
}

impl Node {
    /// Bare text with no surrounding tag.
    pub fn text(content: impl Into<String>) -> Self {
        Node::Leaf {
            tag: None,
            content: content.into(),
            attributes: Vec::new(),
        }
    }

    pub fn leaf(tag: impl Into<String>, content: impl Into<String>) -> Self {
        Node::Leaf {
            tag: Some(tag.into()),
            content: content.into(),
            attributes: Vec::new(),
        }
    }

    pub fn container(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Container {
            tag: tag.into(),
            children,
            attributes: Vec::new(),
        }
    }

    /// Append an attribute, keeping insertion order.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        match &mut self {
            Node::Leaf { attributes, .. } | Node::Container { attributes, .. } => {
                attributes.push((key.into(), value));
            }
        }
        self
    }

    /// Serialize this node and everything below it to HTML.
    pub fn render(&self) -> Result<String> {
        let mut out = String::new();
        self.render_into(&mut out)?;
        Ok(out)
    }

    fn render_into(&self, out: &mut String) -> Result<()> {
        match self {
            Node::Leaf {
                tag: None, content, ..
            } => {
                out.push_str(content);
            }
            Node::Leaf {
                tag: Some(tag),
                content,
                attributes,
            } => {
                if tag.is_empty() {
                    return Err(Error::Structural("leaf node has an empty tag".to_string()));
                }
                open_tag(tag, attributes, out);
                out.push_str(content);
                close_tag(tag, out);
            }
            Node::Container {
                tag,
                children,
                attributes,
            } => {
                if tag.is_empty() {
                    return Err(Error::Structural(
                        "container node requires a tag".to_string(),
                    ));
                }
                open_tag(tag, attributes, out);
                for child in children {
                    child.render_into(out)?;
                }
                close_tag(tag, out);
            }
        }
        Ok(())
    }
}

fn open_tag(tag: &str, attributes: &Attributes, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    out.push_str(&attributes_to_html(attributes));
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Render attributes as ` key="value"` pairs in order.
pub fn attributes_to_html(attributes: &Attributes) -> String {
    let mut html = String::new();
    for (key, value) in attributes {
        let Some(value) = value else { continue };
        if key.is_empty() {
            continue;
        }
        html.push(' ');
        html.push_str(key);
        html.push_str("=\"");
        html.push_str(value);
        html.push('"');
    }
    html
}
