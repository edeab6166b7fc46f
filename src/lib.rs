mod block;
mod config;
mod error;
mod html;
mod inline;
mod node;
mod page;
mod parser;
pub mod site;

pub use block::{BlockType, SpanKind, TextSpan};
pub use config::{BuildConfig, Config, ConfigError, PathsConfig};
pub use error::{Error, Result};
pub use html::{ROOT_TAG, compile_block, compile_document, extract_title, span_to_node};
pub use inline::{extract_images, extract_links, tokenize};
pub use node::{Attributes, Node};
pub use page::{CONTENT_PLACEHOLDER, Page, TITLE_PLACEHOLDER, render_page};
pub use parser::{classify, split_blocks};

/// Convert markdown to the HTML body of a page.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    compile_document(markdown)?.render()
}
