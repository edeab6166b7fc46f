use thiserror::Error;

use crate::block::BlockType;

/// Errors raised while turning a markdown document into HTML.
///
/// Every variant is fatal for the document being compiled. Nothing is retried
/// or logged here; the caller decides whether to skip the document or abort.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// An inline delimiter was opened but never closed.
    #[error("invalid markdown: `{delimiter}` section is not closed")]
    MalformedMarkup { delimiter: &'static str },

    #[error("input document is empty")]
    EmptyInput,

    #[error("invalid node tree: {0}")]
    Structural(String),

    /// An image or link match could not be split back out of its text.
    #[error("invalid markdown: {kind} section is not closed")]
    UnterminatedSection { kind: &'static str },

    #[error("invalid {block_type} block: {reason}")]
    InvalidBlock {
        block_type: BlockType,
        reason: String,
    },

    #[error("markdown content does not contain a title")]
    NoTitle,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_block(block_type: BlockType, reason: impl Into<String>) -> Self {
        Error::InvalidBlock {
            block_type,
            reason: reason.into(),
        }
    }
}
