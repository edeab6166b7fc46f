use crate::error::Result;
use crate::html::{compile_document, extract_title};

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// A compiled markdown document: its title and body HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub html: String,
}

impl Page {
    /// Compile a markdown document. Fails if it has no `# ` heading.
    pub fn from_markdown(markdown: &str) -> Result<Self> {
        let html = compile_document(markdown)?.render()?;
        let title = extract_title(markdown)?;
        Ok(Self { title, html })
    }

    /// Substitute title and body into every placeholder of `template`.
    pub fn fill(&self, template: &str) -> String {
        template
            .replace(TITLE_PLACEHOLDER, &self.title)
            .replace(CONTENT_PLACEHOLDER, &self.html)
    }
}

/// Compile `markdown` and drop it into `template`.
pub fn render_page(markdown: &str, template: &str) -> Result<String> {
    Ok(Page::from_markdown(markdown)?.fill(template))
}
