//! Markdown conversion for pressmark.
//!
//! Turns the text of one content file into an HTML fragment ready to be
//! placed inside a page template.

pub mod parser;

pub use parser::{render_markdown, RenderedMarkdown};
