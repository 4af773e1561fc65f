//! Markdown document conversion.

use pulldown_cmark::{html, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// The result of converting one Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMarkdown {
    /// HTML fragment for the whole document
    pub html: String,

    /// Plain text of the first level-1 heading, if any
    pub title: Option<String>,
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Convert Markdown source to an HTML fragment.
///
/// The event stream is scanned once for the first `#` heading while it is
/// being written out, so the title costs no second parse.
pub fn render_markdown(source: &str) -> RenderedMarkdown {
    let mut title: Option<String> = None;
    let mut in_title = false;
    let mut heading_text = String::new();

    let parser = Parser::new_ext(source, options()).inspect(|event| match event {
        Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            ..
        }) if title.is_none() => {
            in_title = true;
            heading_text.clear();
        }
        Event::Text(text) | Event::Code(text) if in_title => {
            heading_text.push_str(text);
        }
        Event::End(TagEnd::Heading(HeadingLevel::H1)) if in_title => {
            in_title = false;
            let trimmed = heading_text.trim();
            if !trimmed.is_empty() {
                title = Some(trimmed.to_string());
            }
        }
        _ => {}
    });

    let mut html_output = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut html_output, parser);

    RenderedMarkdown {
        html: html_output,
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_heading() {
        let doc = render_markdown("# Hi");

        assert_eq!(doc.html, "<h1>Hi</h1>\n");
        assert_eq!(doc.title, Some("Hi".to_string()));
    }

    #[test]
    fn renders_paragraphs_and_emphasis() {
        let doc = render_markdown("Some *emphasis* and **strong** text.");

        assert_eq!(
            doc.html,
            "<p>Some <em>emphasis</em> and <strong>strong</strong> text.</p>\n"
        );
        assert!(doc.title.is_none());
    }

    #[test]
    fn title_comes_from_first_h1_only() {
        let source = r#"## Intro

# Main `Title`

# Second
"#;

        let doc = render_markdown(source);

        assert_eq!(doc.title, Some("Main Title".to_string()));
        assert!(doc.html.contains("<h2>Intro</h2>"));
        assert!(doc.html.contains("<h1>Second</h1>"));
    }

    #[test]
    fn renders_tables_and_strikethrough() {
        let source = r#"| a | b |
|---|---|
| 1 | 2 |

~~gone~~
"#;

        let doc = render_markdown(source);

        assert!(doc.html.contains("<table>"));
        assert!(doc.html.contains("<td>1</td>"));
        assert!(doc.html.contains("<del>gone</del>"));
    }

    #[test]
    fn renders_task_lists() {
        let doc = render_markdown("- [x] done\n- [ ] todo\n");

        assert!(doc.html.contains("checked"));
        assert!(doc.html.contains("type=\"checkbox\""));
    }

    #[test]
    fn empty_source_gives_empty_fragment() {
        let doc = render_markdown("");

        assert_eq!(doc.html, "");
        assert!(doc.title.is_none());
    }
}
