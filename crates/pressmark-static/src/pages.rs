//! Single page build: Markdown in, rendered template out.

use std::fs;
use std::path::Path;

use pressmark_markdown::render_markdown;

use crate::error::BuildError;
use crate::templates::{RenderContext, TemplateEngine};

/// Builds pages against one templates directory.
pub struct PageBuilder {
    templates: TemplateEngine,
}

impl PageBuilder {
    pub fn new(templates: TemplateEngine) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateEngine {
        &self.templates
    }

    /// Convert `content_path`, render it with `template_path` and write the
    /// result to `output_path`.
    ///
    /// `content` in the template context is always the converted fragment.
    /// When the page has a level-1 heading it is exposed as `page_title`
    /// unless the caller already set one.
    pub fn build_page(
        &self,
        content_path: &Path,
        output_path: &Path,
        template_path: &Path,
        mut context: RenderContext,
    ) -> Result<(), BuildError> {
        let markdown =
            fs::read_to_string(content_path).map_err(|e| BuildError::io(content_path, e))?;

        let rendered = render_markdown(&markdown);
        if let Some(title) = rendered.title {
            if !context.contains_key("page_title") {
                context.insert("page_title", title);
            }
        }
        let context = context.with_content(rendered.html);

        let html = self.templates.render_file(template_path, &context)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
        }
        fs::write(output_path, html).map_err(|e| BuildError::io(output_path, e))?;

        tracing::info!("Generated page: {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup(template: &str) -> (tempfile::TempDir, PageBuilder) {
        let temp = tempdir().unwrap();
        let templates = temp.path().join("templates");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("main.html"), template).unwrap();
        let builder = PageBuilder::new(TemplateEngine::new(&templates));
        (temp, builder)
    }

    #[test]
    fn builds_page_inside_template() {
        let (temp, builder) =
            setup("<html><body>{{ content | safe }}</body></html>");
        let content = temp.path().join("index.md");
        fs::write(&content, "# Hi").unwrap();
        let output = temp.path().join("dist").join("index.html");

        builder
            .build_page(
                &content,
                &output,
                &builder.templates().templates_dir().join("main.html"),
                RenderContext::new(),
            )
            .unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert_eq!(html, "<html><body><h1>Hi</h1>\n</body></html>");
    }

    #[test]
    fn fragment_overrides_context_content() {
        let (temp, builder) = setup("{{ content | safe }}|{{ page_title }}");
        let content = temp.path().join("about.md");
        fs::write(&content, "# About us\n\ntext").unwrap();
        let output = temp.path().join("about.html");

        let mut context = RenderContext::new();
        context.insert("content", "from caller");

        builder
            .build_page(
                &content,
                &output,
                &builder.templates().templates_dir().join("main.html"),
                context,
            )
            .unwrap();

        let html = fs::read_to_string(&output).unwrap();
        assert!(!html.contains("from caller"));
        assert!(html.starts_with("<h1>About us</h1>"));
        assert!(html.ends_with("|About us"));
    }

    #[test]
    fn missing_content_is_io_error_and_writes_nothing() {
        let (temp, builder) = setup("{{ content | safe }}");
        let output = temp.path().join("missing.html");

        let err = builder
            .build_page(
                &temp.path().join("missing.md"),
                &output,
                &builder.templates().templates_dir().join("main.html"),
                RenderContext::new(),
            )
            .unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
        assert!(!output.exists());
    }

    #[test]
    fn template_failure_is_render_error() {
        let (temp, builder) = setup("{{ content | no_such_filter }}");
        let content = temp.path().join("index.md");
        fs::write(&content, "hello").unwrap();
        let output = temp.path().join("index.html");

        let err = builder
            .build_page(
                &content,
                &output,
                &builder.templates().templates_dir().join("main.html"),
                RenderContext::new(),
            )
            .unwrap_err();

        assert!(matches!(err, BuildError::Render { .. }));
        assert!(!output.exists());
    }
}
