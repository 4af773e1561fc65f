//! Template rendering for site pages.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{Environment, Value};
use serde::Serialize;

use crate::error::BuildError;

/// Values handed to a page template.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, Value>,
}

impl RenderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing any previous value.
    pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) {
        self.values.insert(key.into(), Value::from_serialize(&value));
    }

    /// Set the rendered page fragment. It always wins over an existing `content`.
    ///
    /// The fragment is marked safe, so `{{ content }}` emits it unescaped.
    pub fn with_content(mut self, html: impl Into<String>) -> Self {
        self.values
            .insert("content".to_string(), Value::from_safe_string(html.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

/// Template engine using minijinja.
///
/// Templates are read from disk when rendered, and `include`/`extends`
/// resolve relative to the templates directory.
pub struct TemplateEngine {
    env: Environment<'static>,
    templates_dir: PathBuf,
}

impl TemplateEngine {
    /// Create an engine rooted at `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>) -> Self {
        let templates_dir = templates_dir.into();
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(&templates_dir));

        Self { env, templates_dir }
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Render the template file at `template_path`.
    pub fn render_file(
        &self,
        template_path: &Path,
        context: &RenderContext,
    ) -> Result<String, BuildError> {
        let source =
            fs::read_to_string(template_path).map_err(|e| BuildError::io(template_path, e))?;

        self.env
            .render_named_str(&self.template_name(template_path), &source, context)
            .map_err(|source| BuildError::Render {
                template: template_path.to_path_buf(),
                source,
            })
    }

    /// Name used for error reporting and auto-escape selection.
    fn template_name(&self, template_path: &Path) -> String {
        let relative = template_path
            .strip_prefix(&self.templates_dir)
            .unwrap_or(template_path);

        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn content_always_overrides() {
        let mut context = RenderContext::new();
        context.insert("content", "stale");
        context.insert("title", "Site");

        let context = context.with_content("<p>fresh</p>");

        assert_eq!(
            context.get("content").and_then(|v| v.as_str()),
            Some("<p>fresh</p>")
        );
        assert!(context.contains_key("title"));
    }

    #[test]
    fn renders_template_from_disk() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("main.html");
        fs::write(
            &path,
            "<title>{{ title }}</title><main>{{ content | safe }}</main>",
        )
        .unwrap();

        let engine = TemplateEngine::new(temp.path());
        let mut context = RenderContext::new();
        context.insert("title", "My Static Site");
        let context = context.with_content("<h1>Hi</h1>\n");

        let html = engine.render_file(&path, &context).unwrap();

        assert_eq!(
            html,
            "<title>My Static Site</title><main><h1>Hi</h1>\n</main>"
        );
    }

    #[test]
    fn content_placeholder_renders_unescaped() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("main.html");
        fs::write(&path, "<main>{{ content }}</main>").unwrap();

        let engine = TemplateEngine::new(temp.path());
        let context = RenderContext::new().with_content("<h1>Hi</h1>");

        let html = engine.render_file(&path, &context).unwrap();

        assert_eq!(html, "<main><h1>Hi</h1></main>");
    }

    #[test]
    fn html_templates_escape_other_values() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("main.html");
        fs::write(&path, "{{ title }}").unwrap();

        let engine = TemplateEngine::new(temp.path());
        let mut context = RenderContext::new();
        context.insert("title", "<b>");

        let html = engine.render_file(&path, &context).unwrap();

        assert_eq!(html, "&lt;b&gt;");
    }

    #[test]
    fn resolves_includes_from_templates_dir() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("nav.html"), "<nav>{{ title }}</nav>").unwrap();
        let path = temp.path().join("main.html");
        fs::write(&path, r#"{% include "nav.html" %}{{ content | safe }}"#).unwrap();

        let engine = TemplateEngine::new(temp.path());
        let mut context = RenderContext::new();
        context.insert("title", "Docs");

        let html = engine
            .render_file(&path, &context.with_content("<p>x</p>"))
            .unwrap();

        assert_eq!(html, "<nav>Docs</nav><p>x</p>");
    }

    #[test]
    fn missing_template_is_io_error() {
        let temp = tempdir().unwrap();
        let engine = TemplateEngine::new(temp.path());

        let err = engine
            .render_file(&temp.path().join("nope.html"), &RenderContext::new())
            .unwrap_err();

        assert!(matches!(err, BuildError::Io { .. }));
    }

    #[test]
    fn syntax_error_is_render_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("broken.html");
        fs::write(&path, "{% if %}").unwrap();

        let engine = TemplateEngine::new(temp.path());
        let err = engine
            .render_file(&path, &RenderContext::new())
            .unwrap_err();

        assert!(matches!(err, BuildError::Render { .. }));
        assert!(err.to_string().contains("broken.html"));
    }
}
