//! Routing of content files to output files and templates.

use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::BuildError;

/// Where one content file is published and which template renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Menu path the content file matched
    pub stem: String,

    /// `<output_root>/<path>.html`
    pub output_path: PathBuf,

    /// `<templates_dir>/<renderTemplates>.<extension>`
    pub template_path: PathBuf,
}

/// Resolve the route for a content file stem.
pub fn resolve_route(
    site: &SiteConfig,
    stem: &str,
    output_root: &Path,
    templates_dir: &Path,
    template_extension: &str,
) -> Result<Route, BuildError> {
    let entry = site.route(stem).ok_or_else(|| BuildError::RouteNotFound {
        stem: stem.to_string(),
    })?;

    Ok(Route {
        stem: entry.path.clone(),
        output_path: output_root.join(format!("{}.html", entry.path)),
        template_path: templates_dir.join(format!(
            "{}.{}",
            entry.render_templates, template_extension
        )),
    })
}

/// File name without its final extension.
pub fn content_stem(content_path: &Path) -> Option<&str> {
    content_path.file_stem().and_then(|s| s.to_str())
}
