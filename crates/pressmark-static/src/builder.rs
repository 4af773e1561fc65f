//! Static site builder.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use crate::assets::{copy_site_assets, CopyReport};
use crate::config::{BuildSettings, SiteConfig};
use crate::error::BuildError;
use crate::output::reset_output_dir;
use crate::pages::PageBuilder;
use crate::routes::{content_stem, resolve_route};
use crate::templates::{RenderContext, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source root: assets plus the `pages` and `templates` directories
    pub source_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Extension appended to template names from the menu
    pub template_extension: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::from_settings(Path::new("."), &BuildSettings::default())
    }
}

impl BuildConfig {
    /// Resolve the `build:` settings against a project root.
    pub fn from_settings(project_root: &Path, settings: &BuildSettings) -> Self {
        Self {
            source_dir: project_root.join(&settings.source),
            output_dir: project_root.join(&settings.output),
            template_extension: settings.template_extension.clone(),
        }
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.source_dir.join("pages")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.source_dir.join("templates")
    }
}

/// Steps of a build, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildPhase {
    ResetOutput,
    CopyAssets,
    BuildPages,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ResetOutput => "reset output",
            Self::CopyAssets => "copy assets",
            Self::BuildPages => "build pages",
        };
        f.write_str(name)
    }
}

/// A content file that did not produce a page.
#[derive(Debug)]
pub struct PageFailure {
    /// Content file path
    pub source_path: PathBuf,

    pub error: BuildError,
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Pages that failed, in content file order
    pub page_failures: Vec<PageFailure>,

    /// Number of asset files copied
    pub assets: usize,

    /// Asset entries that could not be copied
    pub asset_failures: Vec<BuildError>,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

impl BuildResult {
    /// A build succeeds when every page was generated. Asset failures do not count.
    pub fn is_success(&self) -> bool {
        self.page_failures.is_empty()
    }
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    site: SiteConfig,
    pages: PageBuilder,
}

impl StaticBuilder {
    /// Create a new static builder for an already loaded site config.
    pub fn new(config: BuildConfig, site: SiteConfig) -> Self {
        let pages = PageBuilder::new(TemplateEngine::new(config.templates_dir()));

        Self {
            config,
            site,
            pages,
        }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Build the static site.
    ///
    /// Reset runs to completion before anything is written. A reset failure
    /// or an unreadable pages directory aborts the build; asset and page
    /// failures are collected in the result.
    pub fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        self.check_layout()?;

        self.enter(BuildPhase::ResetOutput);
        reset_output_dir(&self.config.output_dir)?;

        self.enter(BuildPhase::CopyAssets);
        let assets = self.copy_assets();

        self.enter(BuildPhase::BuildPages);
        let (pages, page_failures) = self.build_pages()?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages,
            page_failures,
            assets: assets.copied,
            asset_failures: assets.failures,
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Refuse an output directory that is, or contains, the source root.
    ///
    /// Resetting it would delete the pages and templates being built.
    fn check_layout(&self) -> Result<(), BuildError> {
        let source_dir = resolve_path(&self.config.source_dir);
        let output_dir = resolve_path(&self.config.output_dir);

        if source_dir.starts_with(&output_dir) {
            tracing::error!(
                "Output directory {} contains source directory {}",
                self.config.output_dir.display(),
                self.config.source_dir.display()
            );
            return Err(BuildError::OutputOverlapsSource {
                source_dir: self.config.source_dir.clone(),
                output_dir: self.config.output_dir.clone(),
            });
        }

        Ok(())
    }

    fn enter(&self, phase: BuildPhase) {
        tracing::debug!("Build phase: {}", phase);
    }

    fn copy_assets(&self) -> CopyReport {
        let report = copy_site_assets(&self.config.source_dir, &self.config.output_dir);

        for failure in &report.failures {
            tracing::warn!("Skipped asset: {}", failure);
        }

        report
    }

    /// Discover all content files in the pages directory.
    fn discover_pages(&self) -> Result<Vec<PathBuf>, BuildError> {
        let pages_dir = self.config.pages_dir();
        let entries = fs::read_dir(&pages_dir).map_err(|e| {
            tracing::error!("Failed to read pages directory {}: {}", pages_dir.display(), e);
            BuildError::io(&pages_dir, e)
        })?;

        let mut pages = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BuildError::io(&pages_dir, e))?;
            let path = entry.path();

            if path.is_dir() {
                tracing::debug!("Ignoring directory in pages: {}", path.display());
                continue;
            }

            pages.push(path);
        }

        pages.sort();
        Ok(pages)
    }

    fn build_pages(&self) -> Result<(usize, Vec<PageFailure>), BuildError> {
        let pages = self.discover_pages()?;
        let base = self.base_context();

        let results: Vec<Result<(), PageFailure>> = pages
            .par_iter()
            .map(|page| {
                self.build_page(page, &base).map_err(|error| PageFailure {
                    source_path: page.clone(),
                    error,
                })
            })
            .collect();

        let mut built = 0;
        let mut failures = Vec::new();

        for result in results {
            match result {
                Ok(()) => built += 1,
                Err(failure) => {
                    tracing::error!(
                        "Error generating page {}: {}",
                        failure.source_path.display(),
                        failure.error
                    );
                    failures.push(failure);
                }
            }
        }

        Ok((built, failures))
    }

    /// Context shared by every page of this build.
    fn base_context(&self) -> RenderContext {
        let mut context = RenderContext::new();
        context.insert("config", &self.site);
        if let Some(title) = self.site.title() {
            context.insert("title", title);
        }
        context
    }

    /// Route and build a single page.
    fn build_page(&self, content_path: &Path, base: &RenderContext) -> Result<(), BuildError> {
        let stem = content_stem(content_path).ok_or_else(|| BuildError::RouteNotFound {
            stem: content_path.display().to_string(),
        })?;

        let route = resolve_route(
            &self.site,
            stem,
            &self.config.output_dir,
            self.pages.templates().templates_dir(),
            &self.config.template_extension,
        )?;

        let mut context = base.clone();
        context.insert("route", &route.stem);

        self.pages
            .build_page(content_path, &route.output_path, &route.template_path, context)
    }
}

/// Canonical form of `path`, resolving through its nearest existing ancestor.
fn resolve_path(path: &Path) -> PathBuf {
    let mut existing = path;
    let mut missing = Vec::new();

    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, name| acc.join(name));
        }

        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return path.to_path_buf(),
        }
    }
}
