//! Static site build command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use pressmark_static::{BuildConfig, SiteConfig, StaticBuilder};

/// Run the build command.
///
/// Fails when the config cannot be loaded, the output cannot be reset, or
/// any page could not be generated. Skipped assets are only reported.
pub async fn run(root: &Path, config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Building static site...");

    let site = SiteConfig::load(config_path)?;
    tracing::info!("Loaded config from {}", config_path.display());

    let mut config = BuildConfig::from_settings(root, &site.build);
    if let Some(output) = output {
        config.output_dir = root.join(output);
    }

    let builder = StaticBuilder::new(config, site);
    let result = tokio::task::spawn_blocking(move || builder.build())
        .await
        .context("Build task panicked")??;

    tracing::info!(
        "Built {} pages and copied {} assets in {}ms ({} assets skipped)",
        result.pages,
        result.assets,
        result.duration_ms,
        result.asset_failures.len()
    );

    if !result.is_success() {
        anyhow::bail!(
            "{} of {} pages failed",
            result.page_failures.len(),
            result.pages + result.page_failures.len()
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
