//! Preview server for a built site.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use pressmark_static::{BuildConfig, BuildSettings, SiteConfig};
use tower_http::services::ServeDir;

/// Pick the directory to serve.
///
/// An explicit `dir` is taken relative to the project root. Otherwise the
/// output directory from `config_path` is used, or the default output when
/// there is no config file.
pub fn resolve_dir(root: &Path, config_path: &Path, dir: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = dir {
        return Ok(root.join(dir));
    }

    let settings = if config_path.exists() {
        SiteConfig::load(config_path)?.build
    } else {
        BuildSettings::default()
    };

    Ok(BuildConfig::from_settings(root, &settings).output_dir)
}

/// Run the serve command.
pub async fn run(port: u16, dir: PathBuf, open: bool) -> Result<()> {
    if !dir.is_dir() {
        anyhow::bail!(
            "Output directory not found: {}. Run 'pressmark build' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let url = format!("http://{}", listener.local_addr()?);

    tracing::info!("Serving {} at {}", dir.display(), url);

    if open {
        if let Err(e) = open::that(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    axum::serve(listener, router(dir)).await?;

    Ok(())
}

fn router(dir: PathBuf) -> Router {
    Router::new().fallback_service(ServeDir::new(dir).append_index_html_on_directories(true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn rejects_missing_directory() {
        let temp = tempdir().unwrap();

        let err = run(0, temp.path().join("dist"), false).await.unwrap_err();

        assert!(err.to_string().contains("pressmark build"));
    }

    #[test]
    fn defaults_to_configured_output() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config.yml");
        fs::write(&config, "menu: []\nbuild:\n  output: public\n").unwrap();

        let dir = resolve_dir(temp.path(), &config, None).unwrap();

        assert_eq!(dir, temp.path().join("public"));
    }

    #[test]
    fn falls_back_to_default_output_without_config() {
        let temp = tempdir().unwrap();

        let dir = resolve_dir(temp.path(), &temp.path().join("config.yml"), None).unwrap();

        assert_eq!(dir, temp.path().join("dist"));
    }

    #[test]
    fn explicit_dir_is_relative_to_root() {
        let temp = tempdir().unwrap();

        let dir = resolve_dir(
            temp.path(),
            &temp.path().join("config.yml"),
            Some(PathBuf::from("site")),
        )
        .unwrap();

        assert_eq!(dir, temp.path().join("site"));
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let config = temp.path().join("config.yml");
        fs::write(&config, "menu: [unclosed").unwrap();

        assert!(resolve_dir(temp.path(), &config, None).is_err());
    }
}
