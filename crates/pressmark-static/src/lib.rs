//! Page build pipeline for pressmark sites.
//!
//! Reads a `config.yml` menu, mirrors static assets into the output
//! directory and renders every Markdown page through its template.

pub mod assets;
pub mod builder;
pub mod config;
pub mod error;
pub mod output;
pub mod pages;
pub mod routes;
pub mod templates;

pub use builder::{BuildConfig, BuildPhase, BuildResult, PageFailure, StaticBuilder};
pub use config::{BuildSettings, MenuEntry, SiteConfig, CONFIG_FILE};
pub use error::BuildError;
