//! pressmark CLI - config-driven static site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "pressmark")]
#[command(about = "Build a static site from Markdown pages, templates and a YAML menu")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root directory
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to the site config, relative to the project root
    #[arg(short, long, default_value = pressmark_static::CONFIG_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter site in the project root
    Init {
        /// Overwrite files that already exist
        #[arg(short, long)]
        yes: bool,
    },

    /// Build the site into the output directory
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Preview a built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Open the site in a browser
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let config_path = cli.root.join(&cli.config);

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.root, yes).await?;
        }
        Commands::Build { output } => {
            commands::build::run(&cli.root, &config_path, output).await?;
        }
        Commands::Serve { port, dir, open } => {
            let dir = commands::serve::resolve_dir(&cli.root, &config_path, dir)?;
            commands::serve::run(port, dir, open).await?;
        }
    }

    Ok(())
}
