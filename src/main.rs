use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_content::{
    build::write_site,
    config::{SiteConfig, DEFAULT_CONFIG_PATH},
    server,
    state::AppState,
    Site,
};

#[derive(Parser, Debug)]
#[command(version, about = "Builds the blog's derived content records")]
struct Cli {
    /// Site configuration file
    #[arg(long, env = "BLOG_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the corpus and write sitemap, feed, route list and page data
    Build {
        /// Output directory, overriding `output_dir` from the config
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the route surface locally as JSON
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::load(&cli.config)
        .await
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;

    let site = Site::load(config, Utc::now())
        .await
        .context("failed to load content")?;

    match cli.command {
        Command::Build { output } => {
            let output = output.unwrap_or_else(|| site.config().output_dir.clone());
            let summary = write_site(&site, &output)
                .await
                .with_context(|| format!("failed to write site to {}", output.display()))?;
            info!(files = summary.files, "done");
        }
        Command::Serve { port } => {
            let state = Arc::new(AppState::new(site).context("failed to render feeds")?);
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            server::serve(state, addr).await.context("server error")?;
        }
    }

    Ok(())
}
