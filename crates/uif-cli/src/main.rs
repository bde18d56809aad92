//! uif - Main Entry Point

mod cli;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use uif_engine::{Config, Engine};

use crate::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match cli.command {
        Command::Render {
            page,
            components,
            url,
            pretty,
        } => {
            let mut config = config;
            if let Some(dir) = components {
                config.component_root = dir;
            }
            if url.is_some() {
                config.component_url = url;
            }
            let html = render(&Engine::new(config), &page, pretty)?;
            println!("{html}");
        }
    }
    Ok(())
}

/// Load `page`, instantiate its components and serialize the result
fn render(engine: &Engine, page: &Path, pretty: bool) -> anyhow::Result<String> {
    tracing::info!("Rendering {}", page.display());
    let html = smol::block_on(async {
        let session = engine.open_file(page).await?;
        let found = session.load().await;
        tracing::info!("{} top-level component(s) in {}", found.len(), page.display());
        anyhow::Ok(session.to_html(pretty))
    })
    .with_context(|| format!("rendering {}", page.display()))?;
    tracing::info!("Rendered {} ({} bytes)", page.display(), html.len());
    Ok(html)
}
