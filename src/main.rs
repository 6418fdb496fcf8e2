use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use excuse_gen::{
    cache::InMemoryCache, config::Config, render::Renderer, services::ExcuseService,
    upload::ImgurUploader, web::WebServer,
};

#[derive(Parser)]
#[command(name = "excuse-server")]
#[command(version)]
#[command(about = "HTTP service redirecting caption pairs to hosted excuse images")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Imgur API client id (overrides config file)
    #[arg(long = "clientID", value_name = "ID")]
    client_id: Option<String>,

    /// Listening IP address
    #[arg(short = 'H', long, value_name = "IP")]
    host: Option<String>,

    /// Listening port
    #[arg(short, long, value_name = "PORT")]
    port: Option<u16>,

    /// Log level
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = if cli.log_level == "trace" {
        format!("excuse_gen={},tower_http=trace", cli.log_level)
    } else {
        format!("excuse_gen={}", cli.log_level)
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting excuse image service v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from specified file
    std::env::set_var("CONFIG_FILE", &cli.config);
    let mut config = Config::load()?;
    info!("Configuration loaded from: {}", cli.config);

    // Override config with CLI arguments
    if let Some(client_id) = cli.client_id {
        config.imgur.client_id = client_id;
    }
    if let Some(host) = cli.host {
        config.web.host = host;
    }
    if let Some(port) = cli.port {
        config.web.port = port;
    }

    let renderer = Renderer::new(
        config.resources.template_path.clone(),
        config.resources.font_path.clone(),
    );
    let cache = Arc::new(InMemoryCache::new());
    let uploader = Arc::new(ImgurUploader::new(config.imgur.client_id.clone()));
    let service = ExcuseService::new(renderer, cache, uploader);

    let server = WebServer::new(&config, service)?;
    info!("running on port: {}", server.port());
    server.serve().await?;

    Ok(())
}
