//! Web layer module
//!
//! Thin HTTP front end over [`ExcuseService`]: one redirecting excuse route
//! plus a liveness endpoint. Handlers validate at the boundary and delegate
//! everything else to the service.

use anyhow::Result;
use axum::{routing::get, Router};
use regex::Regex;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;

use crate::{config::Config, services::ExcuseService};

pub mod handlers;

/// Caption segments accepted by the excuse route. Anything outside this set
/// is treated as an unroutable path.
const CAPTION_PATTERN: &str = "^[a-zA-Z0-9 !]+$";

/// Web server configuration and setup
pub struct WebServer {
    app: Router,
    addr: SocketAddr,
}

impl WebServer {
    pub fn new(config: &Config, service: ExcuseService) -> Result<Self> {
        let state = AppState {
            service,
            caption_pattern: Regex::new(CAPTION_PATTERN)?,
        };

        let app = Router::new()
            .route("/health", get(handlers::health))
            .route("/:short/:long", get(handlers::generate_excuse))
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr: SocketAddr = format!("{}:{}", config.web.host, config.web.port).parse()?;

        Ok(Self { app, addr })
    }

    /// Start the web server
    pub async fn serve(self) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.addr).await?;
        axum::serve(listener, self.app).await?;
        Ok(())
    }

    /// The assembled router, for driving requests through in tests
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn host(&self) -> String {
        self.addr.ip().to_string()
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: ExcuseService,
    pub caption_pattern: Regex,
}
