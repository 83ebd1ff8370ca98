use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use timesketch_service::Registry;

#[derive(Parser, Debug)]
#[clap(author, version, about = "HTTP boundary for timesketch sketches")]
struct Cli {
    /// Address to bind the HTTP server to.
    #[clap(long, default_value = "127.0.0.1:30903")]
    bind: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let registry = Arc::new(Registry::new());

    let app = Router::new()
        .route("/new", post(timesketch_service::handlers::new_sketch))
        .route("/add", post(timesketch_service::handlers::add))
        .route("/quantiles", post(timesketch_service::handlers::quantiles))
        .route("/delete", post(timesketch_service::handlers::delete))
        .with_state(registry);

    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!("timesketch-service listening on http://{}", cli.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
