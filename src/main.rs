use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use items_api::{api, auth, bootstrap, cli, config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "items_api=info,tower_http=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = config::load()?;
    let args = cli::Cli::parse();

    let port = match args.command {
        Some(cli::Commands::Serve { port }) => port,
        None => None,
    };

    run_server(cfg, port).await
}

async fn run_server(cfg: config::Config, port_override: Option<u16>) -> anyhow::Result<()> {
    let port = port_override.unwrap_or(cfg.port);

    tracing::info!("preparing database...");
    let db = bootstrap::prepare_store(&cfg).await?;

    let tokens = auth::TokenService::new(&cfg.jwt_secret);
    let state = Arc::new(AppState { db, tokens, config: cfg });

    let app = api::router(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        // Wide-open CORS: any origin, method and header. Unsuitable for
        // production, acceptable for the teaching scope.
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(request_id_middleware));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("items-api listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Middleware: injects a unique X-Request-Id into every response so
/// clients can correlate errors with server logs.
async fn request_id_middleware(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    let req_id = uuid::Uuid::new_v4().to_string();
    let mut resp = next.run(req).await;
    if let Ok(val) = axum::http::HeaderValue::from_str(&req_id) {
        resp.headers_mut().insert("x-request-id", val);
    }
    resp
}
