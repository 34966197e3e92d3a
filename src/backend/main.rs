/**
 * Blink Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads the configuration and serves the
 * Axum application.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,blink=debug"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("[Startup] Server initialization started");

    let config = blink::shared::AppConfig::from_env().map_err(|e| {
        tracing::error!("[Startup] Invalid configuration: {}", e);
        e
    })?;

    let app = blink::backend::server::create_app(&config).await;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("[Startup] Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin blink-server --features ssr");
    std::process::exit(1);
}
