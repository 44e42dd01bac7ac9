//! 3D LIDAR sweep server
//!
//! Run with: cargo run --features server --bin lidar-server

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use lidar_sweep::server::{self, ServerConfig};
    use tokio::net::TcpListener;
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,lidar_sweep=debug,tower_http=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = ServerConfig::from_env()?;
    info!(
        addr = %config.addr,
        pkg_dir = %config.pkg_dir.display(),
        "Starting 3D LIDAR sweep server"
    );
    info!(url = %format!("http://localhost:{}", config.addr.port()), "Open in a browser");

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, server::app(&config)).await?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
