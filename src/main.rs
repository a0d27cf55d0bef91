use tokio::signal;

use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use email_verifier::app::create_app;
use email_verifier::config::Settings;
use email_verifier::state::SharedAppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let settings = Settings::from_env()?;
  if settings.secret_key.is_none() {
    tracing::warn!("JWT_SECRET is not set; token operations will fail");
  }

  let app = create_app(SharedAppState::new(&settings));

  let port: u16 = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse().ok())
    .unwrap_or(3000);
  let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

  tracing::info!("Dev server running at http://localhost:{}", port);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    signal::unix::signal(signal::unix::SignalKind::terminate())
      .expect("Failed to install signal handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
      _ = ctrl_c => {},
      _ = terminate => {},
  }

  tracing::info!("Received termination signal, shutting down gracefully...");
}
