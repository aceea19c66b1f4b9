use std::{sync::Arc, time::Duration};

use anyhow::Context;
use movist::{AppState, auth, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,movist=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await.context("database")?;

    if let Some(admin) = &config.admin {
        auth::ensure_user(&db, &admin.username, &admin.password).await.context("admin account")?;
    }

    let state = Arc::new(AppState::new(config.clone(), db));
    state.login_throttle.clone().spawn_pruner(Duration::from_secs(60));
    let app = movist::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, media_root = %config.media_root.display(), "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
