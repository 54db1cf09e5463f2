use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use todo_api::config::Config;
use todo_api::state::AppState;
use todo_api::store::{MemoryTodoStore, PgTodoStore, TodoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("todo_api=info,tower_http=info")),
        )
        .init();

    let pg = match &config.database_url {
        Some(url) => {
            let store = PgTodoStore::connect(url)
                .await
                .context("Error connecting DB")?;
            store.ensure_schema().await.context("Error creating todos table")?;
            store.ping().await.context("Error pinging DB")?;
            info!("connected to postgres");
            Some(store)
        }
        None => {
            warn!("DATABASE_URL not set, todos are kept in memory");
            None
        }
    };

    let state = match pg.clone() {
        Some(store) => AppState::new(store),
        None => AppState::new(MemoryTodoStore::new()),
    };

    let app = todo_api::app(state, config.static_dir());

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("Error binding {}", config.addr()))?;

    info!("server is listening at http://{}", config.addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = pg {
        store.close().await;
    }

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
