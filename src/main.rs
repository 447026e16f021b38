//! Student records server: reads DB_* settings from the environment (or `.env`), prepares the
//! `students` table, and serves the HTTP API.

use student_records::{
    app, ensure_database_exists, ensure_students_table, AppConfig, AppState, PgStudentStore,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("student_records=info,tower_http=info")
        }))
        .init();

    let config = AppConfig::from_env()?;

    // The service still starts without a reachable store; requests report 500 until it is back.
    if let Err(e) = ensure_database_exists(&config.store).await {
        tracing::error!(error = %e, database = %config.store.database, "database check failed");
    }
    match ensure_students_table(&config.store).await {
        Ok(()) => tracing::info!("database initialized"),
        Err(e) => tracing::error!(error = %e, "database initialization failed"),
    }

    let state = AppState::new(PgStudentStore::new(&config.store));
    let router = app(state, config.server.body_limit);

    let listener = TcpListener::bind(config.server.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutting down");
}
