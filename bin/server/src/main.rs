use notekeep_notes::NoteBook;
use notekeep_platform_access::SessionManager;
use notekeep_server::{
    app::{self, AppState},
    auth::{
        OidcClient,
        db::{SessionRepository, UserRepository},
    },
    config::ServerConfig,
    cookies::{self, CookiePolicy},
    db::{NoteRepository, shared_pool},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from environment
    let config = ServerConfig::from_env()?;
    tracing::info!(environment = %config.environment, "Loaded configuration");

    let db_pool = shared_pool(&config.database_url).await?.clone();

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let sessions = SessionManager::new(
        Arc::new(SessionRepository::new(db_pool.clone())),
        config.session.duration(),
    );

    // Cleanup expired sessions on startup
    match sessions.purge_expired().await {
        Ok(count) if count > 0 => {
            tracing::info!(
                deleted_sessions = count,
                "Cleaned up expired sessions on startup"
            );
        }
        Ok(_) => {}
        Err(e) => {
            tracing::warn!(error = %e, "Failed to cleanup expired sessions on startup");
        }
    }

    // Spawn periodic session cleanup task
    let cleanup_sessions = sessions.clone();
    let cleanup_interval_secs = config.session.cleanup_interval_seconds;
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_secs(cleanup_interval_secs));
        loop {
            interval.tick().await;
            match cleanup_sessions.purge_expired().await {
                Ok(count) if count > 0 => {
                    tracing::debug!(deleted_sessions = count, "Periodic session cleanup");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to cleanup expired sessions");
                }
            }
        }
    });

    // Initialize OIDC client
    tracing::info!("Discovering OIDC provider...");
    let identity = OidcClient::discover(config.oidc).await?;

    let state = AppState {
        users: Arc::new(UserRepository::new(db_pool.clone())),
        sessions,
        notes: NoteBook::new(Arc::new(NoteRepository::new(db_pool))),
        identity: Arc::new(identity),
        cookies: CookiePolicy::new(config.environment, config.session.duration()),
        cookie_key: cookies::signing_key(&config.session.secret),
        frontend_origin: config.frontend_origin,
        environment: config.environment,
    };

    let app = app::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("listening on http://{}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
