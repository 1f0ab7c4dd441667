//! Server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! database init, migrations, REST API and graceful shutdown.

use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::infrastructure::{init_database, run_migrations};
use crate::interfaces::http::{create_api_router, Paging};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use civic_issues::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the REST API is bound to.
    pub local_addr: std::net::SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownCoordinator,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Connect to the database, apply migrations (if enabled) and start
    /// serving the REST API.
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;

        info!("Starting civic issues service...");

        // ── Database ───────────────────────────────────────────
        let db = init_database(&config.database).await?;

        if opts.auto_migrate {
            run_migrations(&db).await?;
        } else {
            warn!("Skipping database migrations");
        }

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── REST API server ────────────────────────────────────
        let paging = Paging::new(
            &config.server.base_url(),
            config.pagination.default_page_size,
            config.pagination.max_page_size,
        );
        let api_router = create_api_router(db.clone(), paging);

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Get a cloneable shutdown signal.
    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop, at most `shutdown_timeout` seconds once
    /// shutdown has been triggered, then close the database.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            api_task,
            ..
        } = self;

        let finished = shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !finished {
            warn!("In-flight requests did not finish in time");
        }

        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }

        info!("Civic issues service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down civic issues service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup (before [`ServerHandle::start`]).
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
