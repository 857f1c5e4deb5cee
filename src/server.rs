//! Server runtime.
//!
//! [`ServerHandle`] owns the whole lifecycle: metrics recorder, database
//! connection, schema migration, optional seed data, the HTTP server and
//! graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::application::{SchoolStatisticsService, StudentService};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, seed_if_empty, SeaOrmRepositoryProvider};
use crate::interfaces::http::{create_router, AppState};
use crate::shared::errors::InfraError;
use crate::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};

/// Histogram buckets are folded on this interval.
const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the service.
pub struct ServerOptions {
    pub config: AppConfig,
    /// Insert sample data into an empty database (default: from config).
    pub seed: bool,
}

impl From<AppConfig> for ServerOptions {
    fn from(config: AppConfig) -> Self {
        Self {
            seed: config.database.seed,
            config,
        }
    }
}

// ── Metrics ────────────────────────────────────────────────────────

/// Install the global Prometheus recorder once per process.
///
/// If another recorder is already installed, metrics are still rendered
/// from a detached recorder so `/metrics` keeps answering.
fn prometheus_handle() -> PrometheusHandle {
    static PROM_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                handle
            }
            Err(e) => {
                error!("Failed to install Prometheus metrics recorder: {}", e);
                PrometheusBuilder::new().build_recorder().handle()
            }
        })
        .clone()
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running service.
///
/// ```rust,no_run
/// use contoso_university::config::AppConfig;
/// use contoso_university::server::ServerHandle;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(AppConfig::default().into()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Repository provider for data access.
    pub repos: Arc<dyn RepositoryProvider>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the HTTP server is bound to.
    pub local_addr: SocketAddr,

    db: DatabaseConnection,
    shutdown: ShutdownSignal,
    api_task: JoinHandle<()>,
}

impl ServerHandle {
    /// Start the service.
    ///
    /// 1. Install the Prometheus recorder
    /// 2. Connect to the database and run migrations
    /// 3. Seed sample data into an empty database (if enabled)
    /// 4. Serve HTTP until the shutdown signal fires
    pub async fn start(opts: ServerOptions) -> Result<Self, InfraError> {
        let config = opts.config;
        info!("Starting Contoso University...");

        let prometheus = prometheus_handle();

        // ── Database ───────────────────────────────────────────
        let db = init_database(&config.database.connection_config()).await?;

        info!("Running database migrations...");
        Migrator::up(&db, None).await?;
        info!("Migrations completed");

        if opts.seed {
            seed_if_empty(&db).await?;
        }

        // ── Repositories & Services ────────────────────────────
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let students = Arc::new(StudentService::new(
            repos.clone(),
            config.students.mutation_strategy,
            config.students.page_size,
        ));
        let statistics = Arc::new(SchoolStatisticsService::new(repos.clone()));
        info!(
            page_size = config.students.page_size.get(),
            strategy = config.students.mutation_strategy.as_str(),
            "Student service ready"
        );

        let shutdown = ShutdownSignal::new();

        // ── Metrics upkeep ─────────────────────────────────────
        let upkeep_handle = prometheus.clone();
        let upkeep_shutdown = shutdown.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(METRICS_UPKEEP_INTERVAL);
            loop {
                tokio::select! {
                    _ = ticker.tick() => upkeep_handle.run_upkeep(),
                    _ = upkeep_shutdown.wait() => break,
                }
            }
        });

        // ── HTTP server ────────────────────────────────────────
        let router = create_router(AppState {
            students,
            statistics,
            db: db.clone(),
            metrics: prometheus,
            started_at: Arc::new(Instant::now()),
        });

        let listener = tokio::net::TcpListener::bind(config.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("HTTP server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown.clone();
        let api_server = axum::serve(listener, router.into_make_service()).with_graceful_shutdown(
            async move {
                api_shutdown.wait().await;
                info!("🛑 HTTP server received shutdown signal");
            },
        );

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("HTTP server error: {}", e);
            }
        });

        info!("🚀 Server started.");

        Ok(Self {
            repos,
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        tokio::spawn(listen_for_shutdown_signals(self.shutdown.clone()));
    }

    /// Trigger graceful shutdown (non-blocking).
    pub fn trigger_shutdown(&self) {
        self.shutdown.trigger();
    }

    /// Block until shutdown has been triggered and in-flight requests have
    /// drained (bounded by `server.shutdown_timeout`), then close the pool.
    pub async fn wait(mut self) {
        tokio::select! {
            _ = self.shutdown.wait() => {
                info!("⏳ Draining in-flight requests...");
                let grace = Duration::from_secs(self.config.server.shutdown_timeout);
                match tokio::time::timeout(grace, &mut self.api_task).await {
                    Ok(Ok(())) => info!("HTTP server stopped"),
                    Ok(Err(e)) => error!("HTTP server task panicked: {}", e),
                    Err(_) => {
                        warn!("Requests still running after {:?}, aborting", grace);
                        self.api_task.abort();
                    }
                }
            }
            result = &mut self.api_task => {
                if let Err(e) = result {
                    error!("HTTP server task panicked: {}", e);
                }
                warn!("HTTP server exited without a shutdown signal");
                self.shutdown.trigger();
            }
        }

        if let Err(e) = self.db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("✅ Database connection closed");
        }

        info!("👋 Contoso University shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the HTTP server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

/// Initialize tracing (logging) from the application config.
///
/// `RUST_LOG` wins over `logging.level`. Call once at process startup.
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
