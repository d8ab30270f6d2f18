//! Reusable checkout server runtime.
//!
//! Provides [`ServerHandle`] that encapsulates the full server lifecycle:
//! metrics, in-memory session store, simulated payment gateway, REST API,
//! idle-session sweeper, and graceful shutdown.

use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{error, info, warn};

use crate::application::{start_session_sweeper, CheckoutService, PaymentGateway};
use crate::config::AppConfig;
use crate::domain::checkout::SessionRepository;
use crate::infrastructure::{InMemorySessionRepository, SimulatedPaymentGateway};
use crate::interfaces::http::modules::metrics::install_recorder;
use crate::interfaces::http::{create_api_router, AppState};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::shared::time::{SharedClock, SystemClock};

// ── Options ────────────────────────────────────────────────────────

/// Options for starting the checkout service.
#[derive(Default)]
pub struct ServerOptions {
    /// Application configuration.
    pub config: AppConfig,
    /// Override the system clock, mainly for demos pinned to a date.
    pub clock: Option<SharedClock>,
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running checkout service.
///
/// # Examples
///
/// ```rust,no_run
/// use night_out_checkout::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     // ... wait for shutdown signal ...
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    /// Checkout orchestration shared with the HTTP layer.
    pub service: Arc<CheckoutService>,
    /// The configuration the server was started with.
    pub config: AppConfig,
    /// Address the API is bound to.
    pub local_addr: std::net::SocketAddr,

    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
    sweeper_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    /// Start the checkout service with the given options.
    ///
    /// This will:
    /// 1. Install the Prometheus metrics recorder (once per process)
    /// 2. Build the session store, payment gateway and checkout service
    /// 3. Start the idle-session sweeper
    /// 4. Start the REST API server (with Swagger UI)
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting night-out checkout service...");

        let prometheus_handle = prometheus_handle();

        // ── Repositories & Services ────────────────────────────
        let sessions: Arc<dyn SessionRepository> = Arc::new(InMemorySessionRepository::new());
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(SimulatedPaymentGateway::new(app_cfg.checkout.payment_delay()));
        let clock = opts.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let settings = app_cfg.checkout.settings();

        let service = Arc::new(CheckoutService::new(
            sessions.clone(),
            gateway,
            clock.clone(),
            settings,
        ));
        info!(
            layout = %settings.layout,
            min_lead_days = settings.rules.min_lead_days,
            payment_delay_ms = app_cfg.checkout.payment_delay_ms,
            "Checkout service ready"
        );

        // ── Shutdown coordinator ───────────────────────────────
        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        // ── Background tasks ───────────────────────────────────
        let sweeper_task = start_session_sweeper(
            sessions,
            clock,
            shutdown_signal.clone(),
            app_cfg.checkout.session_ttl_secs,
            app_cfg.checkout.sweep_interval_secs,
        );

        // ── REST API server ────────────────────────────────────
        let api_router = create_api_router(AppState::new(service.clone()), prometheus_handle);

        let api_addr = app_cfg.server.address();
        let listener = tokio::net::TcpListener::bind(&api_addr).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Checkout service started.");

        Ok(Self {
            service,
            config: app_cfg,
            local_addr,
            shutdown,
            api_task,
            sweeper_task,
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

    /// Wait for the server to fully stop after shutdown has been triggered.
    ///
    /// In-flight requests get up to `server.shutdown_timeout` seconds.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let Self {
            shutdown,
            api_task,
            sweeper_task,
            ..
        } = self;

        let drained = shutdown
            .drain(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
                if let Err(e) = sweeper_task.await {
                    error!("Session sweeper task panicked: {}", e);
                }
            })
            .await;

        if !drained {
            warn!("Some server tasks did not stop in time");
        }

        info!("👋 Checkout service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("🛑 Shutting down checkout service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    /// Check if the server is still running.
    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so a restart
/// within the same process reuses the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::time::FixedClock;
    use chrono::NaiveDate;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.api_host = "127.0.0.1".to_string();
        config.server.api_port = 0;
        config.server.shutdown_timeout = 5;
        config
    }

    #[tokio::test]
    async fn starts_and_shuts_down_cleanly() {
        let clock: SharedClock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()));
        let handle = ServerHandle::start(ServerOptions {
            config: test_config(),
            clock: Some(clock),
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_ne!(handle.local_addr.port(), 0);

        let session = handle.service.create(None).await.unwrap();
        assert_eq!(handle.service.active_sessions().await, 1);
        assert!(handle.service.get(session.id).await.is_ok());

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn invalid_config_refuses_to_start() {
        let mut config = test_config();
        config.checkout.max_interests = 0;
        let result = ServerHandle::start(ServerOptions { config, clock: None }).await;
        assert!(result.is_err());
    }
}
