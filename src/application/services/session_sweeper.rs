//! Background task that drops abandoned checkout sessions.
//!
//! Runs in a tokio::spawn loop and removes sessions that have not been
//! touched for longer than the configured TTL. Sessions waiting on the
//! payment gateway are left alone.

use std::sync::Arc;

use tokio::time::Duration;
use tracing::{info, warn};

use crate::domain::checkout::SessionRepository;
use crate::shared::errors::DomainResult;
use crate::shared::shutdown::ShutdownSignal;
use crate::shared::time::SharedClock;

/// Start the idle-session sweeper.
pub fn start_session_sweeper(
    sessions: Arc<dyn SessionRepository>,
    clock: SharedClock,
    shutdown: ShutdownSignal,
    ttl_secs: u64,
    check_interval_secs: u64,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!(ttl = ttl_secs, check_interval = check_interval_secs, "🧹 Session sweeper started");

        let mut interval = tokio::time::interval(Duration::from_secs(check_interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = sweep_idle_sessions(&sessions, &clock, ttl_secs).await {
                        warn!(error = %e, "Session sweep error");
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("🧹 Session sweeper shutting down");
                    break;
                }
            }
        }

        info!("🧹 Session sweeper stopped");
    })
}

/// Remove sessions idle for more than `ttl_secs`. Returns how many went.
pub async fn sweep_idle_sessions(
    sessions: &Arc<dyn SessionRepository>,
    clock: &SharedClock,
    ttl_secs: u64,
) -> DomainResult<usize> {
    let ttl = chrono::Duration::seconds(i64::try_from(ttl_secs).unwrap_or(i64::MAX / 1000));
    let cutoff = clock.now() - ttl;
    let removed = sessions.delete_idle_since(cutoff).await?;

    if !removed.is_empty() {
        info!(count = removed.len(), "Removed idle checkout sessions");
    }
    Ok(removed.len())
}
