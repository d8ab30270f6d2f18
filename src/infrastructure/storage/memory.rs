//! In-memory session storage
//!
//! Sessions are process-local and gone after a restart. Each DashMap entry
//! doubles as the per-session lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use crate::domain::checkout::{CheckoutSession, Phase, SessionMutation, SessionRepository};
use crate::shared::errors::{DomainError, DomainResult};

pub struct InMemorySessionRepository {
    sessions: DashMap<Uuid, CheckoutSession>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save(&self, session: CheckoutSession) -> DomainResult<()> {
        if self.sessions.contains_key(&session.id) {
            return Err(DomainError::Conflict(format!(
                "Session {} already exists",
                session.id
            )));
        }
        self.sessions.insert(session.id, session);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CheckoutSession>> {
        Ok(self.sessions.get(&id).map(|s| s.clone()))
    }

    async fn modify(&self, id: Uuid, mutate: &mut SessionMutation<'_>) -> DomainResult<CheckoutSession> {
        let mut entry = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| DomainError::session_not_found(id))?;
        mutate(entry.value_mut())?;
        Ok(entry.value().clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        Ok(self.sessions.remove(&id).is_some())
    }

    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Uuid>> {
        let sweepable = |s: &CheckoutSession| s.updated_at < cutoff && s.phase != Phase::Processing;
        let idle: Vec<Uuid> = self
            .sessions
            .iter()
            .filter(|s| sweepable(s.value()))
            .map(|s| s.id)
            .collect();
        Ok(idle
            .into_iter()
            .filter(|id| self.sessions.remove_if(id, |_, s| sweepable(s)).is_some())
            .collect())
    }

    async fn count(&self) -> usize {
        self.sessions.len()
    }
}
