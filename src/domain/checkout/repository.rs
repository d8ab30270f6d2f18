//! Checkout session repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::session::CheckoutSession;
use crate::shared::errors::DomainResult;

/// In-place mutation of a stored session.
pub type SessionMutation<'a> = dyn FnMut(&mut CheckoutSession) -> DomainResult<()> + Send + 'a;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Save a new session
    async fn save(&self, session: CheckoutSession) -> DomainResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<CheckoutSession>>;

    /// Run `mutate` under the session's lock and return the resulting state.
    ///
    /// When `mutate` fails the changes it made up to that point are kept.
    async fn modify(&self, id: Uuid, mutate: &mut SessionMutation<'_>) -> DomainResult<CheckoutSession>;

    /// Remove a session, returning whether it existed
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Remove sessions not updated since `cutoff`, except those awaiting
    /// a payment result. Returns the removed ids.
    async fn delete_idle_since(&self, cutoff: DateTime<Utc>) -> DomainResult<Vec<Uuid>>;

    async fn count(&self) -> usize;
}
