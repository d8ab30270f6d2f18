pub mod booking;
pub mod checkout;

// Re-export commonly used types
pub use booking::{BookingDraft, DraftUpdate, Field, FieldErrors};
pub use checkout::{CheckoutSession, Layout, Phase, Section, SessionRepository, Step};

pub use crate::shared::errors::{DomainError, DomainResult};
