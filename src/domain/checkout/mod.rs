//! Checkout aggregate
//!
//! The session state machine wrapping a booking draft, and its repository interface.

pub mod repository;
pub mod session;
pub mod step;

pub use repository::{SessionMutation, SessionRepository};
pub use session::{CheckoutSession, Confirmation, PendingCharge};
pub use step::{Layout, Phase, Section, Step};
