//! Application services

mod checkout;
mod session_sweeper;

pub use checkout::{CheckoutService, CheckoutSettings};
pub use session_sweeper::{start_session_sweeper, sweep_idle_sessions};
