//! # Night Out Checkout
//!
//! Checkout service for concierge "night out" bookings: a guided survey,
//! card payment against a simulated gateway, and a booking confirmation.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Booking draft, catalog constants and the checkout session state machine
//! - **application**: Section validation, summary, stepper and the checkout service
//! - **infrastructure**: In-memory session store and simulated payment gateway
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Errors, formatting, clock and shutdown plumbing

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};

pub use application::CheckoutService;
