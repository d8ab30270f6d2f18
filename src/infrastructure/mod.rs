//! Infrastructure layer - external concerns

pub mod payment;
pub mod storage;

pub use payment::SimulatedPaymentGateway;
pub use storage::InMemorySessionRepository;
