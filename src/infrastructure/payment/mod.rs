mod simulated;

pub use simulated::{booking_reference, SimulatedPaymentGateway};
