pub mod ports;
pub mod services;
pub mod stepper;
pub mod summary;
pub mod validation;

// Re-export key types for convenience
pub use ports::{ChargeRequest, PaymentGateway, PaymentOutcome};
pub use services::{start_session_sweeper, CheckoutService, CheckoutSettings};
pub use stepper::{stepper, StepStatus, StepperItem};
pub use summary::Summary;
pub use validation::{CheckoutRules, ValidationContext};
