mod payment;

pub use payment::{ChargeRequest, PaymentGateway, PaymentOutcome};
