pub mod catalog;
pub mod checkout;
pub mod health;
pub mod metrics;
pub mod request_id;
