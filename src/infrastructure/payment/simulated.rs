//! Simulated payment gateway
//!
//! Waits a fixed delay and approves every charge. No card network is contacted.

use std::time::Duration;

use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::debug;

use crate::application::ports::{ChargeRequest, PaymentGateway, PaymentOutcome};
use crate::shared::errors::DomainResult;

const REFERENCE_PREFIX: &str = "NO";
const REFERENCE_LEN: usize = 8;

pub struct SimulatedPaymentGateway {
    delay: Duration,
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// `NO-` followed by eight uppercase alphanumerics.
pub fn booking_reference() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(REFERENCE_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{REFERENCE_PREFIX}-{suffix}")
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: ChargeRequest) -> DomainResult<PaymentOutcome> {
        debug!(
            session_id = %request.session_id,
            amount = request.amount,
            card = %format!("**** {}", request.card_last4),
            delay_ms = self.delay.as_millis() as u64,
            "Simulating payment"
        );
        tokio::time::sleep(self.delay).await;
        Ok(PaymentOutcome::Approved {
            reference: booking_reference(),
        })
    }
}
