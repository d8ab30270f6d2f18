//! Payment port
//!
//! [`PaymentGateway`] decouples the checkout service from whoever settles
//! the charge. The only implementation in this crate is the simulated
//! gateway in `infrastructure::payment`.

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::errors::{DomainError, DomainResult};

/// Charge handed to the gateway. Card data is reduced to what a receipt shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub session_id: Uuid,
    /// Whole dollars
    pub amount: u32,
    pub cardholder: String,
    pub card_last4: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Approved { reference: String },
    Declined { reason: String },
}

impl PaymentOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved { .. } => "approved",
            Self::Declined { .. } => "declined",
        }
    }

    /// The booking reference, or `PaymentDeclined` with the gateway's reason.
    pub fn into_reference(self) -> DomainResult<String> {
        match self {
            Self::Approved { reference } => Ok(reference),
            Self::Declined { reason } => Err(DomainError::PaymentDeclined(reason)),
        }
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Settle `request`. Resolves once the gateway has an answer.
    async fn charge(&self, request: ChargeRequest) -> DomainResult<PaymentOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declined_outcome_becomes_payment_declined() {
        let outcome = PaymentOutcome::Declined {
            reason: "Insufficient funds".into(),
        };
        assert_eq!(outcome.as_str(), "declined");
        assert!(matches!(
            outcome.into_reference(),
            Err(DomainError::PaymentDeclined(reason)) if reason == "Insufficient funds"
        ));
        let approved = PaymentOutcome::Approved {
            reference: "NO-1234ABCD".into(),
        };
        assert_eq!(approved.into_reference().unwrap(), "NO-1234ABCD");
    }
}
