//! Checkout session entity

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::step::{Layout, Phase, Step};
use crate::domain::booking::{BookingDraft, DraftUpdate, Field, FieldErrors, UpdateEffect};
use crate::shared::errors::{DomainError, DomainResult};

pub const CONFIRMATION_TITLE: &str = "Booking Confirmed!";
pub const CONFIRMATION_MESSAGE: &str = "Thank you for booking with Truvay! Our concierges are already \
working on creating your perfect night out. You'll receive an email with all the details shortly.";

/// Outcome shown once payment settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub reference: String,
    pub total: u32,
    pub title: String,
    pub message: String,
    pub confirmed_at: DateTime<Utc>,
}

/// What gets handed to the gateway when payment starts.
#[derive(Debug, Clone)]
pub struct PendingCharge {
    pub session_id: Uuid,
    pub amount: u32,
    pub cardholder: String,
    pub card_last4: String,
}

/// One user's progress through the checkout.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub id: Uuid,
    pub layout: Layout,
    pub step: Step,
    pub phase: Phase,
    /// Dropped once the booking is confirmed.
    pub draft: Option<BookingDraft>,
    pub errors: FieldErrors,
    /// Fields whose error came from refused input. The draft never holds the
    /// refused value, so re-validation alone cannot keep these errors alive.
    pub rejected: BTreeSet<Field>,
    pub confirmation: Option<Confirmation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CheckoutSession {
    pub fn new(layout: Layout, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            layout,
            step: layout.first(),
            phase: Phase::Editing,
            draft: Some(BookingDraft::default()),
            errors: FieldErrors::new().with_order(layout.focus_order()),
            rejected: BTreeSet::new(),
            confirmation: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.phase == Phase::Confirmed
    }

    /// Fail unless the session still accepts input.
    pub fn ensure_editable(&self) -> DomainResult<()> {
        match self.phase {
            Phase::Editing => Ok(()),
            Phase::Processing => Err(DomainError::Conflict(
                "Payment is being processed".to_string(),
            )),
            Phase::Confirmed => Err(DomainError::InvalidTransition(
                "Booking is already confirmed".to_string(),
            )),
        }
    }

    pub fn draft(&self) -> DomainResult<&BookingDraft> {
        self.draft
            .as_ref()
            .ok_or_else(|| DomainError::InvalidTransition("Booking is already confirmed".to_string()))
    }

    /// Apply one field update to the draft.
    ///
    /// Card details are only accepted on the payment step.
    pub fn apply(
        &mut self,
        update: DraftUpdate,
        max_interests: usize,
        now: DateTime<Utc>,
    ) -> DomainResult<UpdateEffect> {
        self.ensure_editable()?;
        if update.is_payment() && self.step != Step::Payment {
            return Err(DomainError::InvalidTransition(format!(
                "Card details are entered on the payment step, not {}",
                self.step
            )));
        }
        let draft = self
            .draft
            .as_mut()
            .ok_or_else(|| DomainError::InvalidTransition("Booking is already confirmed".to_string()))?;
        let effect = update.apply(draft, max_interests);
        self.updated_at = now;
        Ok(effect)
    }

    /// Refresh the stored errors after a batch of updates.
    ///
    /// Errors on touched fields clear. A remaining error survives while its
    /// field still fails `current` or its input is still refused. Input
    /// rejections are added last.
    pub fn reconcile_errors(&mut self, effects: &[UpdateEffect], current: &FieldErrors) {
        for effect in effects {
            for field in &effect.touched {
                self.errors.remove(*field);
                self.rejected.remove(field);
            }
        }
        let rejected = &self.rejected;
        self.errors
            .retain(|field| current.contains(field) || rejected.contains(&field));
        for effect in effects {
            for (field, message) in &effect.rejected {
                self.errors.insert(*field, message.clone());
                self.rejected.insert(*field);
            }
        }
        self.rejected.retain(|field| self.errors.contains(*field));
    }

    fn store_errors(&mut self, errors: FieldErrors) -> FieldErrors {
        let errors = errors.with_order(self.layout.focus_order());
        self.errors = errors.clone();
        self.rejected.clear();
        errors
    }

    fn clear_errors(&mut self) {
        self.errors.clear();
        self.rejected.clear();
    }

    /// Leave the current step. `errors` is the validation result for its sections.
    pub fn advance(&mut self, errors: FieldErrors, now: DateTime<Utc>) -> DomainResult<Step> {
        self.ensure_editable()?;
        if self.step == Step::Payment {
            return Err(DomainError::InvalidTransition(
                "Submit payment to complete the booking".to_string(),
            ));
        }
        self.updated_at = now;
        if !errors.is_empty() {
            let errors = self.store_errors(errors);
            return Err(DomainError::Validation(errors));
        }
        let next = self.layout.next(self.step).ok_or_else(|| {
            DomainError::InvalidTransition(format!("No step after {}", self.step))
        })?;
        self.clear_errors();
        self.step = next;
        Ok(next)
    }

    /// Go back one step. Never validates.
    pub fn back(&mut self, now: DateTime<Utc>) -> DomainResult<Step> {
        self.ensure_editable()?;
        let previous = self.layout.previous(self.step).ok_or_else(|| {
            DomainError::InvalidTransition(format!("{} is the first step", self.step))
        })?;
        self.step = previous;
        self.clear_errors();
        self.updated_at = now;
        Ok(previous)
    }

    /// Enter `Processing`. `errors` is the validation result for the payment slice.
    pub fn begin_payment(&mut self, errors: FieldErrors, now: DateTime<Utc>) -> DomainResult<PendingCharge> {
        self.ensure_editable()?;
        if self.step != Step::Payment {
            return Err(DomainError::InvalidTransition(format!(
                "Payment cannot be submitted from {}",
                self.step
            )));
        }
        self.updated_at = now;
        if !errors.is_empty() {
            let errors = self.store_errors(errors);
            return Err(DomainError::Validation(errors));
        }
        let draft = self.draft()?;
        let charge = PendingCharge {
            session_id: self.id,
            amount: draft.total_price(),
            cardholder: draft.card.card_name.trim().to_string(),
            card_last4: draft.card.last4(),
        };
        self.clear_errors();
        self.phase = Phase::Processing;
        Ok(charge)
    }

    /// Payment went through: the draft is discarded.
    pub fn confirm(&mut self, reference: String, now: DateTime<Utc>) -> DomainResult<&Confirmation> {
        if self.phase != Phase::Processing {
            return Err(DomainError::InvalidTransition(format!(
                "Cannot confirm a session that is {}",
                self.phase.as_str()
            )));
        }
        let total = self.draft()?.total_price();
        self.draft = None;
        self.clear_errors();
        self.phase = Phase::Confirmed;
        self.step = Step::Confirmed;
        self.updated_at = now;
        Ok(self.confirmation.insert(Confirmation {
            reference,
            total,
            title: CONFIRMATION_TITLE.to_string(),
            message: CONFIRMATION_MESSAGE.to_string(),
            confirmed_at: now,
        }))
    }

    /// Payment was refused: back to editing card details.
    pub fn decline(&mut self, reason: &str, now: DateTime<Utc>) -> DomainResult<()> {
        if self.phase != Phase::Processing {
            return Err(DomainError::InvalidTransition(format!(
                "Cannot decline a session that is {}",
                self.phase.as_str()
            )));
        }
        self.phase = Phase::Editing;
        self.errors.insert(Field::CardNumber, reason);
        self.rejected.insert(Field::CardNumber);
        self.updated_at = now;
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────
