//! Checkout DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::application::{stepper, StepperItem, Summary, ValidationContext};
use crate::domain::booking::{BookingDraft, DraftUpdate, FieldErrors};
use crate::domain::checkout::{CheckoutSession, Confirmation, Layout, Phase, Step};

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    /// Overrides the configured layout for this session
    pub layout: Option<Layout>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDraftRequest {
    #[validate(length(min = 1, max = 64, message = "Between 1 and 64 updates per request"))]
    pub updates: Vec<DraftUpdate>,
}

/// Everything a client needs to render the current state of a checkout.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutView {
    pub id: Uuid,
    pub layout: Layout,
    pub step: Step,
    pub step_title: String,
    pub phase: Phase,
    pub stepper: Vec<StepperItem>,
    pub draft: Option<BookingDraft>,
    #[schema(value_type = Object)]
    pub errors: FieldErrors,
    pub focus: Option<String>,
    pub summary: Option<Summary>,
    pub min_date: NaiveDate,
    pub confirmation: Option<Confirmation>,
}

impl CheckoutView {
    pub fn from_session(session: CheckoutSession, ctx: &ValidationContext) -> Self {
        let summary = session.draft.as_ref().map(Summary::from_draft);
        let focus = session.errors.focus().map(|f| f.key());
        Self {
            id: session.id,
            layout: session.layout,
            step: session.step,
            step_title: session.step.title().to_string(),
            phase: session.phase,
            stepper: stepper(session.layout, session.step),
            draft: session.draft,
            errors: session.errors,
            focus,
            summary,
            min_date: ctx.min_date(),
            confirmation: session.confirmation,
        }
    }
}
