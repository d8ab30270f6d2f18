//! Form validation
//!
//! One pure function per section. Each returns the messages for the fields
//! it owns; callers merge them into a single form-ordered map.

mod payment;
mod survey;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::booking::{BookingDraft, FieldErrors};
use crate::domain::checkout::Section;

pub use payment::validate_payment;
pub use survey::{
    validate_budget, validate_consent, validate_contact, validate_date_time, validate_group_details,
    validate_preferences,
};

/// Tunable limits of the booking rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutRules {
    pub min_lead_days: u32,
    pub group_size_min: u8,
    pub group_size_max: u8,
    pub max_interests: usize,
}

impl Default for CheckoutRules {
    fn default() -> Self {
        Self {
            min_lead_days: 4,
            group_size_min: 2,
            group_size_max: 8,
            max_interests: 4,
        }
    }
}

impl CheckoutRules {
    /// Earliest date that can be booked when today is `today`.
    pub fn min_date(&self, today: NaiveDate) -> NaiveDate {
        today
            .checked_add_days(Days::new(u64::from(self.min_lead_days)))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Everything validation depends on besides the draft.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext {
    pub today: NaiveDate,
    pub rules: CheckoutRules,
}

impl ValidationContext {
    pub fn new(today: NaiveDate, rules: CheckoutRules) -> Self {
        Self { today, rules }
    }

    pub fn min_date(&self) -> NaiveDate {
        self.rules.min_date(self.today)
    }
}

pub fn validate_section(section: Section, draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    match section {
        Section::Contact => validate_contact(draft),
        Section::GroupDetails => validate_group_details(draft, ctx),
        Section::DateTime => validate_date_time(draft, ctx),
        Section::Budget => validate_budget(draft),
        Section::Preferences => validate_preferences(draft, ctx),
        Section::Consent => validate_consent(draft),
        Section::Payment => validate_payment(draft),
    }
}

pub fn validate_sections(sections: &[Section], draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for section in sections {
        errors.merge(validate_section(*section, draft, ctx));
    }
    errors
}

/// Every check the form knows about, survey and payment alike.
pub fn validate_all(draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = validate_sections(&Section::SURVEY, draft, ctx);
    errors.merge(validate_payment(draft));
    errors
}
