use crate::domain::booking::{BookingDraft, Field, FieldErrors};

use super::ValidationContext;

pub fn validate_contact(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.first_name.trim().is_empty() {
        errors.insert(Field::FirstName, "First name is required");
    }
    if draft.last_name.trim().is_empty() {
        errors.insert(Field::LastName, "Last name is required");
    }
    if draft.phone.is_empty() {
        errors.insert(Field::PhoneNumber, "Phone number is required");
    }
    if draft.preferred_area.is_none() {
        errors.insert(Field::PreferredArea, "Preferred area is required");
    }
    errors
}

pub fn validate_group_details(draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let (min, max) = (ctx.rules.group_size_min, ctx.rules.group_size_max);
    match draft.group_size {
        Some(size) if size > max => {
            errors.insert(Field::GroupSize, format!("Maximum {max} people allowed"));
        }
        Some(size) if size >= min => {}
        _ => errors.insert(Field::GroupSize, format!("Minimum {min} people required")),
    }
    errors
}

pub fn validate_date_time(draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    match draft.date {
        None => errors.insert(Field::Date, "Date is required"),
        Some(date) if date < ctx.min_date() => errors.insert(
            Field::Date,
            format!(
                "Please select a date at least {} days from today",
                ctx.rules.min_lead_days
            ),
        ),
        Some(_) => {}
    }
    match draft.start_time {
        None => errors.insert(Field::StartTime, "Start time is required"),
        Some(start) if !start.is_start_slot() => {
            errors.insert(Field::StartTime, "Please select a valid start time")
        }
        Some(_) => {}
    }
    match (draft.start_time, draft.end_time) {
        (_, None) => errors.insert(Field::EndTime, "End time is required"),
        (Some(start), Some(end)) if !start.end_slots().contains(&end) => {
            errors.insert(Field::EndTime, "Please select a valid end time")
        }
        _ => {}
    }
    errors
}

pub fn validate_budget(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.budget.is_none() {
        errors.insert(Field::Budget, "Budget selection is required");
    }
    errors
}

/// Add-ons and interests.
pub fn validate_preferences(draft: &BookingDraft, ctx: &ValidationContext) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.food_drink_options.is_empty() {
        errors.insert(
            Field::FoodDrink,
            "Please select at least one food/drink option (including 'No Thanks' if applicable)",
        );
    }
    for (option, selection) in draft.food_drink_options.iter() {
        if let (Some(amount), Some(min)) = (selection.amount, option.min_spend()) {
            if amount < min {
                errors.insert(
                    Field::FoodDrinkAmount(option),
                    format!("Minimum ${min} per person for {}", option.label()),
                );
            }
        }
    }
    if draft.interests.is_empty() {
        errors.insert(Field::Interests, "Please select at least one interest");
    } else if draft.interests.len() > ctx.rules.max_interests {
        errors.insert(
            Field::Interests,
            format!("You can select up to {} interests", ctx.rules.max_interests),
        );
    }
    errors
}

pub fn validate_consent(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if !draft.essential_comms {
        errors.insert(Field::EssentialComms, "You must agree to essential communications");
    }
    errors
}
