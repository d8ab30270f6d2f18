//! Display values derived from a draft. Recomputed on every read.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::booking::{BookingDraft, Interest, Occasion};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub name: String,
    pub phone: String,
    pub area: Option<String>,
    pub group_size: Option<u8>,
    pub occasion: Option<String>,
    pub date: Option<String>,
    pub time_range: Option<String>,
    pub per_person: Option<u32>,
    pub budget_tier: Option<String>,
    pub total: u32,
    pub interests: Vec<String>,
    pub add_ons: Vec<String>,
}

impl Summary {
    pub fn from_draft(draft: &BookingDraft) -> Self {
        let name = format!("{} {}", draft.first_name.trim(), draft.last_name.trim())
            .trim()
            .to_string();
        let phone = if draft.phone.is_empty() {
            String::new()
        } else {
            draft.phone.display()
        };
        let occasion = match draft.special_occasion {
            Occasion::None => None,
            Occasion::Other if !draft.special_occasion_other.trim().is_empty() => {
                Some(draft.special_occasion_other.trim().to_string())
            }
            other => Some(other.label().to_string()),
        };

        Self {
            name,
            phone,
            area: draft.preferred_area.map(|a| a.label().to_string()),
            group_size: draft.group_size,
            occasion,
            date: draft.date.map(format_long_date),
            time_range: match (draft.start_time, draft.end_time) {
                (Some(start), Some(end)) => Some(format!("{start} - {end}")),
                _ => None,
            },
            per_person: draft.budget.map(|t| t.per_person()),
            budget_tier: draft.budget.map(|t| t.description().to_string()),
            total: draft.total_price(),
            interests: interest_labels(draft),
            add_ons: add_on_labels(draft),
        }
    }
}

fn interest_labels(draft: &BookingDraft) -> Vec<String> {
    draft
        .interests
        .iter()
        .map(|interest| match interest {
            Interest::Other if !draft.interests_other.trim().is_empty() => {
                format!("Other: {}", draft.interests_other.trim())
            }
            other => other.short_label().to_string(),
        })
        .collect()
}

fn add_on_labels(draft: &BookingDraft) -> Vec<String> {
    let labels: Vec<String> = draft
        .food_drink_options
        .iter()
        .filter(|(option, _)| !option.is_none())
        .map(|(option, selection)| match selection.amount {
            Some(amount) => format!("{} (${amount}/person)", option.label()),
            None => option.label().to_string(),
        })
        .collect();
    if labels.is_empty() {
        vec!["None selected".to_string()]
    } else {
        labels
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `October 20th, 2026`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{} {}{}, {}",
        date.format("%B"),
        date.day(),
        ordinal_suffix(date.day()),
        date.year()
    )
}
