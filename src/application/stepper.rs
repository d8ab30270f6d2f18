//! Progress indicator derived from the current step.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::checkout::{Layout, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum StepStatus {
    Complete,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StepperItem {
    pub number: usize,
    pub step: Step,
    pub title: String,
    pub status: StepStatus,
}

/// One entry per step of the layout, `Confirmed` excluded.
pub fn stepper(layout: Layout, current: Step) -> Vec<StepperItem> {
    let current_number = layout.number(current);
    layout
        .steps()
        .iter()
        .filter(|s| **s != Step::Confirmed)
        .enumerate()
        .map(|(idx, step)| {
            let number = idx + 1;
            let status = if number < current_number {
                StepStatus::Complete
            } else if number == current_number {
                StepStatus::Current
            } else {
                StepStatus::Upcoming
            };
            StepperItem {
                number,
                step: *step,
                title: step.title().to_string(),
                status,
            }
        })
        .collect()
}
