//! Step progression
//!
//! A layout is an ordered list of steps ending in `Confirmed`. Each step owns
//! the form sections that must validate before the user may move past it.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::booking::FocusOrder;

/// Group of fields rendered and validated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Contact,
    GroupDetails,
    DateTime,
    Budget,
    Preferences,
    Consent,
    Payment,
}

impl Section {
    /// Every section the survey part of the form consists of.
    pub const SURVEY: [Section; 6] = [
        Section::Contact,
        Section::GroupDetails,
        Section::DateTime,
        Section::Budget,
        Section::Preferences,
        Section::Consent,
    ];
}

/// How the survey is split across steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// One section per step followed by a review.
    #[default]
    Wizard,
    /// Whole survey on one step.
    SinglePage,
}

impl Layout {
    pub fn steps(&self) -> &'static [Step] {
        match self {
            Self::Wizard => &[
                Step::Contact,
                Step::GroupDetails,
                Step::DateTime,
                Step::Budget,
                Step::Preferences,
                Step::Review,
                Step::Payment,
                Step::Confirmed,
            ],
            Self::SinglePage => &[Step::Survey, Step::Payment, Step::Confirmed],
        }
    }

    pub fn first(&self) -> Step {
        self.steps()[0]
    }

    pub fn focus_order(&self) -> FocusOrder {
        match self {
            Self::Wizard => FocusOrder::Steps,
            Self::SinglePage => FocusOrder::SinglePage,
        }
    }

    fn position(&self, step: Step) -> Option<usize> {
        self.steps().iter().position(|s| *s == step)
    }

    /// Step after `step`, if any.
    pub fn next(&self, step: Step) -> Option<Step> {
        let idx = self.position(step)?;
        self.steps().get(idx + 1).copied()
    }

    /// Step before `step`, if any.
    pub fn previous(&self, step: Step) -> Option<Step> {
        let idx = self.position(step)?;
        idx.checked_sub(1).map(|i| self.steps()[i])
    }

    /// 1-based position, as shown by the stepper.
    pub fn number(&self, step: Step) -> usize {
        self.position(step).map(|i| i + 1).unwrap_or(0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wizard => "wizard",
            Self::SinglePage => "single_page",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "wizard" => Some(Self::Wizard),
            "single_page" | "singlepage" => Some(Self::SinglePage),
            _ => None,
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Contact,
    GroupDetails,
    DateTime,
    Budget,
    Preferences,
    Review,
    Survey,
    Payment,
    Confirmed,
}

impl Step {
    /// Sections validated when leaving this step.
    pub fn sections(&self) -> &'static [Section] {
        match self {
            Self::Contact => &[Section::Contact],
            Self::GroupDetails => &[Section::GroupDetails],
            Self::DateTime => &[Section::DateTime],
            Self::Budget => &[Section::Budget],
            Self::Preferences => &[Section::Preferences],
            Self::Review | Self::Survey => &Section::SURVEY,
            Self::Payment => &[Section::Payment],
            Self::Confirmed => &[],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Contact => "Contact Information",
            Self::GroupDetails => "Group Details",
            Self::DateTime => "Date & Time",
            Self::Budget => "Budget",
            Self::Preferences => "Preferences",
            Self::Review => "Review",
            Self::Survey => "Plan Your Night",
            Self::Payment => "Payment",
            Self::Confirmed => "Confirmation",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::GroupDetails => "groupDetails",
            Self::DateTime => "dateTime",
            Self::Budget => "budget",
            Self::Preferences => "preferences",
            Self::Review => "review",
            Self::Survey => "survey",
            Self::Payment => "payment",
            Self::Confirmed => "confirmed",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the session stands relative to payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Editing,
    /// A charge is outstanding with the gateway.
    Processing,
    Confirmed,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Processing => "processing",
            Self::Confirmed => "confirmed",
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wizard_walks_forward_one_step_at_a_time() {
        let layout = Layout::Wizard;
        let mut step = layout.first();
        let mut seen = vec![step];
        while let Some(next) = layout.next(step) {
            seen.push(next);
            step = next;
        }
        assert_eq!(seen, layout.steps());
        assert_eq!(step, Step::Confirmed);
    }

    #[test]
    fn single_page_has_survey_then_payment() {
        let layout = Layout::SinglePage;
        assert_eq!(layout.first(), Step::Survey);
        assert_eq!(layout.next(Step::Survey), Some(Step::Payment));
        assert_eq!(layout.previous(Step::Survey), None);
        assert_eq!(layout.previous(Step::Payment), Some(Step::Survey));
    }

    #[test]
    fn steps_outside_layout_have_no_neighbours() {
        assert_eq!(Layout::SinglePage.next(Step::Budget), None);
        assert_eq!(Layout::Wizard.number(Step::Survey), 0);
        assert_eq!(Layout::Wizard.number(Step::Payment), 7);
    }

    #[test]
    fn review_and_survey_cover_whole_survey() {
        assert_eq!(Step::Review.sections(), &Section::SURVEY);
        assert_eq!(Step::Survey.sections(), &Section::SURVEY);
        assert!(!Step::Survey.sections().contains(&Section::Payment));
    }

    #[test]
    fn layout_parse_accepts_both_spellings() {
        assert_eq!(Layout::parse("single-page"), Some(Layout::SinglePage));
        assert_eq!(Layout::parse("Wizard"), Some(Layout::Wizard));
        assert_eq!(Layout::parse("tabs"), None);
    }
}
