//! The booking draft: everything the user has entered before submission.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{Area, BudgetTier, FoodDrinkOption, Interest, Occasion, TimeSlot};
use super::phone::PhoneNumber;

/// Spend the user is willing to put toward one add-on, per person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddOnSelection {
    pub amount: Option<u32>,
}

/// Rejected spend entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotAWholeNumber;

/// Selected food/drink add-ons.
///
/// `None` ("No Thanks") and the real options never coexist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddOns(BTreeMap<FoodDrinkOption, AddOnSelection>);

impl AddOns {
    pub fn select(&mut self, option: FoodDrinkOption) {
        if option.is_none() {
            self.0.clear();
        } else {
            self.0.remove(&FoodDrinkOption::None);
        }
        self.0.entry(option).or_default();
    }

    pub fn deselect(&mut self, option: FoodDrinkOption) {
        self.0.remove(&option);
    }

    pub fn toggle(&mut self, option: FoodDrinkOption, selected: bool) {
        if selected {
            self.select(option)
        } else {
            self.deselect(option)
        }
    }

    /// Store a whole-dollar amount typed for `option`. An empty entry clears
    /// the amount. Entries for unselected options are ignored.
    pub fn set_amount(&mut self, option: FoodDrinkOption, raw: &str) -> Result<(), NotAWholeNumber> {
        let Some(selection) = self.0.get_mut(&option) else {
            return Ok(());
        };
        if option.is_none() {
            return Ok(());
        }
        let raw = raw.trim();
        if raw.is_empty() {
            selection.amount = None;
            return Ok(());
        }
        match raw.parse::<u32>() {
            Ok(amount) if amount > 0 => {
                selection.amount = Some(amount);
                Ok(())
            }
            _ => Err(NotAWholeNumber),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, option: FoodDrinkOption) -> bool {
        self.0.contains_key(&option)
    }

    pub fn declined(&self) -> bool {
        self.contains(FoodDrinkOption::None)
    }

    pub fn get(&self, option: FoodDrinkOption) -> Option<&AddOnSelection> {
        self.0.get(&option)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodDrinkOption, &AddOnSelection)> {
        self.0.iter().map(|(k, v)| (*k, v))
    }
}

/// Card fields as typed, already passed through the keystroke formatters.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub card_number: String,
    pub card_name: String,
    pub expiry: String,
    /// Accepted on input, never echoed back.
    #[serde(skip_serializing, default)]
    pub cvc: String,
}

impl CardDetails {
    /// Last four digits, for receipts and logs.
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &format_args!("**** {}", self.last4()))
            .field("card_name", &self.card_name)
            .field("expiry", &self.expiry)
            .field("cvc", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDraft {
    // Contact
    pub first_name: String,
    pub last_name: String,
    pub phone: PhoneNumber,
    pub preferred_area: Option<Area>,

    // Party
    pub group_size: Option<u8>,
    pub group_composition: String,
    pub special_occasion: Occasion,
    pub special_occasion_other: String,

    // Scheduling
    pub date: Option<NaiveDate>,
    pub start_time: Option<TimeSlot>,
    pub end_time: Option<TimeSlot>,

    // Budget & add-ons
    pub budget: Option<BudgetTier>,
    #[schema(value_type = Object)]
    pub food_drink_options: AddOns,

    // Preferences
    pub interests: Vec<Interest>,
    pub interests_other: String,
    pub exclusions: String,

    // Consent
    pub essential_comms: bool,
    pub marketing_comms: bool,

    pub card: CardDetails,
}

impl BookingDraft {
    /// Per-person tier times group size, in whole dollars. Add-on spend is
    /// settled at the venues and never part of this total.
    pub fn total_price(&self) -> u32 {
        match (self.budget, self.group_size) {
            (Some(tier), Some(size)) => tier.per_person() * u32::from(size),
            _ => 0,
        }
    }

    pub fn has_interest(&self, interest: Interest) -> bool {
        self.interests.contains(&interest)
    }

    /// Add or remove an interest. Adding beyond `max` leaves the list as is
    /// and returns `false`.
    pub fn toggle_interest(&mut self, interest: Interest, selected: bool, max: usize) -> bool {
        if !selected {
            self.interests.retain(|i| *i != interest);
            return true;
        }
        if self.has_interest(interest) {
            return true;
        }
        if self.interests.len() >= max {
            return false;
        }
        self.interests.push(interest);
        true
    }

    /// Picking a new start invalidates the end-time domain.
    pub fn set_start_time(&mut self, start: TimeSlot) {
        if self.start_time != Some(start) {
            self.end_time = None;
        }
        self.start_time = Some(start);
    }
}
