//! Catalog DTOs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::CheckoutSettings;
use crate::domain::booking::{
    Area, BudgetTier, Country, FoodDrinkOption, Interest, Occasion, TimeSlot, START_SLOTS,
};
use crate::domain::checkout::Layout;

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionDto {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTierDto {
    pub value: BudgetTier,
    pub per_person: u32,
    pub description: String,
    pub popular: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FoodDrinkOptionDto {
    pub value: FoodDrinkOption,
    pub label: String,
    /// Per person, whole dollars; absent for "No Thanks"
    pub min_spend: Option<u32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InterestDto {
    pub value: Interest,
    pub label: String,
    pub short_label: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CountryDto {
    pub code: String,
    pub name: String,
    pub dial_code: String,
}

impl From<Country> for CountryDto {
    fn from(c: Country) -> Self {
        Self {
            code: c.code().to_string(),
            name: c.name().to_string(),
            dial_code: c.dial_code().to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GroupSizeRange {
    pub min: u8,
    pub max: u8,
}

/// Every option list the form offers, plus the limits currently in force.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDto {
    pub layout: Layout,
    pub areas: Vec<OptionDto>,
    pub start_times: Vec<TimeSlot>,
    /// End slots keyed by start slot
    pub end_times: BTreeMap<String, Vec<TimeSlot>>,
    pub budget_tiers: Vec<BudgetTierDto>,
    pub food_drink_options: Vec<FoodDrinkOptionDto>,
    pub interests: Vec<InterestDto>,
    pub max_interests: usize,
    pub occasions: Vec<OptionDto>,
    pub countries: Vec<CountryDto>,
    pub group_size: GroupSizeRange,
    pub min_date: NaiveDate,
}

impl CatalogDto {
    pub fn build(settings: CheckoutSettings, min_date: NaiveDate, country_query: Option<&str>) -> Self {
        let countries = match country_query {
            Some(q) => Country::search(q),
            None => Country::ALL.to_vec(),
        };
        Self {
            layout: settings.layout,
            areas: Area::ALL
                .iter()
                .map(|a| OptionDto {
                    value: a.as_str().to_string(),
                    label: a.label().to_string(),
                })
                .collect(),
            start_times: START_SLOTS.to_vec(),
            end_times: START_SLOTS
                .iter()
                .map(|s| (s.as_str().to_string(), s.end_slots().to_vec()))
                .collect(),
            budget_tiers: BudgetTier::ALL
                .iter()
                .map(|t| BudgetTierDto {
                    value: *t,
                    per_person: t.per_person(),
                    description: t.description().to_string(),
                    popular: t.is_popular(),
                })
                .collect(),
            food_drink_options: FoodDrinkOption::ALL
                .iter()
                .map(|o| FoodDrinkOptionDto {
                    value: *o,
                    label: o.label().to_string(),
                    min_spend: o.min_spend(),
                })
                .collect(),
            interests: Interest::ALL
                .iter()
                .map(|i| InterestDto {
                    value: *i,
                    label: i.label().to_string(),
                    short_label: i.short_label().to_string(),
                })
                .collect(),
            max_interests: settings.rules.max_interests,
            occasions: Occasion::ALL
                .iter()
                .map(|o| OptionDto {
                    value: o.as_str().to_string(),
                    label: o.label().to_string(),
                })
                .collect(),
            countries: countries.into_iter().map(CountryDto::from).collect(),
            group_size: GroupSizeRange {
                min: settings.rules.group_size_min,
                max: settings.rules.group_size_max,
            },
            min_date,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Case-insensitive filter on country name
    pub country: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EndTimesQuery {
    /// Start slot, e.g. `6:00 PM`
    pub start: String,
}
