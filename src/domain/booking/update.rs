//! Field-level mutations of a draft.
//!
//! One `DraftUpdate` corresponds to one user interaction. Applying it runs
//! the keystroke formatters, maintains the draft invariants, and reports
//! which fields it touched so their errors can be cleared.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::{Area, BudgetTier, Country, FoodDrinkOption, Interest, Occasion, TimeSlot};
use super::draft::BookingDraft;
use super::field::Field;
use crate::shared::formatting::{format_card_number, format_cvc, format_expiry};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum DraftUpdate {
    FirstName(String),
    LastName(String),
    PhoneCountry(Country),
    PhoneNumber(String),
    PreferredArea(Area),
    GroupSize(Option<u8>),
    GroupComposition(String),
    SpecialOccasion(Occasion),
    SpecialOccasionOther(String),
    Date(Option<NaiveDate>),
    StartTime(TimeSlot),
    EndTime(TimeSlot),
    Budget(BudgetTier),
    FoodDrink {
        option: FoodDrinkOption,
        selected: bool,
    },
    FoodDrinkAmount {
        option: FoodDrinkOption,
        amount: String,
    },
    Interest {
        interest: Interest,
        selected: bool,
    },
    InterestsOther(String),
    Exclusions(String),
    EssentialComms(bool),
    MarketingComms(bool),
    CardNumber(String),
    CardName(String),
    Expiry(String),
    Cvc(String),
}

/// Outcome of one update: the fields whose errors should clear, and errors
/// raised by the input itself (rejected keystrokes, limits).
#[derive(Debug, Default, PartialEq, Eq)]
pub struct UpdateEffect {
    pub touched: Vec<Field>,
    pub rejected: Vec<(Field, String)>,
}

impl UpdateEffect {
    fn touched(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            touched: fields.into_iter().collect(),
            rejected: Vec::new(),
        }
    }

    fn rejected(field: Field, message: impl Into<String>) -> Self {
        Self {
            touched: Vec::new(),
            rejected: vec![(field, message.into())],
        }
    }
}

impl DraftUpdate {
    /// Apply to `draft`. `max_interests` caps the interest selection.
    pub fn apply(self, draft: &mut BookingDraft, max_interests: usize) -> UpdateEffect {
        match self {
            Self::FirstName(v) => {
                draft.first_name = v;
                UpdateEffect::touched([Field::FirstName])
            }
            Self::LastName(v) => {
                draft.last_name = v;
                UpdateEffect::touched([Field::LastName])
            }
            Self::PhoneCountry(country) => {
                draft.phone.set_country(country);
                UpdateEffect::touched([])
            }
            Self::PhoneNumber(raw) => {
                draft.phone.set_local(&raw);
                UpdateEffect::touched([Field::PhoneNumber])
            }
            Self::PreferredArea(area) => {
                draft.preferred_area = Some(area);
                UpdateEffect::touched([Field::PreferredArea])
            }
            Self::GroupSize(size) => {
                draft.group_size = size;
                UpdateEffect::touched([Field::GroupSize])
            }
            Self::GroupComposition(v) => {
                draft.group_composition = v;
                UpdateEffect::default()
            }
            Self::SpecialOccasion(occasion) => {
                draft.special_occasion = occasion;
                if occasion != Occasion::Other {
                    draft.special_occasion_other.clear();
                }
                UpdateEffect::default()
            }
            Self::SpecialOccasionOther(v) => {
                draft.special_occasion_other = v;
                UpdateEffect::default()
            }
            Self::Date(date) => {
                draft.date = date;
                UpdateEffect::touched([Field::Date])
            }
            Self::StartTime(slot) => {
                if !slot.is_start_slot() {
                    return UpdateEffect::rejected(
                        Field::StartTime,
                        format!("{slot} is not an available start time"),
                    );
                }
                draft.set_start_time(slot);
                UpdateEffect::touched([Field::StartTime, Field::EndTime])
            }
            Self::EndTime(slot) => {
                let Some(start) = draft.start_time else {
                    return UpdateEffect::rejected(Field::EndTime, "Select start time first");
                };
                if !start.end_slots().contains(&slot) {
                    return UpdateEffect::rejected(
                        Field::EndTime,
                        format!("{slot} is not available for a {start} start"),
                    );
                }
                draft.end_time = Some(slot);
                UpdateEffect::touched([Field::EndTime])
            }
            Self::Budget(tier) => {
                draft.budget = Some(tier);
                UpdateEffect::touched([Field::Budget])
            }
            Self::FoodDrink { option, selected } => {
                draft.food_drink_options.toggle(option, selected);
                // Any amount error belongs to an option that may just have gone away.
                let cleared = FoodDrinkOption::ALL
                    .iter()
                    .filter(|o| !draft.food_drink_options.contains(**o))
                    .map(|o| Field::FoodDrinkAmount(*o));
                let mut effect = UpdateEffect::touched(cleared);
                if !draft.food_drink_options.is_empty() {
                    effect.touched.push(Field::FoodDrink);
                }
                effect
            }
            Self::FoodDrinkAmount { option, amount } => {
                let field = Field::FoodDrinkAmount(option);
                match draft.food_drink_options.set_amount(option, &amount) {
                    Ok(()) => UpdateEffect::touched([field]),
                    Err(_) => UpdateEffect::rejected(field, "Whole number required"),
                }
            }
            Self::Interest { interest, selected } => {
                if draft.toggle_interest(interest, selected, max_interests) {
                    if interest == Interest::Other && !selected {
                        draft.interests_other.clear();
                    }
                    if draft.interests.is_empty() {
                        UpdateEffect::default()
                    } else {
                        UpdateEffect::touched([Field::Interests])
                    }
                } else {
                    UpdateEffect::rejected(
                        Field::Interests,
                        format!("You can select up to {max_interests} interests"),
                    )
                }
            }
            Self::InterestsOther(v) => {
                draft.interests_other = v;
                UpdateEffect::default()
            }
            Self::Exclusions(v) => {
                draft.exclusions = v;
                UpdateEffect::default()
            }
            Self::EssentialComms(v) => {
                draft.essential_comms = v;
                UpdateEffect::touched([Field::EssentialComms])
            }
            Self::MarketingComms(v) => {
                draft.marketing_comms = v;
                UpdateEffect::default()
            }
            Self::CardNumber(raw) => {
                draft.card.card_number = format_card_number(&raw);
                UpdateEffect::touched([Field::CardNumber])
            }
            Self::CardName(v) => {
                draft.card.card_name = v;
                UpdateEffect::touched([Field::CardName])
            }
            Self::Expiry(raw) => {
                draft.card.expiry = format_expiry(&raw);
                UpdateEffect::touched([Field::Expiry])
            }
            Self::Cvc(raw) => {
                draft.card.cvc = format_cvc(&raw);
                UpdateEffect::touched([Field::Cvc])
            }
        }
    }

    /// Whether this update edits card details rather than the survey.
    pub fn is_payment(&self) -> bool {
        matches!(
            self,
            Self::CardNumber(_) | Self::CardName(_) | Self::Expiry(_) | Self::Cvc(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(draft: &mut BookingDraft, update: DraftUpdate) -> UpdateEffect {
        update.apply(draft, 4)
    }

    #[test]
    fn deserializes_tagged_updates() {
        let update: DraftUpdate =
            serde_json::from_str(r#"{"field":"foodDrink","value":{"option":"none","selected":true}}"#)
                .unwrap();
        assert_eq!(
            update,
            DraftUpdate::FoodDrink {
                option: FoodDrinkOption::None,
                selected: true
            }
        );
        let update: DraftUpdate =
            serde_json::from_str(r#"{"field":"startTime","value":"6:00 PM"}"#).unwrap();
        assert_eq!(update, DraftUpdate::StartTime(TimeSlot::SixPm));
        let update: DraftUpdate =
            serde_json::from_str(r#"{"field":"groupSize","value":null}"#).unwrap();
        assert_eq!(update, DraftUpdate::GroupSize(None));
    }

    #[test]
    fn serializes_with_the_same_tagging() {
        let json = serde_json::to_value(DraftUpdate::GroupSize(Some(4))).unwrap();
        assert_eq!(json, serde_json::json!({"field": "groupSize", "value": 4}));
        let json = serde_json::to_value(DraftUpdate::FoodDrinkAmount {
            option: FoodDrinkOption::Dinner,
            amount: "50".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"field": "foodDrinkAmount", "value": {"option": "dinner", "amount": "50"}})
        );
    }

    #[test]
    fn card_fields_are_formatted_on_entry() {
        let mut draft = BookingDraft::default();
        apply(&mut draft, DraftUpdate::CardNumber("4242424242424242".into()));
        apply(&mut draft, DraftUpdate::Expiry("1228".into()));
        apply(&mut draft, DraftUpdate::Cvc("12x3".into()));
        assert_eq!(draft.card.card_number, "4242 4242 4242 4242");
        assert_eq!(draft.card.expiry, "12/28");
        assert_eq!(draft.card.cvc, "123");
    }

    #[test]
    fn end_time_outside_lookup_is_rejected() {
        let mut draft = BookingDraft::default();
        let effect = apply(&mut draft, DraftUpdate::EndTime(TimeSlot::TenPm));
        assert_eq!(effect.rejected[0].0, Field::EndTime);

        apply(&mut draft, DraftUpdate::StartTime(TimeSlot::EightPm));
        let effect = apply(&mut draft, DraftUpdate::EndTime(TimeSlot::NinePm));
        assert_eq!(effect.rejected.len(), 1);
        assert_eq!(draft.end_time, None);

        let effect = apply(&mut draft, DraftUpdate::EndTime(TimeSlot::Midnight));
        assert!(effect.rejected.is_empty());
        assert_eq!(draft.end_time, Some(TimeSlot::Midnight));
    }

    #[test]
    fn late_start_slot_is_rejected() {
        let mut draft = BookingDraft::default();
        let effect = apply(&mut draft, DraftUpdate::StartTime(TimeSlot::TenPm));
        assert_eq!(effect.rejected[0].0, Field::StartTime);
        assert_eq!(draft.start_time, None);
    }

    #[test]
    fn fifth_interest_is_refused_with_error() {
        let mut draft = BookingDraft::default();
        for interest in &Interest::ALL[..4] {
            let effect = apply(
                &mut draft,
                DraftUpdate::Interest {
                    interest: *interest,
                    selected: true,
                },
            );
            assert!(effect.rejected.is_empty());
        }
        let effect = apply(
            &mut draft,
            DraftUpdate::Interest {
                interest: Interest::Nightlife,
                selected: true,
            },
        );
        assert_eq!(draft.interests.len(), 4);
        assert_eq!(
            effect.rejected,
            vec![(Field::Interests, "You can select up to 4 interests".to_string())]
        );
    }

    #[test]
    fn invalid_amount_keeps_previous_value() {
        let mut draft = BookingDraft::default();
        apply(
            &mut draft,
            DraftUpdate::FoodDrink {
                option: FoodDrinkOption::Dinner,
                selected: true,
            },
        );
        apply(
            &mut draft,
            DraftUpdate::FoodDrinkAmount {
                option: FoodDrinkOption::Dinner,
                amount: "50".into(),
            },
        );
        let effect = apply(
            &mut draft,
            DraftUpdate::FoodDrinkAmount {
                option: FoodDrinkOption::Dinner,
                amount: "fifty".into(),
            },
        );
        assert_eq!(effect.rejected[0].1, "Whole number required");
        assert_eq!(
            draft.food_drink_options.get(FoodDrinkOption::Dinner).unwrap().amount,
            Some(50)
        );
    }

    #[test]
    fn clearing_occasion_drops_free_text() {
        let mut draft = BookingDraft::default();
        apply(&mut draft, DraftUpdate::SpecialOccasion(Occasion::Other));
        apply(&mut draft, DraftUpdate::SpecialOccasionOther("Promotion".into()));
        apply(&mut draft, DraftUpdate::SpecialOccasion(Occasion::Birthday));
        assert!(draft.special_occasion_other.is_empty());
    }
}
