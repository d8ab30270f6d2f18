//! Form field identities and the field -> message error mapping.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::catalog::FoodDrinkOption;

/// A field that can carry an inline error.
///
/// Declaration order follows the wizard's step order. The single-page form
/// arranges fields differently, see [`FocusOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    PhoneNumber,
    PreferredArea,
    GroupSize,
    Date,
    StartTime,
    EndTime,
    Budget,
    FoodDrink,
    FoodDrinkAmount(FoodDrinkOption),
    Interests,
    EssentialComms,
    CardNumber,
    CardName,
    Expiry,
    Cvc,
}

impl Field {
    /// Key used in error maps on the wire.
    pub fn key(&self) -> String {
        let key = match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::PhoneNumber => "phoneNumber",
            Self::PreferredArea => "preferredArea",
            Self::GroupSize => "groupSize",
            Self::Date => "date",
            Self::StartTime => "startTime",
            Self::EndTime => "endTime",
            Self::Budget => "budget",
            Self::FoodDrink => "foodDrink",
            Self::FoodDrinkAmount(option) => return format!("foodDrink_{}", option.as_str()),
            Self::Interests => "interests",
            Self::EssentialComms => "essentialComms",
            Self::CardNumber => "cardNumber",
            Self::CardName => "cardName",
            Self::Expiry => "expiry",
            Self::Cvc => "cvc",
        };
        key.to_string()
    }
}

/// Which arrangement of the form decides the field to scroll to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusOrder {
    /// Field declaration order.
    #[default]
    Steps,
    /// The single-page form, which opens with the group questions.
    SinglePage,
}

impl FocusOrder {
    fn rank(self, field: Field) -> u8 {
        match self {
            Self::Steps => 0,
            Self::SinglePage => match field {
                Field::GroupSize => 0,
                Field::Date => 1,
                Field::StartTime => 2,
                Field::EndTime => 3,
                Field::PreferredArea => 4,
                Field::Budget => 5,
                Field::FirstName => 6,
                Field::LastName => 7,
                Field::PhoneNumber => 8,
                Field::FoodDrinkAmount(_) => 9,
                Field::FoodDrink => 10,
                Field::Interests => 11,
                Field::EssentialComms => 12,
                Field::CardNumber => 13,
                Field::CardName => 14,
                Field::Expiry => 15,
                Field::Cvc => 16,
            },
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key())
    }
}

/// Human-readable messages keyed by field, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    entries: BTreeMap<Field, String>,
    order: FocusOrder,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: FocusOrder) -> Self {
        self.order = order;
        self
    }

    pub fn order(&self) -> FocusOrder {
        self.order
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.entries.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> {
        self.entries.remove(&field)
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.entries.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.entries.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The field the view should scroll to: the first erroring field on screen.
    pub fn focus(&self) -> Option<Field> {
        // min_by_key keeps the first of equal ranks, so Steps falls back to key order.
        self.entries.keys().copied().min_by_key(|f| self.order.rank(*f))
    }

    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.entries.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(Field) -> bool) {
        self.entries.retain(|f, _| keep(*f));
    }

    pub fn merge(&mut self, other: FieldErrors) {
        self.entries.extend(other.entries);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, message) in &self.entries {
            map.serialize_entry(&field.key(), message)?;
        }
        map.end()
    }
}
