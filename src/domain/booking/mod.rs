//! Booking aggregate
//!
//! The draft a user fills in, the fixed option catalog it draws from, and
//! the field-level updates that mutate it.

pub mod catalog;
pub mod draft;
pub mod field;
pub mod phone;
pub mod update;

pub use catalog::{Area, BudgetTier, Country, FoodDrinkOption, Interest, Occasion, TimeSlot, START_SLOTS};
pub use draft::{AddOnSelection, AddOns, BookingDraft, CardDetails};
pub use field::{Field, FieldErrors, FocusOrder};
pub use phone::{format_phone, PhoneNumber};
pub use update::{DraftUpdate, UpdateEffect};
