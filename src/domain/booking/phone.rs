//! Compound phone control: country prefix plus locally formatted number.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::catalog::Country;
use crate::shared::formatting::{digits_only, format_nanp, INTERNATIONAL_MAX_DIGITS};

/// Format `raw` the way numbers are written in `country`.
pub fn format_phone(country: Country, raw: &str) -> String {
    if country.uses_nanp() {
        format_nanp(raw)
    } else {
        digits_only(raw, INTERNATIONAL_MAX_DIGITS)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PhoneNumber {
    pub country: Country,
    /// Local part, already formatted for `country`.
    pub local: String,
}

impl PhoneNumber {
    pub fn set_local(&mut self, raw: &str) {
        self.local = format_phone(self.country, raw);
    }

    /// Switching country re-formats the number already typed.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        self.local = format_phone(country, &self.local);
    }

    pub fn is_empty(&self) -> bool {
        self.local.trim().is_empty()
    }

    /// `+1 (206) 555-0100`
    pub fn display(&self) -> String {
        format!("{} {}", self.country.dial_code(), self.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_numbers_use_nanp_layout() {
        let mut phone = PhoneNumber::default();
        phone.set_local("206.555.0100");
        assert_eq!(phone.local, "(206) 555-0100");
        assert_eq!(phone.display(), "+1 (206) 555-0100");
    }

    #[test]
    fn other_countries_keep_bare_digits() {
        let mut phone = PhoneNumber {
            country: Country::Gb,
            local: String::new(),
        };
        phone.set_local("020 7946 0958");
        assert_eq!(phone.local, "02079460958");
    }

    #[test]
    fn changing_country_reformats() {
        let mut phone = PhoneNumber::default();
        phone.set_local("2065550100");
        phone.set_country(Country::De);
        assert_eq!(phone.local, "2065550100");
        phone.set_country(Country::Ca);
        assert_eq!(phone.local, "(206) 555-0100");
    }

    #[test]
    fn formatting_is_idempotent() {
        for country in Country::ALL {
            let once = format_phone(country, "+1 206-555-0100 ext");
            assert_eq!(format_phone(country, &once), once);
        }
    }
}
