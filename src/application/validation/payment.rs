use std::sync::OnceLock;

use regex::Regex;

use crate::domain::booking::{BookingDraft, Field, FieldErrors};
use crate::shared::formatting::CARD_DIGITS;

fn expiry_pattern() -> &'static Regex {
    static EXPIRY: OnceLock<Regex> = OnceLock::new();
    EXPIRY.get_or_init(|| Regex::new(r"^\d{2}/\d{2}$").expect("expiry pattern is valid"))
}

fn cvc_pattern() -> &'static Regex {
    static CVC: OnceLock<Regex> = OnceLock::new();
    CVC.get_or_init(|| Regex::new(r"^\d{3,4}$").expect("cvc pattern is valid"))
}

pub fn validate_payment(draft: &BookingDraft) -> FieldErrors {
    let card = &draft.card;
    let mut errors = FieldErrors::new();

    let digits = card.card_number.chars().filter(|c| !c.is_whitespace()).count();
    let all_digits = card
        .card_number
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace());
    if digits != CARD_DIGITS || !all_digits {
        errors.insert(Field::CardNumber, "Please enter a valid 16-digit card number");
    }
    if card.card_name.trim().is_empty() {
        errors.insert(Field::CardName, "Cardholder name is required");
    }
    if !expiry_pattern().is_match(&card.expiry) {
        errors.insert(Field::Expiry, "Please enter a valid expiry date (MM/YY)");
    }
    if !cvc_pattern().is_match(&card.cvc) {
        errors.insert(Field::Cvc, "Please enter a valid CVC code");
    }
    errors
}
