//! Keystroke formatters for card and phone input.
//!
//! Every formatter strips the characters that carry no meaning and
//! re-inserts separators at fixed offsets. All of them are idempotent and
//! accept empty or partial input.

pub const CARD_DIGITS: usize = 16;
pub const EXPIRY_DIGITS: usize = 4;
pub const CVC_MAX_DIGITS: usize = 4;
pub const NANP_DIGITS: usize = 10;
pub const INTERNATIONAL_MAX_DIGITS: usize = 15;

/// Keep at most `max` ASCII digits from `raw`.
pub fn digits_only(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}

/// `4242424242424242` -> `4242 4242 4242 4242`
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw, CARD_DIGITS);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// `1228` -> `12/28`. Two digits or fewer stay as typed.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw, EXPIRY_DIGITS);
    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn format_cvc(raw: &str) -> String {
    digits_only(raw, CVC_MAX_DIGITS)
}

/// North American layout, built up progressively: `206`, `(206) 555`,
/// `(206) 555-0100`.
pub fn format_nanp(raw: &str) -> String {
    let d = digits_only(raw, NANP_DIGITS);
    match d.len() {
        0..=3 => d,
        4..=6 => format!("({}) {}", &d[..3], &d[3..]),
        _ => format!("({}) {}-{}", &d[..3], &d[3..6], &d[6..]),
    }
}
