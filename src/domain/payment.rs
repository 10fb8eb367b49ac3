// src/domain/payment.rs

use crate::domain::listing::ListingKind;
use regex::Regex;
use lazy_static::lazy_static;

/// Stored payment text for negotiable listings.
pub const NEGOTIABLE: &str = "Договорная";

lazy_static! {
    // ASCII digits only; `\d` would also accept other scripts.
    static ref AMOUNT_PATTERN: Regex = Regex::new(r"[0-9]+\.?[0-9]*").unwrap();
    static ref LEADING_NUMBER_PATTERN: Regex =
        Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").unwrap();
}

/// First decimal number found anywhere in free-text payment, or `0`.
///
/// Digits inside contact-like text ("call 8029...") are picked up too.
pub fn extract_amount(payment: &str) -> f64 {
    AMOUNT_PATTERN
        .find(payment)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parses the "minimum payment" filter input.
///
/// Reads a leading number and ignores trailing text (`"40 BYN"` is 40).
/// Anything without a leading number is 0, which disables the floor.
pub fn parse_min_payment(input: &str) -> f64 {
    LEADING_NUMBER_PATTERN
        .find(input)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Payment as picked in the placement form.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentTerms {
    Negotiable,
    Amount { amount: String, unit: String },
}

impl PaymentTerms {
    /// Free text stored on the listing. Workers advertise a floor ("от").
    pub fn compose(&self, kind: ListingKind) -> String {
        match self {
            PaymentTerms::Negotiable => NEGOTIABLE.to_string(),
            PaymentTerms::Amount { amount, unit } => {
                let amount = amount.trim();
                let unit = unit.trim();
                match kind {
                    ListingKind::Task => format!("{amount} {unit}"),
                    ListingKind::Worker => format!("от {amount} {unit}"),
                }
            }
        }
    }
}
