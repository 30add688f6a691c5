use serde::{Deserialize, Serialize};

use super::catalog::VAT_RATE;
use crate::quoting::round2;

pub const MAX_BEDROOMS: u32 = 8;

/// A VAT-inclusive amount with its derived net and VAT portions.
/// `net + vat == gross` holds exactly for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    pub gross: f64,
    pub net: f64,
    pub vat: f64,
}

impl Money {
    pub fn from_gross(gross: f64) -> Self {
        let net = round2(gross / (1.0 + VAT_RATE));
        let vat = round2(gross - net);
        Self { gross, net, vat }
    }

    pub fn zero() -> Self {
        Self {
            gross: 0.0,
            net: 0.0,
            vat: 0.0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.gross == 0.0
    }
}

/// Guide figures are presented to the nearest five pounds.
pub fn round_to_nearest_five(value: f64) -> f64 {
    (value / 5.0).round() * 5.0
}

/// Render a gross amount the way fees appear on the site: nearest five
/// pounds, pound sign, thousands separators, no pence.
pub fn format_currency(value: f64) -> String {
    let rounded = round_to_nearest_five(value.max(0.0)) as i64;
    let digits = rounded.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (offset, ch) in digits.chars().enumerate() {
        if offset > 0 && (digits.len() - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("£{grouped}")
}

/// Parse a property value from form text such as "£275,500". Currency
/// symbols and separators are stripped; anything non-positive or
/// unparseable is treated as "not provided" and becomes zero.
pub fn parse_property_value(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

pub fn sanitize_property_value(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse a bedroom count from form text such as "4 bedrooms". Garbage and
/// zero clamp to one bedroom; counts cap at [`MAX_BEDROOMS`].
pub fn parse_bedrooms(raw: &str) -> u32 {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    match digits.parse::<u32>() {
        Ok(value) if value >= 1 => value.min(MAX_BEDROOMS),
        _ => 1,
    }
}

pub fn clamp_bedrooms(value: u32) -> u32 {
    value.clamp(1, MAX_BEDROOMS)
}
