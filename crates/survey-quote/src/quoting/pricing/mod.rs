//! Deterministic fee calculation.
//!
//! The engine is a pure function over the static catalog: the same input
//! always produces the same breakdown, and every additive term is
//! reported individually so callers can verify each surcharge.

mod catalog;
mod money;

pub use catalog::{
    band_by_id, band_for_miles, extra_by_id, farthest_band, rule_in, survey_by_id, AdjustmentRule,
    DistanceBand, ExtraService, SurveyTier, COMPLEXITY_RULES, DISTANCE_BANDS, EXTENSION_RULES,
    EXTRA_SERVICES, GUIDE_RANGE_SPREAD, PROPERTY_AGE_RULES, PROPERTY_TYPE_RULES, SURVEY_TIERS,
    VALUE_BANDS, VAT_RATE,
};
pub use money::{
    clamp_bedrooms, format_currency, parse_bedrooms, parse_property_value, round_to_nearest_five,
    sanitize_property_value, Money, MAX_BEDROOMS,
};

use serde::{Deserialize, Serialize};

use catalog::value_addition;

/// Structured request for a fee estimate. Travel is resolved from the
/// first of `distance_band_id`, `distance_miles`; when both are absent
/// the farthest band applies.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuoteInput {
    pub survey_type: String,
    pub property_value: f64,
    pub bedrooms: u32,
    pub complexity: Option<String>,
    pub property_type: Option<String>,
    pub property_age: Option<String>,
    pub extension_status: Option<String>,
    pub distance_band_id: Option<String>,
    pub distance_miles: Option<f64>,
    pub extras: Vec<String>,
}

/// One reported surcharge line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteAdjustment {
    pub id: &'static str,
    pub label: String,
    pub amount: Money,
}

/// An add-on service included in the estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedExtra {
    pub id: &'static str,
    pub label: &'static str,
    pub amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SurveySummary {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandSummary {
    pub id: &'static str,
    pub label: &'static str,
    pub min_miles: f64,
    pub max_miles: Option<f64>,
}

impl From<&'static DistanceBand> for BandSummary {
    fn from(band: &'static DistanceBand) -> Self {
        Self {
            id: band.id,
            label: band.label,
            min_miles: band.min_miles,
            max_miles: band.max_miles.is_finite().then_some(band.max_miles),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuoteRange {
    pub min: f64,
    pub max: f64,
}

/// Full fee breakdown.
///
/// `adjustments` lists the non-zero rule surcharges in a fixed order —
/// property-type, property-age, extension, complexity, extra-bedrooms,
/// distance — which downstream rendering and the enquiry payload rely
/// on. `bedroom_adjustment` and `distance_surcharge` mirror their list
/// entries; `value_adjustment` is reported only as its own field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteBreakdown {
    pub survey: SurveySummary,
    pub base: Money,
    pub value_adjustment: Money,
    pub bedroom_adjustment: Money,
    pub distance_surcharge: Money,
    pub adjustments: Vec<QuoteAdjustment>,
    pub applied_extras: Vec<AppliedExtra>,
    pub extras_total: Money,
    pub total: Money,
    pub distance_band: BandSummary,
    pub range: QuoteRange,
}

/// The one loud failure: every other malformed input degrades to a safe
/// default, but an unknown survey type has no defined base fee.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("unsupported survey type: {0:?}")]
    UnsupportedSurveyType(String),
}

/// Stateless calculator over the static pricing catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotePricingEngine;

impl QuotePricingEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, input: &QuoteInput) -> Result<QuoteBreakdown, QuoteError> {
        let survey = survey_by_id(&input.survey_type)
            .ok_or_else(|| QuoteError::UnsupportedSurveyType(input.survey_type.clone()))?;

        let bedrooms = clamp_bedrooms(input.bedrooms);
        let property_value = sanitize_property_value(input.property_value);

        let band = input
            .distance_band_id
            .as_deref()
            .and_then(band_by_id)
            .unwrap_or_else(|| band_for_miles(input.distance_miles));

        let mut adjustments: Vec<QuoteAdjustment> = Vec::new();

        for (category, table, selected) in [
            ("property-type", PROPERTY_TYPE_RULES, input.property_type.as_deref()),
            ("property-age", PROPERTY_AGE_RULES, input.property_age.as_deref()),
            ("extension", EXTENSION_RULES, input.extension_status.as_deref()),
            ("complexity", COMPLEXITY_RULES, input.complexity.as_deref()),
        ] {
            let Some(rule) = selected.and_then(|id| rule_in(table, id)) else {
                continue;
            };
            if rule.amount != 0.0 {
                adjustments.push(QuoteAdjustment {
                    id: category,
                    label: rule.label.to_string(),
                    amount: Money::from_gross(rule.amount),
                });
            }
        }

        let extra_bedrooms = if survey.bedrooms_included > 0 {
            bedrooms.saturating_sub(survey.bedrooms_included)
        } else {
            0
        };
        let bedroom_amount = f64::from(extra_bedrooms) * survey.bedroom_premium;
        let bedroom_adjustment = Money::from_gross(bedroom_amount);
        if bedroom_amount != 0.0 {
            let plural = if extra_bedrooms > 1 { "s" } else { "" };
            adjustments.push(QuoteAdjustment {
                id: "extra-bedrooms",
                label: format!("{extra_bedrooms} additional bedroom{plural}"),
                amount: bedroom_adjustment,
            });
        }

        let distance_surcharge = Money::from_gross(band.surcharge);
        if band.surcharge != 0.0 {
            adjustments.push(QuoteAdjustment {
                id: "distance",
                label: format!("Travel ({})", band.label),
                amount: distance_surcharge,
            });
        }

        let value_adjustment = Money::from_gross(value_addition(property_value));

        let mut applied_extras: Vec<AppliedExtra> = Vec::new();
        for id in &input.extras {
            let Some(extra) = extra_by_id(id) else {
                continue;
            };
            if applied_extras.iter().any(|applied| applied.id == extra.id) {
                continue;
            }
            applied_extras.push(AppliedExtra {
                id: extra.id,
                label: extra.label,
                amount: Money::from_gross(extra.price),
            });
        }
        let extras_total = Money::from_gross(
            applied_extras
                .iter()
                .map(|applied| applied.amount.gross)
                .sum(),
        );

        let rule_total: f64 = adjustments
            .iter()
            .map(|adjustment| adjustment.amount.gross)
            .sum();
        let total_gross =
            survey.base_fee + value_adjustment.gross + rule_total + extras_total.gross;

        let anchored = round_to_nearest_five(total_gross);
        let range = QuoteRange {
            min: (anchored - GUIDE_RANGE_SPREAD).max(0.0),
            max: anchored + GUIDE_RANGE_SPREAD,
        };

        Ok(QuoteBreakdown {
            survey: SurveySummary {
                id: survey.id,
                label: survey.label,
            },
            base: Money::from_gross(survey.base_fee),
            value_adjustment,
            bedroom_adjustment,
            distance_surcharge,
            adjustments,
            applied_extras,
            extras_total,
            total: Money::from_gross(total_gross),
            distance_band: BandSummary::from(band),
            range,
        })
    }
}

/// Convenience wrapper around a throwaway [`QuotePricingEngine`].
pub fn calculate_quote(input: &QuoteInput) -> Result<QuoteBreakdown, QuoteError> {
    QuotePricingEngine::new().calculate(input)
}

#[cfg(test)]
mod tests;
