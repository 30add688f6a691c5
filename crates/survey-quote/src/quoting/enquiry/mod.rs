//! Enquiry assembly for the external mail/PDF pipeline.
//!
//! The pipeline accepts a flat field map; everything here turns a loose
//! inbound form plus a computed breakdown into that map, with every
//! additive fee term present individually. Submission itself happens
//! behind the [`EnquirySink`] seam so transports stay swappable.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::pricing::{
    format_currency, parse_bedrooms, parse_property_value, QuoteBreakdown, QuoteInput,
};

/// Who to contact about the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A parsed enquiry: contact details plus the pricing input recovered
/// from the posted form.
#[derive(Debug, Clone, PartialEq)]
pub struct EnquiryRequest {
    pub contact: ContactDetails,
    pub quote: QuoteInput,
    pub postcode: Option<String>,
}

/// Field aliases the public forms have used over the years. Each entry is
/// an explicit, ordered fallback list: the first populated alias wins.
const NAME_ALIASES: &[&str] = &["name", "full_name", "full-name", "contact-name"];
const EMAIL_ALIASES: &[&str] = &["email", "_replyto", "contact-email"];
const PHONE_ALIASES: &[&str] = &["phone", "tel", "telephone"];
const NOTES_ALIASES: &[&str] = &["notes", "message", "property-notes"];
const POSTCODE_ALIASES: &[&str] = &["postcode", "post_code", "property-postcode"];
const SURVEY_ALIASES: &[&str] = &["survey-id", "survey_type", "survey-type"];
const VALUE_ALIASES: &[&str] = &["property-value", "property_value", "value"];
const BEDROOM_ALIASES: &[&str] = &["bedrooms", "bedroom-count"];
const BAND_ALIASES: &[&str] = &["distance-band-id", "travel-band", "distance-band"];
const MILES_ALIASES: &[&str] = &["distance-miles", "distance_miles"];
const COMPLEXITY_ALIASES: &[&str] = &["complexity-id", "complexity"];
const PROPERTY_TYPE_ALIASES: &[&str] = &["property-type", "property_type"];
const PROPERTY_AGE_ALIASES: &[&str] = &["property-age", "property_age"];
const EXTENSION_ALIASES: &[&str] = &["extension-status", "extension_status"];
const EXTRAS_ALIASES: &[&str] = &["extras", "extra-services"];

fn first_present<'a>(fields: &'a BTreeMap<String, String>, aliases: &[&str]) -> Option<&'a str> {
    aliases
        .iter()
        .filter_map(|alias| fields.get(*alias))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Raised when a posted form cannot be turned into an enquiry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnquiryFormError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl EnquiryRequest {
    /// Recover an enquiry from a loosely-shaped form field map. Contact
    /// name, email, and a survey selection are required; every pricing
    /// field falls back to the calculator defaults when absent.
    pub fn from_form(fields: &BTreeMap<String, String>) -> Result<Self, EnquiryFormError> {
        let name = first_present(fields, NAME_ALIASES)
            .ok_or(EnquiryFormError::MissingField("name"))?
            .to_string();
        let email = first_present(fields, EMAIL_ALIASES)
            .ok_or(EnquiryFormError::MissingField("email"))?
            .to_string();
        let survey_type = first_present(fields, SURVEY_ALIASES)
            .ok_or(EnquiryFormError::MissingField("survey-id"))?
            .to_string();

        let quote = QuoteInput {
            survey_type,
            property_value: first_present(fields, VALUE_ALIASES)
                .map(parse_property_value)
                .unwrap_or(0.0),
            bedrooms: first_present(fields, BEDROOM_ALIASES)
                .map(parse_bedrooms)
                .unwrap_or(1),
            complexity: first_present(fields, COMPLEXITY_ALIASES).map(str::to_string),
            property_type: first_present(fields, PROPERTY_TYPE_ALIASES).map(str::to_string),
            property_age: first_present(fields, PROPERTY_AGE_ALIASES).map(str::to_string),
            extension_status: first_present(fields, EXTENSION_ALIASES).map(str::to_string),
            distance_band_id: first_present(fields, BAND_ALIASES).map(str::to_string),
            distance_miles: first_present(fields, MILES_ALIASES)
                .and_then(|raw| raw.parse::<f64>().ok()),
            extras: first_present(fields, EXTRAS_ALIASES)
                .map(|raw| {
                    raw.split([',', ';'])
                        .map(str::trim)
                        .filter(|id| !id.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        };

        Ok(Self {
            contact: ContactDetails {
                name,
                email,
                phone: first_present(fields, PHONE_ALIASES).map(str::to_string),
                notes: first_present(fields, NOTES_ALIASES).map(str::to_string),
            },
            quote,
            postcode: first_present(fields, POSTCODE_ALIASES).map(str::to_string),
        })
    }
}

/// The flat payload handed to the mail/PDF pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryPayload {
    pub reference: String,
    pub fields: BTreeMap<String, String>,
}

static ENQUIRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_enquiry_reference() -> String {
    let id = ENQUIRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("enq-{id:06}")
}

impl EnquiryPayload {
    /// Flatten contact details and a fee breakdown into pipeline fields.
    /// Each additive term is emitted on its own so the PDF renderer never
    /// has to re-derive arithmetic.
    pub fn compose(
        contact: &ContactDetails,
        breakdown: &QuoteBreakdown,
        postcode: Option<&str>,
    ) -> Self {
        let mut fields = BTreeMap::new();

        fields.insert("name".to_string(), contact.name.clone());
        fields.insert("email".to_string(), contact.email.clone());
        if let Some(phone) = &contact.phone {
            fields.insert("phone".to_string(), phone.clone());
        }
        if let Some(notes) = &contact.notes {
            fields.insert("notes".to_string(), notes.clone());
        }
        if let Some(postcode) = postcode {
            fields.insert("postcode".to_string(), postcode.to_string());
        }

        fields.insert("survey-id".to_string(), breakdown.survey.id.to_string());
        fields.insert("survey-type".to_string(), breakdown.survey.label.to_string());
        fields.insert(
            "base-fee".to_string(),
            format!("{:.2}", breakdown.base.gross),
        );
        fields.insert(
            "value-adjustment".to_string(),
            format!("{:.2}", breakdown.value_adjustment.gross),
        );
        for adjustment in &breakdown.adjustments {
            fields.insert(
                format!("adjustment-{}", adjustment.id),
                format!("{:.2}", adjustment.amount.gross),
            );
        }
        fields.insert(
            "extras-total".to_string(),
            format!("{:.2}", breakdown.extras_total.gross),
        );
        fields.insert(
            "estimate-subtotal".to_string(),
            format!("{:.2}", breakdown.total.net),
        );
        fields.insert(
            "estimate-vat".to_string(),
            format!("{:.2}", breakdown.total.vat),
        );
        fields.insert(
            "estimate-total".to_string(),
            format!("{:.2}", breakdown.total.gross),
        );
        fields.insert(
            "guide-fee".to_string(),
            format_currency(breakdown.total.gross),
        );
        fields.insert(
            "guide-range".to_string(),
            format!(
                "{} – {}",
                format_currency(breakdown.range.min),
                format_currency(breakdown.range.max)
            ),
        );
        fields.insert(
            "distance-band".to_string(),
            breakdown.distance_band.label.to_string(),
        );
        fields.insert(
            "distance-band-id".to_string(),
            breakdown.distance_band.id.to_string(),
        );

        let adjustments_summary = if breakdown.adjustments.is_empty() {
            "None".to_string()
        } else {
            breakdown
                .adjustments
                .iter()
                .map(|adjustment| {
                    format!(
                        "{}: {}",
                        adjustment.label,
                        format_currency(adjustment.amount.gross)
                    )
                })
                .collect::<Vec<_>>()
                .join("; ")
        };
        fields.insert("guide-adjustments".to_string(), adjustments_summary);
        fields.insert("submitted-at".to_string(), Utc::now().to_rfc3339());

        Self {
            reference: next_enquiry_reference(),
            fields,
        }
    }
}

/// Receipt returned once the pipeline accepts an enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnquiryReceipt {
    pub reference: String,
    pub status: String,
}

/// Raised when the pipeline rejects or cannot take a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnquiryError {
    #[error("enquiry pipeline rejected the submission: {0}")]
    Rejected(String),
    #[error("enquiry pipeline unavailable: {0}")]
    Unavailable(String),
}

/// Seam to the external mail/PDF pipeline. Implementations submit the
/// payload over whatever transport applies; tests use an in-memory sink.
pub trait EnquirySink: Send + Sync {
    fn submit(&self, payload: EnquiryPayload) -> Result<EnquiryReceipt, EnquiryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quoting::pricing::calculate_quote;

    fn sample_form() -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("full-name".to_string(), "Jo Carter".to_string());
        fields.insert("_replyto".to_string(), "jo@example.com".to_string());
        fields.insert("survey-id".to_string(), "level2".to_string());
        fields.insert("property-value".to_string(), "£250,000".to_string());
        fields.insert("bedrooms".to_string(), "3 bedrooms".to_string());
        fields.insert("travel-band".to_string(), "within-10-miles".to_string());
        fields.insert("postcode".to_string(), "CH5 4HS".to_string());
        fields
    }

    #[test]
    fn form_parsing_uses_ordered_alias_fallbacks() {
        let request = EnquiryRequest::from_form(&sample_form()).expect("form parses");

        assert_eq!(request.contact.name, "Jo Carter");
        assert_eq!(request.contact.email, "jo@example.com");
        assert_eq!(request.quote.survey_type, "level2");
        assert_eq!(request.quote.property_value, 250_000.0);
        assert_eq!(request.quote.bedrooms, 3);
        assert_eq!(request.quote.distance_band_id.as_deref(), Some("within-10-miles"));
        assert_eq!(request.postcode.as_deref(), Some("CH5 4HS"));
    }

    #[test]
    fn earlier_aliases_win_over_later_ones() {
        let mut fields = sample_form();
        fields.insert("name".to_string(), "Preferred Name".to_string());

        let request = EnquiryRequest::from_form(&fields).expect("form parses");
        assert_eq!(request.contact.name, "Preferred Name");
    }

    #[test]
    fn missing_contact_fields_are_reported() {
        let mut fields = sample_form();
        fields.remove("_replyto");

        assert_eq!(
            EnquiryRequest::from_form(&fields),
            Err(EnquiryFormError::MissingField("email"))
        );
    }

    #[test]
    fn extras_split_on_separators() {
        let mut fields = sample_form();
        fields.insert("extras".to_string(), "valuation, thermal; valuation".to_string());

        let request = EnquiryRequest::from_form(&fields).expect("form parses");
        assert_eq!(request.quote.extras, ["valuation", "thermal", "valuation"]);
    }

    #[test]
    fn payload_carries_every_additive_term() {
        let request = EnquiryRequest::from_form(&sample_form()).expect("form parses");
        let mut quote = request.quote.clone();
        quote.property_value = 800_000.0;
        quote.bedrooms = 5;
        quote.complexity = Some("period".to_string());
        quote.distance_band_id = Some("over-50-miles".to_string());

        let breakdown = calculate_quote(&quote).expect("level2 is priced");
        let payload = EnquiryPayload::compose(&request.contact, &breakdown, request.postcode.as_deref());

        assert!(payload.reference.starts_with("enq-"));
        assert_eq!(payload.fields.get("base-fee").map(String::as_str), Some("545.00"));
        assert_eq!(
            payload.fields.get("value-adjustment").map(String::as_str),
            Some("170.00")
        );
        assert_eq!(
            payload.fields.get("adjustment-complexity").map(String::as_str),
            Some("130.00")
        );
        assert_eq!(
            payload.fields.get("adjustment-extra-bedrooms").map(String::as_str),
            Some("40.00")
        );
        assert_eq!(
            payload.fields.get("adjustment-distance").map(String::as_str),
            Some("55.00")
        );
        assert_eq!(
            payload.fields.get("estimate-total").map(String::as_str),
            Some("940.00")
        );
        assert_eq!(payload.fields.get("guide-fee").map(String::as_str), Some("£940"));
        assert_eq!(
            payload.fields.get("distance-band-id").map(String::as_str),
            Some("over-50-miles")
        );
        assert!(payload.fields.contains_key("submitted-at"));
    }

    #[test]
    fn references_are_unique_per_submission() {
        let request = EnquiryRequest::from_form(&sample_form()).expect("form parses");
        let breakdown = calculate_quote(&request.quote).expect("level2 is priced");

        let first = EnquiryPayload::compose(&request.contact, &breakdown, None);
        let second = EnquiryPayload::compose(&request.contact, &breakdown, None);
        assert_ne!(first.reference, second.reference);
    }
}
