use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::warn;

use super::areas::{
    canonical_outcode, describe_outcode, estimate_distance_from_outcode, get_areas_for_outcode,
    match_outcodes, DEFAULT_MATCH_LIMIT,
};
use super::enquiry::{EnquiryPayload, EnquiryRequest, EnquirySink};
use super::pricing::{
    calculate_quote, parse_bedrooms, parse_property_value, sanitize_property_value, QuoteError,
    QuoteInput, MAX_BEDROOMS,
};

/// Router builder exposing the quoting endpoints. The enquiry sink is the
/// only injected collaborator; everything else is pure table lookup.
pub fn quote_router<S>(sink: Arc<S>) -> Router
where
    S: EnquirySink + 'static,
{
    Router::new()
        .route("/api/v1/quote", post(quote_handler))
        .route("/api/v1/enquiries", post(enquiry_handler::<S>))
        .route("/api/v1/outcodes", get(outcode_search_handler))
        .route("/api/v1/areas/:outcode", get(areas_handler))
        .with_state(sink)
}

/// Quote request as posted by the calculator form. Value and bedroom
/// fields arrive as whatever the form produced, so both accept a number
/// or free text.
#[derive(Debug, Deserialize)]
pub(crate) struct QuoteRequest {
    pub(crate) survey_type: String,
    #[serde(default, deserialize_with = "deserialize_flexible_amount")]
    pub(crate) property_value: f64,
    #[serde(
        default = "default_bedrooms",
        deserialize_with = "deserialize_flexible_count"
    )]
    pub(crate) bedrooms: u32,
    #[serde(default)]
    pub(crate) complexity: Option<String>,
    #[serde(default)]
    pub(crate) property_type: Option<String>,
    #[serde(default)]
    pub(crate) property_age: Option<String>,
    #[serde(default)]
    pub(crate) extension_status: Option<String>,
    #[serde(default)]
    pub(crate) distance_band_id: Option<String>,
    #[serde(default)]
    pub(crate) distance_miles: Option<f64>,
    #[serde(default)]
    pub(crate) postcode: Option<String>,
    #[serde(default)]
    pub(crate) extras: Vec<String>,
}

fn default_bedrooms() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlexibleValue {
    Number(f64),
    Text(String),
}

fn deserialize_flexible_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlexibleValue::deserialize(deserializer)? {
        FlexibleValue::Number(value) => sanitize_property_value(value),
        FlexibleValue::Text(raw) => parse_property_value(&raw),
    })
}

fn deserialize_flexible_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match FlexibleValue::deserialize(deserializer)? {
        FlexibleValue::Number(value) if value.is_finite() && value >= 1.0 => {
            (value.round() as u32).min(MAX_BEDROOMS)
        }
        FlexibleValue::Number(_) => 1,
        FlexibleValue::Text(raw) => parse_bedrooms(&raw),
    })
}

impl QuoteRequest {
    fn into_quote_input(self) -> QuoteInput {
        let distance_miles = self.distance_miles.or_else(|| {
            if self.distance_band_id.is_some() {
                return None;
            }
            self.postcode
                .as_deref()
                .and_then(estimate_distance_from_outcode)
        });

        QuoteInput {
            survey_type: self.survey_type,
            property_value: self.property_value,
            bedrooms: self.bedrooms,
            complexity: self.complexity,
            property_type: self.property_type,
            property_age: self.property_age,
            extension_status: self.extension_status,
            distance_band_id: self.distance_band_id,
            distance_miles,
            extras: self.extras,
        }
    }
}

pub(crate) async fn quote_handler(Json(request): Json<QuoteRequest>) -> Response {
    match calculate_quote(&request.into_quote_input()) {
        Ok(breakdown) => (StatusCode::OK, Json(breakdown)).into_response(),
        Err(error @ QuoteError::UnsupportedSurveyType(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn enquiry_handler<S>(
    State(sink): State<Arc<S>>,
    Json(form): Json<BTreeMap<String, serde_json::Value>>,
) -> Response
where
    S: EnquirySink + 'static,
{
    let fields = stringify_form(form);

    let request = match EnquiryRequest::from_form(&fields) {
        Ok(request) => request,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    let mut quote = request.quote;
    if quote.distance_band_id.is_none() && quote.distance_miles.is_none() {
        quote.distance_miles = request
            .postcode
            .as_deref()
            .and_then(estimate_distance_from_outcode);
    }

    let breakdown = match calculate_quote(&quote) {
        Ok(breakdown) => breakdown,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
    };

    let payload = EnquiryPayload::compose(&request.contact, &breakdown, request.postcode.as_deref());

    match sink.submit(payload) {
        Ok(receipt) => {
            let body = json!({
                "reference": receipt.reference,
                "status": receipt.status,
                "estimate_total": breakdown.total.gross,
                "range": breakdown.range,
            });
            (StatusCode::ACCEPTED, Json(body)).into_response()
        }
        Err(error) => {
            warn!(%error, "enquiry submission failed");
            let payload = json!({ "error": error.to_string() });
            (StatusCode::BAD_GATEWAY, Json(payload)).into_response()
        }
    }
}

fn stringify_form(form: BTreeMap<String, serde_json::Value>) -> BTreeMap<String, String> {
    form.into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(text) => text,
                serde_json::Value::Number(number) => number.to_string(),
                serde_json::Value::Bool(flag) => flag.to_string(),
                _ => return None,
            };
            Some((key, text))
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub(crate) struct OutcodeSearchParams {
    #[serde(default)]
    pub(crate) q: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
}

pub(crate) async fn outcode_search_handler(
    Query(params): Query<OutcodeSearchParams>,
) -> Json<serde_json::Value> {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_MATCH_LIMIT);
    let results = match_outcodes(&query, limit);

    Json(json!({
        "query": query,
        "count": results.len(),
        "results": results,
    }))
}

pub(crate) async fn areas_handler(Path(outcode): Path<String>) -> Json<serde_json::Value> {
    let canonical = canonical_outcode(&outcode);
    let areas = get_areas_for_outcode(&outcode);

    Json(json!({
        "outcode": canonical.unwrap_or_else(|| outcode.trim().to_uppercase()),
        "areas": areas,
        "description": describe_outcode(&outcode),
    }))
}
