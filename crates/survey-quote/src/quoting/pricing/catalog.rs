use serde::Serialize;

/// UK standard VAT rate applied to every fee. Change here, nowhere else.
pub const VAT_RATE: f64 = 0.20;

/// Flat half-width of the displayed guide range, in gross pounds.
pub const GUIDE_RANGE_SPREAD: f64 = 30.0;

/// A survey product with its guide fee. Fees are VAT-inclusive whole
/// pounds. `bedrooms_included == 0` disables bedroom scaling for services
/// priced per visit rather than per property size.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyTier {
    pub id: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub summary: &'static str,
    pub base_fee: f64,
    #[serde(skip)]
    pub bedrooms_included: u32,
    #[serde(skip)]
    pub bedroom_premium: f64,
}

pub const SURVEY_TIERS: &[SurveyTier] = &[
    SurveyTier {
        id: "level1",
        label: "RICS Level 1 Home Survey",
        summary: "Concise condition overview for modern homes in good order.",
        base_fee: 425.0,
        bedrooms_included: 3,
        bedroom_premium: 15.0,
    },
    SurveyTier {
        id: "level2",
        label: "RICS Level 2 Home Survey",
        summary: "The most requested survey for conventional homes built after 1900.",
        base_fee: 545.0,
        bedrooms_included: 3,
        bedroom_premium: 20.0,
    },
    SurveyTier {
        id: "level3",
        label: "RICS Level 3 Building Survey",
        summary: "In-depth fabric analysis for older, extended or complex properties.",
        base_fee: 895.0,
        bedrooms_included: 4,
        bedroom_premium: 30.0,
    },
    SurveyTier {
        id: "damp",
        label: "Specialist Damp & Timber Investigation",
        summary: "Independent moisture diagnosis with a root-cause action plan.",
        base_fee: 495.0,
        bedrooms_included: 0,
        bedroom_premium: 0.0,
    },
    SurveyTier {
        id: "ventilation",
        label: "Ventilation & Condensation Assessment",
        summary: "Airflow testing and practical guidance for persistent condensation.",
        base_fee: 475.0,
        bedrooms_included: 0,
        bedroom_premium: 0.0,
    },
    SurveyTier {
        id: "epc",
        label: "EPC with Floorplan",
        summary: "Energy certificate plus marketing-ready floorplan.",
        base_fee: 195.0,
        bedrooms_included: 0,
        bedroom_premium: 0.0,
    },
    SurveyTier {
        id: "measured",
        label: "Measured Survey & Floorplans",
        summary: "Laser-measured internal survey producing CAD-ready drawings.",
        base_fee: 445.0,
        bedrooms_included: 3,
        bedroom_premium: 20.0,
    },
    SurveyTier {
        id: "unsure",
        label: "Not Sure Yet",
        summary: "Guide figure based on our most requested survey while we advise.",
        base_fee: 545.0,
        bedrooms_included: 3,
        bedroom_premium: 20.0,
    },
];

pub fn survey_by_id(id: &str) -> Option<&'static SurveyTier> {
    SURVEY_TIERS.iter().find(|tier| tier.id == id.trim())
}

/// A labelled mileage range carrying a flat travel surcharge. Boundary
/// values belong to the lower band: selection is the first band with
/// `miles <= max_miles`, scanning ascending.
#[derive(Debug, Clone, Serialize)]
pub struct DistanceBand {
    pub id: &'static str,
    pub label: &'static str,
    pub min_miles: f64,
    #[serde(serialize_with = "serialize_unbounded_max")]
    pub max_miles: f64,
    pub surcharge: f64,
}

fn serialize_unbounded_max<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

pub const DISTANCE_BANDS: &[DistanceBand] = &[
    DistanceBand {
        id: "within-10-miles",
        label: "0-10 miles",
        min_miles: 0.0,
        max_miles: 10.0,
        surcharge: 0.0,
    },
    DistanceBand {
        id: "within-20-miles",
        label: "10-20 miles",
        min_miles: 10.0,
        max_miles: 20.0,
        surcharge: 12.0,
    },
    DistanceBand {
        id: "within-35-miles",
        label: "20-35 miles",
        min_miles: 20.0,
        max_miles: 35.0,
        surcharge: 22.0,
    },
    DistanceBand {
        id: "within-50-miles",
        label: "35-50 miles",
        min_miles: 35.0,
        max_miles: 50.0,
        surcharge: 38.0,
    },
    DistanceBand {
        id: "over-50-miles",
        label: "50+ miles",
        min_miles: 50.0,
        max_miles: f64::INFINITY,
        surcharge: 55.0,
    },
];

pub fn farthest_band() -> &'static DistanceBand {
    DISTANCE_BANDS.last().expect("distance bands are non-empty")
}

pub fn band_by_id(id: &str) -> Option<&'static DistanceBand> {
    DISTANCE_BANDS.iter().find(|band| band.id == id.trim())
}

/// Select the band containing a mileage figure. Missing or non-finite
/// distances fall to the farthest band so an unknown location is never
/// under-charged; negative figures clamp to zero.
pub fn band_for_miles(miles: Option<f64>) -> &'static DistanceBand {
    let Some(value) = miles.filter(|value| value.is_finite()) else {
        return farthest_band();
    };

    let clamped = value.max(0.0);
    DISTANCE_BANDS
        .iter()
        .find(|band| clamped <= band.max_miles)
        .unwrap_or_else(farthest_band)
}

/// Flat addition by property value: ascending scan, first band whose
/// `max_value` covers the figure wins.
#[derive(Debug, Clone, Copy)]
pub struct ValueBand {
    pub max_value: f64,
    pub addition: f64,
}

pub const VALUE_BANDS: &[ValueBand] = &[
    ValueBand {
        max_value: 250_000.0,
        addition: 0.0,
    },
    ValueBand {
        max_value: 400_000.0,
        addition: 35.0,
    },
    ValueBand {
        max_value: 550_000.0,
        addition: 70.0,
    },
    ValueBand {
        max_value: 750_000.0,
        addition: 115.0,
    },
    ValueBand {
        max_value: 950_000.0,
        addition: 170.0,
    },
    ValueBand {
        max_value: f64::INFINITY,
        addition: 240.0,
    },
];

pub fn value_addition(property_value: f64) -> f64 {
    if !(property_value > 0.0) {
        return 0.0;
    }

    VALUE_BANDS
        .iter()
        .find(|band| property_value <= band.max_value)
        .map(|band| band.addition)
        .unwrap_or(0.0)
}

/// A named flat surcharge, shared by the complexity, property-type,
/// property-age, and extension rule tables. Unknown ids are a silent
/// zero: the calculator is advisory and a missing answer must not block
/// an estimate.
#[derive(Debug, Clone)]
pub struct AdjustmentRule {
    pub id: &'static str,
    pub label: &'static str,
    pub amount: f64,
}

pub const COMPLEXITY_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        id: "standard",
        label: "Standard construction",
        amount: 0.0,
    },
    AdjustmentRule {
        id: "extended",
        label: "Extended / altered",
        amount: 70.0,
    },
    AdjustmentRule {
        id: "period",
        label: "Period / non-standard",
        amount: 130.0,
    },
];

pub const PROPERTY_TYPE_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        id: "detached-house",
        label: "Detached house",
        amount: 35.0,
    },
    AdjustmentRule {
        id: "cottage",
        label: "Cottage",
        amount: 30.0,
    },
    AdjustmentRule {
        id: "semi-detached-house",
        label: "Semi-detached house",
        amount: 20.0,
    },
    AdjustmentRule {
        id: "bungalow",
        label: "Bungalow",
        amount: 20.0,
    },
    AdjustmentRule {
        id: "end-terrace-house",
        label: "End-terrace house",
        amount: 15.0,
    },
    AdjustmentRule {
        id: "mid-terrace-house",
        label: "Mid-terrace house",
        amount: 10.0,
    },
    AdjustmentRule {
        id: "flat-or-apartment",
        label: "Flat or apartment",
        amount: 0.0,
    },
];

pub const PROPERTY_AGE_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        id: "pre-1900",
        label: "Built before 1900",
        amount: 90.0,
    },
    AdjustmentRule {
        id: "victorian-edwardian",
        label: "Victorian or Edwardian era",
        amount: 50.0,
    },
    AdjustmentRule {
        id: "1900-1939",
        label: "Built 1900-1939",
        amount: 35.0,
    },
    AdjustmentRule {
        id: "1940-1979",
        label: "Built 1940-1979",
        amount: 15.0,
    },
    AdjustmentRule {
        id: "1980-1999",
        label: "Built 1980-1999",
        amount: 5.0,
    },
    AdjustmentRule {
        id: "2000-onwards",
        label: "Built after 2000",
        amount: 0.0,
    },
];

pub const EXTENSION_RULES: &[AdjustmentRule] = &[
    AdjustmentRule {
        id: "none",
        label: "No extensions",
        amount: 0.0,
    },
    AdjustmentRule {
        id: "extended",
        label: "Extended",
        amount: 60.0,
    },
    AdjustmentRule {
        id: "converted",
        label: "Loft or garage conversion",
        amount: 45.0,
    },
    AdjustmentRule {
        id: "extended-and-converted",
        label: "Extended and converted",
        amount: 85.0,
    },
];

pub fn rule_in(table: &'static [AdjustmentRule], id: &str) -> Option<&'static AdjustmentRule> {
    table.iter().find(|rule| rule.id == id.trim())
}

/// Discrete add-on services priced per visit.
#[derive(Debug, Clone, Serialize)]
pub struct ExtraService {
    pub id: &'static str,
    pub label: &'static str,
    pub price: f64,
}

pub const EXTRA_SERVICES: &[ExtraService] = &[
    ExtraService {
        id: "valuation",
        label: "Market Valuation Report",
        price: 125.0,
    },
    ExtraService {
        id: "thermal",
        label: "Thermal Imaging Survey",
        price: 110.0,
    },
    ExtraService {
        id: "aerial",
        label: "Aerial Roof Inspection",
        price: 95.0,
    },
    ExtraService {
        id: "drainage",
        label: "Drainage CCTV Check",
        price: 145.0,
    },
];

pub fn extra_by_id(id: &str) -> Option<&'static ExtraService> {
    EXTRA_SERVICES.iter().find(|extra| extra.id == id.trim())
}
