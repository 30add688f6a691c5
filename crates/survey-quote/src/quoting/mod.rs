//! Quote estimation for the surveying practice: postcode resolution,
//! travel banding, fee calculation, and enquiry payload assembly.

pub mod areas;
pub mod enquiry;
pub mod pricing;
pub mod router;

pub use areas::{
    describe_outcode, distance_from_home, estimate_distance_from_outcode, extract_outcode,
    extract_postcode_from_address, get_areas_for_outcode, match_outcodes, normalise_postcode,
    GeoPoint, OutcodeMatch, OutcodeRecord, ServiceArea, HOME_BASE_POSTCODE,
};
pub use enquiry::{
    ContactDetails, EnquiryError, EnquiryPayload, EnquiryReceipt, EnquiryRequest, EnquirySink,
};
pub use pricing::{
    band_for_miles, calculate_quote, parse_bedrooms, parse_property_value, DistanceBand,
    QuoteBreakdown, QuoteError, QuoteInput, QuotePricingEngine, VAT_RATE,
};
pub use router::quote_router;

/// Half-up rounding to two decimal places, shared by money and mileage maths.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
