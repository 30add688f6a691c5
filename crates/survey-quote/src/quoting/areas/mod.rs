//! Outcode and service-area resolution.
//!
//! The practice covers a fixed set of UK outward codes around its Deeside
//! base. Everything here is derived from static tables defined at process
//! start, so the resolver is pure: malformed input degrades to
//! `None`/empty rather than raising.

mod distance;
mod matching;
mod outcodes;
mod postcode;

pub use distance::{distance_from_home, estimate_distance_from_outcode, GeoPoint};
pub use matching::{
    describe_outcode, get_areas_for_outcode, match_outcodes, OutcodeMatch, DEFAULT_MATCH_LIMIT,
};
pub use outcodes::{
    OutcodeRecord, ServiceArea, HOME_BASE_LATITUDE, HOME_BASE_LONGITUDE, HOME_BASE_POSTCODE,
    OUTCODES, SERVICE_AREAS,
};
pub use postcode::{extract_outcode, extract_postcode_from_address, normalise_postcode};

pub(crate) use postcode::canonical_outcode;
