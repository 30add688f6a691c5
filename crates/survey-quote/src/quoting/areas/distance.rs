use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::outcodes::{HOME_BASE_LATITUDE, HOME_BASE_LONGITUDE, OUTCODES};
use super::postcode::canonical_outcode;
use crate::quoting::round2;

const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// A latitude/longitude pair, either from the static outcode table or from
/// a live geocoding lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat_delta = (to.latitude - from.latitude).to_radians();
    let lon_delta = (to.longitude - from.longitude).to_radians();

    let a = (lat_delta / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (lon_delta / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

/// Great-circle miles from the office to an arbitrary point.
pub fn distance_from_home(point: GeoPoint) -> f64 {
    haversine_miles(
        GeoPoint {
            latitude: HOME_BASE_LATITUDE,
            longitude: HOME_BASE_LONGITUDE,
        },
        point,
    )
}

// Distances are a pure function of the static table, so they are computed
// once into a shared map instead of being cached behind a mutable
// singleton.
fn distance_table() -> &'static HashMap<&'static str, f64> {
    static TABLE: OnceLock<HashMap<&'static str, f64>> = OnceLock::new();
    TABLE.get_or_init(|| {
        OUTCODES
            .iter()
            .map(|record| {
                let miles = distance_from_home(GeoPoint {
                    latitude: record.latitude,
                    longitude: record.longitude,
                });
                (record.outcode, round2(miles))
            })
            .collect()
    })
}

/// Miles from the office to a known outcode's reference point, rounded to
/// two decimals. Accepts a bare outcode or a full postcode; unknown
/// outcodes yield `None`.
pub fn estimate_distance_from_outcode(outcode: &str) -> Option<f64> {
    let code = canonical_outcode(outcode)?;
    distance_table().get(code.as_str()).copied()
}
