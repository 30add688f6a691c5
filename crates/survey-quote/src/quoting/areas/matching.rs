use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Serialize;

use super::distance::estimate_distance_from_outcode;
use super::outcodes::{outcode_by_code, OutcodeRecord, ServiceArea, OUTCODES, SERVICE_AREAS};
use super::postcode::canonical_outcode;

pub const DEFAULT_MATCH_LIMIT: usize = 6;

fn areas_by_outcode() -> &'static HashMap<&'static str, Vec<&'static ServiceArea>> {
    static MAP: OnceLock<HashMap<&'static str, Vec<&'static ServiceArea>>> = OnceLock::new();
    MAP.get_or_init(|| {
        let mut map: HashMap<&'static str, Vec<&'static ServiceArea>> = HashMap::new();
        for area in SERVICE_AREAS {
            map.entry(area.outcode).or_default().push(area);
        }
        map
    })
}

/// Localities served within an outcode, in table declaration order.
/// Accepts a bare outcode or a full postcode; unknown input yields an
/// empty list.
pub fn get_areas_for_outcode(outcode_or_postcode: &str) -> Vec<&'static ServiceArea> {
    let Some(code) = canonical_outcode(outcode_or_postcode) else {
        return Vec::new();
    };

    areas_by_outcode()
        .get(code.as_str())
        .map(|areas| areas.clone())
        .unwrap_or_default()
}

/// One-line coverage summary for an outcode, e.g.
/// "CH4 covers Broughton, Saltney, Higher Kinnerton, Pulford".
pub fn describe_outcode(outcode: &str) -> Option<String> {
    let code = canonical_outcode(outcode)?;
    let record = outcode_by_code(&code)?;
    let areas = get_areas_for_outcode(record.outcode);

    if areas.is_empty() {
        return Some(format!("{} ({})", record.outcode, record.label));
    }

    let labels: Vec<&str> = areas.iter().map(|area| area.label).collect();
    Some(format!("{} covers {}", record.outcode, labels.join(", ")))
}

/// An outcode surfaced by free-text search, with its office distance.
#[derive(Debug, Clone, Serialize)]
pub struct OutcodeMatch {
    #[serde(flatten)]
    pub record: &'static OutcodeRecord,
    pub distance_miles: f64,
}

/// Free-text outcode search over codes, labels, and area names.
///
/// An empty query returns the `limit` outcodes closest to the office,
/// home outcode first. Otherwise matches are ranked by the earliest
/// substring position found across an outcode's haystack strings, with
/// `(priority, distance, outcode)` breaking ties.
pub fn match_outcodes(query: &str, limit: usize) -> Vec<OutcodeMatch> {
    let needle = query.trim().to_lowercase();

    let mut ranked: Vec<(usize, &'static OutcodeRecord, f64)> = OUTCODES
        .iter()
        .filter_map(|record| {
            let distance = estimate_distance_from_outcode(record.outcode).unwrap_or(f64::MAX);
            if needle.is_empty() {
                return Some((0, record, distance));
            }
            earliest_match_index(record, &needle).map(|index| (index, record, distance))
        })
        .collect();

    ranked.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then(a.1.priority.cmp(&b.1.priority))
            .then(a.2.partial_cmp(&b.2).unwrap_or(Ordering::Equal))
            .then(a.1.outcode.cmp(b.1.outcode))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(_, record, distance_miles)| OutcodeMatch {
            record,
            distance_miles,
        })
        .collect()
}

fn earliest_match_index(record: &OutcodeRecord, needle: &str) -> Option<usize> {
    let mut haystacks: Vec<String> = Vec::with_capacity(record.areas.len() + 2);
    haystacks.push(record.outcode.to_lowercase());
    haystacks.push(record.label.to_lowercase());
    haystacks.extend(record.areas.iter().map(|area| area.to_lowercase()));

    haystacks
        .iter()
        .filter_map(|haystack| haystack.find(needle))
        .min()
}
