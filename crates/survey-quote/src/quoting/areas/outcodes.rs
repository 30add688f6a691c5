use serde::Serialize;

/// Office reference point, used for every travel-distance estimate.
pub const HOME_BASE_LATITUDE: f64 = 53.210058;
pub const HOME_BASE_LONGITUDE: f64 = -3.053622;
pub const HOME_BASE_POSTCODE: &str = "CH5 4HS";

/// A UK outward code the practice serves, with its reference coordinates.
///
/// `priority` ranks outcodes by proximity to the office (0 = home outcode)
/// and is the first tie-break when search results are ordered. `areas`
/// lists the place names used for free-text matching.
#[derive(Debug, Clone, Serialize)]
pub struct OutcodeRecord {
    pub outcode: &'static str,
    pub label: &'static str,
    #[serde(skip)]
    pub latitude: f64,
    #[serde(skip)]
    pub longitude: f64,
    #[serde(skip)]
    pub priority: u8,
    #[serde(skip)]
    pub areas: &'static [&'static str],
}

pub const OUTCODES: &[OutcodeRecord] = &[
    OutcodeRecord {
        outcode: "CH5",
        label: "Deeside",
        latitude: 53.2047,
        longitude: -3.0280,
        priority: 0,
        areas: &[
            "Connah's Quay",
            "Shotton",
            "Queensferry",
            "Hawarden",
            "Ewloe",
            "Sandycroft",
        ],
    },
    OutcodeRecord {
        outcode: "CH6",
        label: "Flint",
        latitude: 53.2480,
        longitude: -3.1330,
        priority: 1,
        areas: &["Oakenholt", "Bagillt"],
    },
    OutcodeRecord {
        outcode: "CH7",
        label: "Mold & Buckley",
        latitude: 53.1660,
        longitude: -3.1290,
        priority: 2,
        areas: &["Mold", "Buckley", "Mynydd Isa", "Northop", "Sychdyn"],
    },
    OutcodeRecord {
        outcode: "CH4",
        label: "Broughton & Saltney",
        latitude: 53.1740,
        longitude: -2.9380,
        priority: 3,
        areas: &["Broughton", "Saltney", "Higher Kinnerton", "Pulford"],
    },
    OutcodeRecord {
        outcode: "CH64",
        label: "Neston",
        latitude: 53.2890,
        longitude: -3.0550,
        priority: 4,
        areas: &["Parkgate", "Little Neston", "Willaston"],
    },
    OutcodeRecord {
        outcode: "CH66",
        label: "Great Sutton",
        latitude: 53.2680,
        longitude: -2.9350,
        priority: 5,
        areas: &["Little Sutton", "Childer Thornton"],
    },
    OutcodeRecord {
        outcode: "CH1",
        label: "Chester City",
        latitude: 53.1978,
        longitude: -2.8954,
        priority: 6,
        areas: &["Chester", "Blacon", "City Centre"],
    },
    OutcodeRecord {
        outcode: "CH2",
        label: "Chester North",
        latitude: 53.2130,
        longitude: -2.8787,
        priority: 7,
        areas: &["Hoole", "Upton", "Newton"],
    },
    OutcodeRecord {
        outcode: "CH65",
        label: "Ellesmere Port",
        latitude: 53.2790,
        longitude: -2.9010,
        priority: 8,
        areas: &["Whitby", "Overpool"],
    },
    OutcodeRecord {
        outcode: "CH62",
        label: "Bromborough",
        latitude: 53.3180,
        longitude: -2.9770,
        priority: 9,
        areas: &["Port Sunlight", "Spital"],
    },
    OutcodeRecord {
        outcode: "CH8",
        label: "Holywell",
        latitude: 53.2740,
        longitude: -3.2220,
        priority: 10,
        areas: &["Greenfield", "Mostyn", "Carmel"],
    },
    OutcodeRecord {
        outcode: "CH60",
        label: "Heswall",
        latitude: 53.3280,
        longitude: -3.0990,
        priority: 11,
        areas: &["Gayton"],
    },
    OutcodeRecord {
        outcode: "CH63",
        label: "Bebington",
        latitude: 53.3370,
        longitude: -3.0090,
        priority: 12,
        areas: &["Thornton Hough", "Clatterbridge"],
    },
    OutcodeRecord {
        outcode: "LL12",
        label: "Rossett & Gresford",
        latitude: 53.0900,
        longitude: -2.9600,
        priority: 13,
        areas: &["Rossett", "Marford", "Gresford", "Llay"],
    },
    OutcodeRecord {
        outcode: "CH3",
        label: "Chester Villages",
        latitude: 53.1700,
        longitude: -2.8130,
        priority: 14,
        areas: &[
            "Waverton",
            "Tarvin",
            "Christleton",
            "Tattenhall",
            "Boughton",
            "Vicars Cross",
            "Aldford",
            "Farndon",
        ],
    },
    OutcodeRecord {
        outcode: "LL13",
        label: "Wrexham East",
        latitude: 53.0330,
        longitude: -2.9430,
        priority: 15,
        areas: &["Holt", "Bangor-on-Dee"],
    },
    OutcodeRecord {
        outcode: "WA6",
        label: "Frodsham",
        latitude: 53.2880,
        longitude: -2.7190,
        priority: 16,
        areas: &["Helsby", "Kingsley"],
    },
    OutcodeRecord {
        outcode: "LL14",
        label: "Ruabon",
        latitude: 52.9860,
        longitude: -3.0410,
        priority: 17,
        areas: &["Cefn Mawr", "Rhosllanerchrugog"],
    },
    OutcodeRecord {
        outcode: "CW6",
        label: "Tarporley",
        latitude: 53.1560,
        longitude: -2.6680,
        priority: 18,
        areas: &["Tarporley", "Kelsall", "Cotebrook"],
    },
    OutcodeRecord {
        outcode: "WA7",
        label: "Runcorn",
        latitude: 53.3280,
        longitude: -2.6960,
        priority: 19,
        areas: &["Sandymoor", "Preston Brook"],
    },
    OutcodeRecord {
        outcode: "WA8",
        label: "Widnes",
        latitude: 53.3620,
        longitude: -2.7300,
        priority: 20,
        areas: &["Cronton", "Hough Green"],
    },
    OutcodeRecord {
        outcode: "SY14",
        label: "Malpas",
        latitude: 53.0190,
        longitude: -2.7650,
        priority: 21,
        areas: &["Tilston", "Threapwood", "Shocklach"],
    },
    OutcodeRecord {
        outcode: "SY13",
        label: "Whitchurch",
        latitude: 52.9660,
        longitude: -2.6870,
        priority: 22,
        areas: &["Ash", "Alkington"],
    },
];

pub fn outcode_by_code(code: &str) -> Option<&'static OutcodeRecord> {
    OUTCODES
        .iter()
        .find(|record| record.outcode.eq_ignore_ascii_case(code.trim()))
}

/// A named locality linked to its outward code. One outcode hosts several
/// localities and a locality's aliases may repeat across entries, so the
/// table is ordered by how prominently each area features in enquiries.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceArea {
    pub label: &'static str,
    pub outcode: &'static str,
    #[serde(skip)]
    pub aliases: &'static [&'static str],
}

pub const SERVICE_AREAS: &[ServiceArea] = &[
    ServiceArea {
        label: "Connah's Quay",
        outcode: "CH5",
        aliases: &["Connahs Quay", "Deeside", "Shotton", "Queensferry"],
    },
    ServiceArea {
        label: "Hawarden",
        outcode: "CH5",
        aliases: &["Mancot", "Aston Hill"],
    },
    ServiceArea {
        label: "Ewloe",
        outcode: "CH5",
        aliases: &[],
    },
    ServiceArea {
        label: "Sandycroft",
        outcode: "CH5",
        aliases: &["Penyffordd"],
    },
    ServiceArea {
        label: "Flint",
        outcode: "CH6",
        aliases: &["Oakenholt", "Bagillt"],
    },
    ServiceArea {
        label: "Buckley",
        outcode: "CH7",
        aliases: &["Drury", "Mynydd Isa"],
    },
    ServiceArea {
        label: "Mold",
        outcode: "CH7",
        aliases: &["New Brighton", "Sychdyn"],
    },
    ServiceArea {
        label: "Northop",
        outcode: "CH7",
        aliases: &["Northop Hall"],
    },
    ServiceArea {
        label: "Broughton",
        outcode: "CH4",
        aliases: &["Bretton"],
    },
    ServiceArea {
        label: "Saltney",
        outcode: "CH4",
        aliases: &[],
    },
    ServiceArea {
        label: "Higher Kinnerton",
        outcode: "CH4",
        aliases: &["Lower Kinnerton"],
    },
    ServiceArea {
        label: "Pulford",
        outcode: "CH4",
        aliases: &["Dodleston"],
    },
    ServiceArea {
        label: "Chester",
        outcode: "CH1",
        aliases: &["Handbridge", "Curzon Park", "City Centre"],
    },
    ServiceArea {
        label: "Hoole",
        outcode: "CH2",
        aliases: &["Upton", "Newton"],
    },
    ServiceArea {
        label: "Waverton",
        outcode: "CH3",
        aliases: &["Saighton", "Huntington"],
    },
    ServiceArea {
        label: "Boughton",
        outcode: "CH3",
        aliases: &[],
    },
    ServiceArea {
        label: "Vicars Cross",
        outcode: "CH3",
        aliases: &["Guilden Sutton"],
    },
    ServiceArea {
        label: "Tarvin",
        outcode: "CH3",
        aliases: &["Christleton", "Tattenhall", "Huxley"],
    },
    ServiceArea {
        label: "Aldford",
        outcode: "CH3",
        aliases: &["Farndon"],
    },
    ServiceArea {
        label: "Holywell",
        outcode: "CH8",
        aliases: &["Greenfield", "Mostyn", "Carmel"],
    },
    ServiceArea {
        label: "Neston",
        outcode: "CH64",
        aliases: &["Parkgate", "Little Neston", "Willaston"],
    },
    ServiceArea {
        label: "Ellesmere Port",
        outcode: "CH65",
        aliases: &["Whitby", "Overpool"],
    },
    ServiceArea {
        label: "Great Sutton",
        outcode: "CH66",
        aliases: &["Little Sutton", "Childer Thornton"],
    },
    ServiceArea {
        label: "Heswall",
        outcode: "CH60",
        aliases: &["Gayton"],
    },
    ServiceArea {
        label: "Bebington",
        outcode: "CH63",
        aliases: &["Thornton Hough", "Clatterbridge"],
    },
    ServiceArea {
        label: "Bromborough",
        outcode: "CH62",
        aliases: &["Port Sunlight", "Spital"],
    },
    ServiceArea {
        label: "Rossett",
        outcode: "LL12",
        aliases: &["Marford", "Gresford", "Llay"],
    },
    ServiceArea {
        label: "Holt",
        outcode: "LL13",
        aliases: &["Bangor-on-Dee"],
    },
    ServiceArea {
        label: "Ruabon",
        outcode: "LL14",
        aliases: &["Cefn Mawr", "Rhosllanerchrugog"],
    },
    ServiceArea {
        label: "Tarporley",
        outcode: "CW6",
        aliases: &["Kelsall", "Cotebrook"],
    },
    ServiceArea {
        label: "Frodsham",
        outcode: "WA6",
        aliases: &["Helsby", "Kingsley"],
    },
    ServiceArea {
        label: "Runcorn",
        outcode: "WA7",
        aliases: &["Sandymoor", "Preston Brook"],
    },
    ServiceArea {
        label: "Widnes",
        outcode: "WA8",
        aliases: &["Cronton", "Hough Green"],
    },
    ServiceArea {
        label: "Malpas",
        outcode: "SY14",
        aliases: &["Tilston", "Threapwood", "Shocklach"],
    },
    ServiceArea {
        label: "Whitchurch",
        outcode: "SY13",
        aliases: &["Ash", "Alkington"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcodes_are_unique() {
        for (index, record) in OUTCODES.iter().enumerate() {
            assert!(
                OUTCODES
                    .iter()
                    .skip(index + 1)
                    .all(|other| other.outcode != record.outcode),
                "duplicate outcode {}",
                record.outcode
            );
        }
    }

    #[test]
    fn every_service_area_links_to_a_known_outcode() {
        for area in SERVICE_AREAS {
            assert!(
                outcode_by_code(area.outcode).is_some(),
                "{} references unknown outcode {}",
                area.label,
                area.outcode
            );
        }
    }

    #[test]
    fn priorities_rank_proximity_without_gaps() {
        let mut priorities: Vec<u8> = OUTCODES.iter().map(|record| record.priority).collect();
        priorities.sort_unstable();
        let expected: Vec<u8> = (0..OUTCODES.len() as u8).collect();
        assert_eq!(priorities, expected);
        assert_eq!(outcode_by_code("CH5").map(|r| r.priority), Some(0));
    }
}
