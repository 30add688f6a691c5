use serde::Deserialize;
use survey_quote::quoting::{normalise_postcode, GeoPoint};

/// Client for the postcodes.io-style geocoding API.
///
/// One attempt per lookup: a full-postcode query first, then a single
/// fallback to the outcode endpoint when the postcode is unknown. Any
/// other upstream failure propagates.
#[derive(Debug, Clone)]
pub(crate) struct PostcodesIoClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LocationKind {
    Postcode,
    Outcode,
}

impl LocationKind {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            LocationKind::Postcode => "postcode",
            LocationKind::Outcode => "outcode",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GeocodedLocation {
    pub(crate) point: GeoPoint,
    pub(crate) kind: LocationKind,
    pub(crate) query: String,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum GeocodeError {
    #[error("postcode or outcode is required")]
    EmptyQuery,
    #[error("unable to geocode {0:?}")]
    NotFound(String),
    #[error("postcode service returned status {0}")]
    Upstream(u16),
    #[error("invalid response from postcode service")]
    InvalidResponse,
    #[error("postcode service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    result: Option<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl PostcodesIoClient {
    pub(crate) fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Resolve a postcode or outcode to coordinates, preferring the full
    /// postcode and falling back to the outward code on a 404.
    pub(crate) async fn locate(&self, raw: &str) -> Result<GeocodedLocation, GeocodeError> {
        let normalised = normalise_postcode(raw);
        if normalised.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let postcode_query: String = normalised.split(' ').collect();
        let outcode_query = normalised
            .split(' ')
            .next()
            .unwrap_or_default()
            .to_string();

        match self.lookup("postcodes", &postcode_query).await? {
            LookupOutcome::Found(point) => {
                return Ok(GeocodedLocation {
                    point,
                    kind: LocationKind::Postcode,
                    query: postcode_query,
                })
            }
            LookupOutcome::NotFound => {}
        }

        match self.lookup("outcodes", &outcode_query).await? {
            LookupOutcome::Found(point) => Ok(GeocodedLocation {
                point,
                kind: LocationKind::Outcode,
                query: outcode_query,
            }),
            LookupOutcome::NotFound => Err(GeocodeError::NotFound(normalised)),
        }
    }

    async fn lookup(&self, segment: &str, query: &str) -> Result<LookupOutcome, GeocodeError> {
        let url = format!("{}/{segment}/{query}", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Ok(LookupOutcome::NotFound);
        }
        if !status.is_success() {
            return Err(GeocodeError::Upstream(status.as_u16()));
        }

        let body: LookupResponse = response
            .json()
            .await
            .map_err(|_| GeocodeError::InvalidResponse)?;

        let result = body.result.ok_or(GeocodeError::InvalidResponse)?;
        match (result.latitude, result.longitude) {
            (Some(latitude), Some(longitude)) => Ok(LookupOutcome::Found(GeoPoint {
                latitude,
                longitude,
            })),
            _ => Err(GeocodeError::InvalidResponse),
        }
    }
}

enum LookupOutcome {
    Found(GeoPoint),
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn coordinates_body(latitude: f64, longitude: f64) -> serde_json::Value {
        serde_json::json!({
            "status": 200,
            "result": { "latitude": latitude, "longitude": longitude }
        })
    }

    #[tokio::test]
    async fn resolves_full_postcodes_directly() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/postcodes/CH54HS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coordinates_body(53.21, -3.05)))
            .mount(&server)
            .await;

        let client = PostcodesIoClient::new(server.uri());
        let location = client.locate("ch5 4hs").await.expect("postcode resolves");

        assert_eq!(location.kind, LocationKind::Postcode);
        assert_eq!(location.query, "CH54HS");
        assert_eq!(location.point.latitude, 53.21);
    }

    #[tokio::test]
    async fn falls_back_to_the_outcode_on_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/postcodes/CH71AA"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/outcodes/CH7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(coordinates_body(53.16, -3.13)))
            .mount(&server)
            .await;

        let client = PostcodesIoClient::new(server.uri());
        let location = client.locate("CH7 1AA").await.expect("outcode fallback");

        assert_eq!(location.kind, LocationKind::Outcode);
        assert_eq!(location.query, "CH7");
    }

    #[tokio::test]
    async fn unknown_locations_are_reported_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = PostcodesIoClient::new(server.uri());
        let error = client.locate("ZZ9 9ZZ").await.expect_err("nothing resolves");
        assert!(matches!(error, GeocodeError::NotFound(_)));
    }

    #[tokio::test]
    async fn upstream_failures_are_not_swallowed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PostcodesIoClient::new(server.uri());
        let error = client.locate("CH5 4HS").await.expect_err("upstream error");
        assert!(matches!(error, GeocodeError::Upstream(500)));
    }

    #[tokio::test]
    async fn blank_queries_are_rejected_before_any_request() {
        let client = PostcodesIoClient::new("http://127.0.0.1:9".to_string());
        let error = client.locate("   ").await.expect_err("blank input");
        assert!(matches!(error, GeocodeError::EmptyQuery));
    }
}
