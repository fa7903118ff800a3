//! A stand-in for the geocoding service that answers from a small fixed
//! set of places. It accepts the same query parameters as the real API
//! and replies in the same JSON shape, always with HTTP 200 and the
//! outcome in `status`.

use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Any request using this key is answered with `OVER_QUERY_LIMIT`.
pub const OVER_QUOTA_KEY: &str = "over-quota";

#[derive(Debug, Default, Deserialize)]
pub struct GeocodeParams {
    pub key: Option<String>,
    pub address: Option<String>,
    pub components: Option<String>,
    pub bounds: Option<String>,
    pub language: Option<String>,
    pub region: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Bounds {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
    pub location_type: String,
    pub viewport: Bounds,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AddressComponent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    pub types: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
    pub types: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeocodeReply {
    pub status: String,
    pub results: Vec<Place>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl GeocodeReply {
    fn status(status: &str) -> Self {
        Self {
            status: status.to_string(),
            results: Vec::new(),
            error_message: None,
        }
    }

    fn error(status: &str, message: &str) -> Self {
        Self {
            error_message: Some(message.to_string()),
            ..Self::status(status)
        }
    }
}

pub fn app() -> Router {
    Router::new()
        .route(GEOCODE_PATH, get(geocode))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock geocoding service listening");
    }
    axum::serve(listener, app()).await
}

async fn geocode(Query(params): Query<GeocodeParams>) -> Json<GeocodeReply> {
    Json(answer(&params, &places()))
}

/// Resolve a query against `places`, mirroring the service's status rules.
pub fn answer(params: &GeocodeParams, places: &[Place]) -> GeocodeReply {
    let key = params.key.as_deref().unwrap_or_default();
    if key.is_empty() {
        return GeocodeReply::error(
            "REQUEST_DENIED",
            "You must use an API key to authenticate each request.",
        );
    }
    if key == OVER_QUOTA_KEY {
        return GeocodeReply::error(
            "OVER_QUERY_LIMIT",
            "You have exceeded your daily request quota for this API.",
        );
    }

    // An address with no alphanumeric words is treated as absent.
    let address = params
        .address
        .as_deref()
        .map(address_words)
        .filter(|words| !words.is_empty());
    let filters = match params.components.as_deref() {
        Some(raw) => match parse_components(raw) {
            Some(filters) => filters,
            None => {
                return GeocodeReply::error("INVALID_REQUEST", "Invalid components parameter.")
            }
        },
        None => Vec::new(),
    };
    if address.is_none() && filters.is_empty() {
        return GeocodeReply::error(
            "INVALID_REQUEST",
            "Invalid request. Missing the 'address' or 'components' parameter.",
        );
    }

    let results: Vec<Place> = places
        .iter()
        .filter(|place| {
            address
                .as_ref()
                .map_or(true, |words| matches_address(place, words))
        })
        .filter(|place| {
            filters
                .iter()
                .all(|(kind, value)| matches_component(place, kind, value))
        })
        .cloned()
        .collect();

    debug!(
        address = ?address,
        filters = filters.len(),
        region = ?params.region,
        results = results.len(),
        "answered geocode query"
    );

    if results.is_empty() {
        return GeocodeReply::status("ZERO_RESULTS");
    }
    GeocodeReply {
        results,
        ..GeocodeReply::status("OK")
    }
}

/// Split `kind:value|kind:value`. Returns `None` when an entry has no `:`.
fn parse_components(raw: &str) -> Option<Vec<(String, String)>> {
    raw.split('|')
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (kind, value) = entry.split_once(':')?;
            Some((kind.to_string(), value.to_string()))
        })
        .collect()
}

/// Lowercased words of `address`, stripped of surrounding punctuation.
fn address_words(address: &str) -> Vec<String> {
    address
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every word must occur in the formatted address, in any order.
fn matches_address(place: &Place, words: &[String]) -> bool {
    let haystack = place.formatted_address.to_lowercase();
    words.iter().all(|word| haystack.contains(word.as_str()))
}

fn matches_component(place: &Place, kind: &str, value: &str) -> bool {
    place.address_components.iter().any(|component| {
        let kind_matches = component.types.iter().any(|t| match kind {
            "administrative_area" => t.starts_with("administrative_area"),
            other => t == other,
        });
        let name_matches = [&component.long_name, &component.short_name]
            .into_iter()
            .flatten()
            .any(|name| name.eq_ignore_ascii_case(value));
        kind_matches && name_matches
    })
}

fn component(long_name: &str, short_name: &str, types: &[&str]) -> AddressComponent {
    AddressComponent {
        long_name: Some(long_name.to_string()),
        short_name: Some(short_name.to_string()),
        types: types.iter().map(|t| t.to_string()).collect(),
    }
}

fn latlng(lat: f64, lng: f64) -> LatLng {
    LatLng { lat, lng }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// The fixed data set the server answers from.
pub fn places() -> Vec<Place> {
    vec![
        Place {
            address_components: vec![
                component("77", "77", &["street_number"]),
                component("Battery Street", "Battery St", &["route"]),
                component("Financial District", "Financial District", &["neighborhood", "political"]),
                component("San Francisco", "SF", &["locality", "political"]),
                component("San Francisco County", "San Francisco County", &["administrative_area_level_2", "political"]),
                component("California", "CA", &["administrative_area_level_1", "political"]),
                component("United States", "US", &["country", "political"]),
                component("94111", "94111", &["postal_code"]),
            ],
            formatted_address: "77 Battery St, San Francisco, CA 94111, USA".to_string(),
            geometry: Geometry {
                location: latlng(37.7930659, -122.3989264),
                location_type: "ROOFTOP".to_string(),
                viewport: Bounds {
                    northeast: latlng(37.7944148802915, -122.3975774197085),
                    southwest: latlng(37.7917169197085, -122.4002753802915),
                },
            },
            place_id: "ChIJ9Va0XGKAhYARBxzDzRDX0p0".to_string(),
            types: strings(&["street_address"]),
        },
        Place {
            address_components: vec![
                component("Toledo", "Toledo", &["locality", "political"]),
                component("Toledo", "TO", &["administrative_area_level_2", "political"]),
                component("Castilla-La Mancha", "CM", &["administrative_area_level_1", "political"]),
                component("Spain", "ES", &["country", "political"]),
            ],
            formatted_address: "Toledo, Spain".to_string(),
            geometry: Geometry {
                location: latlng(39.8628316, -4.027323099999999),
                location_type: "APPROXIMATE".to_string(),
                viewport: Bounds {
                    northeast: latlng(39.88605099999999, -3.9192423),
                    southwest: latlng(39.8158059, -4.0918001),
                },
            },
            place_id: "ChIJ8f21C60Lag0R_q11auhbf8Y".to_string(),
            types: strings(&["locality", "political"]),
        },
        Place {
            address_components: vec![
                component("Toledo", "Toledo", &["locality", "political"]),
                component("Lucas County", "Lucas County", &["administrative_area_level_2", "political"]),
                component("Ohio", "OH", &["administrative_area_level_1", "political"]),
                component("United States", "US", &["country", "political"]),
            ],
            formatted_address: "Toledo, OH, USA".to_string(),
            geometry: Geometry {
                location: latlng(41.6528052, -83.5378674),
                location_type: "APPROXIMATE".to_string(),
                viewport: Bounds {
                    northeast: latlng(41.732844, -83.454229),
                    southwest: latlng(41.580266, -83.69423700000002),
                },
            },
            place_id: "ChIJeU4e_C2HO4gRRcM6RZ_IPHw".to_string(),
            types: strings(&["locality", "political"]),
        },
        Place {
            address_components: vec![
                component("Belmont", "Belmont", &["locality", "political"]),
                component("Middlesex County", "Middlesex County", &["administrative_area_level_2", "political"]),
                component("Massachusetts", "MA", &["administrative_area_level_1", "political"]),
                component("United States", "US", &["country", "political"]),
                AddressComponent {
                    long_name: None,
                    short_name: None,
                    types: strings(&["town_square"]),
                },
            ],
            formatted_address: "Belmont, MA, USA".to_string(),
            geometry: Geometry {
                location: latlng(42.3959302, -71.1786655),
                location_type: "GEOMETRIC_CENTER".to_string(),
                viewport: Bounds {
                    northeast: latlng(42.4173119, -71.14484479999999),
                    southwest: latlng(42.3714191, -71.2012499),
                },
            },
            place_id: "ChIJ_Rw3vQF344kRVmFJrYuPxi8".to_string(),
            types: strings(&["locality", "political"]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(key: &str) -> GeocodeParams {
        GeocodeParams {
            key: Some(key.to_string()),
            ..GeocodeParams::default()
        }
    }

    #[test]
    fn address_words_match_in_any_order() {
        let reply = answer(
            &GeocodeParams {
                address: Some("battery 77".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].place_id, "ChIJ9Va0XGKAhYARBxzDzRDX0p0");
    }

    #[test]
    fn punctuation_in_address_is_ignored() {
        let reply = answer(
            &GeocodeParams {
                address: Some("77 Battery St.".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results.len(), 1);
    }

    #[test]
    fn punctuation_only_address_is_invalid() {
        let reply = answer(
            &GeocodeParams {
                address: Some("...".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "INVALID_REQUEST");
        assert!(reply.results.is_empty());
    }

    #[test]
    fn punctuation_only_address_defers_to_components() {
        let reply = answer(
            &GeocodeParams {
                address: Some(" , . ".to_string()),
                components: Some("country:Spain".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].formatted_address, "Toledo, Spain");
    }

    #[test]
    fn components_narrow_results() {
        let reply = answer(
            &GeocodeParams {
                address: Some("Toledo".to_string()),
                components: Some("country:Spain".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "OK");
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].formatted_address, "Toledo, Spain");
    }

    #[test]
    fn administrative_area_matches_any_level() {
        let reply = answer(
            &GeocodeParams {
                components: Some("administrative_area:Ohio".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.results.len(), 1);
        assert_eq!(reply.results[0].formatted_address, "Toledo, OH, USA");
    }

    #[test]
    fn short_names_match_components() {
        let reply = answer(
            &GeocodeParams {
                components: Some("country:US|locality:Belmont".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.results.len(), 1);
    }

    #[test]
    fn missing_key_is_denied() {
        let reply = answer(
            &GeocodeParams {
                address: Some("Toledo".to_string()),
                ..GeocodeParams::default()
            },
            &places(),
        );
        assert_eq!(reply.status, "REQUEST_DENIED");
        assert!(reply.error_message.is_some());
        assert!(reply.results.is_empty());
    }

    #[test]
    fn over_quota_key() {
        let reply = answer(&params(OVER_QUOTA_KEY), &places());
        assert_eq!(reply.status, "OVER_QUERY_LIMIT");
    }

    #[test]
    fn nothing_to_geocode_is_invalid() {
        let reply = answer(&params("ABCD"), &places());
        assert_eq!(reply.status, "INVALID_REQUEST");
    }

    #[test]
    fn malformed_components_are_invalid() {
        let reply = answer(
            &GeocodeParams {
                components: Some("Spain".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "INVALID_REQUEST");
    }

    #[test]
    fn no_match_is_zero_results() {
        let reply = answer(
            &GeocodeParams {
                address: Some("Atlantis".to_string()),
                ..params("ABCD")
            },
            &places(),
        );
        assert_eq!(reply.status, "ZERO_RESULTS");
        assert!(reply.error_message.is_none());
    }

    #[test]
    fn absent_names_are_not_serialized() {
        let json = serde_json::to_value(&places()[3]).unwrap();
        let unnamed = &json["address_components"][4];
        assert!(unnamed.get("long_name").is_none());
        assert_eq!(unnamed["types"][0], "town_square");
    }
}
