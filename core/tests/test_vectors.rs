//! Verify request rendering and response decoding against the JSON vectors
//! stored in `test-vectors/`.
//!
//! Request vectors describe a starting request plus builder steps and the
//! expected query string. Response vectors pair a raw body with either the
//! expected decode summary or a fragment of the expected decode error.

use geocode_core::{
    decode_response, ApiError, ComponentKind, GeocodingClient, GeocodingRequest, HttpResponse,
    Status,
};

fn kind(value: &serde_json::Value) -> ComponentKind {
    value.as_str().unwrap().parse().unwrap()
}

fn pair(value: &serde_json::Value) -> (String, ComponentKind) {
    let arr = value.as_array().unwrap();
    (arr[0].as_str().unwrap().to_string(), kind(&arr[1]))
}

fn corner(value: &serde_json::Value) -> (f64, f64) {
    let arr = value.as_array().unwrap();
    (arr[0].as_f64().unwrap(), arr[1].as_f64().unwrap())
}

/// Build the starting request of a vector case.
fn start(case: &serde_json::Value) -> GeocodingRequest {
    let api_key = case["api_key"].as_str().unwrap();
    let start = &case["start"];
    if let Some(address) = start.get("address") {
        GeocodingRequest::for_address(address.as_str().unwrap(), api_key)
    } else {
        let pairs = start["components"].as_array().unwrap().iter().map(pair);
        GeocodingRequest::for_components(pairs, api_key)
    }
}

/// Apply a single `{ "with_*": argument }` builder step.
fn apply(request: GeocodingRequest, step: &serde_json::Value) -> GeocodingRequest {
    let (op, arg) = step.as_object().unwrap().iter().next().unwrap();
    match op.as_str() {
        "with_address" => request.with_address(arg.as_str().unwrap()),
        "with_component" => {
            let (value, kind) = pair(arg);
            request.with_component(value, kind)
        }
        "with_language" => request.with_language(arg.as_str().unwrap()),
        "with_region" => request.with_region(arg.as_str().unwrap()),
        "with_bounds" => {
            let corners = arg.as_array().unwrap();
            request.with_bounds(corner(&corners[0]), corner(&corners[1]))
        }
        other => panic!("unknown builder step: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    let base_url = vectors["base_url"].as_str().unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request = case["steps"]
            .as_array()
            .unwrap()
            .iter()
            .fold(start(case), apply);

        let expected_query = case["expected_query"].as_str().unwrap();
        assert_eq!(request.query_string(), expected_query, "{name}: query");
        assert_eq!(request.url(), format!("{base_url}?{expected_query}"), "{name}: url");

        let client = GeocodingClient::new(());
        assert_eq!(client.build_geocode(&request).url, request.url(), "{name}: built request");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let client = GeocodingClient::new(());
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].to_string();

        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.clone(),
        };
        let result = client.parse_geocode(response);

        if let Some(expected_error) = case.get("expected_error") {
            let fragment = expected_error.as_str().unwrap();
            match result {
                Err(ApiError::Decode(err)) => {
                    assert!(err.message().contains(fragment), "{name}: {err}")
                }
                other => panic!("{name}: expected decode error, got {other:?}"),
            }
            assert!(decode_response(&body).is_err(), "{name}: direct decode");
        } else {
            let decoded = result.unwrap();
            let expected = &case["expected"];
            assert_eq!(
                Some(decoded.status),
                Status::from_token(expected["status"].as_str().unwrap()),
                "{name}: status"
            );
            assert_eq!(
                decoded.results.len() as u64,
                expected["results"].as_u64().unwrap(),
                "{name}: result count"
            );
            let place_ids: Vec<&str> = decoded.results.iter().map(|r| r.place_id.as_str()).collect();
            let expected_ids: Vec<&str> = expected["place_ids"]
                .as_array()
                .unwrap()
                .iter()
                .map(|id| id.as_str().unwrap())
                .collect();
            assert_eq!(place_ids, expected_ids, "{name}: place ids");
        }
    }
}
