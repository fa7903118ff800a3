//! HTTP exchange types for callers that perform the I/O themselves.
//!
//! # Design
//! These types describe the single GET the geocoding API needs as plain
//! data. `GeocodingClient::build_geocode` produces an `HttpRequest`; the
//! caller executes it however it likes and hands the result back to
//! `GeocodingClient::parse_geocode` as an `HttpResponse`. The async
//! `Transport` path in `transport` is the alternative when the caller
//! would rather let the client drive the request.

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the caller after executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
