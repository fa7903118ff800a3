//! Client core for the Google Geocoding API.
//!
//! # Overview
//! Builds geocoding request URLs from an immutable `GeocodingRequest`,
//! sends them through a pluggable `Transport`, and decodes the JSON body
//! into a typed `Response`.
//!
//! # Design
//! - `GeocodingRequest` is a value: every builder call returns a new one.
//! - `GeocodingClient` is stateless apart from its endpoint and transport.
//!   Requests can go through `send`, or be split into `build_geocode` and
//!   `parse_geocode` when the caller executes the HTTP round-trip.
//! - Decoding is strict for `Status` and `LocationType` and tolerant for
//!   `ComponentType`.
//! - Service outcomes like `ZERO_RESULTS` are `Status` values, never
//!   errors. Errors are either the transport's own or a `DecodeError`.

pub mod client;
pub mod decode;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use client::GeocodingClient;
pub use decode::{decode_response, decode_response_slice};
pub use error::{ApiError, DecodeError, HttpStatusError, UnknownValue};
pub use http::{HttpRequest, HttpResponse};
pub use request::{ComponentFilters, ComponentKind, GeocodingRequest, RequestInfo, GEOCODE_ENDPOINT};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{
    AddressComponent, ComponentType, Geometry, GeocodingResult, Location, LocationType, Response,
    Status, Viewport,
};
