//! Geocoding client: binds an endpoint to a transport.
//!
//! # Design
//! `GeocodingClient` holds only the endpoint URL and a transport, and
//! carries no mutable state between calls. Two ways to run a request:
//!
//! - `send` renders the URL, hands it to the `Transport`, and decodes the
//!   body.
//! - `build_geocode` / `parse_geocode` split the exchange so the caller can
//!   execute the HTTP round-trip itself. Use `()` as the transport when
//!   only this pair is needed.

use std::fmt;

use tracing::{debug, warn};

use crate::decode::decode_response;
use crate::error::{ApiError, HttpStatusError};
use crate::http::{HttpRequest, HttpResponse};
use crate::request::{GeocodingRequest, GEOCODE_ENDPOINT};
use crate::transport::Transport;
use crate::types::Response;

#[derive(Debug, Clone)]
pub struct GeocodingClient<T> {
    base_url: String,
    transport: T,
}

impl<T> GeocodingClient<T> {
    /// Client for the hosted geocoding service.
    pub fn new(transport: T) -> Self {
        Self::with_base_url(GEOCODE_ENDPOINT, transport)
    }

    /// Client for another endpoint serving the same API, such as a proxy
    /// or a local mock. `base_url` is the JSON endpoint itself.
    pub fn with_base_url(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn request_url(&self, request: &GeocodingRequest) -> String {
        request.url_with_base(&self.base_url)
    }

    pub fn build_geocode(&self, request: &GeocodingRequest) -> HttpRequest {
        HttpRequest {
            url: self.request_url(request),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Decode a response obtained by executing `build_geocode`'s request.
    /// Any non-2xx status is a transport error; the service reports its
    /// own failures with 200 and a non-OK `status`.
    pub fn parse_geocode(
        &self,
        response: HttpResponse,
    ) -> Result<Response, ApiError<HttpStatusError>> {
        if !(200..300).contains(&response.status) {
            return Err(ApiError::Transport(HttpStatusError {
                status: response.status,
                body: response.body,
            }));
        }
        Ok(decode_response(&response.body)?)
    }
}

impl<T> GeocodingClient<T>
where
    T: Transport,
    T::Error: fmt::Display,
{
    pub async fn send(&self, request: &GeocodingRequest) -> Result<Response, ApiError<T::Error>> {
        let url = self.request_url(request);
        debug!(
            base_url = %self.base_url,
            address = ?request.request_info().address(),
            "sending geocode request"
        );

        let body = self.transport.get(&url).await.map_err(|e| {
            warn!(error = %e, "geocode transport failed");
            ApiError::Transport(e)
        })?;

        let response = decode_response(&body)?;
        debug!(
            status = response.status.as_str(),
            results = response.results.len(),
            "geocode response decoded"
        );
        Ok(response)
    }
}
