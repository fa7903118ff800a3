//! Immutable geocoding request descriptor and its URL rendering.
//!
//! # Design
//! A request always carries an address, a set of component filters, or
//! both. `RequestInfo` encodes that as a closed enum so the "neither"
//! state cannot be built, and the merge rules live in two exhaustive
//! transitions (`add_address`, `add_component`).
//!
//! Builder methods take `self` and return the refined request. Callers
//! that want to branch from one request clone it first; a value someone
//! else holds is never changed underneath them.
//!
//! Component filters are kept in a `BTreeMap` keyed by filter value and
//! rendered in descending key order so URLs are reproducible.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::error::UnknownValue;
use crate::types::{Location, Viewport};

/// Endpoint of the hosted geocoding service.
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Categories accepted by the `components` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Route,
    Locality,
    AdministrativeArea,
    PostalCode,
    Country,
}

impl ComponentKind {
    /// Token used for this kind in the `components` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Route => "route",
            ComponentKind::Locality => "locality",
            ComponentKind::AdministrativeArea => "administrative_area",
            ComponentKind::PostalCode => "postal_code",
            ComponentKind::Country => "country",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "route" => Ok(ComponentKind::Route),
            "locality" => Ok(ComponentKind::Locality),
            "administrative_area" => Ok(ComponentKind::AdministrativeArea),
            "postal_code" => Ok(ComponentKind::PostalCode),
            "country" => Ok(ComponentKind::Country),
            other => Err(UnknownValue {
                table: "component kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Component filters keyed by filter value. Keys are unique; inserting an
/// existing value replaces its kind.
pub type ComponentFilters = BTreeMap<String, ComponentKind>;

/// What the request asks the service to geocode.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestInfo {
    Address(String),
    Components(ComponentFilters),
    AddressAndComponents(String, ComponentFilters),
}

impl RequestInfo {
    /// Set or replace the address, keeping any component filters.
    fn add_address(self, address: String) -> Self {
        match self {
            RequestInfo::Address(_) => RequestInfo::Address(address),
            RequestInfo::Components(components)
            | RequestInfo::AddressAndComponents(_, components) => {
                RequestInfo::AddressAndComponents(address, components)
            }
        }
    }

    /// Insert or overwrite one filter, keeping any address.
    fn add_component(self, value: String, kind: ComponentKind) -> Self {
        match self {
            RequestInfo::Address(address) => {
                RequestInfo::AddressAndComponents(address, BTreeMap::from([(value, kind)]))
            }
            RequestInfo::Components(mut components) => {
                components.insert(value, kind);
                RequestInfo::Components(components)
            }
            RequestInfo::AddressAndComponents(address, mut components) => {
                components.insert(value, kind);
                RequestInfo::AddressAndComponents(address, components)
            }
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            RequestInfo::Address(address) | RequestInfo::AddressAndComponents(address, _) => {
                Some(address)
            }
            RequestInfo::Components(_) => None,
        }
    }

    pub fn components(&self) -> Option<&ComponentFilters> {
        match self {
            RequestInfo::Components(components)
            | RequestInfo::AddressAndComponents(_, components) => Some(components),
            RequestInfo::Address(_) => None,
        }
    }
}

/// A geocoding query. Construct with [`GeocodingRequest::for_address`] or
/// [`GeocodingRequest::for_components`], refine with the `with_*` methods.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodingRequest {
    request_info: RequestInfo,
    bounds: Option<Viewport>,
    language: Option<String>,
    region: Option<String>,
    api_key: String,
}

impl GeocodingRequest {
    pub fn for_address(address: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::from_info(RequestInfo::Address(address.into()), api_key.into())
    }

    /// Build a components-only request. When a filter value appears more
    /// than once the last pair wins.
    pub fn for_components<I, V>(components: I, api_key: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (V, ComponentKind)>,
        V: Into<String>,
    {
        let components = components
            .into_iter()
            .map(|(value, kind)| (value.into(), kind))
            .collect();
        Self::from_info(RequestInfo::Components(components), api_key.into())
    }

    fn from_info(request_info: RequestInfo, api_key: String) -> Self {
        Self {
            request_info,
            bounds: None,
            language: None,
            region: None,
            api_key,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.request_info = self.request_info.add_address(address.into());
        self
    }

    pub fn with_component(mut self, value: impl Into<String>, kind: ComponentKind) -> Self {
        self.request_info = self.request_info.add_component(value.into(), kind);
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Bias results toward a viewport given as `(lat, lng)` corner pairs.
    /// This is a preference, not a filter.
    pub fn with_bounds(mut self, southwest: (f64, f64), northeast: (f64, f64)) -> Self {
        self.bounds = Some(Viewport {
            southwest: Location::new(southwest.0, southwest.1),
            northeast: Location::new(northeast.0, northeast.1),
        });
        self
    }

    pub fn request_info(&self) -> &RequestInfo {
        &self.request_info
    }

    pub fn bounds(&self) -> Option<&Viewport> {
        self.bounds.as_ref()
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Query parameters in their canonical order, unencoded:
    /// `key`, `address`, `components`, `bounds`, `language`, `region`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("key", self.api_key.clone())];

        if let Some(address) = self.request_info.address() {
            pairs.push(("address", address.to_string()));
        }
        if let Some(components) = self.request_info.components() {
            if !components.is_empty() {
                pairs.push(("components", render_components(components)));
            }
        }
        if let Some(bounds) = &self.bounds {
            pairs.push(("bounds", render_bounds(bounds)));
        }
        if let Some(language) = &self.language {
            pairs.push(("language", language.clone()));
        }
        if let Some(region) = &self.region {
            pairs.push(("region", region.clone()));
        }
        pairs
    }

    /// The encoded query string, without the leading `?`.
    pub fn query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in self.query_pairs() {
            serializer.append_pair(name, &value);
        }
        serializer.finish()
    }

    /// Full request URL against the hosted service.
    pub fn url(&self) -> String {
        self.url_with_base(GEOCODE_ENDPOINT)
    }

    /// Full request URL against `base`, which should be the JSON endpoint
    /// itself (no trailing `?`).
    pub fn url_with_base(&self, base: &str) -> String {
        format!("{base}?{}", self.query_string())
    }
}

fn render_components(components: &ComponentFilters) -> String {
    components
        .iter()
        .rev()
        .map(|(value, kind)| format!("{kind}:{value}"))
        .collect::<Vec<_>>()
        .join("|")
}

fn render_bounds(bounds: &Viewport) -> String {
    let Viewport {
        southwest,
        northeast,
    } = bounds;
    format!(
        "{},{}|{},{}",
        southwest.lat, southwest.lng, northeast.lat, northeast.lng
    )
}
