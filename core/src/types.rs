//! Response model for the geocoding API.
//!
//! # Design
//! Every type here is plain owned data. The three service-defined string
//! vocabularies go through lookup tables in `decode`: `Status` and
//! `LocationType` are strict (an unknown string fails the decode), while
//! `ComponentType` is tolerant and folds anything unrecognised into
//! `ComponentType::Other`.

use std::collections::BTreeSet;

use serde::Deserialize;

/// Coarse outcome of a whole geocoding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Status {
    Ok,
    ZeroResults,
    OverQueryLimit,
    RequestDenied,
    InvalidRequest,
    UnknownError,
}

/// Precision of a result's `location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LocationType {
    /// Exact match down to street address precision.
    Rooftop,
    /// Interpolated between two precise points, usually along a road.
    RangeInterpolated,
    /// Geometric center of a line or region.
    GeometricCenter,
    Approximate,
}

/// What kind of entity a result or address component is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "String")]
pub enum ComponentType {
    StreetAddress,
    Route,
    Intersection,
    Political,
    Country,
    AdministrativeAreaLevel1,
    AdministrativeAreaLevel2,
    AdministrativeAreaLevel3,
    AdministrativeAreaLevel4,
    AdministrativeAreaLevel5,
    ColloquialArea,
    Locality,
    Ward,
    Sublocality,
    SublocalityLevel1,
    SublocalityLevel2,
    SublocalityLevel3,
    SublocalityLevel4,
    SublocalityLevel5,
    Neighborhood,
    Premise,
    Subpremise,
    PostalCode,
    NaturalFeature,
    Airport,
    Park,
    PointOfInterest,
    Floor,
    Establishment,
    Parking,
    PostBox,
    PostalTown,
    Room,
    StreetNumber,
    BusStation,
    TrainStation,
    TransitStation,
    /// Any type string not listed above.
    Other,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A bounding box given by its southwest and northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Viewport {
    pub northeast: Location,
    pub southwest: Location,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: Location,
    pub location_type: LocationType,
    /// Recommended display region for the result.
    pub viewport: Viewport,
    /// Bounding box fully containing the result, when the service knows one.
    #[serde(default)]
    pub bounds: Option<Viewport>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressComponent {
    #[serde(default)]
    pub long_name: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    pub types: BTreeSet<ComponentType>,
}

/// A single geocoding match.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GeocodingResult {
    pub address_components: Vec<AddressComponent>,
    pub formatted_address: String,
    pub geometry: Geometry,
    pub place_id: String,
    pub types: BTreeSet<ComponentType>,
    /// Set by the service when it could not match the whole request.
    #[serde(default)]
    pub partial_match: bool,
}

/// A decoded geocoding response. `results` is empty unless `status` is
/// `Status::Ok`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    pub status: Status,
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
    /// Human-readable detail the service attaches to non-OK statuses.
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
