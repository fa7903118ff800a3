//! Decoding of geocoding response bodies.
//!
//! The lookup tables for the service's string vocabularies live here.
//! `Status` and `LocationType` reject anything they do not know, since a
//! new value there means the API contract changed. `ComponentType` is an
//! open vocabulary the service keeps extending, so unknown strings become
//! `ComponentType::Other`.

use tracing::warn;

use crate::error::{DecodeError, UnknownValue};
use crate::types::{ComponentType, LocationType, Response, Status};

/// Decode a raw JSON body into a `Response`.
///
/// A malformed result anywhere in the document fails the whole decode;
/// there is no partial response.
pub fn decode_response(body: &str) -> Result<Response, DecodeError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(error = %e, "geocode response did not decode");
        DecodeError::from(e)
    })
}

/// Same as [`decode_response`] for a byte body.
pub fn decode_response_slice(body: &[u8]) -> Result<Response, DecodeError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "geocode response did not decode");
        DecodeError::from(e)
    })
}

impl Status {
    pub fn from_token(token: &str) -> Option<Self> {
        let status = match token {
            "OK" => Status::Ok,
            "ZERO_RESULTS" => Status::ZeroResults,
            "OVER_QUERY_LIMIT" => Status::OverQueryLimit,
            "REQUEST_DENIED" => Status::RequestDenied,
            "INVALID_REQUEST" => Status::InvalidRequest,
            "UNKNOWN_ERROR" => Status::UnknownError,
            _ => return None,
        };
        Some(status)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::ZeroResults => "ZERO_RESULTS",
            Status::OverQueryLimit => "OVER_QUERY_LIMIT",
            Status::RequestDenied => "REQUEST_DENIED",
            Status::InvalidRequest => "INVALID_REQUEST",
            Status::UnknownError => "UNKNOWN_ERROR",
        }
    }
}

impl TryFrom<String> for Status {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Status::from_token(&value).ok_or(UnknownValue {
            table: "status",
            value,
        })
    }
}

impl LocationType {
    pub fn from_token(token: &str) -> Option<Self> {
        let location_type = match token {
            "ROOFTOP" => LocationType::Rooftop,
            "RANGE_INTERPOLATED" => LocationType::RangeInterpolated,
            "GEOMETRIC_CENTER" => LocationType::GeometricCenter,
            "APPROXIMATE" => LocationType::Approximate,
            _ => return None,
        };
        Some(location_type)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LocationType::Rooftop => "ROOFTOP",
            LocationType::RangeInterpolated => "RANGE_INTERPOLATED",
            LocationType::GeometricCenter => "GEOMETRIC_CENTER",
            LocationType::Approximate => "APPROXIMATE",
        }
    }
}

impl TryFrom<String> for LocationType {
    type Error = UnknownValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LocationType::from_token(&value).ok_or(UnknownValue {
            table: "location type",
            value,
        })
    }
}

impl ComponentType {
    /// Map a service type string; never fails.
    pub fn from_token(token: &str) -> Self {
        match token {
            "street_address" => ComponentType::StreetAddress,
            "route" => ComponentType::Route,
            "intersection" => ComponentType::Intersection,
            "political" => ComponentType::Political,
            "country" => ComponentType::Country,
            "administrative_area_level_1" => ComponentType::AdministrativeAreaLevel1,
            "administrative_area_level_2" => ComponentType::AdministrativeAreaLevel2,
            "administrative_area_level_3" => ComponentType::AdministrativeAreaLevel3,
            "administrative_area_level_4" => ComponentType::AdministrativeAreaLevel4,
            "administrative_area_level_5" => ComponentType::AdministrativeAreaLevel5,
            "colloquial_area" => ComponentType::ColloquialArea,
            "locality" => ComponentType::Locality,
            "ward" => ComponentType::Ward,
            "sublocality" => ComponentType::Sublocality,
            "sublocality_level_1" => ComponentType::SublocalityLevel1,
            "sublocality_level_2" => ComponentType::SublocalityLevel2,
            "sublocality_level_3" => ComponentType::SublocalityLevel3,
            "sublocality_level_4" => ComponentType::SublocalityLevel4,
            "sublocality_level_5" => ComponentType::SublocalityLevel5,
            "neighborhood" => ComponentType::Neighborhood,
            "premise" => ComponentType::Premise,
            "subpremise" => ComponentType::Subpremise,
            "postal_code" => ComponentType::PostalCode,
            "natural_feature" => ComponentType::NaturalFeature,
            "airport" => ComponentType::Airport,
            "park" => ComponentType::Park,
            "point_of_interest" => ComponentType::PointOfInterest,
            "floor" => ComponentType::Floor,
            "establishment" => ComponentType::Establishment,
            "parking" => ComponentType::Parking,
            "post_box" => ComponentType::PostBox,
            "postal_town" => ComponentType::PostalTown,
            "room" => ComponentType::Room,
            "street_number" => ComponentType::StreetNumber,
            "bus_station" => ComponentType::BusStation,
            "train_station" => ComponentType::TrainStation,
            "transit_station" => ComponentType::TransitStation,
            _ => ComponentType::Other,
        }
    }
}

impl From<String> for ComponentType {
    fn from(value: String) -> Self {
        ComponentType::from_token(&value)
    }
}
