// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.

use derive_getters::Getters;
use derive_more::Constructor;
use rides_core::model::{ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page returned by listings when the caller does not ask for one.
pub(crate) const DEFAULT_PAGE: i64 = 1;

/// Number of rides per page returned by listings when the caller does not ask for a limit.
pub(crate) const DEFAULT_LIMIT: i64 = 10;

/// A latitude in degrees, guaranteed to be in the [-90, 90] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Latitude(f64);

impl Latitude {
    /// Creates a new latitude from an untrusted `value`, making sure it is in range.
    pub(crate) fn new(value: f64) -> ModelResult<Self> {
        if !(-90.0..=90.0).contains(&value) {
            return Err(ModelError("must be between -90 and 90 degrees".to_owned()));
        }
        Ok(Self(value))
    }

    /// Returns the latitude as a raw number.
    pub(crate) fn as_f64(&self) -> f64 {
        self.0
    }
}

/// A longitude in degrees, guaranteed to be in the [-180, 180] range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Longitude(f64);

impl Longitude {
    /// Creates a new longitude from an untrusted `value`, making sure it is in range.
    pub(crate) fn new(value: f64) -> ModelResult<Self> {
        if !(-180.0..=180.0).contains(&value) {
            return Err(ModelError("must be between -180 and 180 degrees".to_owned()));
        }
        Ok(Self(value))
    }

    /// Returns the longitude as a raw number.
    pub(crate) fn as_f64(&self) -> f64 {
        self.0
    }
}

/// The name of a person or a vehicle involved in a ride.
///
/// Names are trimmed and have their markup characters escaped at construction time so that they
/// can be stored and echoed back as-is.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Name(String);

impl Name {
    /// Creates a new name from an untrusted string `s`, sanitizing it.
    pub(crate) fn new<S: AsRef<str>>(s: S) -> ModelResult<Self> {
        let s = s.as_ref().trim();
        if s.is_empty() {
            return Err(ModelError("should not be empty".to_owned()));
        }
        Ok(Self(escape(s)))
    }

    /// Returns a string view of the sanitized name.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

/// Replaces the characters in `s` that have special meaning in HTML with their entities.
fn escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            ch => escaped.push(ch),
        }
    }
    escaped
}

/// Identifier of a ride, assigned by the database on insertion.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct RideId(i64);

impl RideId {
    /// Creates a ride identifier from its raw database representation.
    pub(crate) fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the identifier as an `i64`.
    pub(crate) fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RideId {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s.parse::<i64>() {
            Ok(id) => Ok(Self(id)),
            Err(e) => Err(ModelError(format!("Invalid ride id '{}': {}", s, e))),
        }
    }
}

/// A validated request to record a new ride.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Clone, Debug))]
pub(crate) struct NewRide {
    /// Latitude where the ride started.
    start_lat: Latitude,

    /// Longitude where the ride started.
    start_long: Longitude,

    /// Latitude where the ride ended.
    end_lat: Latitude,

    /// Longitude where the ride ended.
    end_long: Longitude,

    /// Name of the passenger.
    rider_name: Name,

    /// Name of the driver.
    driver_name: Name,

    /// Description of the vehicle used for the ride.
    driver_vehicle: Name,
}

/// A ride as persisted in the database.
///
/// The serialized form uses the names of the database columns.
#[derive(Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(rename_all = "camelCase")]
pub(crate) struct Ride {
    /// Identifier of the ride.
    #[serde(rename = "rideID")]
    id: RideId,

    /// Latitude where the ride started.
    start_lat: f64,

    /// Longitude where the ride started.
    start_long: f64,

    /// Latitude where the ride ended.
    end_lat: f64,

    /// Longitude where the ride ended.
    end_long: f64,

    /// Name of the passenger.
    rider_name: String,

    /// Name of the driver.
    driver_name: String,

    /// Description of the vehicle used for the ride.
    driver_vehicle: String,
}

/// Window of rides to return from a listing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Pagination {
    /// Maximum number of rides to return.
    limit: i64,

    /// Number of rides to skip from the beginning of the listing.
    offset: i64,
}

impl Pagination {
    /// Computes the window for the untrusted 1-based `page` number holding `limit` rides each.
    ///
    /// Missing or unparsable values take their defaults, and so do values below 1.  Only whole
    /// numbers are accepted: a fractional page such as `1.5` is not turned into a fractional offset,
    /// and a negative limit does not lift the bound on the number of returned rows.
    pub(crate) fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = parse_positive(limit).unwrap_or(DEFAULT_LIMIT);
        Self { limit, offset: limit.saturating_mul(page - 1) }
    }

    /// Returns the maximum number of rides to return.
    pub(crate) fn limit(&self) -> i64 {
        self.limit
    }

    /// Returns the number of rides to skip.
    pub(crate) fn offset(&self) -> i64 {
        self.offset
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Parses `raw` as a strictly positive integer, if present.
fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok()).filter(|n| *n >= 1)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_ok() {
        assert_eq!(-90.0, Latitude::new(-90.0).unwrap().as_f64());
        assert_eq!(0.0, Latitude::new(0.0).unwrap().as_f64());
        assert_eq!(90.0, Latitude::new(90.0).unwrap().as_f64());
    }

    #[test]
    fn test_latitude_out_of_range() {
        for value in [-90.1, 90.1, -100.0, 180.0, f64::NAN] {
            assert_eq!(
                ModelError("must be between -90 and 90 degrees".to_owned()),
                Latitude::new(value).unwrap_err()
            );
        }
    }

    #[test]
    fn test_longitude_ok() {
        assert_eq!(-180.0, Longitude::new(-180.0).unwrap().as_f64());
        assert_eq!(12.5, Longitude::new(12.5).unwrap().as_f64());
        assert_eq!(180.0, Longitude::new(180.0).unwrap().as_f64());
    }

    #[test]
    fn test_longitude_out_of_range() {
        for value in [-180.5, 180.5, f64::INFINITY] {
            assert_eq!(
                ModelError("must be between -180 and 180 degrees".to_owned()),
                Longitude::new(value).unwrap_err()
            );
        }
    }

    #[test]
    fn test_name_trims() {
        assert_eq!("Alice", Name::new("  Alice\t").unwrap().as_str());
    }

    #[test]
    fn test_name_escapes_markup() {
        assert_eq!(
            "&lt;b&gt;Bob &amp; &quot;Co&quot;&lt;&#x2F;b&gt;",
            Name::new("<b>Bob & \"Co\"</b>").unwrap().as_str()
        );
        assert_eq!("O&#x27;Brien &#96;&#x5C;", Name::new("O'Brien `\\").unwrap().as_str());
    }

    #[test]
    fn test_name_empty() {
        for value in ["", "   ", "\n\t"] {
            assert_eq!(ModelError("should not be empty".to_owned()), Name::new(value).unwrap_err());
        }
    }

    #[test]
    fn test_ride_id_from_str() {
        assert_eq!(RideId::new(42), "42".parse::<RideId>().unwrap());
        assert!("abc".parse::<RideId>().is_err());
        assert!("1; DROP TABLE Rides".parse::<RideId>().is_err());
    }

    #[test]
    fn test_ride_serialization_uses_column_names() {
        let ride = Ride::new(
            RideId::new(7),
            40.7,
            -73.9,
            40.8,
            -74.0,
            "Alice".to_owned(),
            "Bob".to_owned(),
            "Civic".to_owned(),
        );
        assert_eq!(
            serde_json::json!({
                "rideID": 7,
                "startLat": 40.7,
                "startLong": -73.9,
                "endLat": 40.8,
                "endLong": -74.0,
                "riderName": "Alice",
                "driverName": "Bob",
                "driverVehicle": "Civic",
            }),
            serde_json::to_value(&ride).unwrap()
        );
    }

    #[test]
    fn test_pagination_defaults() {
        let pagination = Pagination::default();
        assert_eq!(DEFAULT_LIMIT, pagination.limit());
        assert_eq!(0, pagination.offset());
    }

    #[test]
    fn test_pagination_offset() {
        let pagination = Pagination::new(Some("2"), Some("10"));
        assert_eq!(10, pagination.limit());
        assert_eq!(10, pagination.offset());

        let pagination = Pagination::new(Some("4"), Some("3"));
        assert_eq!(3, pagination.limit());
        assert_eq!(9, pagination.offset());
    }

    #[test]
    fn test_pagination_clamps_page() {
        assert_eq!(Pagination::new(Some("1"), None), Pagination::new(Some("0"), None));
        assert_eq!(Pagination::new(Some("1"), None), Pagination::new(Some("-5"), None));
    }

    #[test]
    fn test_pagination_unparsable() {
        assert_eq!(Pagination::default(), Pagination::new(Some("abc"), Some("")));
        assert_eq!(Pagination::default(), Pagination::new(Some("1.5"), Some("0")));
    }

    #[test]
    fn test_pagination_rejects_fractions_and_negative_limits() {
        let pagination = Pagination::new(Some("1.5"), Some("-1"));
        assert_eq!(DEFAULT_LIMIT, pagination.limit());
        assert_eq!(0, pagination.offset());

        let pagination = Pagination::new(Some("2"), Some("-1"));
        assert_eq!(DEFAULT_LIMIT, pagination.limit());
        assert_eq!(DEFAULT_LIMIT, pagination.offset());
    }

    #[test]
    fn test_pagination_does_not_overflow() {
        let pagination = Pagination::new(Some("9223372036854775807"), Some("9223372036854775807"));
        assert_eq!(i64::MAX, pagination.offset());
    }
}
