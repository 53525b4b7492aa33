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

//! API to record a new ride.

use crate::driver::Driver;
use crate::model::{Latitude, Longitude, Name, NewRide};
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::IntoResponse;
use rides_core::model::ModelError;
use rides_core::rest::{RestError, RestResult};
use serde::Deserialize;
use serde_json::Value;

/// Message body for the request, as sent by the client and before any validation.
///
/// Fields are kept as raw JSON values so that missing, mistyped and out of range values can each
/// be reported with their own message.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RideRequest {
    /// Latitude where the ride started.
    start_lat: Value,

    /// Longitude where the ride started.
    start_long: Value,

    /// Latitude where the ride ended.
    end_lat: Value,

    /// Longitude where the ride ended.
    end_long: Value,

    /// Name of the passenger.
    rider_name: Value,

    /// Name of the driver.
    driver_name: Value,

    /// Description of the vehicle used for the ride.
    driver_vehicle: Value,
}

impl RideRequest {
    /// Validates the request, returning the first problem found.
    fn validate(self) -> RestResult<NewRide> {
        let start_lat = Latitude::new(coordinate("start_lat", &self.start_lat)?)
            .map_err(|e| field_error("start_lat", e))?;
        let start_long = Longitude::new(coordinate("start_long", &self.start_long)?)
            .map_err(|e| field_error("start_long", e))?;
        let end_lat = Latitude::new(coordinate("end_lat", &self.end_lat)?)
            .map_err(|e| field_error("end_lat", e))?;
        let end_long = Longitude::new(coordinate("end_long", &self.end_long)?)
            .map_err(|e| field_error("end_long", e))?;
        let rider_name = name("rider_name", &self.rider_name)?;
        let driver_name = name("driver_name", &self.driver_name)?;
        let driver_vehicle = name("driver_vehicle", &self.driver_vehicle)?;
        Ok(NewRide::new(
            start_lat,
            start_long,
            end_lat,
            end_long,
            rider_name,
            driver_name,
            driver_vehicle,
        ))
    }
}

/// Prefixes the model error `e` with the name of the `field` that caused it.
fn field_error(field: &str, e: ModelError) -> RestError {
    RestError::InvalidRequest(format!("{} {}", field, e))
}

/// Extracts a finite number from the `value` of `field`, which may be a JSON number or a string.
fn coordinate(field: &str, value: &Value) -> RestResult<f64> {
    let number = match value {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.trim().parse::<f64>().ok()),
        Value::Number(n) => Some(n.as_f64()),
        _ => Some(None),
    };
    match number {
        None => Err(field_error(field, ModelError("should not be empty".to_owned()))),
        Some(Some(n)) if n.is_finite() => Ok(n),
        Some(_) => Err(field_error(field, ModelError("has an invalid value".to_owned()))),
    }
}

/// Extracts a sanitized name from the `value` of `field`.
fn name(field: &str, value: &Value) -> RestResult<Name> {
    match value {
        Value::Null => Err(field_error(field, ModelError("should not be empty".to_owned()))),
        Value::String(s) => Name::new(s).map_err(|e| field_error(field, e)),
        _ => Err(field_error(field, ModelError("must be a non empty string".to_owned()))),
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    body: Bytes,
) -> RestResult<impl IntoResponse> {
    let request: RideRequest = if body.trim_ascii().is_empty() {
        RideRequest::default()
    } else {
        match serde_json::from_slice::<Value>(&body)? {
            value @ Value::Object(_) => serde_json::from_value(value)?,
            _ => {
                return Err(RestError::InvalidRequest(
                    "Request body must be a JSON object".to_owned(),
                ));
            }
        }
    };
    let new_ride = request.validate()?;

    let rides = driver.create_ride(new_ride).await?;
    Ok(Json(rides))
}
