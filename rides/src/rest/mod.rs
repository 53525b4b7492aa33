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

//! Entry point to the REST server.

use crate::driver::Driver;
use crate::model::Ride;
use axum::http::{HeaderName, Method, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use rides_core::rest::ErrorResponse;
use tower_http::cors::{Any, CorsLayer};

mod health_get;
mod ride_get;
mod rides_get;
mod rides_post;
#[cfg(test)]
mod testutils;

/// Code reported in the body of successful lookups that matched no rides.
pub(crate) const RIDES_NOT_FOUND_ERROR: &str = "RIDES_NOT_FOUND_ERROR";

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::PUT, Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
            header::CONTENT_TYPE,
            header::ACCEPT,
        ]);

    Router::new()
        .route("/health", get(health_get::handler))
        .route("/rides", get(rides_get::handler).post(rides_post::handler))
        .route("/rides/:id", get(ride_get::handler))
        .layer(cors)
        .with_state(driver)
}

/// Response for lookups that return a set of rides.
///
/// An empty set is not an error but is reported with the shape of an `ErrorResponse`.
pub(crate) struct RidesResponse(pub(crate) Vec<Ride>);

impl IntoResponse for RidesResponse {
    fn into_response(self) -> Response {
        if self.0.is_empty() {
            Json(ErrorResponse::new(RIDES_NOT_FOUND_ERROR, "Could not find any rides"))
                .into_response()
        } else {
            Json(self.0).into_response()
        }
    }
}
