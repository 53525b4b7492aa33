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

//! API to get a single ride.

use crate::driver::Driver;
use crate::model::RideId;
use crate::rest::RidesResponse;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use rides_core::rest::RestResult;

/// API handler.
///
/// Identifiers that are not integers, or that cannot even be decoded, cannot match any ride, so
/// they yield an empty result.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    id: Result<Path<String>, PathRejection>,
) -> RestResult<RidesResponse> {
    let rides = match id.ok().and_then(|Path(id)| id.parse::<RideId>().ok()) {
        Some(id) => driver.get_ride(id).await?,
        None => vec![],
    };
    Ok(RidesResponse(rides))
}

#[cfg(test)]
mod tests {
    use crate::model::*;
    use crate::rest::RIDES_NOT_FOUND_ERROR;
    use crate::rest::testutils::*;
    use axum::http;
    use rides_core::rest::SERVER_ERROR;
    use rides_core::rest::testutils::*;

    fn route(id: &str) -> (http::Method, String) {
        (http::Method::GET, format!("/rides/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        context.insert_ride(1).await;
        let id = context.insert_ride(2).await;
        context.insert_ride(3).await;

        let response = OneShotBuilder::new(context.app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_json::<Vec<Ride>>()
            .await;
        let exp_response = Ride::new(
            id,
            40.7,
            -73.9,
            40.8,
            -74.0,
            "rider 2".to_owned(),
            "driver 2".to_owned(),
            "vehicle 2".to_owned(),
        );
        assert_eq!(vec![exp_response], response);

        let again = OneShotBuilder::new(context.app(), route(&id.to_string()))
            .send_empty()
            .await
            .expect_json::<Vec<Ride>>()
            .await;
        assert_eq!(response, again);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        context.insert_ride(1).await;

        for id in ["12345", "0", "-1", "abc", "1.5", "%FF", "%C3%28"] {
            OneShotBuilder::new(context.app(), route(id))
                .send_empty()
                .await
                .expect_error(RIDES_NOT_FOUND_ERROR, "^Could not find any rides$")
                .await;
        }
    }

    #[tokio::test]
    async fn test_storage_error() {
        let context = TestContext::setup().await;
        context.break_storage().await;

        OneShotBuilder::new(context.into_app(), route("1"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error(SERVER_ERROR, "^Unknown error$")
            .await;
    }

    #[tokio::test]
    async fn test_body_is_ignored() {
        let context = TestContext::setup().await;

        let id = context.insert_ride(1).await;

        let response = OneShotBuilder::new(context.into_app(), route(&id.to_string()))
            .send_text("unexpected")
            .await
            .expect_json::<Vec<Ride>>()
            .await;
        assert_eq!(1, response.len());
        assert_eq!(&id, response[0].id());
    }
}
