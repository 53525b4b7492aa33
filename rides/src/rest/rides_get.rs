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

//! API to list rides one page at a time.

use crate::driver::Driver;
use crate::model::Pagination;
use crate::rest::RidesResponse;
use axum::extract::{RawQuery, State};
use rides_core::rest::RestResult;

/// Query parameters for the request.  Values are kept raw because bad ones fall back to defaults.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct RidesQuery {
    /// 1-based page number.
    page: Option<String>,

    /// Maximum number of rides per page.
    limit: Option<String>,
}

impl RidesQuery {
    /// Extracts the parameters from the `raw` query string.  Only the first occurrence of each
    /// parameter counts, and a query that cannot be decoded is treated as empty.
    fn parse(raw: Option<&str>) -> Self {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(raw.unwrap_or(""))
            .unwrap_or_default();
        let first = |name: &str| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone());
        Self { page: first("page"), limit: first("limit") }
    }
}

/// API handler.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    RawQuery(query): RawQuery,
) -> RestResult<RidesResponse> {
    let query = RidesQuery::parse(query.as_deref());
    let pagination = Pagination::new(query.page.as_deref(), query.limit.as_deref());
    let rides = driver.get_rides(pagination).await?;
    Ok(RidesResponse(rides))
}
