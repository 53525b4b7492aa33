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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::testutils::new_ride;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use rides_core::db::Db;
use rides_core::db::sqlite;
use std::sync::Arc;

/// State of a running test against the REST API.
pub(crate) struct TestContext {
    /// Database shared with the app, for direct access.
    db: Arc<dyn Db + Send + Sync>,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Creates an app backed by a fresh in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::from(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        let app = app(driver);
        Self { db, app }
    }

    /// Returns a copy of the app, for tests that send more than one request.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Stores a valid ride whose names are derived from `i`.
    pub(crate) async fn insert_ride(&self, i: usize) -> RideId {
        db::insert_ride(&mut self.db.ex().await.unwrap(), &new_ride(i)).await.unwrap()
    }

    /// Gets every stored ride, bypassing the REST API.
    pub(crate) async fn get_all_rides(&self) -> Vec<Ride> {
        let pagination = Pagination::new(None, Some("1000"));
        db::get_rides(&mut self.db.ex().await.unwrap(), &pagination).await.unwrap()
    }

    /// Makes every later access to the rides table fail.
    pub(crate) async fn break_storage(&self) {
        sqlx::query("DROP TABLE Rides")
            .execute(&mut *self.db.ex().await.unwrap())
            .await
            .unwrap();
    }
}
