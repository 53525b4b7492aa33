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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use rides_core::db::sqlite::{self, SqliteDb};
use rides_core::db::{Db, Executor};
use std::sync::Arc;

/// State of a running test against the business layer.
pub(crate) struct TestContext {
    /// Database shared with the driver, for direct access.
    db: Arc<SqliteDb>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Creates a driver backed by a fresh in-memory database with the schema in place.
    pub(crate) async fn setup() -> Self {
        let db = Arc::from(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let driver = Driver::new(db.clone());
        Self { db, driver }
    }

    /// Gets an executor for direct access to the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns a copy of the driver, as every operation consumes it.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Makes every later access to the rides table fail.
    pub(crate) async fn break_storage(&self) {
        sqlx::query("DROP TABLE Rides").execute(&mut *self.ex().await).await.unwrap();
    }
}
