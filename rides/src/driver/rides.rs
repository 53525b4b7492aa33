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

//! Operations on rides.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use log::info;
use rides_core::driver::{DriverError, DriverResult};

impl Driver {
    /// Records `new_ride` and returns the stored ride as the only element of the result.
    pub(crate) async fn create_ride(self, new_ride: NewRide) -> DriverResult<Vec<Ride>> {
        let mut tx = self.db.begin().await?;
        let id = db::insert_ride(tx.ex(), &new_ride).await?;
        let ride = db::get_ride(tx.ex(), id).await?.ok_or_else(|| {
            DriverError::BackendError(format!("Ride {} vanished after insertion", id))
        })?;
        tx.commit().await?;
        info!("Created ride {}", id);
        Ok(vec![ride])
    }

    /// Gets the ride identified by `id`.  The result is empty if there is no such ride.
    pub(crate) async fn get_ride(self, id: RideId) -> DriverResult<Vec<Ride>> {
        let ride = db::get_ride(&mut self.db.ex().await?, id).await?;
        info!("Looked up ride {}: {}", id, if ride.is_some() { "found" } else { "not found" });
        Ok(ride.into_iter().collect())
    }

    /// Gets the window of rides described by `pagination`.
    pub(crate) async fn get_rides(self, pagination: Pagination) -> DriverResult<Vec<Ride>> {
        let rides = db::get_rides(&mut self.db.ex().await?, &pagination).await?;
        info!(
            "Listed {} rides with limit {} and offset {}",
            rides.len(),
            pagination.limit(),
            pagination.offset()
        );
        Ok(rides)
    }
}
