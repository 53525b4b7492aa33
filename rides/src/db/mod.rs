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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::*;
use futures::TryStreamExt;
use rides_core::db::sqlite::{self, map_sqlx_error};
use rides_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;


/// Initializes the database schema.
pub(crate) async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    sqlite::run_schema(ex, include_str!("sqlite.sql")).await
}

impl TryFrom<SqliteRow> for Ride {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("rideID").map_err(map_sqlx_error)?;
        let start_lat: f64 = row.try_get("startLat").map_err(map_sqlx_error)?;
        let start_long: f64 = row.try_get("startLong").map_err(map_sqlx_error)?;
        let end_lat: f64 = row.try_get("endLat").map_err(map_sqlx_error)?;
        let end_long: f64 = row.try_get("endLong").map_err(map_sqlx_error)?;
        let rider_name: String = row.try_get("riderName").map_err(map_sqlx_error)?;
        let driver_name: String = row.try_get("driverName").map_err(map_sqlx_error)?;
        let driver_vehicle: String = row.try_get("driverVehicle").map_err(map_sqlx_error)?;

        Ok(Ride::new(
            RideId::new(id),
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

/// Records a `new_ride` and returns the identifier assigned to it.
pub(crate) async fn insert_ride(ex: &mut Executor, new_ride: &NewRide) -> DbResult<RideId> {
    let query_str = "
        INSERT INTO Rides
            (startLat, startLong, endLat, endLong, riderName, driverName, driverVehicle)
        VALUES (?, ?, ?, ?, ?, ?, ?)
    ";
    let done = sqlx::query(query_str)
        .bind(new_ride.start_lat().as_f64())
        .bind(new_ride.start_long().as_f64())
        .bind(new_ride.end_lat().as_f64())
        .bind(new_ride.end_long().as_f64())
        .bind(new_ride.rider_name().as_str())
        .bind(new_ride.driver_name().as_str())
        .bind(new_ride.driver_vehicle().as_str())
        .execute(&mut **ex)
        .await
        .map_err(map_sqlx_error)?;
    if done.rows_affected() != 1 {
        return Err(DbError::BackendError(format!(
            "Insertion affected {} rows",
            done.rows_affected()
        )));
    }
    Ok(RideId::new(done.last_insert_rowid()))
}

/// Gets the ride identified by `id`, or `None` if it does not exist.
pub(crate) async fn get_ride(ex: &mut Executor, id: RideId) -> DbResult<Option<Ride>> {
    let query_str = "SELECT * FROM Rides WHERE rideID = ?";
    let maybe_row = sqlx::query(query_str)
        .bind(id.as_i64())
        .fetch_optional(&mut **ex)
        .await
        .map_err(map_sqlx_error)?;
    maybe_row.map(Ride::try_from).transpose()
}

/// Gets the window of rides described by `pagination`, in insertion order.
pub(crate) async fn get_rides(ex: &mut Executor, pagination: &Pagination) -> DbResult<Vec<Ride>> {
    let query_str = "SELECT * FROM Rides ORDER BY rideID LIMIT ? OFFSET ?";
    let mut rows = sqlx::query(query_str)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch(&mut **ex);

    let mut rides = vec![];
    while let Some(row) = rows.try_next().await.map_err(map_sqlx_error)? {
        rides.push(Ride::try_from(row)?);
    }
    Ok(rides)
}
