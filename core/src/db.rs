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

//! Generic abstraction to access the database.
//!
//! The service persists its data in SQLite.  The `Db` trait is the handle that gets injected into
//! the business logic so that the layers above never deal with connection pools directly, and the
//! `Executor` type is what the persistence functions of a service take to issue their queries.

use crate::model::ModelError;
use async_trait::async_trait;
use sqlx::Transaction;
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{Sqlite, SqliteConnection};
use std::ops::{Deref, DerefMut};

pub mod sqlite;

/// Database errors.  Any unexpected errors that come from the database are classified as
/// `BackendError`, but errors we know about have more specific types.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DbError {
    /// Catch-all error type for unexpected database errors.
    #[error("Database error: {0}")]
    BackendError(String),

    /// Indicates a failure processing the data that already exists in the database.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// A database executor that can be used in `sqlx` operations.
///
/// This can wrap a connection taken directly from the pool or an open transaction.  Either way,
/// the executor dereferences to the raw connection so that queries can be issued against it with
/// `&mut **ex`.
#[derive(Debug)]
pub enum Executor {
    /// An executor backed by a pool connection.  Operations issued via this executor run in
    /// autocommit mode.
    Pool(PoolConnection<Sqlite>),

    /// An executor backed by a transaction.
    Tx(Transaction<'static, Sqlite>),
}

impl Deref for Executor {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        match self {
            Executor::Pool(conn) => conn,
            Executor::Tx(tx) => tx,
        }
    }
}

impl DerefMut for Executor {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Executor::Pool(conn) => conn,
            Executor::Tx(tx) => tx,
        }
    }
}

/// A wrapper for a database executor backed by an open transaction.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Returns the executor wrapped by this transaction.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Commits the transaction.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            Executor::Pool(_) => unreachable!("Transactions are always backed by a Tx executor"),
            Executor::Tx(tx) => tx.commit().await.map_err(sqlite::map_sqlx_error),
        }
    }
}

/// Abstraction over the database connection.
#[async_trait]
pub trait Db {
    /// Obtains an executor for direct access to the pool.
    ///
    /// This would be better called `executor` but this method is used so frequently that it makes
    /// call sites too verbose.
    async fn ex(&self) -> DbResult<Executor>;

    /// Begins a transaction.
    ///
    /// It is the responsibility of the caller to call `commit` on the returned executor.  Otherwise
    /// the transaction is rolled back on drop.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Closes all connections to the database.  Any later operation fails with a `BackendError`.
    async fn close(&self);
}
