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

//! Generic support for high-level data types.
//!
//! Services define their own `model` module with newtypes that validate untrusted input in their
//! constructors.  Those constructors report failures with the `ModelError` type defined here so
//! that the failures can be carried through the other layers with `?`.

/// Error to indicate that a value does not satisfy the constraints of a data type.
///
/// The message should describe the violated constraint in a way that can be shown to the user.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;
