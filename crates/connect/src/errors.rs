// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Defines a [PlumeError] for representing failures in various operations.
//!
//! Everything raised while *building* an expression tree is a local,
//! synchronous validation failure. Nothing has been sent to the engine when
//! one of these surfaces, so there is no partial state to roll back.

use std::error::Error;

use arrow::error::ArrowError;
use thiserror::Error;

/// Different `Plume` error types
#[derive(Error, Debug)]
pub enum PlumeError {
    /// A literal list contained a column handle. Lists of literals become an
    /// `array(...)` call; columns must be passed to `array` directly.
    #[error("column handles are not allowed inside a literal list passed to `{function}`; use `array` instead")]
    ColumnInList { function: String },

    /// A typed array held elements with no literal mapping.
    #[error("unsupported element type for an array literal: {data_type}")]
    UnsupportedArrayScalar { data_type: String },

    /// A variadic entry point was called with fewer columns than it requires.
    #[error("`{function}` requires at least {minimum} columns, got {supplied}")]
    WrongNumColumns {
        function: String,
        minimum: usize,
        supplied: usize,
    },

    /// Wrong argument type or misuse of a strict parameter, e.g. calling
    /// `otherwise` on a column that is not a case expression.
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),

    #[error("Apache Arrow Error: {0}")]
    ArrowError(#[from] ArrowError),

    #[error("External Error: {0}")]
    ExternalError(Box<dyn Error + Send + Sync>),

    /// The engine channel could not serve the request.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}

impl PlumeError {
    /// Wraps an external error in a `PlumeError`.
    pub fn from_external_error(error: Box<dyn Error + Send + Sync>) -> Self {
        Self::ExternalError(error)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = PlumeError::WrongNumColumns {
            function: "greatest".to_string(),
            minimum: 2,
            supplied: 1,
        };
        assert_eq!(
            err.to_string(),
            "`greatest` requires at least 2 columns, got 1"
        );

        let err = PlumeError::ColumnInList {
            function: "lit".to_string(),
        };
        assert!(err.to_string().contains("`lit`"));
        assert!(err.to_string().contains("use `array` instead"));
    }
}
