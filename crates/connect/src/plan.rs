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

//! Logical plan representation
//!
//! A [Plan] is the unit handed across the engine boundary. It carries the
//! already-built expression trees verbatim; no resolution, optimization, or
//! type checking happens on this side.

use serde::{Deserialize, Serialize};

use crate::expressions::{Expression, ToVecExpr};

/// An unresolved logical plan over a set of expression trees.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub fields: Vec<Expression>,
}

impl Plan {
    /// Builds a projection over the coerced columns.
    pub fn project<T: ToVecExpr>(cols: T) -> Plan {
        Plan {
            fields: cols.to_vec_expr(),
        }
    }
}
