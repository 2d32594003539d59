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

//! Plume expression builder for Rust
//!
//! A fluent, engine-agnostic [Column] API that builds immutable expression
//! trees client-side. Nothing is resolved or validated against a schema
//! here; the trees are serialized and handed to an engine through an
//! injected [EngineChannel].
//!
//! # Quickstart
//!
//! Build column expressions and submit a projection over a channel.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use plume_connect_core::functions::{col, lit, transform, when};
//! use plume_connect_core::{Column, EngineChannel, Plan, PlumeError, Session};
//!
//! async fn example(channel: Arc<dyn EngineChannel>) -> Result<(), PlumeError> {
//!     let session = Session::new(channel);
//!
//!     let bracket = when(col("age").lt(18), "minor")
//!         .otherwise("adult")?
//!         .alias("bracket");
//!
//!     let doubled = transform("scores", |v: Column| v * lit(2));
//!
//!     let plan = Plan::project(vec![col("name"), bracket, doubled]);
//!     let batch = session.execute(plan).await?;
//!
//!     println!("{} rows", batch.num_rows());
//!
//!     Ok(())
//! }
//! ```
//!
//! Every tree a [Column] wraps is a plain value: cloneable, comparable,
//! and round-trippable through [serde_json].

pub mod column;
pub mod errors;
pub mod expressions;
pub mod functions;
pub mod plan;
pub mod session;
pub mod types;

pub use column::Column;
pub use errors::PlumeError;
pub use plan::Plan;
pub use session::{EngineChannel, Session};
