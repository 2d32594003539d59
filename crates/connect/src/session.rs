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

//! Session handle over an injected engine channel

use std::fmt;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;

use futures_util::future::BoxFuture;

use uuid::Uuid;

use crate::errors::PlumeError;
use crate::plan::Plan;

/// The seam between expression building and plan execution.
///
/// Implementations own transport, retries, and result decoding. The
/// building side never inspects what happens behind `submit`; swapping a
/// remote channel for an in-process mock changes nothing above this trait.
pub trait EngineChannel: Send + Sync {
    fn submit(&self, plan: &Plan) -> BoxFuture<'_, Result<RecordBatch, PlumeError>>;
}

/// An engine session bound to one [EngineChannel].
///
/// Cloning is cheap and shares the underlying channel.
#[derive(Clone)]
pub struct Session {
    session_id: String,
    channel: Arc<dyn EngineChannel>,
}

impl Session {
    pub fn new(channel: Arc<dyn EngineChannel>) -> Session {
        Session {
            session_id: Uuid::new_v4().to_string(),
            channel,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Submits the plan over the channel and awaits the decoded result.
    pub async fn execute(&self, plan: Plan) -> Result<RecordBatch, PlumeError> {
        tracing::debug!(
            session_id = %self.session_id,
            fields = plan.fields.len(),
            "submitting plan"
        );

        self.channel.submit(&plan).await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}
