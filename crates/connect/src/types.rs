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

//! Rust and Arrow types to Plume literal types

use std::fmt;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType as ArrowDataType, Date32Type, Float32Type, Float64Type, Int16Type, Int32Type,
    Int64Type, Int8Type, TimeUnit, TimestampMicrosecondType,
};
use serde::{Deserialize, Serialize};

use crate::errors::PlumeError;
use crate::expressions::LiteralValue;

/// The semantic type of a literal, as the engine will see it.
///
/// This is deliberately smaller than the engine's full type system; only the
/// types a client can produce as literals are represented here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Short,
    Integer,
    Long,
    Float,
    Double,
    Decimal,
    String,
    Binary,
    Date,
    Timestamp,
    TimestampNtz,
    Null,
}

impl DataType {
    pub fn as_str_name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Short => "short",
            DataType::Integer => "integer",
            DataType::Long => "long",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Decimal => "decimal",
            DataType::String => "string",
            DataType::Binary => "binary",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp",
            DataType::TimestampNtz => "timestamp_ntz",
            DataType::Null => "void",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str_name())
    }
}

impl TryFrom<&ArrowDataType> for DataType {
    type Error = PlumeError;

    /// Maps an Arrow element type onto a literal type.
    ///
    /// `Int8` widens to [DataType::Short]: the transport encoding for array
    /// literals has no 8-bit integer element type.
    fn try_from(value: &ArrowDataType) -> Result<Self, Self::Error> {
        match value {
            ArrowDataType::Boolean => Ok(DataType::Boolean),
            ArrowDataType::Int8 | ArrowDataType::Int16 => Ok(DataType::Short),
            ArrowDataType::Int32 => Ok(DataType::Integer),
            ArrowDataType::Int64 => Ok(DataType::Long),
            ArrowDataType::Float32 => Ok(DataType::Float),
            ArrowDataType::Float64 => Ok(DataType::Double),
            ArrowDataType::Utf8 => Ok(DataType::String),
            ArrowDataType::Binary => Ok(DataType::Binary),
            ArrowDataType::Date32 => Ok(DataType::Date),
            ArrowDataType::Timestamp(TimeUnit::Microsecond, Some(_)) => Ok(DataType::Timestamp),
            ArrowDataType::Timestamp(TimeUnit::Microsecond, None) => Ok(DataType::TimestampNtz),
            other => Err(PlumeError::UnsupportedArrayScalar {
                data_type: format!("{other:?}"),
            }),
        }
    }
}

/// An exact decimal value, kept as text so that no precision is lost on the
/// way to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal(String);

impl Decimal {
    pub fn new(value: impl Into<String>) -> Self {
        Decimal(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Converts a one-dimensional Arrow array into an array literal.
///
/// Nulls become [LiteralValue::Null] elements. Types without a literal
/// mapping fail with [PlumeError::UnsupportedArrayScalar] before anything is
/// emitted.
pub fn literal_array(values: &dyn Array) -> Result<LiteralValue, PlumeError> {
    let element_type = DataType::try_from(values.data_type())?;

    let len = values.len();
    let mut elements = Vec::with_capacity(len);

    macro_rules! collect {
        ($accessor:expr, $variant:ident) => {{
            let arr = $accessor;
            for i in 0..len {
                if arr.is_null(i) {
                    elements.push(LiteralValue::Null);
                } else {
                    elements.push(LiteralValue::$variant(arr.value(i).into()));
                }
            }
        }};
    }

    match values.data_type() {
        ArrowDataType::Boolean => collect!(values.as_boolean(), Boolean),
        // no 8-bit element type on the wire; widen to short
        ArrowDataType::Int8 => {
            let arr = values.as_primitive::<Int8Type>();
            for i in 0..len {
                if arr.is_null(i) {
                    elements.push(LiteralValue::Null);
                } else {
                    elements.push(LiteralValue::Short(arr.value(i) as i16));
                }
            }
        }
        ArrowDataType::Int16 => collect!(values.as_primitive::<Int16Type>(), Short),
        ArrowDataType::Int32 => collect!(values.as_primitive::<Int32Type>(), Integer),
        ArrowDataType::Int64 => collect!(values.as_primitive::<Int64Type>(), Long),
        ArrowDataType::Float32 => collect!(values.as_primitive::<Float32Type>(), Float),
        ArrowDataType::Float64 => collect!(values.as_primitive::<Float64Type>(), Double),
        ArrowDataType::Utf8 => {
            let arr = values.as_string::<i32>();
            for i in 0..len {
                if arr.is_null(i) {
                    elements.push(LiteralValue::Null);
                } else {
                    elements.push(LiteralValue::String(arr.value(i).to_string()));
                }
            }
        }
        ArrowDataType::Binary => {
            let arr = values.as_binary::<i32>();
            for i in 0..len {
                if arr.is_null(i) {
                    elements.push(LiteralValue::Null);
                } else {
                    elements.push(LiteralValue::Binary(arr.value(i).to_vec()));
                }
            }
        }
        ArrowDataType::Date32 => collect!(values.as_primitive::<Date32Type>(), Date),
        ArrowDataType::Timestamp(TimeUnit::Microsecond, Some(_)) => {
            collect!(values.as_primitive::<TimestampMicrosecondType>(), Timestamp)
        }
        ArrowDataType::Timestamp(TimeUnit::Microsecond, None) => collect!(
            values.as_primitive::<TimestampMicrosecondType>(),
            TimestampNtz
        ),
        // unreachable in practice, DataType::try_from rejected it above
        other => {
            return Err(PlumeError::UnsupportedArrayScalar {
                data_type: format!("{other:?}"),
            })
        }
    }

    Ok(LiteralValue::Array {
        element_type,
        values: elements,
    })
}
