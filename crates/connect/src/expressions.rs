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

//! The engine-agnostic [Expression] tree and the traits that build it
//!
//! Expressions are immutable values: every builder call produces a new node
//! and never mutates an existing one, so a [Column] can be reused in any
//! number of downstream expressions. Name and type resolution is deferred
//! entirely to the remote engine; this layer only records *what* was called,
//! with argument order preserved exactly as supplied.
//!
//! ## Overview
//!
//! - [ToExpr] accepts a `&str`, `String`, or [Column] and resolves names into
//!   column references (`"*"` and `"t.*"` become star expansions).
//! - [ToVecExpr] is the variadic form used by n-ary entry points; a single
//!   `Vec` argument is flattened into the call.
//! - [ToLiteral] converts Rust scalars into a [LiteralValue].
//! - [ToLiteralExpr] wraps a literal value as an [Expression]. For a
//!   [Column] it is the identity passthrough; for a `Vec` of scalars it
//!   emits an `array(...)` function call, not a multi-valued literal.
//! - [ToColumnOrLiteral] is for parameters that accept either a column (by
//!   handle or by name) or a plain literal, such as `atan2`.
//! - [LitValue] is the dynamically-checked literal input used by `try_lit`,
//!   where a list may illegally contain a column handle.
//! - [IntoLambda] reifies a Rust closure into a [Expression::LambdaFunction]
//!   for the higher-order entry points.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::errors::PlumeError;
use crate::types::{DataType, Decimal};

/// A concrete value with its inferred semantic type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LiteralValue {
    Null,
    Boolean(bool),
    Short(i16),
    Integer(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Preserved exactly as text; never coerced to a float.
    Decimal(Decimal),
    String(String),
    Binary(Vec<u8>),
    /// Days since the unix epoch.
    Date(i32),
    /// Microseconds since the unix epoch, UTC.
    Timestamp(i64),
    /// Microseconds since the unix epoch, no timezone.
    TimestampNtz(i64),
    /// A homogeneous array of literals.
    Array {
        element_type: DataType,
        values: Vec<LiteralValue>,
    },
}

/// A synthetic bound variable standing in for a per-element value inside a
/// higher-order function body. Names are globally unique per construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LambdaVariable {
    pub name: String,
}

/// A single node of the expression tree sent to the engine.
///
/// Function resolution (arity and type checking, overload selection) is not
/// performed here; an [Expression::UnresolvedFunction] carries the name and
/// arguments verbatim for the engine to resolve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Literal(LiteralValue),
    /// An unresolved name lookup, optionally scoped to a logical-plan id to
    /// disambiguate duplicate names across joined relations.
    ColumnReference {
        name: String,
        plan_id: Option<i64>,
    },
    /// Wildcard expansion, optionally qualified (`"t.*"`).
    UnresolvedStar {
        target: Option<String>,
    },
    UnresolvedFunction {
        name: String,
        args: Vec<Expression>,
        is_distinct: bool,
    },
    CaseWhen {
        branches: Vec<(Expression, Expression)>,
        else_value: Option<Box<Expression>>,
    },
    /// A fragment of the engine's native expression language, carried
    /// verbatim and opaque to this layer.
    ExpressionString {
        expression: String,
    },
    LambdaVariable(LambdaVariable),
    LambdaFunction {
        function: Box<Expression>,
        arguments: Vec<LambdaVariable>,
    },
    Alias {
        expr: Box<Expression>,
        name: String,
    },
    Cast {
        expr: Box<Expression>,
        to_type: String,
    },
}

impl Expression {
    /// An `UnresolvedFunction` node without the distinct marker.
    pub fn func(name: &str, args: Vec<Expression>) -> Expression {
        Expression::UnresolvedFunction {
            name: name.to_string(),
            args,
            is_distinct: false,
        }
    }
}

/// Translate string and column values into an [Expression]
pub trait ToExpr {
    fn to_expr(&self) -> Expression;
}

impl ToExpr for &str {
    fn to_expr(&self) -> Expression {
        Column::from(*self).expression
    }
}

impl ToExpr for String {
    fn to_expr(&self) -> Expression {
        Column::from(self.as_str()).expression
    }
}

impl ToExpr for Column {
    fn to_expr(&self) -> Expression {
        self.expression.clone()
    }
}

impl ToExpr for Expression {
    fn to_expr(&self) -> Expression {
        self.clone()
    }
}

/// Translate values into a `Vec<Expression>`
pub trait ToVecExpr {
    fn to_vec_expr(&self) -> Vec<Expression>;
}

impl<T> ToVecExpr for T
where
    T: ToExpr,
{
    fn to_vec_expr(&self) -> Vec<Expression> {
        vec![self.to_expr()]
    }
}

impl<T> ToVecExpr for Vec<T>
where
    T: ToExpr,
{
    fn to_vec_expr(&self) -> Vec<Expression> {
        self.iter().map(|col| col.to_expr()).collect()
    }
}

impl<const N: usize, T> ToVecExpr for [T; N]
where
    T: ToExpr,
{
    fn to_vec_expr(&self) -> Vec<Expression> {
        self.iter().map(|col| col.to_expr()).collect()
    }
}

/// Translate a Rust value into a literal value
pub trait ToLiteral {
    fn to_literal(&self) -> LiteralValue;
}

macro_rules! impl_to_literal {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToLiteral for $type {
                fn to_literal(&self) -> LiteralValue {
                    LiteralValue::$variant(*self)
                }
            }
        )*
    };
}

impl_to_literal!(
    bool => Boolean,
    i16 => Short,
    i32 => Integer,
    i64 => Long,
    f32 => Float,
    f64 => Double,
);

impl ToLiteral for i8 {
    /// The transport encoding has no 8-bit integer, so `i8` widens to short.
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Short(*self as i16)
    }
}

impl ToLiteral for &str {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::String(self.to_string())
    }
}

impl ToLiteral for String {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::String(self.clone())
    }
}

impl ToLiteral for &[u8] {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Binary(Vec::from(*self))
    }
}

impl ToLiteral for Vec<u8> {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Binary(self.clone())
    }
}

impl ToLiteral for Decimal {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::Decimal(self.clone())
    }
}

impl<T> ToLiteral for Option<T>
where
    T: ToLiteral,
{
    fn to_literal(&self) -> LiteralValue {
        match self {
            Some(value) => value.to_literal(),
            None => LiteralValue::Null,
        }
    }
}

impl<Tz: chrono::TimeZone> ToLiteral for chrono::DateTime<Tz> {
    fn to_literal(&self) -> LiteralValue {
        // timestamps on the wire are microseconds since 1/1/1970
        LiteralValue::Timestamp(self.timestamp_micros())
    }
}

impl ToLiteral for chrono::NaiveDateTime {
    fn to_literal(&self) -> LiteralValue {
        LiteralValue::TimestampNtz(self.and_utc().timestamp_micros())
    }
}

impl ToLiteral for chrono::NaiveDate {
    fn to_literal(&self) -> LiteralValue {
        // dates on the wire are days since 1/1/1970
        let days_since_unix_epoch = self.signed_duration_since(
            chrono::NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid epoch date"),
        );

        LiteralValue::Date(days_since_unix_epoch.num_days() as i32)
    }
}

/// Wrap a literal value into an [Expression]
pub trait ToLiteralExpr {
    fn to_literal_expr(&self) -> Expression;
}

impl<T> ToLiteralExpr for T
where
    T: ToLiteral,
{
    fn to_literal_expr(&self) -> Expression {
        Expression::Literal(self.to_literal())
    }
}

impl ToLiteralExpr for Column {
    /// A column is already an expression; coercion is the identity.
    fn to_literal_expr(&self) -> Expression {
        self.to_expr()
    }
}

/// A homogeneous list of scalars becomes an `array(...)` call with each
/// element independently coerced, never a single multi-valued literal.
impl<T> ToLiteralExpr for Vec<T>
where
    T: ToLiteral,
{
    fn to_literal_expr(&self) -> Expression {
        Expression::func(
            "array",
            self.iter().map(|val| val.to_literal_expr()).collect(),
        )
    }
}

impl<const N: usize, T> ToLiteralExpr for [T; N]
where
    T: ToLiteral,
{
    fn to_literal_expr(&self) -> Expression {
        Expression::func(
            "array",
            self.iter().map(|val| val.to_literal_expr()).collect(),
        )
    }
}

/// Arguments that may be either a column (by handle or by name) or a plain
/// literal, e.g. `atan2("y", "x")` next to `atan2(1.0, "x")`.
pub trait ToColumnOrLiteral {
    fn to_column_or_literal(&self) -> Expression;
}

impl ToColumnOrLiteral for &str {
    fn to_column_or_literal(&self) -> Expression {
        Column::from(*self).expression
    }
}

impl ToColumnOrLiteral for String {
    fn to_column_or_literal(&self) -> Expression {
        Column::from(self.as_str()).expression
    }
}

impl ToColumnOrLiteral for Column {
    fn to_column_or_literal(&self) -> Expression {
        self.expression.clone()
    }
}

macro_rules! impl_to_column_or_literal {
    ($($type:ty),* $(,)?) => {
        $(
            impl ToColumnOrLiteral for $type {
                fn to_column_or_literal(&self) -> Expression {
                    self.to_literal_expr()
                }
            }
        )*
    };
}

impl_to_column_or_literal!(bool, i16, i32, i64, f32, f64);

/// A literal argument that needs runtime inspection: a scalar, a nested
/// list, or a column handle that legally passes through at the top level but
/// is rejected inside a list.
#[derive(Clone, Debug, PartialEq)]
pub enum LitValue {
    Scalar(LiteralValue),
    List(Vec<LitValue>),
    Column(Box<Expression>),
}

macro_rules! impl_lit_value_from {
    ($($type:ty),* $(,)?) => {
        $(
            impl From<$type> for LitValue {
                fn from(value: $type) -> Self {
                    LitValue::Scalar(value.to_literal())
                }
            }
        )*
    };
}

impl_lit_value_from!(bool, i8, i16, i32, i64, f32, f64, &str, String, Decimal);

impl From<Column> for LitValue {
    fn from(value: Column) -> Self {
        LitValue::Column(Box::new(value.expression))
    }
}

impl<T> From<Vec<T>> for LitValue
where
    T: Into<LitValue>,
{
    fn from(values: Vec<T>) -> Self {
        LitValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The one place a dynamic literal input is turned into an [Expression].
///
/// - a column handle passes through unchanged,
/// - a scalar becomes a [Expression::Literal],
/// - a list becomes an `array(...)` call with each element independently
///   coerced; a column handle anywhere inside a list fails with
///   [PlumeError::ColumnInList] naming the offending entry point.
pub fn literal_expr(value: LitValue, function: &str) -> Result<Expression, PlumeError> {
    match value {
        LitValue::Column(expr) => Ok(*expr),
        LitValue::Scalar(value) => Ok(Expression::Literal(value)),
        LitValue::List(values) => {
            let mut args = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    LitValue::Column(_) => {
                        return Err(PlumeError::ColumnInList {
                            function: function.to_string(),
                        })
                    }
                    other => args.push(literal_expr(other, function)?),
                }
            }
            Ok(Expression::func("array", args))
        }
    }
}

/// Supplies globally unique names for lambda variables.
///
/// The public entry points share one crate-level generator; tests can own a
/// private one to assert exact name sequences. Uniqueness is the only
/// cross-call invariant: nested or repeated lambda constructions must never
/// alias each other's variables, including across threads.
#[derive(Debug, Default)]
pub struct LambdaIdGenerator {
    next_id: AtomicU64,
}

impl LambdaIdGenerator {
    pub const fn new() -> Self {
        LambdaIdGenerator {
            next_id: AtomicU64::new(0),
        }
    }

    /// A fresh variable named `{hint}_{n}` for a monotonically increasing n.
    pub fn fresh(&self, hint: &str) -> LambdaVariable {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        LambdaVariable {
            name: format!("{hint}_{id}"),
        }
    }
}

pub(crate) static LAMBDA_IDS: LambdaIdGenerator = LambdaIdGenerator::new();

/// Closures that can be reified into a [Expression::LambdaFunction].
///
/// Arity (one to three parameters) and the return type are enforced by the
/// closure's own type. The closure runs exactly once, here, against fresh
/// lambda variables; it is never evaluated per row or per element. Its whole
/// job is to describe the per-element computation symbolically for the
/// engine to run later.
///
/// The `Args` parameter only disambiguates the closure arities; callers
/// never name it.
pub trait IntoLambda<Args> {
    fn into_lambda(self, ids: &LambdaIdGenerator) -> Expression;
}

impl<F> IntoLambda<(Column,)> for F
where
    F: FnOnce(Column) -> Column,
{
    fn into_lambda(self, ids: &LambdaIdGenerator) -> Expression {
        let x = ids.fresh("x");

        let body = self(Column::from(Expression::LambdaVariable(x.clone())));

        Expression::LambdaFunction {
            function: Box::new(body.expression),
            arguments: vec![x],
        }
    }
}

impl<F> IntoLambda<(Column, Column)> for F
where
    F: FnOnce(Column, Column) -> Column,
{
    fn into_lambda(self, ids: &LambdaIdGenerator) -> Expression {
        let x = ids.fresh("x");
        let y = ids.fresh("y");

        let body = self(
            Column::from(Expression::LambdaVariable(x.clone())),
            Column::from(Expression::LambdaVariable(y.clone())),
        );

        Expression::LambdaFunction {
            function: Box::new(body.expression),
            arguments: vec![x, y],
        }
    }
}

/// Closures that bind an element, or an element and its index.
///
/// `transform` and `filter` take this narrower bound: a three-parameter
/// closure has no meaning there and is rejected at compile time.
pub trait IntoElementLambda<Args>: IntoLambda<Args> {}

impl<F> IntoElementLambda<(Column,)> for F where F: FnOnce(Column) -> Column {}

impl<F> IntoElementLambda<(Column, Column)> for F where F: FnOnce(Column, Column) -> Column {}

impl<F> IntoLambda<(Column, Column, Column)> for F
where
    F: FnOnce(Column, Column, Column) -> Column,
{
    fn into_lambda(self, ids: &LambdaIdGenerator) -> Expression {
        let x = ids.fresh("x");
        let y = ids.fresh("y");
        let z = ids.fresh("z");

        let body = self(
            Column::from(Expression::LambdaVariable(x.clone())),
            Column::from(Expression::LambdaVariable(y.clone())),
            Column::from(Expression::LambdaVariable(z.clone())),
        );

        Expression::LambdaFunction {
            function: Box::new(body.expression),
            arguments: vec![x, y, z],
        }
    }
}
