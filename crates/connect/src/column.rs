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

//! [Column] is a thin handle around one [Expression]

use std::convert::From;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Sub};

use crate::errors::PlumeError;
use crate::expressions::{Expression, LiteralValue, ToExpr, ToLiteralExpr};
use crate::functions::invoke_func;

/// # Column
///
/// A column holds a single [Expression] which is resolved once the final
/// tree is submitted to the remote engine. Operator overloads and fluent
/// methods each return a *new* Column wrapping a *new* tree; a column never
/// shares or mutates its underlying expression.
///
/// A column created from `"*"` or `"name.*"` is an unresolved star that
/// expands to all columns, or all references under the given qualifier.
///
/// ```rust
/// // As a &str representing an unresolved column name
/// Plan::project("id");
///
/// // By using the `col` function
/// Plan::project(col("id"));
///
/// // By using the `lit` function to build a literal value
/// Plan::project(lit(4.0).alias("num_col"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// the underlying [Expression], unresolved until the engine sees it
    pub expression: Expression,
}

impl From<Expression> for Column {
    fn from(expression: Expression) -> Self {
        Self { expression }
    }
}

impl From<LiteralValue> for Column {
    fn from(value: LiteralValue) -> Self {
        Column::from(Expression::Literal(value))
    }
}

impl From<&str> for Column {
    /// `"*"` becomes an unresolved star, `"t.*"` a qualified star, and any
    /// other value an unresolved column reference.
    fn from(value: &str) -> Self {
        let expression = match value {
            "*" => Expression::UnresolvedStar { target: None },
            value if value.ends_with(".*") => Expression::UnresolvedStar {
                target: Some(value.to_string()),
            },
            _ => Expression::ColumnReference {
                name: value.to_string(),
                plan_id: None,
            },
        };

        Column::from(expression)
    }
}

impl Column {
    /// Returns the column with a new name
    ///
    /// # Example:
    /// ```rust
    /// let cols = [
    ///     col("name").alias("new_name"),
    ///     col("age").alias("new_age")
    /// ];
    ///
    /// let plan = Plan::project(cols);
    /// ```
    pub fn alias(self, value: &str) -> Column {
        Column::from(Expression::Alias {
            expr: Box::new(self.expression),
            name: value.to_string(),
        })
    }

    /// An alias for the function `alias`
    pub fn name(self, value: &str) -> Column {
        self.alias(value)
    }

    /// Returns a sorted expression based on the ascending order of the column
    ///
    /// # Example:
    /// ```rust
    /// let sorted = col("id").asc();
    ///
    /// let sorted = asc(col("id"));
    /// ```
    pub fn asc(self) -> Column {
        invoke_func("asc", self)
    }

    pub fn asc_nulls_first(self) -> Column {
        invoke_func("asc_nulls_first", self)
    }

    pub fn asc_nulls_last(self) -> Column {
        invoke_func("asc_nulls_last", self)
    }

    /// Returns a sorted expression based on the descending order of the column
    pub fn desc(self) -> Column {
        invoke_func("desc", self)
    }

    pub fn desc_nulls_first(self) -> Column {
        invoke_func("desc_nulls_first", self)
    }

    pub fn desc_nulls_last(self) -> Column {
        invoke_func("desc_nulls_last", self)
    }

    /// Casts the column into the engine type represented as a `&str`
    ///
    /// # Example:
    /// ```rust
    /// let plan = Plan::project([
    ///       col("age").cast("int"),
    ///       col("name").cast("string")
    ///     ]);
    /// ```
    pub fn cast(self, to_type: &str) -> Column {
        Column::from(Expression::Cast {
            expr: Box::new(self.expression),
            to_type: to_type.to_string(),
        })
    }

    /// A boolean expression that is evaluated to `true` if the value of the
    /// expression is contained by the evaluated values of the arguments
    ///
    /// # Example:
    /// ```rust
    /// let in_list = col("name").isin(vec!["Jorge", "Bob"]);
    /// ```
    pub fn isin<T: ToLiteralExpr>(self, values: Vec<T>) -> Column {
        let mut args = vec![self.expression];
        args.extend(values.iter().map(|value| value.to_literal_expr()));

        invoke_func("in", args)
    }

    /// A boolean expression that is evaluated to `true` if the value is
    /// contained in the column
    ///
    /// # Example:
    /// ```rust
    /// let matches = col("name").contains("ge");
    /// ```
    pub fn contains<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("contains", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A filter expression that evaluates if the column starts with a string literal
    pub fn startswith<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("startswith", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A filter expression that evaluates if the column ends with a string literal
    pub fn endswith<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("endswith", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A SQL LIKE filter expression with a case sensitive match
    pub fn like<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("like", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A SQL ILIKE filter expression with a case insensitive match
    pub fn ilike<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("ilike", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A SQL RLIKE filter expression with a regex match
    pub fn rlike<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("rlike", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// A substring of the column, starting at `start` with length `length`
    pub fn substr<T: ToLiteralExpr>(self, start: T, length: T) -> Column {
        invoke_func(
            "substr",
            vec![
                self.to_expr(),
                start.to_literal_expr(),
                length.to_literal_expr(),
            ],
        )
    }

    /// Equality comparison. Cannot overload the `==` operator and return
    /// something other than a bool
    pub fn eq<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("==", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// Inequality comparison
    pub fn neq<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("!=", vec![self.to_expr(), other.to_literal_expr()])
    }

    pub fn gt<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func(">", vec![self.to_expr(), other.to_literal_expr()])
    }

    pub fn lt<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("<", vec![self.to_expr(), other.to_literal_expr()])
    }

    pub fn ge<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func(">=", vec![self.to_expr(), other.to_literal_expr()])
    }

    pub fn le<T: ToLiteralExpr>(self, other: T) -> Column {
        invoke_func("<=", vec![self.to_expr(), other.to_literal_expr()])
    }

    /// Logical AND comparison. Cannot overload the `&&` operator and return
    /// something other than a bool
    pub fn and<T: ToExpr>(self, other: T) -> Column {
        invoke_func("and", vec![self.to_expr(), other.to_expr()])
    }

    /// Logical OR comparison.
    pub fn or<T: ToExpr>(self, other: T) -> Column {
        invoke_func("or", vec![self.to_expr(), other.to_expr()])
    }

    /// A filter expression that evaluates to true if the expression is null
    pub fn is_null(self) -> Column {
        invoke_func("isnull", self)
    }

    /// A filter expression that evaluates to true if the expression is NOT null
    pub fn is_not_null(self) -> Column {
        invoke_func("isnotnull", self)
    }

    pub fn is_nan(self) -> Column {
        invoke_func("isnan", self)
    }

    /// Appends a `(condition, value)` branch to a case expression started
    /// with [crate::functions::when].
    ///
    /// Fails if this column was not produced by `when`, or if the case
    /// expression was already closed with [Column::otherwise].
    pub fn when<T: ToLiteralExpr>(self, condition: Column, value: T) -> Result<Column, PlumeError> {
        match self.expression {
            Expression::CaseWhen {
                mut branches,
                else_value: None,
            } => {
                branches.push((condition.expression, value.to_literal_expr()));
                Ok(Column::from(Expression::CaseWhen {
                    branches,
                    else_value: None,
                }))
            }
            Expression::CaseWhen {
                else_value: Some(_),
                ..
            } => Err(PlumeError::invalid_argument(
                "when() cannot be applied once otherwise() is applied",
            )),
            _ => Err(PlumeError::invalid_argument(
                "when() can only be applied on a Column previously generated by when()",
            )),
        }
    }

    /// Closes a case expression with a default value.
    ///
    /// Fails like [Column::when] if this column is not an open case
    /// expression.
    pub fn otherwise<T: ToLiteralExpr>(self, value: T) -> Result<Column, PlumeError> {
        match self.expression {
            Expression::CaseWhen {
                branches,
                else_value: None,
            } => Ok(Column::from(Expression::CaseWhen {
                branches,
                else_value: Some(Box::new(value.to_literal_expr())),
            })),
            Expression::CaseWhen {
                else_value: Some(_),
                ..
            } => Err(PlumeError::invalid_argument(
                "otherwise() can only be applied once on a Column previously generated by when()",
            )),
            _ => Err(PlumeError::invalid_argument(
                "otherwise() can only be applied on a Column previously generated by when()",
            )),
        }
    }
}

impl Add for Column {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        invoke_func("+", vec![self, other])
    }
}

impl Neg for Column {
    type Output = Self;

    fn neg(self) -> Self {
        invoke_func("negative", self)
    }
}

impl Sub for Column {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        invoke_func("-", vec![self, other])
    }
}

impl Mul for Column {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        invoke_func("*", vec![self, other])
    }
}

impl Div for Column {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        invoke_func("/", vec![self, other])
    }
}

impl Rem for Column {
    type Output = Self;

    fn rem(self, other: Self) -> Self {
        invoke_func("%", vec![self, other])
    }
}

impl BitOr for Column {
    type Output = Self;

    fn bitor(self, other: Self) -> Self {
        invoke_func("|", vec![self, other])
    }
}

impl BitAnd for Column {
    type Output = Self;

    fn bitand(self, other: Self) -> Self {
        invoke_func("&", vec![self, other])
    }
}

impl BitXor for Column {
    type Output = Self;

    fn bitxor(self, other: Self) -> Self {
        invoke_func("^", vec![self, other])
    }
}

impl Not for Column {
    type Output = Self;

    fn not(self) -> Self::Output {
        invoke_func("not", vec![self])
    }
}
