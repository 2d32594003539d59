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

//! The named entry points of the engine's function catalog
//!
//! Every entry normalizes its arguments through the shared coercion traits
//! (strings resolve to column references, scalars become literals, columns
//! pass through) and emits exactly one [Expression::UnresolvedFunction]
//! node. Validation that can be done client-side (minimum arity, literal
//! list contents) happens here, before any node is built; everything else
//! is deferred to the engine.

use arrow::array::Array;

use rand::random;

use crate::column::Column;
use crate::errors::PlumeError;
use crate::expressions::{
    literal_expr, Expression, IntoElementLambda, IntoLambda, LitValue, LiteralValue,
    ToColumnOrLiteral, ToExpr, ToLiteralExpr, ToVecExpr, LAMBDA_IDS,
};
use crate::types::literal_array;

/// Emits one function-call node over the coerced arguments.
pub fn invoke_func<T: ToVecExpr>(name: &str, args: T) -> Column {
    Column::from(Expression::UnresolvedFunction {
        name: name.to_string(),
        args: args.to_vec_expr(),
        is_distinct: false,
    })
}

fn invoke_func_distinct<T: ToVecExpr>(name: &str, args: T) -> Column {
    Column::from(Expression::UnresolvedFunction {
        name: name.to_string(),
        args: args.to_vec_expr(),
        is_distinct: true,
    })
}

/// Validates a documented minimum arity before any node is emitted.
fn invoke_func_min_arity<I>(name: &str, cols: I, minimum: usize) -> Result<Column, PlumeError>
where
    I: IntoIterator<Item = Column>,
{
    let cols: Vec<Column> = cols.into_iter().collect();

    if cols.len() < minimum {
        return Err(PlumeError::WrongNumColumns {
            function: name.to_string(),
            minimum,
            supplied: cols.len(),
        });
    }

    Ok(invoke_func(name, cols))
}

/// Appends reified lambdas after the ordinary coerced arguments. `name` is
/// the engine-internal expression-class name, which may differ from the
/// public entry point (`transform` emits `ArrayTransform`).
fn invoke_higher_order_function(
    name: &str,
    cols: Vec<Expression>,
    lambdas: Vec<Expression>,
) -> Column {
    let mut args = cols;
    args.extend(lambdas);

    invoke_func(name, args)
}

/// Create a column from a &str
pub fn col(value: &str) -> Column {
    Column::from(value)
}

/// Create a column from a &str
pub fn column(value: &str) -> Column {
    Column::from(value)
}

/// Create a literal column from a Rust value.
///
/// A [Column] passes through unchanged. A `Vec` of scalars becomes an
/// `array(...)` call over the element literals. For values only known at
/// runtime, where a list might contain a column handle, use [try_lit].
pub fn lit(value: impl ToLiteralExpr) -> Column {
    Column::from(value.to_literal_expr())
}

/// Create a literal column from a dynamic [LitValue].
///
/// Fails with [PlumeError::ColumnInList] when a list contains a column
/// handle; use [array] to build an array out of columns.
pub fn try_lit(value: impl Into<LitValue>) -> Result<Column, PlumeError> {
    Ok(Column::from(literal_expr(value.into(), "try_lit")?))
}

/// Create an array literal from a one-dimensional Arrow array.
pub fn lit_array(values: &dyn Array) -> Result<Column, PlumeError> {
    Ok(Column::from(Expression::Literal(literal_array(values)?)))
}

/// The SQL escape hatch: the string is carried verbatim to the engine with
/// zero local parsing or validation.
pub fn expr(val: &str) -> Column {
    Column::from(Expression::ExpressionString {
        expression: val.to_string(),
    })
}

/// Starts a case expression with one `(condition, value)` branch.
///
/// Extend it with [Column::when] and close it with [Column::otherwise].
pub fn when<T: ToLiteralExpr>(condition: Column, value: T) -> Column {
    Column::from(Expression::CaseWhen {
        branches: vec![(condition.expression, value.to_literal_expr())],
        else_value: None,
    })
}

/// Returns the greatest value of the list of column names, skipping nulls
pub fn greatest<I>(cols: I) -> Result<Column, PlumeError>
where
    I: IntoIterator<Item = Column>,
{
    invoke_func_min_arity("greatest", cols, 2)
}

/// Returns the least value of the list of column names, skipping nulls
pub fn least<I>(cols: I) -> Result<Column, PlumeError>
where
    I: IntoIterator<Item = Column>,
{
    invoke_func_min_arity("least", cols, 2)
}

pub fn atan2<A: ToColumnOrLiteral, B: ToColumnOrLiteral>(col1: A, col2: B) -> Column {
    invoke_func(
        "atan2",
        vec![col1.to_column_or_literal(), col2.to_column_or_literal()],
    )
}

pub fn hypot<A: ToColumnOrLiteral, B: ToColumnOrLiteral>(col1: A, col2: B) -> Column {
    invoke_func(
        "hypot",
        vec![col1.to_column_or_literal(), col2.to_column_or_literal()],
    )
}

pub fn pmod<A: ToColumnOrLiteral, B: ToColumnOrLiteral>(dividend: A, divisor: B) -> Column {
    invoke_func(
        "pmod",
        vec![
            dividend.to_column_or_literal(),
            divisor.to_column_or_literal(),
        ],
    )
}

/// Value that is `offset` rows before the current row within a window
/// partition. The offset defaults to 1; `default` is only appended to the
/// call when supplied, which selects the three-argument overload.
pub fn lag(col: impl ToExpr, offset: Option<i32>, default: Option<LiteralValue>) -> Column {
    let mut args = vec![col.to_expr(), offset.unwrap_or(1).to_literal_expr()];

    if let Some(default) = default {
        args.push(Expression::Literal(default));
    }

    invoke_func("lag", args)
}

/// Value that is `offset` rows after the current row within a window
/// partition. Defaulting mirrors [lag].
pub fn lead(col: impl ToExpr, offset: Option<i32>, default: Option<LiteralValue>) -> Column {
    let mut args = vec![col.to_expr(), offset.unwrap_or(1).to_literal_expr()];

    if let Some(default) = default {
        args.push(Expression::Literal(default));
    }

    invoke_func("lead", args)
}

/// Approximate percentile of the column. The accuracy parameter is always
/// filled, with 10000 as the documented default.
pub fn percentile_approx(
    col: impl ToExpr,
    percentage: impl ToLiteralExpr,
    accuracy: Option<i64>,
) -> Column {
    invoke_func(
        "percentile_approx",
        vec![
            col.to_expr(),
            percentage.to_literal_expr(),
            accuracy.unwrap_or(10000).to_literal_expr(),
        ],
    )
}

/// Masks the characters of a string column. Absent replacements are filled
/// with the documented defaults (`X`, `x`, `n`, NULL) so the emitted call
/// always has five arguments.
pub fn mask(
    col: impl ToExpr,
    upper_char: Option<&str>,
    lower_char: Option<&str>,
    digit_char: Option<&str>,
    other_char: Option<&str>,
) -> Column {
    invoke_func(
        "mask",
        vec![
            col.to_expr(),
            upper_char.unwrap_or("X").to_literal_expr(),
            lower_char.unwrap_or("x").to_literal_expr(),
            digit_char.unwrap_or("n").to_literal_expr(),
            other_char.to_literal_expr(),
        ],
    )
}

pub fn approx_count_distinct(col: impl ToExpr, rsd: Option<f64>) -> Column {
    match rsd {
        Some(rsd) => invoke_func(
            "approx_count_distinct",
            vec![col.to_expr(), rsd.to_literal_expr()],
        ),
        None => invoke_func("approx_count_distinct", col.to_expr()),
    }
}

pub fn array_join(col: impl ToExpr, delimiter: &str, null_replacement: Option<&str>) -> Column {
    match null_replacement {
        Some(replacement) => invoke_func(
            "array_join",
            vec![
                col.to_expr(),
                delimiter.to_literal_expr(),
                replacement.to_literal_expr(),
            ],
        ),
        None => invoke_func(
            "array_join",
            vec![col.to_expr(), delimiter.to_literal_expr()],
        ),
    }
}

pub fn array_position(col: impl ToExpr, value: impl ToLiteralExpr) -> Column {
    invoke_func(
        "array_position",
        vec![col.to_expr(), value.to_literal_expr()],
    )
}

pub fn array_remove(col: impl ToExpr, element: impl ToLiteralExpr) -> Column {
    invoke_func(
        "array_remove",
        vec![col.to_expr(), element.to_literal_expr()],
    )
}

pub fn array_repeat(col: impl ToExpr, count: impl ToLiteralExpr) -> Column {
    invoke_func(
        "array_repeat",
        vec![col.to_expr(), count.to_literal_expr()],
    )
}

pub fn array_append(col: impl ToExpr, value: impl ToLiteralExpr) -> Column {
    invoke_func(
        "array_append",
        vec![col.to_expr(), value.to_literal_expr()],
    )
}

pub fn array_insert(col: impl ToExpr, pos: impl ToLiteralExpr, value: impl ToLiteralExpr) -> Column {
    invoke_func(
        "array_insert",
        vec![
            col.to_expr(),
            pos.to_literal_expr(),
            value.to_literal_expr(),
        ],
    )
}

pub fn rand(seed: Option<i32>) -> Column {
    invoke_func("rand", lit(seed.unwrap_or(random::<i32>())))
}

pub fn randn(seed: Option<i32>) -> Column {
    invoke_func("randn", lit(seed.unwrap_or(random::<i32>())))
}

pub fn log(arg1: Column, arg2: Option<Column>) -> Column {
    match arg2 {
        Some(arg2) => invoke_func("log", vec![arg1, arg2]),
        None => ln(arg1),
    }
}

pub fn round(col: impl ToExpr, scale: Option<i32>) -> Column {
    invoke_func(
        "round",
        vec![col.to_expr(), scale.unwrap_or(0).to_literal_expr()],
    )
}

pub fn mean(col: impl ToExpr) -> Column {
    avg(col)
}

pub fn negate(col: impl ToExpr) -> Column {
    invoke_func("negative", col.to_expr())
}

pub fn ntile(n: i32) -> Column {
    invoke_func("ntile", lit(n))
}

pub fn pow<A: ToColumnOrLiteral, B: ToColumnOrLiteral>(col1: A, col2: B) -> Column {
    invoke_func(
        "power",
        vec![col1.to_column_or_literal(), col2.to_column_or_literal()],
    )
}

pub fn bitwise_not(col: impl ToExpr) -> Column {
    invoke_func("~", col.to_expr())
}

pub fn shiftleft(col: impl ToExpr, num_bits: i32) -> Column {
    invoke_func(
        "shiftleft",
        vec![col.to_expr(), num_bits.to_literal_expr()],
    )
}

pub fn shiftright(col: impl ToExpr, num_bits: i32) -> Column {
    invoke_func(
        "shiftright",
        vec![col.to_expr(), num_bits.to_literal_expr()],
    )
}

pub fn concat_ws<T: ToVecExpr>(sep: &str, cols: T) -> Column {
    let mut args = vec![sep.to_literal_expr()];
    args.extend(cols.to_vec_expr());

    invoke_func("concat_ws", args)
}

/// Aggregate: counts distinct values over the supplied columns. Argument
/// order is preserved and duplicates are not collapsed.
pub fn count_distinct<T: ToVecExpr>(cols: T) -> Column {
    invoke_func_distinct("count", cols)
}

/// Aggregate: sums distinct values of the column.
pub fn sum_distinct(col: impl ToExpr) -> Column {
    invoke_func_distinct("sum", col.to_expr())
}

#[deprecated(since = "0.1.0", note = "use `bitwise_not` instead")]
#[allow(non_snake_case)]
pub fn bitwiseNOT(col: impl ToExpr) -> Column {
    tracing::warn!(function = "bitwiseNOT", "deprecated, use `bitwise_not`");
    bitwise_not(col)
}

#[deprecated(since = "0.1.0", note = "use `shiftleft` instead")]
#[allow(non_snake_case)]
pub fn shiftLeft(col: impl ToExpr, num_bits: i32) -> Column {
    tracing::warn!(function = "shiftLeft", "deprecated, use `shiftleft`");
    shiftleft(col, num_bits)
}

#[deprecated(since = "0.1.0", note = "use `shiftright` instead")]
#[allow(non_snake_case)]
pub fn shiftRight(col: impl ToExpr, num_bits: i32) -> Column {
    tracing::warn!(function = "shiftRight", "deprecated, use `shiftright`");
    shiftright(col, num_bits)
}

#[deprecated(since = "0.1.0", note = "use `count_distinct` instead")]
#[allow(non_snake_case)]
pub fn countDistinct<T: ToVecExpr>(cols: T) -> Column {
    tracing::warn!(function = "countDistinct", "deprecated, use `count_distinct`");
    count_distinct(cols)
}

#[deprecated(since = "0.1.0", note = "use `sum_distinct` instead")]
#[allow(non_snake_case)]
pub fn sumDistinct(col: impl ToExpr) -> Column {
    tracing::warn!(function = "sumDistinct", "deprecated, use `sum_distinct`");
    sum_distinct(col)
}

pub fn asc(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).asc()
}

pub fn asc_nulls_first(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).asc_nulls_first()
}

pub fn asc_nulls_last(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).asc_nulls_last()
}

pub fn desc(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).desc()
}

pub fn desc_nulls_first(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).desc_nulls_first()
}

pub fn desc_nulls_last(col: impl ToExpr) -> Column {
    Column::from(col.to_expr()).desc_nulls_last()
}

/// Element-wise transformation of an array. The closure takes the element,
/// or the element and its index, and describes the replacement expression;
/// it runs exactly once, here, against fresh lambda variables.
///
/// # Example:
/// ```rust
/// let doubled = transform("xs", |v: Column| v * lit(2));
/// let indexed = transform("xs", |v: Column, i: Column| v + i);
/// ```
pub fn transform<A, F>(col: impl ToExpr, f: F) -> Column
where
    F: IntoElementLambda<A>,
{
    invoke_higher_order_function(
        "ArrayTransform",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Keeps the array elements for which the predicate holds. The closure
/// takes the element, or the element and its index.
pub fn filter<A, F>(col: impl ToExpr, f: F) -> Column
where
    F: IntoElementLambda<A>,
{
    invoke_higher_order_function(
        "ArrayFilter",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Whether the predicate holds for at least one element of the array.
pub fn exists<F>(col: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column) -> Column,
{
    invoke_higher_order_function(
        "ArrayExists",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Whether the predicate holds for every element of the array.
pub fn forall<F>(col: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column) -> Column,
{
    invoke_higher_order_function(
        "ArrayForAll",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Folds the array with `merge`, starting from `initial_value`.
pub fn aggregate<F>(col: impl ToExpr, initial_value: impl ToLiteralExpr, merge: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "ArrayAggregate",
        vec![col.to_expr(), initial_value.to_literal_expr()],
        vec![merge.into_lambda(&LAMBDA_IDS)],
    )
}

/// [aggregate] with a final projection applied to the folded value. The
/// lambdas are appended in `merge, finish` order.
pub fn aggregate_with_finish<M, F>(
    col: impl ToExpr,
    initial_value: impl ToLiteralExpr,
    merge: M,
    finish: F,
) -> Column
where
    M: FnOnce(Column, Column) -> Column,
    F: FnOnce(Column) -> Column,
{
    invoke_higher_order_function(
        "ArrayAggregate",
        vec![col.to_expr(), initial_value.to_literal_expr()],
        vec![merge.into_lambda(&LAMBDA_IDS), finish.into_lambda(&LAMBDA_IDS)],
    )
}

/// An alias for [aggregate].
pub fn reduce<F>(col: impl ToExpr, initial_value: impl ToLiteralExpr, merge: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    aggregate(col, initial_value, merge)
}

/// Merges two arrays element-wise with the closure.
pub fn zip_with<F>(left: impl ToExpr, right: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "ZipWith",
        vec![left.to_expr(), right.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Keeps the map entries for which the `(key, value)` predicate holds.
pub fn map_filter<F>(col: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "MapFilter",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Merges two maps into one, combining values with the `(key, value1,
/// value2)` closure.
pub fn map_zip_with<F>(col1: impl ToExpr, col2: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column, Column, Column) -> Column,
{
    invoke_higher_order_function(
        "MapZipWith",
        vec![col1.to_expr(), col2.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Applies the `(key, value)` closure to every key of the map.
pub fn transform_keys<F>(col: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "TransformKeys",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Applies the `(key, value)` closure to every value of the map.
pub fn transform_values<F>(col: impl ToExpr, f: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "TransformValues",
        vec![col.to_expr()],
        vec![f.into_lambda(&LAMBDA_IDS)],
    )
}

/// Sorts the array with a custom comparator; the closure returns a negative,
/// zero, or positive expression like a three-way comparison. For the natural
/// ordering use [array_sort].
pub fn array_sort_by<F>(col: impl ToExpr, comparator: F) -> Column
where
    F: FnOnce(Column, Column) -> Column,
{
    invoke_higher_order_function(
        "ArraySort",
        vec![col.to_expr()],
        vec![comparator.into_lambda(&LAMBDA_IDS)],
    )
}

macro_rules! generate_functions {
    (no_args: $($func_name:ident),*) => {
        $(
            pub fn $func_name() -> Column {
                let empty_args: Vec<Column> = vec![];
                invoke_func(stringify!($func_name), empty_args)
            }
        )*
    };
    (one_col: $($func_name:ident),*) => {
        $(
            pub fn $func_name(col: impl ToExpr) -> Column
            {
                invoke_func(stringify!($func_name), col.to_expr())
            }
        )*
    };
    (two_cols: $($func_name:ident),*) => {
        $(
            pub fn $func_name<A: ToExpr, B: ToExpr>(col1: A, col2: B) -> Column
            {
                invoke_func(stringify!($func_name), vec![col1.to_expr(), col2.to_expr()])
            }
        )*
    };
    (multiple_cols: $($func_name:ident),*) => {
        $(
            pub fn $func_name<T: ToVecExpr>(cols: T) -> Column
            {
                invoke_func(stringify!($func_name), cols)
            }
        )*
    };
}

// functions that require no arguments
generate_functions!(
    no_args: pi,
    input_file_name,
    monotonically_increasing_id,
    partition_id,
    e,
    curdate,
    current_date,
    current_timezone,
    now,
    version,
    user,
    current_user,
    current_schema,
    current_database,
    current_catalog,
    row_number,
    rank,
    percent_rank,
    dense_rank,
    cume_dist,
    current_timestamp,
    localtimestamp
);

// functions that require a single col argument
generate_functions!(
    one_col: isnan,
    isnull,
    isnotnull,
    sqrt,
    abs,
    bin,
    ceil,
    ceiling,
    exp,
    factorial,
    floor,
    ln,
    log10,
    log1p,
    log2,
    negative,
    day,
    dayofmonth,
    dayofweek,
    dayofyear,
    second,
    minute,
    hour,
    weekday,
    weekofyear,
    year,
    quarter,
    month,
    timestamp_micros,
    timestamp_millis,
    timestamp_seconds,
    unix_date,
    unix_millis,
    unix_micros,
    unix_seconds,
    ascii,
    base64,
    bit_length,
    char,
    length,
    lower,
    ltrim,
    unbase64,
    upper,
    ucase,
    trim,
    crc32,
    sha1,
    md5,
    sha,
    bit_count,
    soundex,
    rtrim,
    octet_length,
    initcap,
    map_from_entries,
    map_entries,
    map_values,
    map_keys,
    flatten,
    reverse,
    shuffle,
    array_min,
    array_max,
    array_sort,
    cardinality,
    size,
    json_object_keys,
    json_array_length,
    inline_outer,
    inline,
    posexplode_outer,
    posexplode,
    explode_outer,
    explode,
    array_compact,
    array_distinct,
    array_size,
    acos,
    acosh,
    asin,
    asinh,
    atan,
    atanh,
    avg,
    cbrt,
    collect_set,
    collect_list,
    csc,
    degrees,
    expm1,
    grouping,
    hex,
    kurtosis,
    max,
    median,
    min,
    product,
    radians,
    rint,
    sec,
    signum,
    sin,
    sinh,
    skewness,
    stddev,
    stddev_pop,
    stddev_samp,
    sum,
    tan,
    tanh,
    unhex,
    var_pop,
    var_samp,
    variance,
    count
);

// functions that require exactly two col arguments
generate_functions!(
    two_cols: nvl,
    nullif,
    ifnull,
    equal_null,
    array_except,
    array_union,
    array_intersect,
    arrays_overlap,
    nanvl,
    power,
    covar_pop,
    covar_samp,
    add_months,
    date_add,
    dateadd,
    datediff,
    date_sub
);

// functions that require one or more col arguments
generate_functions!(
    multiple_cols: coalesce,
    named_struct,
    stack,
    java_method,
    reflect,
    xxhash64,
    hash,
    map_concat,
    arrays_zip,
    concat,
    create_map,
    array
);

/// Creates a new struct column.
pub fn struct_col<T: ToVecExpr>(cols: T) -> Column {
    invoke_func("struct", cols)
}

/// Creates a new row for each field of the JSON column; `fields` are field
/// names, carried as string literals.
pub fn json_tuple<'a, I>(col: impl ToExpr, fields: I) -> Column
where
    I: IntoIterator<Item = &'a str>,
{
    let mut args = vec![col.to_expr()];
    args.extend(fields.into_iter().map(|field| field.to_literal_expr()));

    invoke_func("json_tuple", args)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use crate::expressions::{LambdaVariable, LiteralValue};
    use crate::types::DataType;

    fn func_parts(column: &Column) -> (&str, &Vec<Expression>, bool) {
        match &column.expression {
            Expression::UnresolvedFunction {
                name,
                args,
                is_distinct,
            } => (name, args, *is_distinct),
            other => panic!("expected a function call, got {other:?}"),
        }
    }

    #[test]
    fn test_lit_scalar() {
        assert_eq!(
            lit(5).expression,
            Expression::Literal(LiteralValue::Integer(5))
        );
        assert_eq!(
            lit("five").expression,
            Expression::Literal(LiteralValue::String("five".to_string()))
        );
    }

    #[test]
    fn test_lit_of_column_is_identity() {
        let c = col("age");

        assert_eq!(lit(c.clone()), c);
    }

    #[test]
    fn test_lit_list_becomes_array_call() {
        assert_eq!(
            lit(vec![1, 2, 3]).expression,
            Expression::func(
                "array",
                vec![
                    Expression::Literal(LiteralValue::Integer(1)),
                    Expression::Literal(LiteralValue::Integer(2)),
                    Expression::Literal(LiteralValue::Integer(3)),
                ],
            ),
        );
    }

    #[test]
    fn test_try_lit_rejects_column_in_list_but_array_accepts() {
        let values: Vec<LitValue> = vec![1.into(), col("x").into()];

        // the diagnostic names the entry point the caller actually invoked
        let err = try_lit(values).unwrap_err();
        assert!(matches!(err, PlumeError::ColumnInList { function } if function == "try_lit"));

        // different code path, different contract
        let column = array(vec![lit(1), col("x")]);
        let (name, args, _) = func_parts(&column);
        assert_eq!(name, "array");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_lit_array_from_arrow() {
        let values = arrow::array::Int8Array::from(vec![1, 2]);

        let column = lit_array(&values).unwrap();

        assert_eq!(
            column.expression,
            Expression::Literal(LiteralValue::Array {
                element_type: DataType::Short,
                values: vec![LiteralValue::Short(1), LiteralValue::Short(2)],
            }),
        );
    }

    #[test]
    fn test_variadic_flattening() {
        // array over a Vec, a fixed-size slice, and a single column are the
        // same call shape
        let from_vec = array(vec![col("a"), col("b")]);
        let from_arr = array([col("a"), col("b")]);

        assert_eq!(from_vec, from_arr);

        let (name, args, _) = func_parts(&from_vec);
        assert_eq!(name, "array");
        assert_eq!(
            *args,
            vec![col("a").expression, col("b").expression],
        );
    }

    #[test]
    fn test_when_builds_case_expression() {
        let column = when(col("x").gt(0), 1);

        assert_eq!(
            column.expression,
            Expression::CaseWhen {
                branches: vec![(
                    Expression::func(
                        ">",
                        vec![
                            col("x").expression,
                            Expression::Literal(LiteralValue::Integer(0)),
                        ],
                    ),
                    Expression::Literal(LiteralValue::Integer(1)),
                )],
                else_value: None,
            },
        );
    }

    #[test]
    fn test_greatest_arity_is_validated_client_side() {
        let err = greatest(vec![col("a")]).unwrap_err();
        assert!(matches!(
            err,
            PlumeError::WrongNumColumns {
                function,
                minimum: 2,
                supplied: 1,
            } if function == "greatest"
        ));

        let err = least(Vec::<Column>::new()).unwrap_err();
        assert!(matches!(
            err,
            PlumeError::WrongNumColumns { supplied: 0, .. }
        ));

        let column = greatest(vec![col("a"), col("b"), col("c")]).unwrap();
        let (name, args, _) = func_parts(&column);
        assert_eq!(name, "greatest");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_count_distinct_sets_marker_and_keeps_order() {
        let column = count_distinct(vec![col("a"), col("b"), col("a")]);

        let (name, args, is_distinct) = func_parts(&column);
        assert_eq!(name, "count");
        assert!(is_distinct);
        // order preserved, duplicates kept
        assert_eq!(
            *args,
            vec![
                col("a").expression,
                col("b").expression,
                col("a").expression,
            ],
        );
    }

    #[test]
    #[allow(deprecated)]
    fn test_deprecated_aliases_build_identical_trees() {
        assert_eq!(bitwiseNOT(col("a")), bitwise_not(col("a")));
        assert_eq!(shiftLeft(col("a"), 2), shiftleft(col("a"), 2));
        assert_eq!(shiftRight(col("a"), 2), shiftright(col("a"), 2));
        assert_eq!(
            countDistinct(vec![col("a"), col("b")]),
            count_distinct(vec![col("a"), col("b")]),
        );
        assert_eq!(sumDistinct(col("a")), sum_distinct(col("a")));
    }

    #[test]
    fn test_mixed_column_or_literal_arguments() {
        let by_name = atan2("y", "x");
        let (_, args, _) = func_parts(&by_name);
        assert_eq!(
            *args,
            vec![col("y").expression, col("x").expression],
        );

        let by_literal = atan2(1.0, "x");
        let (_, args, _) = func_parts(&by_literal);
        assert_eq!(
            *args,
            vec![
                Expression::Literal(LiteralValue::Double(1.0)),
                col("x").expression,
            ],
        );
    }

    #[test]
    fn test_lag_offset_defaulting_changes_arity() {
        let two_arg = lag(col("v"), None, None);
        let (_, args, _) = func_parts(&two_arg);
        assert_eq!(args.len(), 2);
        assert_eq!(args[1], Expression::Literal(LiteralValue::Integer(1)));

        let three_arg = lag(col("v"), Some(2), Some(LiteralValue::Integer(0)));
        let (_, args, _) = func_parts(&three_arg);
        assert_eq!(args.len(), 3);
        assert_eq!(args[1], Expression::Literal(LiteralValue::Integer(2)));
        assert_eq!(args[2], Expression::Literal(LiteralValue::Integer(0)));
    }

    #[test]
    fn test_percentile_approx_fills_accuracy() {
        let column = percentile_approx(col("v"), 0.5, None);

        let (_, args, _) = func_parts(&column);
        assert_eq!(args.len(), 3);
        assert_eq!(args[2], Expression::Literal(LiteralValue::Long(10000)));
    }

    #[test]
    fn test_mask_always_emits_five_arguments() {
        let column = mask(col("card"), None, None, Some("#"), None);

        let (_, args, _) = func_parts(&column);
        assert_eq!(args.len(), 5);
        assert_eq!(args[1], Expression::Literal(LiteralValue::String("X".to_string())));
        assert_eq!(args[2], Expression::Literal(LiteralValue::String("x".to_string())));
        assert_eq!(args[3], Expression::Literal(LiteralValue::String("#".to_string())));
        assert_eq!(args[4], Expression::Literal(LiteralValue::Null));
    }

    #[test]
    fn test_expr_is_carried_verbatim() {
        assert_eq!(
            expr("length(name) + 1").expression,
            Expression::ExpressionString {
                expression: "length(name) + 1".to_string(),
            },
        );
    }

    #[test]
    fn test_transform_builds_array_transform_call() {
        let column = transform("xs", |v: Column| v * lit(2));

        let (name, args, _) = func_parts(&column);
        assert_eq!(name, "ArrayTransform");
        assert_eq!(args[0], col("xs").expression);

        match &args[1] {
            Expression::LambdaFunction {
                function,
                arguments,
            } => {
                assert_eq!(arguments.len(), 1);
                assert!(arguments[0].name.starts_with("x_"));
                assert_eq!(
                    **function,
                    Expression::func(
                        "*",
                        vec![
                            Expression::LambdaVariable(arguments[0].clone()),
                            Expression::Literal(LiteralValue::Integer(2)),
                        ],
                    ),
                );
            }
            other => panic!("expected a lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_transform_accepts_index_closure() {
        let column = transform("xs", |v: Column, i: Column| v + i);

        let (_, args, _) = func_parts(&column);
        match &args[1] {
            Expression::LambdaFunction { arguments, .. } => {
                assert_eq!(arguments.len(), 2);
                assert!(arguments[0].name.starts_with("x_"));
                assert!(arguments[1].name.starts_with("y_"));
            }
            other => panic!("expected a lambda, got {other:?}"),
        }
    }

    #[test]
    fn test_filter_accepts_element_and_index_closures() {
        let lambda_arity = |column: &Column| -> usize {
            let (_, args, _) = func_parts(column);
            match &args[1] {
                Expression::LambdaFunction { arguments, .. } => arguments.len(),
                other => panic!("expected a lambda, got {other:?}"),
            }
        };

        let by_value = filter("xs", |v: Column| v.gt(0));
        let (name, ..) = func_parts(&by_value);
        assert_eq!(name, "ArrayFilter");
        assert_eq!(lambda_arity(&by_value), 1);

        let by_index = filter("xs", |v: Column, i: Column| v.gt(0).and(i.lt(5)));
        assert_eq!(lambda_arity(&by_index), 2);
    }

    #[test]
    fn test_callback_runs_exactly_once() {
        let calls = Cell::new(0);

        let column = transform("xs", |v: Column| {
            calls.set(calls.get() + 1);
            v * lit(2)
        });

        // reusing the built tree never re-runs the closure
        let _ = column.clone().alias("a");
        let _ = column.alias("b");

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_repeated_lambdas_get_fresh_variables() {
        let first = transform("xs", |v: Column| v * lit(2));
        let second = transform("xs", |v: Column| v * lit(2));

        let bound = |column: &Column| -> Vec<LambdaVariable> {
            let (_, args, _) = func_parts(column);
            match &args[1] {
                Expression::LambdaFunction { arguments, .. } => arguments.clone(),
                other => panic!("expected a lambda, got {other:?}"),
            }
        };

        assert_ne!(bound(&first), bound(&second));
    }

    #[test]
    fn test_aggregate_appends_merge_then_finish() {
        let column = aggregate_with_finish(
            col("xs"),
            0,
            |acc: Column, v: Column| acc + v,
            |acc: Column| acc.cast("double"),
        );

        let (name, args, _) = func_parts(&column);
        assert_eq!(name, "ArrayAggregate");
        assert_eq!(args.len(), 4);
        assert_eq!(args[0], col("xs").expression);
        assert_eq!(args[1], Expression::Literal(LiteralValue::Integer(0)));

        let arity = |expr: &Expression| match expr {
            Expression::LambdaFunction { arguments, .. } => arguments.len(),
            other => panic!("expected a lambda, got {other:?}"),
        };
        assert_eq!(arity(&args[2]), 2);
        assert_eq!(arity(&args[3]), 1);
    }

    #[test]
    fn test_reduce_matches_aggregate_shape() {
        let reduced = reduce(col("xs"), 0, |acc: Column, v: Column| acc + v);
        let (name, args, _) = func_parts(&reduced);

        assert_eq!(name, "ArrayAggregate");
        assert_eq!(args.len(), 3);
    }

    #[test]
    fn test_map_and_zip_entries_use_internal_names() {
        let zipped = zip_with("a", "b", |x: Column, y: Column| x + y);
        let (name, args, _) = func_parts(&zipped);
        assert_eq!(name, "ZipWith");
        assert_eq!(args.len(), 3);

        let filtered = map_filter("m", |k: Column, _v: Column| k.gt(1));
        let (name, ..) = func_parts(&filtered);
        assert_eq!(name, "MapFilter");

        let merged = map_zip_with("m1", "m2", |_k: Column, v1: Column, v2: Column| v1 + v2);
        let (name, args, _) = func_parts(&merged);
        assert_eq!(name, "MapZipWith");
        match &args[2] {
            Expression::LambdaFunction { arguments, .. } => assert_eq!(arguments.len(), 3),
            other => panic!("expected a lambda, got {other:?}"),
        }

        let keyed = transform_keys("m", |k: Column, _v: Column| k.cast("string"));
        let (name, ..) = func_parts(&keyed);
        assert_eq!(name, "TransformKeys");

        let valued = transform_values("m", |_k: Column, v: Column| v * lit(2));
        let (name, ..) = func_parts(&valued);
        assert_eq!(name, "TransformValues");

        let any = exists("xs", |v: Column| v.gt(10));
        let (name, ..) = func_parts(&any);
        assert_eq!(name, "ArrayExists");

        let all = forall("xs", |v: Column| v.is_not_null());
        let (name, ..) = func_parts(&all);
        assert_eq!(name, "ArrayForAll");
    }

    #[test]
    fn test_array_sort_with_and_without_comparator() {
        let natural = array_sort(col("xs"));
        let (name, args, _) = func_parts(&natural);
        assert_eq!(name, "array_sort");
        assert_eq!(args.len(), 1);

        let custom = array_sort_by(col("xs"), |a: Column, b: Column| (a - b).cast("int"));
        let (name, args, _) = func_parts(&custom);
        assert_eq!(name, "ArraySort");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_sort_entry_points_accept_names() {
        assert_eq!(asc("id"), col("id").asc());
        assert_eq!(desc_nulls_last("id"), col("id").desc_nulls_last());
        // the name rule applies before the sort wrapper
        assert_eq!(
            asc("*").expression,
            Expression::func("asc", vec![Expression::UnresolvedStar { target: None }]),
        );
    }

    #[test]
    fn test_rand_with_seed() {
        let column = rand(Some(42));

        let (name, args, _) = func_parts(&column);
        assert_eq!(name, "rand");
        assert_eq!(args[0], Expression::Literal(LiteralValue::Integer(42)));
    }

    #[test]
    fn test_log_without_base_is_ln() {
        assert_eq!(log(col("v"), None), ln(col("v")));

        let with_base = log(col("v"), Some(lit(2)));
        let (name, args, _) = func_parts(&with_base);
        assert_eq!(name, "log");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_concat_ws_prepends_separator() {
        let column = concat_ws("-", vec![col("a"), col("b")]);

        let (_, args, _) = func_parts(&column);
        assert_eq!(args.len(), 3);
        assert_eq!(
            args[0],
            Expression::Literal(LiteralValue::String("-".to_string())),
        );
    }
}
