//! Operator and value validation for where clauses

use crate::{Error, Operator, Result, Value};

/// Operators that may legally be compared against `NULL`
const NULL_COMPARABLE: &[Operator] = &[Operator::EQ, Operator::NE, Operator::NEQ];

/// True when `value` is `NULL` and `operator` cannot compare against it.
pub fn invalid_operator_and_value(operator: &Operator, value: &Value) -> bool {
    value.is_null() && !NULL_COMPARABLE.contains(operator)
}

/// Resolve the operator slot of a where call into a catalog operator and the
/// value to bind.
///
/// - no operator: defaults to `=`
/// - a catalog operator: kept, unless the value is `NULL` and the operator
///   cannot compare against it, which is an error
/// - anything else: the operator is forced to `=` and the supplied operator
///   becomes the value
pub fn resolve(
    operator: Option<Value>,
    value: Value,
    dialect: &[&'static str],
) -> Result<(Operator, Value)> {
    let Some(operator) = operator else {
        return Ok((Operator::EQ, value));
    };

    match operator.as_str().and_then(|s| Operator::lookup(s, dialect)) {
        Some(known) if invalid_operator_and_value(&known, &value) => Err(Error::invalid_argument(
            "Illegal operator and value combination.",
        )),
        Some(known) => Ok((known, value)),
        None => {
            tracing::debug!(
                operator = ?operator,
                "operator not in catalog, binding it as the value of an equality"
            );
            Ok((Operator::EQ, operator))
        }
    }
}

/// Split one grouped where entry into `(column, operator, value)`.
///
/// Entries hold `[column, value]` or `[column, operator, value]`; the column
/// must be a string.
pub fn split_group_entry(index: usize, entry: Vec<Value>) -> Result<(String, Option<Value>, Value)> {
    let arity = entry.len();
    let mut parts = entry.into_iter();
    let (column, operator, value) = match (parts.next(), parts.next(), parts.next(), arity) {
        (Some(column), Some(value), None, 2) => (column, None, value),
        (Some(column), Some(operator), Some(value), 3) => (column, Some(operator), value),
        _ => return Err(Error::malformed_group(index, arity)),
    };

    match column {
        Value::String(column) => Ok((column, operator, value)),
        other => Err(Error::invalid_argument(format!(
            "where group entry {index} has a non-string column ({})",
            other.type_name()
        ))),
    }
}
