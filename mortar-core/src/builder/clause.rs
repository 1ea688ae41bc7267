//! Where clause types and the predicate forms accepted by `where_`

use std::fmt::{self, Display};

use crate::{Operator, Value};

/// How a where clause joins the clause before it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boolean {
    And,
    Or,
}

impl Boolean {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boolean::And => "and",
            Boolean::Or => "or",
        }
    }
}

impl Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the ordered where list
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// `column operator ?`
    Basic {
        column: String,
        operator: Operator,
        value: Value,
        boolean: Boolean,
    },
    /// Same shape as `Basic`, with an operator from the bitwise catalog
    Bitwise {
        column: String,
        operator: Operator,
        value: Value,
        boolean: Boolean,
    },
    /// `column [not] in (?, ...)`
    In {
        column: String,
        values: Vec<Value>,
        negated: bool,
        boolean: Boolean,
    },
    /// `column is [not] null`
    Null {
        column: String,
        negated: bool,
        boolean: Boolean,
    },
    /// `column [not] between ? and ?`
    Between {
        column: String,
        low: Value,
        high: Value,
        negated: bool,
        boolean: Boolean,
    },
}

impl WhereClause {
    pub fn column(&self) -> &str {
        match self {
            WhereClause::Basic { column, .. }
            | WhereClause::Bitwise { column, .. }
            | WhereClause::In { column, .. }
            | WhereClause::Null { column, .. }
            | WhereClause::Between { column, .. } => column,
        }
    }

    pub fn boolean(&self) -> Boolean {
        match self {
            WhereClause::Basic { boolean, .. }
            | WhereClause::Bitwise { boolean, .. }
            | WhereClause::In { boolean, .. }
            | WhereClause::Null { boolean, .. }
            | WhereClause::Between { boolean, .. } => *boolean,
        }
    }

    /// The values this clause binds, in placeholder order
    pub fn bindings(&self) -> Vec<Value> {
        match self {
            WhereClause::Basic { value, .. } | WhereClause::Bitwise { value, .. } => {
                vec![value.clone()]
            }
            WhereClause::In { values, .. } => values.clone(),
            WhereClause::Null { .. } => Vec::new(),
            WhereClause::Between { low, high, .. } => vec![low.clone(), high.clone()],
        }
    }
}

/// The argument of a `where_` call
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A single comparison. `operator: None` is the two-argument form.
    Single {
        column: String,
        operator: Option<Value>,
        value: Value,
    },
    /// A batch of `[column, value]` or `[column, operator, value]` entries
    Group(Vec<Vec<Value>>),
}

/// Trait for arguments that can be used in where calls
pub trait IntoPredicate {
    fn into_predicate(self) -> Predicate;
}

impl IntoPredicate for Predicate {
    fn into_predicate(self) -> Predicate {
        self
    }
}

// Shorthand equality: where_(("age", 18))
impl<T> IntoPredicate for (&str, T)
where
    T: Into<Value>,
{
    fn into_predicate(self) -> Predicate {
        Predicate::Single {
            column: self.0.to_string(),
            operator: None,
            value: self.1.into(),
        }
    }
}

// Explicit operator: where_(("age", ">", 18)) or where_(("age", op::GT, 18))
impl<O, T> IntoPredicate for (&str, O, T)
where
    O: Into<Value>,
    T: Into<Value>,
{
    fn into_predicate(self) -> Predicate {
        Predicate::Single {
            column: self.0.to_string(),
            operator: Some(self.1.into()),
            value: self.2.into(),
        }
    }
}

// Typed batch: where_(vec![("age", ">", 18), ("score", ">=", 50)])
impl<O, T> IntoPredicate for Vec<(&str, O, T)>
where
    O: Into<Value>,
    T: Into<Value>,
{
    fn into_predicate(self) -> Predicate {
        Predicate::Group(
            self.into_iter()
                .map(|(column, operator, value)| vec![column.into(), operator.into(), value.into()])
                .collect(),
        )
    }
}

// Untyped batch, validated when applied
impl IntoPredicate for Vec<Vec<Value>> {
    fn into_predicate(self) -> Predicate {
        Predicate::Group(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::op;

    #[test]
    fn test_shorthand_equality() {
        let predicate = ("name", "John").into_predicate();
        assert_eq!(
            predicate,
            Predicate::Single {
                column: "name".to_string(),
                operator: None,
                value: Value::from("John"),
            }
        );
    }

    #[test]
    fn test_explicit_operator_forms() {
        let from_str = ("age", ">", 18).into_predicate();
        let from_const = ("age", op::GT, 18).into_predicate();
        assert_eq!(from_str, from_const);
    }

    #[test]
    fn test_typed_group() {
        let predicate = vec![("age", ">", 18), ("score", ">=", 50)].into_predicate();
        let Predicate::Group(entries) = predicate else {
            panic!("expected a group");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1], vec![Value::from("score"), Value::from(">="), Value::I32(50)]);
    }

    #[test]
    fn test_clause_accessors() {
        let clause = WhereClause::Between {
            column: "age".to_string(),
            low: 18.into(),
            high: 65.into(),
            negated: false,
            boolean: Boolean::Or,
        };
        assert_eq!(clause.column(), "age");
        assert_eq!(clause.boolean(), Boolean::Or);
        assert_eq!(clause.bindings(), vec![Value::I32(18), Value::I32(65)]);

        let clause = WhereClause::Null {
            column: "deleted_at".to_string(),
            negated: true,
            boolean: Boolean::And,
        };
        assert!(clause.bindings().is_empty());
    }

    #[test]
    fn test_boolean_display() {
        assert_eq!(Boolean::And.to_string(), "and");
        assert_eq!(Boolean::Or.to_string(), "or");
    }
}
