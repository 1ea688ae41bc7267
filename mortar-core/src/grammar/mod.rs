//! Grammar compilers: render a [`QuerySpec`] into dialect SQL
//!
//! The provided methods of [`Grammar`] hold the compiler shared by every
//! dialect. A dialect supplies identifier quoting, its table prefix and any
//! extra operators, and may override individual clause renderers.

pub mod mysql;

pub use mysql::MySqlGrammar;

use std::sync::LazyLock;

use regex::Regex;

use crate::builder::{QuerySpec, WhereClause};
use crate::{Error, Operator, Result, Value};

static ALIAS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+as\s+").expect("alias pattern is valid"));

static LEADING_BOOLEAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:and|or) ").expect("boolean pattern is valid"));

/// Split `expr as alias` into its base and alias
fn split_alias(value: &str) -> Option<(&str, &str)> {
    let found = ALIAS.find(value)?;
    Some((&value[..found.start()], &value[found.end()..]))
}

/// A SQL dialect
pub trait Grammar {
    /// Quote a single identifier segment
    fn wrap_value(&self, value: &str) -> String;

    /// Prefix prepended to every table name
    fn table_prefix(&self) -> &str;

    /// Comparison operators this dialect adds to the shared catalog
    fn operators(&self) -> &'static [&'static str] {
        &[]
    }

    /// Wrap a column expression: `users.id`, `id as key`, `*`
    fn wrap(&self, value: &str) -> String {
        if let Some((base, alias)) = split_alias(value) {
            return format!("{} as {}", self.wrap(base), self.wrap_value(alias));
        }

        let segments: Vec<&str> = value.split('.').collect();
        self.wrap_segments(&segments)
    }

    /// Wrap dotted segments; a leading segment is a table qualifier
    fn wrap_segments(&self, segments: &[&str]) -> String {
        let qualified = segments.len() > 1;
        segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                if i == 0 && qualified {
                    self.wrap_table(segment)
                } else {
                    self.wrap_value(segment)
                }
            })
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Wrap a table expression, applying the table prefix to the table name
    /// and to its alias
    fn wrap_table(&self, table: &str) -> String {
        let prefix = self.table_prefix();

        if let Some((base, alias)) = split_alias(table) {
            return format!(
                "{} as {}",
                self.wrap_table(base),
                self.wrap_value(&format!("{prefix}{alias}"))
            );
        }

        match table.rsplit_once('.') {
            Some((schema, name)) => format!("{schema}.{prefix}{name}")
                .split('.')
                .map(|segment| self.wrap_value(segment))
                .collect::<Vec<_>>()
                .join("."),
            None => self.wrap_value(&format!("{prefix}{table}")),
        }
    }

    /// Wrap every column and join them with `, `
    fn columnize(&self, columns: &[String]) -> String {
        columns
            .iter()
            .map(|column| self.wrap(column))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Placeholder for one binding
    fn parameter(&self, _value: &Value) -> &'static str {
        "?"
    }

    /// Placeholders for a list of bindings
    fn parameterize(&self, values: &[Value]) -> String {
        values
            .iter()
            .map(|value| self.parameter(value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Compile a select statement
    fn compile_select(&self, query: &QuerySpec) -> Result<String> {
        let table = query.table().ok_or(Error::MissingTable)?;

        let components = [
            format!("select {}", self.columnize(query.selects())),
            format!("from {}", self.wrap_table(table)),
            self.compile_wheres(query.wheres()),
        ];

        Ok(self.concatenate(&components))
    }

    /// Compile the where clause, or an empty string when there is none
    fn compile_wheres(&self, wheres: &[WhereClause]) -> String {
        if wheres.is_empty() {
            return String::new();
        }

        let joined = wheres
            .iter()
            .map(|clause| format!("{} {}", clause.boolean(), self.compile_where(clause)))
            .collect::<Vec<_>>()
            .join(" ");

        format!("where {}", self.remove_leading_boolean(&joined))
    }

    /// Compile one clause, without its boolean
    fn compile_where(&self, clause: &WhereClause) -> String {
        match clause {
            WhereClause::Basic { column, operator, value, .. } => {
                self.where_basic(column, operator, value)
            }
            WhereClause::Bitwise { column, operator, value, .. } => {
                self.where_bitwise(column, operator, value)
            }
            WhereClause::In { column, values, negated, .. } => {
                self.where_in(column, values, *negated)
            }
            WhereClause::Null { column, negated, .. } => self.where_null(column, *negated),
            WhereClause::Between { column, low, high, negated, .. } => {
                self.where_between(column, low, high, *negated)
            }
        }
    }

    fn where_basic(&self, column: &str, operator: &Operator, value: &Value) -> String {
        format!("{} {} {}", self.wrap(column), operator, self.parameter(value))
    }

    fn where_bitwise(&self, column: &str, operator: &Operator, value: &Value) -> String {
        self.where_basic(column, operator, value)
    }

    fn where_in(&self, column: &str, values: &[Value], negated: bool) -> String {
        match (values.is_empty(), negated) {
            (true, false) => "0 = 1".to_string(),
            (true, true) => "1 = 1".to_string(),
            (false, false) => format!("{} in ({})", self.wrap(column), self.parameterize(values)),
            (false, true) => format!("{} not in ({})", self.wrap(column), self.parameterize(values)),
        }
    }

    fn where_null(&self, column: &str, negated: bool) -> String {
        let not = if negated { "not " } else { "" };
        format!("{} is {not}null", self.wrap(column))
    }

    fn where_between(&self, column: &str, low: &Value, high: &Value, negated: bool) -> String {
        let not = if negated { "not " } else { "" };
        format!(
            "{} {not}between {} and {}",
            self.wrap(column),
            self.parameter(low),
            self.parameter(high)
        )
    }

    /// Join non-empty segments with single spaces
    fn concatenate(&self, segments: &[String]) -> String {
        segments
            .iter()
            .filter(|segment| !segment.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Strip one leading `and ` or `or `
    fn remove_leading_boolean(&self, value: &str) -> String {
        LEADING_BOOLEAN.replacen(value, 1, "").into_owned()
    }
}
