//! Fluent select query builder

mod bindings;
mod clause;
mod columns;
mod spec;

pub use bindings::{BindingCategory, Bindings, IntoBindingCategory};
pub use clause::{Boolean, IntoPredicate, Predicate, WhereClause};
pub use columns::IntoColumns;
pub use spec::QuerySpec;

use std::fmt;

use serde::de::DeserializeOwned;

use crate::executor::{Connection, QueryResult};
use crate::grammar::Grammar;
use crate::{validation, Result, Value};

/// Hook applied to every scalar before it is recorded as a binding
fn cast_binding(value: Value) -> Value {
    value
}

/// A select query under construction, bound to the connection that will
/// execute it and, through it, to that connection's grammar.
///
/// Mutators consume the builder and hand it back, so a chain reads
/// `connection.table("users").select(...).where_(...)?`. Calls that can
/// reject their arguments return `Result<Self>`.
pub struct Builder<'c, C: Connection> {
    connection: &'c C,
    spec: QuerySpec,
}

impl<'c, C: Connection> Builder<'c, C> {
    /// Create an empty query on `connection`
    pub fn new(connection: &'c C) -> Self {
        Self {
            connection,
            spec: QuerySpec::new(),
        }
    }

    /// Set the table to select from, replacing any previous table
    pub fn from(mut self, table: &str) -> Self {
        self.spec.set_table(table.to_string());
        self
    }

    /// Set an aliased table, rendered as `table as alias`
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.spec.set_table(format!("{table} as {alias}"));
        self
    }

    /// Replace the select list
    ///
    /// An empty list selects `*`.
    pub fn select<T>(mut self, columns: T) -> Self
    where
        T: IntoColumns,
    {
        self.spec.set_selects(columns.into_columns());
        self
    }

    /// Select all columns
    pub fn select_all(mut self) -> Self {
        self.spec.set_selects(Vec::new());
        self
    }

    /// Append columns to the select list, skipping ones already selected
    pub fn add_select<T>(mut self, columns: T) -> Self
    where
        T: IntoColumns,
    {
        self.spec.add_selects(columns.into_columns());
        self
    }

    /// Add an AND WHERE condition
    ///
    /// Accepts `(column, value)`, `(column, operator, value)` or a group of
    /// entries that are applied one after another with `and`. An operator
    /// outside the catalog is bound as the value of an equality.
    pub fn where_<P>(self, predicate: P) -> Result<Self>
    where
        P: IntoPredicate,
    {
        self.where_with(predicate, Boolean::And)
    }

    /// Add an AND WHERE condition (same as where_)
    pub fn and_where<P>(self, predicate: P) -> Result<Self>
    where
        P: IntoPredicate,
    {
        self.where_with(predicate, Boolean::And)
    }

    /// Add an OR WHERE condition
    pub fn or_where<P>(self, predicate: P) -> Result<Self>
    where
        P: IntoPredicate,
    {
        self.where_with(predicate, Boolean::Or)
    }

    /// Add a WHERE condition joined with `boolean`
    pub fn where_with<P>(mut self, predicate: P, boolean: Boolean) -> Result<Self>
    where
        P: IntoPredicate,
    {
        match predicate.into_predicate() {
            Predicate::Single { column, operator, value } => {
                let clause = self.comparison(column, operator, value, boolean)?;
                self.spec.push_where(clause);
            }
            Predicate::Group(entries) => {
                let clauses = entries
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| {
                        let (column, operator, value) = validation::split_group_entry(index, entry)?;
                        self.comparison(column, operator, value, boolean)
                    })
                    .collect::<Result<Vec<_>>>()?;

                for clause in clauses {
                    self.spec.push_where(clause);
                }
            }
        }

        Ok(self)
    }

    /// Build a basic or bitwise clause from a resolved operator and value
    fn comparison(
        &self,
        column: String,
        operator: Option<Value>,
        value: Value,
        boolean: Boolean,
    ) -> Result<WhereClause> {
        let (operator, value) =
            validation::resolve(operator, value.first_scalar(), self.grammar().operators())?;
        let value = cast_binding(value);

        Ok(if operator.is_bitwise() {
            WhereClause::Bitwise { column, operator, value, boolean }
        } else {
            WhereClause::Basic { column, operator, value, boolean }
        })
    }

    /// Add a `column in (...)` condition
    pub fn where_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, false, Boolean::And)
    }

    /// Add an OR `column in (...)` condition
    pub fn or_where_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, false, Boolean::Or)
    }

    /// Add a `column not in (...)` condition
    pub fn where_not_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, true, Boolean::And)
    }

    /// Add an OR `column not in (...)` condition
    pub fn or_where_not_in<I, V>(self, column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.push_in(column, values, true, Boolean::Or)
    }

    fn push_in<I, V>(mut self, column: &str, values: I, negated: bool, boolean: Boolean) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values
            .into_iter()
            .flat_map(|value| value.into().flatten())
            .map(cast_binding)
            .collect();

        self.spec.push_where(WhereClause::In {
            column: column.to_string(),
            values,
            negated,
            boolean,
        });
        self
    }

    /// Add a `column is null` condition
    pub fn where_null(self, column: &str) -> Self {
        self.push_null(column, false, Boolean::And)
    }

    /// Add an OR `column is null` condition
    pub fn or_where_null(self, column: &str) -> Self {
        self.push_null(column, false, Boolean::Or)
    }

    /// Add a `column is not null` condition
    pub fn where_not_null(self, column: &str) -> Self {
        self.push_null(column, true, Boolean::And)
    }

    /// Add an OR `column is not null` condition
    pub fn or_where_not_null(self, column: &str) -> Self {
        self.push_null(column, true, Boolean::Or)
    }

    fn push_null(mut self, column: &str, negated: bool, boolean: Boolean) -> Self {
        self.spec.push_where(WhereClause::Null {
            column: column.to_string(),
            negated,
            boolean,
        });
        self
    }

    /// Add a `column between ? and ?` condition
    pub fn where_between<L, H>(self, column: &str, low: L, high: H) -> Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        self.push_between(column, low.into(), high.into(), false, Boolean::And)
    }

    /// Add an OR `column between ? and ?` condition
    pub fn or_where_between<L, H>(self, column: &str, low: L, high: H) -> Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        self.push_between(column, low.into(), high.into(), false, Boolean::Or)
    }

    /// Add a `column not between ? and ?` condition
    pub fn where_not_between<L, H>(self, column: &str, low: L, high: H) -> Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        self.push_between(column, low.into(), high.into(), true, Boolean::And)
    }

    /// Add an OR `column not between ? and ?` condition
    pub fn or_where_not_between<L, H>(self, column: &str, low: L, high: H) -> Self
    where
        L: Into<Value>,
        H: Into<Value>,
    {
        self.push_between(column, low.into(), high.into(), true, Boolean::Or)
    }

    fn push_between(
        mut self,
        column: &str,
        low: Value,
        high: Value,
        negated: bool,
        boolean: Boolean,
    ) -> Self {
        self.spec.push_where(WhereClause::Between {
            column: column.to_string(),
            low: cast_binding(low.first_scalar()),
            high: cast_binding(high.first_scalar()),
            negated,
            boolean,
        });
        self
    }

    /// Record a binding directly. Arrays are expanded into one binding per
    /// scalar.
    ///
    /// `category` is a [`BindingCategory`] or its name; unknown names are
    /// rejected.
    pub fn add_binding<V, K>(mut self, value: V, category: K) -> Result<Self>
    where
        V: Into<Value>,
        K: IntoBindingCategory,
    {
        let category = category.into_binding_category()?;
        for scalar in value.into().flatten() {
            self.spec.push_binding(category, cast_binding(scalar));
        }
        Ok(self)
    }

    /// All bindings in placeholder order
    pub fn bindings(&self) -> Vec<Value> {
        self.spec.bindings().flatten()
    }

    /// Compile the query with the connection's grammar
    pub fn to_sql(&self) -> Result<String> {
        self.grammar().compile_select(&self.spec)
    }

    /// Compile the query and run it on the connection
    pub async fn get(self) -> Result<QueryResult> {
        let sql = self.to_sql()?;
        let bindings = self.bindings();

        tracing::debug!(
            target: "mortar.sql",
            sql = %sql,
            binding_count = bindings.len(),
            "executing select"
        );

        self.connection.select(&sql, &bindings).await
    }

    /// Run the query and deserialize every row into `T`
    pub async fn get_as<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.get().await?.deserialize()
    }

    pub fn grammar(&self) -> &'c C::Grammar {
        self.connection.grammar()
    }

    pub fn spec(&self) -> &QuerySpec {
        &self.spec
    }

    pub fn table(&self) -> Option<&str> {
        self.spec.table()
    }

    pub fn selects(&self) -> &[String] {
        self.spec.selects()
    }

    pub fn wheres(&self) -> &[WhereClause] {
        self.spec.wheres()
    }
}

impl<C: Connection> Clone for Builder<'_, C> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection,
            spec: self.spec.clone(),
        }
    }
}

impl<C: Connection> fmt::Debug for Builder<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder").field("spec", &self.spec).finish()
    }
}
