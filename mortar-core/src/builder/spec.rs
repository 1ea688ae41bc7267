//! The accumulated description of one query

use super::bindings::{BindingCategory, Bindings};
use super::clause::WhereClause;
use super::columns::dedup_columns;
use crate::Value;

/// Table, select list, where clauses and bindings of a query under
/// construction. Grammars compile it; only the builder mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    table: Option<String>,
    selects: Vec<String>,
    wheres: Vec<WhereClause>,
    bindings: Bindings,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            table: None,
            selects: vec!["*".to_string()],
            wheres: Vec::new(),
            bindings: Bindings::new(),
        }
    }
}

impl QuerySpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table expression, `table` or `table as alias`
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn selects(&self) -> &[String] {
        &self.selects
    }

    pub fn wheres(&self) -> &[WhereClause] {
        &self.wheres
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub(crate) fn set_table(&mut self, table: String) {
        self.table = Some(table);
    }

    pub(crate) fn set_selects(&mut self, columns: Vec<String>) {
        self.selects = if columns.is_empty() {
            vec!["*".to_string()]
        } else {
            dedup_columns(columns)
        };
    }

    pub(crate) fn add_selects(&mut self, columns: Vec<String>) {
        let merged = std::mem::take(&mut self.selects).into_iter().chain(columns);
        self.set_selects(merged.collect());
    }

    /// Append a clause together with the bindings its placeholders consume
    pub(crate) fn push_where(&mut self, clause: WhereClause) {
        self.bindings.extend(BindingCategory::Where, clause.bindings());
        self.wheres.push(clause);
    }

    pub(crate) fn push_binding(&mut self, category: BindingCategory, value: Value) {
        self.bindings.push(category, value);
    }
}
