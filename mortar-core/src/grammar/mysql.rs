//! MySQL dialect

use super::Grammar;

const MYSQL_OPERATORS: &[&str] = &["sounds like"];

/// MySQL grammar: backtick identifiers, `?` placeholders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MySqlGrammar {
    table_prefix: String,
}

impl MySqlGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grammar that prefixes every table name with `prefix`
    ///
    /// # Examples
    /// ```
    /// use mortar_core::{Grammar, MySqlGrammar};
    ///
    /// let grammar = MySqlGrammar::with_table_prefix("app_");
    /// assert_eq!(grammar.wrap_table("users as u"), "`app_users` as `app_u`");
    /// assert_eq!(grammar.wrap("users.id"), "`app_users`.`id`");
    /// ```
    pub fn with_table_prefix(prefix: impl Into<String>) -> Self {
        Self {
            table_prefix: prefix.into(),
        }
    }

    /// Replace the table prefix. Every query compiled afterwards with this
    /// grammar uses the new prefix.
    pub fn set_table_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.table_prefix = prefix.into();
        self
    }
}

impl Grammar for MySqlGrammar {
    /// Backtick-quote an identifier. `*` is left alone; embedded double
    /// quotes and backticks are doubled.
    fn wrap_value(&self, value: &str) -> String {
        if value == "*" {
            return value.to_string();
        }

        format!("`{}`", value.replace('"', "\"\"").replace('`', "``"))
    }

    fn table_prefix(&self) -> &str {
        &self.table_prefix
    }

    fn operators(&self) -> &'static [&'static str] {
        MYSQL_OPERATORS
    }
}
