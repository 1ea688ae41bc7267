//! Mortar Core - a fluent SQL select builder with a dialect grammar compiler
//!
//! A [`Builder`] accumulates a table, a select list and where clauses with
//! their bindings. The [`Grammar`] of the [`Connection`] it was started on
//! compiles it into SQL with `?` placeholders.
//!
//! ```
//! use mortar_core::{Grammar, MySqlGrammar, Operator};
//!
//! let grammar = MySqlGrammar::new();
//! assert_eq!(grammar.wrap("users.id"), "`users`.`id`");
//! assert_eq!(Operator::lookup("LIKE", grammar.operators()), Some(Operator::LIKE));
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod grammar;
pub mod operator;
pub mod validation;
pub mod value;

// Re-export main types
pub use builder::{
    BindingCategory, Bindings, Boolean, Builder, IntoBindingCategory, IntoColumns, IntoPredicate,
    Predicate, QuerySpec, WhereClause,
};
pub use config::ConnectionConfig;
pub use error::{Error, Result};
pub use executor::{Connection, Field, QueryResult, Row};
pub use grammar::{Grammar, MySqlGrammar};
pub use operator::{op, Operator, BITWISE_OPERATORS, OPERATORS};
pub use value::Value;

#[cfg(feature = "mysql")]
pub use executor::mysql::MySqlConnection;
