//! Connections and query results

use std::future::Future;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::builder::Builder;
use crate::grammar::Grammar;
use crate::{Result, Value};

/// One result row, keyed by column name
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Column metadata reported by the driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_name: String,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Rows and column metadata returned by a select
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub fields: Vec<Field>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Deserialize every row into `T`
    pub fn deserialize<T>(self) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        self.rows
            .into_iter()
            .map(|row| Ok(serde_json::from_value(serde_json::Value::Object(row))?))
            .collect()
    }
}

/// A database connection: owns the grammar its queries compile with and
/// executes compiled selects.
pub trait Connection: Send + Sync {
    type Grammar: Grammar + Send + Sync;

    fn grammar(&self) -> &Self::Grammar;

    /// Execute a compiled select with its bindings, in placeholder order
    fn select(
        &self,
        sql: &str,
        bindings: &[Value],
    ) -> impl Future<Output = Result<QueryResult>> + Send;

    /// Start a query on `table`
    fn table(&self, table: &str) -> Builder<'_, Self>
    where
        Self: Sized,
    {
        Builder::new(self).from(table)
    }
}

#[cfg(feature = "mysql")]
pub mod mysql {
    use super::*;
    use crate::{ConnectionConfig, MySqlGrammar};
    use futures::TryStreamExt;
    use sqlx::mysql::{MySqlArguments, MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
    use sqlx::query::Query;
    use sqlx::{Column, MySql, Row as _, TypeInfo, ValueRef};

    /// MySQL connection pool with the grammar its queries compile with
    #[derive(Debug, Clone)]
    pub struct MySqlConnection {
        pool: MySqlPool,
        grammar: MySqlGrammar,
    }

    impl MySqlConnection {
        /// Open a pool described by `config`
        pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
            config.validate()?;

            let mut options = MySqlConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .username(&config.user);
            if let Some(password) = &config.password {
                options = options.password(password);
            }
            if let Some(database) = &config.database {
                options = options.database(database);
            }

            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .connect_with(options)
                .await?;

            tracing::debug!(
                host = %config.host,
                port = config.port,
                max_connections = config.max_connections,
                "mysql pool opened"
            );

            Ok(Self::from_pool(pool, config.grammar()))
        }

        /// Create from an existing MySqlPool
        pub fn from_pool(pool: MySqlPool, grammar: MySqlGrammar) -> Self {
            Self { pool, grammar }
        }

        pub fn pool(&self) -> &MySqlPool {
            &self.pool
        }
    }

    impl Connection for MySqlConnection {
        type Grammar = MySqlGrammar;

        fn grammar(&self) -> &MySqlGrammar {
            &self.grammar
        }

        async fn select(&self, sql: &str, bindings: &[Value]) -> Result<QueryResult> {
            let query = bind_values(sqlx::query(sql), bindings);
            let mut rows = query.fetch(&self.pool);

            let mut result = QueryResult::default();
            while let Some(row) = rows.try_next().await? {
                if result.fields.is_empty() {
                    result.fields = fields_of(&row);
                }
                result.rows.push(row_to_json(&row)?);
            }

            Ok(result)
        }
    }

    /// Bind values to a sqlx query in placeholder order
    fn bind_values<'q>(
        mut query: Query<'q, MySql, MySqlArguments>,
        params: &'q [Value],
    ) -> Query<'q, MySql, MySqlArguments> {
        for param in params {
            query = match param {
                Value::Null => query.bind(None::<String>),
                Value::Bool(b) => query.bind(*b),
                Value::I32(i) => query.bind(*i),
                Value::I64(i) => query.bind(*i),
                Value::F32(f) => query.bind(*f),
                Value::F64(f) => query.bind(*f),
                Value::String(s) => query.bind(s.as_str()),
                Value::Bytes(b) => query.bind(b.as_slice()),
                Value::Json(j) => query.bind(j.to_string()),
                Value::Array(_) => query.bind(value_to_json(param).to_string()),
            };
        }
        query
    }

    /// Convert Value to serde_json::Value for array serialization
    fn value_to_json(value: &Value) -> serde_json::Value {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::I32(i) => serde_json::Value::from(*i),
            Value::I64(i) => serde_json::Value::from(*i),
            Value::F32(f) => serde_json::Value::from(f64::from(*f)),
            Value::F64(f) => serde_json::Value::from(*f),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::from(b.clone()),
            Value::Json(j) => j.clone(),
            Value::Array(arr) => serde_json::Value::Array(arr.iter().map(value_to_json).collect()),
        }
    }

    fn fields_of(row: &MySqlRow) -> Vec<Field> {
        row.columns()
            .iter()
            .map(|column| Field::new(column.name(), column.type_info().name()))
            .collect()
    }

    fn row_to_json(row: &MySqlRow) -> Result<Row> {
        let mut object = Row::new();
        for column in row.columns() {
            let index = column.ordinal();
            let is_null = row.try_get_raw(index)?.is_null();
            let value = if is_null {
                serde_json::Value::Null
            } else {
                decode_column(row, index, column.type_info().name())?
            };
            object.insert(column.name().to_string(), value);
        }
        Ok(object)
    }

    fn decode_column(row: &MySqlRow, index: usize, type_name: &str) -> Result<serde_json::Value> {
        use serde_json::Value as Json;

        let value = match type_name {
            "BOOLEAN" => Json::from(row.try_get::<bool, _>(index)?),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => {
                Json::from(row.try_get::<i64, _>(index)?)
            }
            name if name.ends_with(" UNSIGNED") => Json::from(row.try_get::<u64, _>(index)?),
            "FLOAT" => Json::from(f64::from(row.try_get::<f32, _>(index)?)),
            "DOUBLE" => Json::from(row.try_get::<f64, _>(index)?),
            "JSON" => row.try_get::<Json, _>(index)?,
            "BINARY" | "VARBINARY" | "TINYBLOB" | "BLOB" | "MEDIUMBLOB" | "LONGBLOB" => {
                Json::from(row.try_get::<Vec<u8>, _>(index)?)
            }
            #[cfg(feature = "decimal-support")]
            "DECIMAL" => Json::String(row.try_get::<rust_decimal::Decimal, _>(index)?.to_string()),
            #[cfg(feature = "datetime-support")]
            "DATE" => Json::String(row.try_get::<chrono::NaiveDate, _>(index)?.to_string()),
            #[cfg(feature = "datetime-support")]
            "DATETIME" => Json::String(row.try_get::<chrono::NaiveDateTime, _>(index)?.to_string()),
            #[cfg(feature = "datetime-support")]
            "TIMESTAMP" => Json::String(
                row.try_get::<chrono::DateTime<chrono::Utc>, _>(index)?
                    .naive_utc()
                    .to_string(),
            ),
            other => match row.try_get::<String, _>(index) {
                Ok(text) => Json::String(text),
                Err(err) => {
                    tracing::debug!(column_type = other, error = %err, "column decoded as null");
                    Json::Null
                }
            },
        };

        Ok(value)
    }

    #[cfg(test)]
    mod mysql_tests {
        use super::*;

        #[test]
        fn test_value_to_json_conversion() {
            assert_eq!(value_to_json(&Value::Null), serde_json::Value::Null);
            assert_eq!(value_to_json(&Value::Bool(true)), serde_json::json!(true));
            assert_eq!(value_to_json(&Value::I64(7)), serde_json::json!(7));
            assert_eq!(value_to_json(&Value::from("a")), serde_json::json!("a"));
            assert_eq!(value_to_json(&Value::Bytes(vec![1, 2])), serde_json::json!([1, 2]));

            let nested = Value::Array(vec![Value::I32(1), Value::Array(vec![Value::I32(2)])]);
            assert_eq!(value_to_json(&nested), serde_json::json!([1, [2]]));
        }

        #[test]
        fn test_bind_every_value_kind() {
            let params = vec![
                Value::Null,
                Value::Bool(true),
                Value::I32(42),
                Value::I64(123456),
                Value::F32(1.5),
                Value::F64(2.25),
                Value::String("hello".to_string()),
                Value::Bytes(vec![1, 2, 3, 4]),
                Value::Json(serde_json::json!({"key": "value"})),
                Value::Array(vec![Value::I32(1), Value::I32(2)]),
            ];
            let _bound = bind_values(sqlx::query("select ?"), &params);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockConnection;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        id: i64,
        name: String,
    }

    #[test]
    fn test_query_result_deserialize() {
        let result = QueryResult {
            rows: vec![Row::from_iter([
                ("id".to_string(), serde_json::json!(5)),
                ("name".to_string(), serde_json::json!("Linus")),
            ])],
            fields: vec![Field::new("id", "BIGINT"), Field::new("name", "VARCHAR")],
        };

        assert_eq!(result.len(), 1);
        let users: Vec<User> = result.deserialize().unwrap();
        assert_eq!(users, vec![User { id: 5, name: "Linus".to_string() }]);
    }

    #[test]
    fn test_query_result_deserialize_type_mismatch() {
        let result = QueryResult {
            rows: vec![Row::from_iter([("id".to_string(), serde_json::json!("x"))])],
            fields: Vec::new(),
        };
        let err = result.deserialize::<User>().unwrap_err();
        assert!(matches!(err, crate::Error::Serialization(_)));
    }

    #[test]
    fn test_empty_result() {
        let result = QueryResult::default();
        assert!(result.is_empty());
        assert!(result.deserialize::<User>().unwrap().is_empty());
    }

    #[test]
    fn test_connection_table_starts_query() {
        let conn = MockConnection::new();
        let query = conn.table("users");
        assert_eq!(query.table(), Some("users"));
        assert_eq!(query.selects(), ["*"]);
    }

    #[tokio::test]
    async fn test_get_as_deserializes_rows() {
        let conn = MockConnection::new();
        let users: Vec<User> = conn.table("users").get_as().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1], User { id: 2, name: "Grace".to_string() });
    }

    #[tokio::test]
    async fn test_get_returns_fields() {
        let conn = MockConnection::new();
        let result = conn.table("users").get().await.unwrap();
        assert_eq!(result.fields[0], Field::new("id", "INT"));
        assert_eq!(conn.executed()[0].0, "select * from `users`");
    }
}
