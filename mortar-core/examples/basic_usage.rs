use mortar_core::{op, Connection, Field, MySqlGrammar, QueryResult, Result, Row, Value};

/// Prints each statement instead of sending it to a server
struct EchoConnection {
    grammar: MySqlGrammar,
}

impl Connection for EchoConnection {
    type Grammar = MySqlGrammar;

    fn grammar(&self) -> &MySqlGrammar {
        &self.grammar
    }

    async fn select(&self, sql: &str, bindings: &[Value]) -> Result<QueryResult> {
        println!("  executing: {sql}");
        println!("  bindings:  {bindings:?}");

        let row = Row::from_iter([("id".to_string(), serde_json::json!(1))]);
        Ok(QueryResult {
            rows: vec![row],
            fields: vec![Field::new("id", "INT")],
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let conn = EchoConnection {
        grammar: MySqlGrammar::new(),
    };

    // Explicit operators, shorthand equality and OR
    let adults = conn
        .table("users")
        .select(("id", "name", "email"))
        .where_(("age", op::GT, 18))?
        .where_(("status", "active"))?
        .or_where(("role", "like", "admin%"))?;
    println!("SELECT SQL: {}", adults.to_sql()?);
    println!("Bindings:   {:?}", adults.bindings());

    // A group of conditions joined with AND
    let grouped = conn
        .table("orders")
        .where_(vec![("total", ">=", 100), ("items", "<", 10)])?;
    println!("GROUP SQL:  {}", grouped.to_sql()?);

    // Set membership, null checks and ranges
    let filtered = conn
        .table("orders")
        .from_as("orders", "o")
        .select("o.id")
        .where_in("o.status", ["paid", "shipped"])
        .where_null("o.cancelled_at")
        .where_between("o.total", 10, 500);
    println!("FILTER SQL: {}", filtered.to_sql()?);

    // Table prefixes come from the connection's grammar
    let prefixed = EchoConnection {
        grammar: MySqlGrammar::with_table_prefix("app_"),
    };
    println!("PREFIX SQL: {}", prefixed.table("users").select("users.id").to_sql()?);

    // An operator outside the catalog is bound as the value of an equality
    let lenient = conn.table("users").where_(("status", "active", "ignored"))?;
    println!("LENIENT:    {} {:?}", lenient.to_sql()?, lenient.bindings());

    let result = adults.get().await?;
    println!("Fetched {} row(s)", result.len());

    Ok(())
}
