use crate::param::Param;
use tokio_postgres::types::ToSql;

/// A rendered statement: SQL text plus its positional arguments.
///
/// Argument `i` binds the `i`-th placeholder of [`Query::sql`].
#[must_use]
#[derive(Clone, Debug)]
pub struct Query {
    sql: String,
    args: Vec<Param>,
}

impl Query {
    pub(crate) fn new(sql: String, args: Vec<Param>) -> Self {
        Self { sql, args }
    }

    /// Access the SQL string.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments in placeholder order.
    pub fn args(&self) -> &[Param] {
        &self.args
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.args.iter().map(Param::as_sql).collect()
    }

    /// Split into SQL text and arguments.
    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.args)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.sql)
    }
}
