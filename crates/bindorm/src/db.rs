//! Database handle and its configuration.
//!
//! A [`Db`] carries what statement builders need from "the database": the
//! entity [`Registry`] and the SQL [`Dialect`]. It does not hold a connection.

use crate::dialect::Dialect;
use crate::registry::Registry;
use std::sync::Arc;

/// Configuration for a [`Db`] handle.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Quoting and placeholder conventions.
    pub dialect: Dialect,
    /// Emit each built statement as a `tracing` debug event (`bindorm.sql`).
    pub log_sql: bool,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql: Option<usize>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::MySql,
            log_sql: true,
            max_logged_sql: Some(200),
        }
    }
}

impl DbConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the SQL dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Enable or disable SQL logging.
    pub fn log_sql(mut self, enabled: bool) -> Self {
        self.log_sql = enabled;
        self
    }

    /// Set maximum logged SQL length.
    pub fn max_logged_sql(mut self, len: usize) -> Self {
        self.max_logged_sql = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql = None;
        self
    }
}

/// Handle that statement builders are bound to.
#[derive(Debug, Clone)]
pub struct Db {
    registry: Arc<Registry>,
    config: DbConfig,
}

impl Default for Db {
    fn default() -> Self {
        Self::new()
    }
}

impl Db {
    /// Handle with a private registry and default configuration.
    pub fn new() -> Self {
        Self::with_config(DbConfig::default())
    }

    /// Handle with a private registry.
    pub fn with_config(config: DbConfig) -> Self {
        Self::with_registry(config, Arc::new(Registry::new()))
    }

    /// Handle sharing `registry` with other handles.
    pub fn with_registry(config: DbConfig, registry: Arc<Registry>) -> Self {
        Self { registry, config }
    }

    /// Entity metadata registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Active configuration.
    pub fn config(&self) -> &DbConfig {
        &self.config
    }

    /// Active dialect.
    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    pub(crate) fn log_statement(&self, table: &str, sql: &str, param_count: usize) {
        if !self.config.log_sql {
            return;
        }
        let sql = match self.config.max_logged_sql {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        };
        tracing::debug!(
            target: "bindorm.sql",
            statement = "update",
            table,
            param_count,
            sql = %sql,
        );
    }
}

/// Cut `sql` to at most `max` bytes on a char boundary.
fn truncate_sql_bytes(sql: &str, max: usize) -> &str {
    let mut end = max.min(sql.len());
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}
