//! Database execution engine for mysql-schema.
//!
//! [`Connection`] pairs a database handle with the storage engine new tables
//! are created with. Every operation renders one [`Statement`], runs it in a
//! single round trip and wraps driver failures in [`SchemaError::Database`].

use std::future::Future;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;
use tracing::{debug, info};

use crate::column::Column;
use crate::config::Config;
use crate::ddl::{Statement, StorageEngine, ToSql};
use crate::error::{SchemaError, SchemaResult};

/// What [`Connection`] needs from a database handle.
pub trait SqlHandle {
    /// Run a statement that returns no rows.
    fn execute(&self, sql: &str) -> impl Future<Output = Result<(), sqlx::Error>> + Send;

    /// Run a query and report whether it produced at least one row.
    fn has_row(&self, sql: &str) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

impl SqlHandle for MySqlPool {
    // Plain `&str` goes through the text protocol, so statements MySQL can't
    // prepare still work.
    async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
        sqlx::Executor::execute(self, sql).await.map(|_| ())
    }

    async fn has_row(&self, sql: &str) -> Result<bool, sqlx::Error> {
        let row = sqlx::Executor::fetch_optional(self, sql).await?;
        Ok(row.is_some())
    }
}

/// A database connection for running schema changes.
#[derive(Debug, Clone)]
pub struct Connection<H = MySqlPool> {
    handle: H,
    engine: StorageEngine,
}

impl Connection<MySqlPool> {
    /// Connect to a MySQL database using a connection URL.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let conn = Connection::connect("mysql://root@localhost/app", StorageEngine::InnoDb).await?;
    /// ```
    pub async fn connect(url: &str, engine: StorageEngine) -> SchemaResult<Self> {
        Self::connect_with(url, engine, 5).await
    }

    /// Connect using the database URL, engine and pool size of a [`Config`].
    pub async fn from_config(config: &Config) -> SchemaResult<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| SchemaError::Config("no database_url configured".to_string()))?;
        Self::connect_with(url, config.engine.clone(), config.max_connections).await
    }

    async fn connect_with(url: &str, engine: StorageEngine, max_connections: u32) -> SchemaResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(SchemaError::Connection)?;

        debug!(%engine, max_connections, "connected");
        Ok(Self::new(pool, engine))
    }
}

impl<H: SqlHandle> Connection<H> {
    /// Wrap a handle the caller already owns.
    pub fn new(handle: H, engine: StorageEngine) -> Self {
        Self { handle, engine }
    }

    /// Storage engine used by [`Connection::create_table`].
    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    /// Get a reference to the underlying handle.
    pub fn handle(&self) -> &H {
        &self.handle
    }

    /// Create a table with the given columns, in order.
    pub async fn create_table(&self, table: &str, columns: &[&dyn Column]) -> SchemaResult<()> {
        self.run(Statement::create_table(table, columns, &self.engine))
            .await
    }

    /// Create the table unless it is already present.
    ///
    /// Returns `true` when the table was created.
    pub async fn create_table_if_not_exists(
        &self,
        table: &str,
        columns: &[&dyn Column],
    ) -> SchemaResult<bool> {
        if self.table_exists(table).await? {
            debug!(table, "table already exists, skipping create");
            return Ok(false);
        }
        self.create_table(table, columns).await?;
        Ok(true)
    }

    /// Drop the table.
    pub async fn drop_table(&self, table: &str) -> SchemaResult<()> {
        self.run(Statement::drop_table(table)).await
    }

    /// Drop the table, succeeding when it is already gone.
    pub async fn drop_table_if_exists(&self, table: &str) -> SchemaResult<()> {
        self.run(Statement::drop_table_if_exists(table)).await
    }

    /// Change the name of a table.
    pub async fn rename_table(&self, from: &str, to: &str) -> SchemaResult<()> {
        self.run(Statement::rename_table(from, to)).await
    }

    /// Check if the table is present in the database.
    ///
    /// A query with no matching row is a normal `false`, not an error.
    pub async fn table_exists(&self, table: &str) -> SchemaResult<bool> {
        let stmt = Statement::table_exists(table);
        let sql = stmt.to_sql();
        debug!(operation = stmt.operation(), %sql, "querying");

        match self.handle.has_row(&sql).await {
            Ok(exists) => Ok(exists),
            Err(source) => Err(SchemaError::database(stmt.operation(), sql, source)),
        }
    }

    /// Add a new column to an existing table.
    pub async fn add_column(&self, table: &str, column: &dyn Column) -> SchemaResult<()> {
        self.run(Statement::add_column(table, column)).await
    }

    /// Remove a column from the table.
    pub async fn drop_column(&self, table: &str, column: &str) -> SchemaResult<()> {
        self.run(Statement::drop_column(table, column)).await
    }

    /// Change the name of a column. MySQL needs the full column type again,
    /// so `column_type` should repeat the current one unless the type is
    /// meant to change too.
    pub async fn rename_column(
        &self,
        table: &str,
        from: &str,
        to: &str,
        column_type: &str,
    ) -> SchemaResult<()> {
        self.run(Statement::rename_column(table, from, to, column_type))
            .await
    }

    /// Redefine an existing column, keeping its name.
    pub async fn alter_column(&self, table: &str, column: &dyn Column) -> SchemaResult<()> {
        self.run(Statement::alter_column(table, column)).await
    }

    /// Remove the primary key index of the table. Its columns stay.
    pub async fn drop_primary_key(&self, table: &str) -> SchemaResult<()> {
        self.run(Statement::drop_primary_key(table)).await
    }

    /// Set the primary key of the table. Any previous one must have been
    /// dropped first.
    pub async fn assign_primary_key(&self, table: &str, columns: &[&str]) -> SchemaResult<()> {
        self.run(Statement::assign_primary_key(table, columns))
            .await
    }

    /// Add a unique index on a column.
    pub async fn add_unique(&self, table: &str, column: &str) -> SchemaResult<()> {
        self.run(Statement::add_unique(table, column)).await
    }

    /// Remove a unique index. MySQL names it after its first column.
    pub async fn drop_unique(&self, table: &str, index: &str) -> SchemaResult<()> {
        self.run(Statement::drop_unique(table, index)).await
    }

    async fn run(&self, stmt: Statement) -> SchemaResult<()> {
        let operation = stmt.operation();
        let sql = stmt.to_sql();
        debug!(operation, %sql, "executing");

        if let Err(source) = self.handle.execute(&sql).await {
            return Err(SchemaError::database(operation, sql, source));
        }

        info!(operation, table = stmt.table(), "schema updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory handle that records every statement it is given.
    #[derive(Default)]
    struct Recorder {
        statements: Mutex<Vec<String>>,
        existing: HashSet<String>,
        fail_on: Option<&'static str>,
    }

    impl Recorder {
        fn with_table(table: &str) -> Self {
            Self {
                existing: HashSet::from([table.to_string()]),
                ..Self::default()
            }
        }

        fn failing_on(prefix: &'static str) -> Self {
            Self {
                fail_on: Some(prefix),
                ..Self::default()
            }
        }

        fn statements(&self) -> Vec<String> {
            self.statements.lock().unwrap().clone()
        }

        fn record(&self, sql: &str) -> Result<(), sqlx::Error> {
            self.statements.lock().unwrap().push(sql.to_string());
            match self.fail_on {
                Some(prefix) if sql.starts_with(prefix) => {
                    Err(sqlx::Error::Protocol(format!("rejected: {}", sql)))
                }
                _ => Ok(()),
            }
        }
    }

    impl SqlHandle for Recorder {
        async fn execute(&self, sql: &str) -> Result<(), sqlx::Error> {
            self.record(sql)
        }

        async fn has_row(&self, sql: &str) -> Result<bool, sqlx::Error> {
            self.record(sql)?;
            Ok(self
                .existing
                .iter()
                .any(|t| sql == format!("SHOW TABLES LIKE '{}'", t)))
        }
    }

    fn conn(handle: Recorder) -> Connection<Recorder> {
        Connection::new(handle, StorageEngine::InnoDb)
    }

    #[tokio::test]
    async fn test_create_table_runs_one_statement() {
        let conn = conn(Recorder::default());
        let id = column::integer("id", 11).auto_increment().primary_key();
        conn.create_table("t", &[&id]).await.unwrap();

        let statements = conn.handle().statements();
        assert_eq!(statements.len(), 1);
        assert!(statements[0].contains("`id` INT(11) AUTO_INCREMENT PRIMARY KEY"));
        assert!(statements[0].ends_with("ENGINE=InnoDB DEFAULT CHARSET=utf8 COLLATE=utf8_unicode_ci"));
    }

    #[tokio::test]
    async fn test_create_table_uses_configured_engine() {
        let conn = Connection::new(Recorder::default(), StorageEngine::Memory);
        conn.create_table("scratch", &[&column::integer("n", 11)])
            .await
            .unwrap();
        assert!(conn.handle().statements()[0].contains("ENGINE=MEMORY"));
    }

    #[tokio::test]
    async fn test_table_exists() {
        let conn = conn(Recorder::with_table("users"));
        assert!(conn.table_exists("users").await.unwrap());
        assert!(!conn.table_exists("orders").await.unwrap());
    }

    #[tokio::test]
    async fn test_table_exists_wraps_driver_error() {
        let conn = conn(Recorder::failing_on("SHOW TABLES"));
        let err = conn.table_exists("users").await.unwrap_err();
        match err {
            SchemaError::Database {
                operation,
                statement,
                ..
            } => {
                assert_eq!(operation, "table_exists");
                assert_eq!(statement, "SHOW TABLES LIKE 'users'");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_if_not_exists_skips_existing_table() {
        let conn = conn(Recorder::with_table("users"));
        let created = conn
            .create_table_if_not_exists("users", &[&column::auto_increment()])
            .await
            .unwrap();

        assert!(!created);
        assert_eq!(conn.handle().statements(), vec!["SHOW TABLES LIKE 'users'"]);
    }

    #[tokio::test]
    async fn test_create_if_not_exists_creates_missing_table() {
        let conn = conn(Recorder::default());
        let created = conn
            .create_table_if_not_exists("users", &[&column::auto_increment()])
            .await
            .unwrap();

        assert!(created);
        let statements = conn.handle().statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[1].starts_with("CREATE TABLE `users`"));
    }

    #[tokio::test]
    async fn test_create_if_not_exists_stops_on_check_error() {
        let conn = conn(Recorder::failing_on("SHOW TABLES"));
        assert!(conn.create_table_if_not_exists("users", &[]).await.is_err());
        assert_eq!(conn.handle().statements().len(), 1);
    }

    #[tokio::test]
    async fn test_alter_operations() {
        let conn = conn(Recorder::default());
        conn.add_column("users", &column::boolean("admin").not_null())
            .await
            .unwrap();
        conn.drop_column("users", "legacy").await.unwrap();
        conn.rename_column("users", "mail", "email", "VARCHAR(255)")
            .await
            .unwrap();
        conn.alter_column("users", &column::text("bio")).await.unwrap();
        conn.drop_primary_key("users").await.unwrap();
        conn.assign_primary_key("users", &["a", "b"]).await.unwrap();
        conn.add_unique("users", "email").await.unwrap();
        conn.drop_unique("users", "email").await.unwrap();
        conn.rename_table("users", "accounts").await.unwrap();
        conn.drop_table("accounts").await.unwrap();
        conn.drop_table_if_exists("accounts").await.unwrap();

        assert_eq!(
            conn.handle().statements(),
            vec![
                "ALTER TABLE `users` ADD `admin` TINYINT(1) NOT NULL",
                "ALTER TABLE `users` DROP COLUMN `legacy`",
                "ALTER TABLE `users` CHANGE `mail` `email` VARCHAR(255)",
                "ALTER TABLE `users` MODIFY `bio` TEXT",
                "ALTER TABLE `users` DROP PRIMARY KEY",
                "ALTER TABLE `users` ADD PRIMARY KEY (`a`, `b`)",
                "ALTER TABLE `users` ADD UNIQUE INDEX (`email`)",
                "ALTER TABLE `users` DROP INDEX `email`",
                "RENAME TABLE `users` TO `accounts`",
                "DROP TABLE `accounts`",
                "DROP TABLE IF EXISTS `accounts`",
            ]
        );
    }

    #[tokio::test]
    async fn test_driver_error_keeps_statement() {
        let conn = conn(Recorder::failing_on("DROP TABLE"));
        let err = conn.drop_table("ghost").await.unwrap_err();
        assert_eq!(err.statement(), Some("DROP TABLE `ghost`"));
        assert!(matches!(
            err,
            SchemaError::Database {
                operation: "drop_table",
                source: sqlx::Error::Protocol(_),
                ..
            }
        ));
    }
}
