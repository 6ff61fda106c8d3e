//! DDL statement assembly.
//!
//! Turns table operations into MySQL statement text. Nothing here touches the
//! database; [`crate::engine::Connection`] renders a [`Statement`] and runs it.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::column::Column;

/// Character set every created table uses.
pub const CHARSET: &str = "utf8";

/// Collation every created table uses.
pub const COLLATION: &str = "utf8_unicode_ci";

/// Trait for converting statements to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

/// Quote an identifier with backticks, doubling any backtick inside it.
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Quote a string literal with single quotes.
///
/// Backslashes are doubled, which assumes the server's `sql_mode` does not
/// include `NO_BACKSLASH_ESCAPES`. With that mode on, each backslash is stored
/// twice.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
}

/// Quote a literal for a `LIKE` pattern so it only matches itself.
///
/// Same `sql_mode` assumption as [`quote_literal`]: under
/// `NO_BACKSLASH_ESCAPES` a name containing a backslash never matches.
fn quote_like_exact(value: &str) -> String {
    // Backslash escapes twice: once in the string literal, once in LIKE.
    let escaped = value
        .replace('\\', "\\\\\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('\'', "''");
    format!("'{}'", escaped)
}

/// Storage engine a table is created with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum StorageEngine {
    /// Standard persistent, transactional engine.
    #[default]
    InnoDb,
    /// In-memory engine, handy for throwaway test tables.
    Memory,
    /// Any other engine, written verbatim.
    Other(String),
}

impl fmt::Display for StorageEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageEngine::InnoDb => write!(f, "InnoDB"),
            StorageEngine::Memory => write!(f, "MEMORY"),
            StorageEngine::Other(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for StorageEngine {
    fn from(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "innodb" => StorageEngine::InnoDb,
            "memory" | "heap" => StorageEngine::Memory,
            _ => StorageEngine::Other(name.to_string()),
        }
    }
}

impl From<String> for StorageEngine {
    fn from(name: String) -> Self {
        StorageEngine::from(name.as_str())
    }
}

impl FromStr for StorageEngine {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(StorageEngine::from(s))
    }
}

/// A single DDL statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateTable {
        table: String,
        columns: Vec<String>,
        engine: StorageEngine,
    },
    DropTable {
        table: String,
        if_exists: bool,
    },
    RenameTable {
        from: String,
        to: String,
    },
    TableExists {
        table: String,
    },
    AddColumn {
        table: String,
        column: String,
    },
    DropColumn {
        table: String,
        column: String,
    },
    /// `CHANGE` keeps the data but needs the full column type again.
    RenameColumn {
        table: String,
        from: String,
        to: String,
        column_type: String,
    },
    AlterColumn {
        table: String,
        column: String,
    },
    DropPrimaryKey {
        table: String,
    },
    AssignPrimaryKey {
        table: String,
        columns: Vec<String>,
    },
    AddUnique {
        table: String,
        column: String,
    },
    DropUnique {
        table: String,
        index: String,
    },
}

impl Statement {
    /// `CREATE TABLE` with the rendered fragment of each column, in order.
    pub fn create_table(table: &str, columns: &[&dyn Column], engine: &StorageEngine) -> Self {
        Statement::CreateTable {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.create_sql()).collect(),
            engine: engine.clone(),
        }
    }

    pub fn drop_table(table: &str) -> Self {
        Statement::DropTable {
            table: table.to_string(),
            if_exists: false,
        }
    }

    pub fn drop_table_if_exists(table: &str) -> Self {
        Statement::DropTable {
            table: table.to_string(),
            if_exists: true,
        }
    }

    pub fn rename_table(from: &str, to: &str) -> Self {
        Statement::RenameTable {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn table_exists(table: &str) -> Self {
        Statement::TableExists {
            table: table.to_string(),
        }
    }

    pub fn add_column(table: &str, column: &dyn Column) -> Self {
        Statement::AddColumn {
            table: table.to_string(),
            column: column.create_sql(),
        }
    }

    pub fn drop_column(table: &str, column: &str) -> Self {
        Statement::DropColumn {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn rename_column(table: &str, from: &str, to: &str, column_type: &str) -> Self {
        Statement::RenameColumn {
            table: table.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            column_type: column_type.to_string(),
        }
    }

    pub fn alter_column(table: &str, column: &dyn Column) -> Self {
        Statement::AlterColumn {
            table: table.to_string(),
            column: column.create_sql(),
        }
    }

    pub fn drop_primary_key(table: &str) -> Self {
        Statement::DropPrimaryKey {
            table: table.to_string(),
        }
    }

    pub fn assign_primary_key(table: &str, columns: &[&str]) -> Self {
        Statement::AssignPrimaryKey {
            table: table.to_string(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn add_unique(table: &str, column: &str) -> Self {
        Statement::AddUnique {
            table: table.to_string(),
            column: column.to_string(),
        }
    }

    pub fn drop_unique(table: &str, index: &str) -> Self {
        Statement::DropUnique {
            table: table.to_string(),
            index: index.to_string(),
        }
    }

    /// Short operation name, used in logs and error context.
    pub fn operation(&self) -> &'static str {
        match self {
            Statement::CreateTable { .. } => "create_table",
            Statement::DropTable { .. } => "drop_table",
            Statement::RenameTable { .. } => "rename_table",
            Statement::TableExists { .. } => "table_exists",
            Statement::AddColumn { .. } => "add_column",
            Statement::DropColumn { .. } => "drop_column",
            Statement::RenameColumn { .. } => "rename_column",
            Statement::AlterColumn { .. } => "alter_column",
            Statement::DropPrimaryKey { .. } => "drop_primary_key",
            Statement::AssignPrimaryKey { .. } => "assign_primary_key",
            Statement::AddUnique { .. } => "add_unique",
            Statement::DropUnique { .. } => "drop_unique",
        }
    }

    /// The table the statement acts on (the source table for renames).
    pub fn table(&self) -> &str {
        match self {
            Statement::RenameTable { from, .. } => from.as_str(),
            Statement::CreateTable { table, .. }
            | Statement::DropTable { table, .. }
            | Statement::TableExists { table }
            | Statement::AddColumn { table, .. }
            | Statement::DropColumn { table, .. }
            | Statement::RenameColumn { table, .. }
            | Statement::AlterColumn { table, .. }
            | Statement::DropPrimaryKey { table }
            | Statement::AssignPrimaryKey { table, .. }
            | Statement::AddUnique { table, .. }
            | Statement::DropUnique { table, .. } => table.as_str(),
        }
    }
}

impl ToSql for Statement {
    fn to_sql(&self) -> String {
        match self {
            Statement::CreateTable {
                table,
                columns,
                engine,
            } => format!(
                "CREATE TABLE {} ({}) ENGINE={} DEFAULT CHARSET={} COLLATE={}",
                quote_ident(table),
                columns.join(", "),
                engine,
                CHARSET,
                COLLATION
            ),
            Statement::DropTable { table, if_exists } => {
                let mut sql = String::from("DROP TABLE ");
                if *if_exists {
                    sql.push_str("IF EXISTS ");
                }
                sql.push_str(&quote_ident(table));
                sql
            }
            Statement::RenameTable { from, to } => {
                format!("RENAME TABLE {} TO {}", quote_ident(from), quote_ident(to))
            }
            Statement::TableExists { table } => {
                format!("SHOW TABLES LIKE {}", quote_like_exact(table))
            }
            Statement::AddColumn { table, column } => {
                format!("ALTER TABLE {} ADD {}", quote_ident(table), column)
            }
            Statement::DropColumn { table, column } => format!(
                "ALTER TABLE {} DROP COLUMN {}",
                quote_ident(table),
                quote_ident(column)
            ),
            Statement::RenameColumn {
                table,
                from,
                to,
                column_type,
            } => format!(
                "ALTER TABLE {} CHANGE {} {} {}",
                quote_ident(table),
                quote_ident(from),
                quote_ident(to),
                column_type
            ),
            Statement::AlterColumn { table, column } => {
                format!("ALTER TABLE {} MODIFY {}", quote_ident(table), column)
            }
            Statement::DropPrimaryKey { table } => {
                format!("ALTER TABLE {} DROP PRIMARY KEY", quote_ident(table))
            }
            Statement::AssignPrimaryKey { table, columns } => {
                let cols: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
                format!(
                    "ALTER TABLE {} ADD PRIMARY KEY ({})",
                    quote_ident(table),
                    cols.join(", ")
                )
            }
            Statement::AddUnique { table, column } => format!(
                "ALTER TABLE {} ADD UNIQUE INDEX ({})",
                quote_ident(table),
                quote_ident(column)
            ),
            Statement::DropUnique { table, index } => format!(
                "ALTER TABLE {} DROP INDEX {}",
                quote_ident(table),
                quote_ident(index)
            ),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
