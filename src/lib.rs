//! # mysql-schema
//!
//! > **Columns in, DDL out.**
//!
//! Small builders for MySQL schema migrations: describe columns with chained
//! calls, hand them to a [`Connection`] and it creates, alters or drops the
//! table in a single statement.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use mysql_schema::prelude::*;
//!
//! let conn = Connection::connect("mysql://root@localhost/app", StorageEngine::InnoDb).await?;
//!
//! conn.create_table_if_not_exists("users", &[
//!     &column::auto_increment(),
//!     &column::string("email", 255).not_null(),
//!     &column::boolean("active").not_null().default_value("1"),
//!     &column::created_timestamp(),
//! ]).await?;
//!
//! conn.add_unique("users", "email").await?;
//! ```
//!
//! ## Column types
//!
//! | Factory       | SQL type          |
//! |---------------|-------------------|
//! | `integer`     | `INT(n)`          |
//! | `string`      | `VARCHAR(n)`      |
//! | `text`        | `TEXT`            |
//! | `long_text`   | `LONGTEXT`        |
//! | `long_blob`   | `LONGBLOB`        |
//! | `boolean`     | `TINYINT(1)`      |
//! | `date`        | `DATE`            |
//! | `datetime`    | `DATETIME`        |
//! | `decimal`     | `DECIMAL(n, s)`   |
//! | `timestamp`   | `TIMESTAMP`       |

pub mod column;
pub mod config;
pub mod ddl;
pub mod engine;
pub mod error;

pub use config::Config;
pub use ddl::{Statement, StorageEngine, ToSql};
pub use engine::{Connection, SqlHandle};
pub use error::{SchemaError, SchemaResult};

pub mod prelude {
    pub use crate::column::{self, Column};
    pub use crate::config::Config;
    pub use crate::ddl::{Statement, StorageEngine, ToSql};
    pub use crate::engine::{Connection, SqlHandle};
    pub use crate::error::*;
}
