//! Column builders.
//!
//! One builder per MySQL column type. Every builder is created by a factory
//! function, configured through chained calls and rendered with
//! [`Column::create_sql`] into the fragment used inside `CREATE TABLE` or
//! `ALTER TABLE ... ADD`.
//!
//! ```
//! use mysql_schema::column::{self, Column};
//!
//! let id = column::integer("id", 11).auto_increment().primary_key();
//! assert_eq!(id.create_sql(), "`id` INT(11) AUTO_INCREMENT PRIMARY KEY");
//!
//! let email = column::string("email", 255).not_null().after("id");
//! assert_eq!(email.create_sql(), "`email` VARCHAR(255) NOT NULL AFTER `id`");
//! ```
//!
//! Nothing is validated here: conflicting modifiers are rendered as given and
//! left for the database to reject.

use crate::ddl::quote_ident;

const NOT_NULL: &str = "NOT NULL";

/// Common interface between all column types.
pub trait Column {
    /// Name of the column, unquoted.
    fn name(&self) -> &str;

    /// Generate the SQL needed to create the column.
    fn create_sql(&self) -> String;
}

impl<C: Column + ?Sized> Column for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn create_sql(&self) -> String {
        (**self).create_sql()
    }
}

impl<C: Column + ?Sized> Column for Box<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn create_sql(&self) -> String {
        (**self).create_sql()
    }
}

/// Ordered list of column modifiers, rendered space-joined after the type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Modifiers(Vec<String>);

impl Modifiers {
    pub(crate) fn push(&mut self, modifier: impl Into<String>) {
        self.0.push(modifier.into());
    }

    /// Push `modifier` unless it is already present.
    pub(crate) fn push_once(&mut self, modifier: &str) {
        if !self.0.iter().any(|m| m == modifier) {
            self.0.push(modifier.to_string());
        }
    }

    pub(crate) fn remove(&mut self, modifier: &str) {
        self.0.retain(|m| m != modifier);
    }

    pub(crate) fn render(&self, name: &str, sql_type: &str) -> String {
        let mut sql = format!("{} {}", quote_ident(name), sql_type);
        for modifier in &self.0 {
            sql.push(' ');
            sql.push_str(modifier);
        }
        sql
    }
}

/// Implements the modifiers every column type accepts, plus [`Column`].
///
/// The type must have `name: String` and `modifiers: Modifiers` fields and an
/// inherent `fn sql_type(&self) -> String`.
macro_rules! column_modifiers {
    ($ty:ident) => {
        impl $ty {
            /// Forbid NULLs in the column. Applying it twice has no extra effect.
            pub fn not_null(mut self) -> Self {
                self.modifiers.push_once($crate::column::NOT_NULL);
                self
            }

            /// Allow the column to contain NULLs, undoing [`Self::not_null`].
            pub fn nullable(mut self) -> Self {
                self.modifiers.remove($crate::column::NOT_NULL);
                self
            }

            /// Set the default value. The expression is written verbatim.
            pub fn default_value(mut self, expr: impl AsRef<str>) -> Self {
                self.modifiers.push(format!("DEFAULT {}", expr.as_ref()));
                self
            }

            /// Set a string literal as the default value.
            pub fn default_string(mut self, value: &str) -> Self {
                self.modifiers
                    .push(format!("DEFAULT {}", $crate::ddl::quote_literal(value)));
                self
            }

            /// Place the column after `column` when adding or altering it.
            pub fn after(mut self, column: &str) -> Self {
                self.modifiers
                    .push(format!("AFTER {}", $crate::ddl::quote_ident(column)));
                self
            }

            /// Place the column first in the table.
            pub fn first(mut self) -> Self {
                self.modifiers.push("FIRST");
                self
            }

            /// Attach a comment to the column.
            pub fn comment(mut self, text: &str) -> Self {
                self.modifiers
                    .push(format!("COMMENT {}", $crate::ddl::quote_literal(text)));
                self
            }
        }

        impl $crate::column::Column for $ty {
            fn name(&self) -> &str {
                &self.name
            }

            fn create_sql(&self) -> String {
                self.modifiers.render(&self.name, &self.sql_type())
            }
        }
    };
}

mod blob;
mod boolean;
mod date;
mod decimal;
mod integer;
mod string;
mod text;
mod timestamp;

pub use blob::LongBlob;
pub use boolean::Boolean;
pub use date::{Date, DateTime};
pub use decimal::Decimal;
pub use integer::Integer;
pub use string::Varchar;
pub use text::{LongText, Text};
pub use timestamp::Timestamp;

/// Create a new integer column, `INT(length)`.
pub fn integer(name: impl Into<String>, length: u32) -> Integer {
    Integer::new(name, length)
}

/// Create a new string column, `VARCHAR(length)`.
pub fn string(name: impl Into<String>, length: u32) -> Varchar {
    Varchar::new(name, length)
}

/// Create a new text column.
pub fn text(name: impl Into<String>) -> Text {
    Text::new(name)
}

/// Create a new large text column.
pub fn long_text(name: impl Into<String>) -> LongText {
    LongText::new(name)
}

/// Create a new large binary column.
pub fn long_blob(name: impl Into<String>) -> LongBlob {
    LongBlob::new(name)
}

/// Create a new boolean column, stored as `TINYINT(1)`.
pub fn boolean(name: impl Into<String>) -> Boolean {
    Boolean::new(name)
}

/// Create a new date column.
pub fn date(name: impl Into<String>) -> Date {
    Date::new(name)
}

/// Create a new datetime column.
pub fn datetime(name: impl Into<String>) -> DateTime {
    DateTime::new(name)
}

/// Create a new decimal column with `length` digits, `scale` of them after the point.
pub fn decimal(name: impl Into<String>, length: u32, scale: u32) -> Decimal {
    Decimal::new(name, length, scale)
}

/// Create a new timestamp column.
pub fn timestamp(name: impl Into<String>) -> Timestamp {
    Timestamp::new(name)
}

/// The usual `id` column: `INT(11)`, auto-incremented and primary key of the table.
pub fn auto_increment() -> Integer {
    integer("id", 11).auto_increment().primary_key()
}

/// `created_at` column storing when the row was inserted.
pub fn created_timestamp() -> Timestamp {
    timestamp("created_at").not_null().default_current_timestamp()
}

/// `updated_at` column refreshed by MySQL on every update of the row.
pub fn updated_timestamp() -> Timestamp {
    timestamp("updated_at")
        .not_null()
        .default_current_timestamp()
        .on_update_current_timestamp()
}
