use super::Modifiers;

/// Column with a string type, `VARCHAR(length)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Varchar {
    name: String,
    length: u32,
    modifiers: Modifiers,
}

impl Varchar {
    /// Create a new string column holding at most `length` characters.
    pub fn new(name: impl Into<String>, length: u32) -> Self {
        Self {
            name: name.into(),
            length,
            modifiers: Modifiers::default(),
        }
    }

    /// Flag the column as the primary key of the table.
    pub fn primary_key(mut self) -> Self {
        self.modifiers.push("PRIMARY KEY");
        self
    }

    fn sql_type(&self) -> String {
        format!("VARCHAR({})", self.length)
    }
}

column_modifiers!(Varchar);

#[cfg(test)]
mod tests {
    use crate::column::{string, Column};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_string() {
        assert_eq!(string("email", 255).create_sql(), "`email` VARCHAR(255)");
    }

    #[test]
    fn test_string_primary_key() {
        let col = string("code", 3).not_null().primary_key();
        assert_eq!(col.create_sql(), "`code` VARCHAR(3) NOT NULL PRIMARY KEY");
    }

    #[test]
    fn test_string_default() {
        let col = string("status", 16).not_null().default_string("draft");
        assert_eq!(
            col.create_sql(),
            "`status` VARCHAR(16) NOT NULL DEFAULT 'draft'"
        );
    }
}
