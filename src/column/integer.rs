use super::Modifiers;

/// Column with an integer type, `INT(length)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    name: String,
    length: u32,
    unsigned: bool,
    modifiers: Modifiers,
}

impl Integer {
    /// Create a new integer column with the given display width.
    pub fn new(name: impl Into<String>, length: u32) -> Self {
        Self {
            name: name.into(),
            length,
            unsigned: false,
            modifiers: Modifiers::default(),
        }
    }

    /// Flag the column with a value that increments with each inserted row.
    pub fn auto_increment(mut self) -> Self {
        self.modifiers.push("AUTO_INCREMENT");
        self
    }

    /// Flag the column as the primary key of the table.
    pub fn primary_key(mut self) -> Self {
        self.modifiers.push("PRIMARY KEY");
        self
    }

    /// Only accept non-negative values.
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    fn sql_type(&self) -> String {
        if self.unsigned {
            format!("INT({}) UNSIGNED", self.length)
        } else {
            format!("INT({})", self.length)
        }
    }
}

column_modifiers!(Integer);

#[cfg(test)]
mod tests {
    use crate::column::{integer, Column};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain() {
        assert_eq!(integer("count", 11).create_sql(), "`count` INT(11)");
    }

    #[test]
    fn test_primary_key_auto_increment() {
        let col = integer("id", 11).auto_increment().primary_key();
        assert_eq!(col.create_sql(), "`id` INT(11) AUTO_INCREMENT PRIMARY KEY");
    }

    #[test]
    fn test_unsigned_keeps_modifiers_after_type() {
        let col = integer("user_id", 10).not_null().unsigned();
        assert_eq!(col.create_sql(), "`user_id` INT(10) UNSIGNED NOT NULL");
    }

    #[test]
    fn test_positioning() {
        assert_eq!(
            integer("rank", 4).first().create_sql(),
            "`rank` INT(4) FIRST"
        );
        assert_eq!(
            integer("rank", 4).nullable().after("id").create_sql(),
            "`rank` INT(4) AFTER `id`"
        );
    }
}
