use super::Modifiers;

/// Column with a date type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Date {
    name: String,
    modifiers: Modifiers,
}

impl Date {
    /// Create a new date column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        "DATE".to_string()
    }
}

column_modifiers!(Date);

/// Column with a datetime type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    name: String,
    modifiers: Modifiers,
}

impl DateTime {
    /// Create a new datetime column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    /// Set the default value of the column to the current datetime.
    pub fn default_current_timestamp(mut self) -> Self {
        self.modifiers.push("DEFAULT CURRENT_TIMESTAMP");
        self
    }

    /// Refresh the value to the current datetime whenever the row changes.
    pub fn on_update_current_timestamp(mut self) -> Self {
        self.modifiers.push("ON UPDATE CURRENT_TIMESTAMP");
        self
    }

    fn sql_type(&self) -> String {
        "DATETIME".to_string()
    }
}

column_modifiers!(DateTime);

#[cfg(test)]
mod tests {
    use crate::column::{date, datetime, Column};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date() {
        assert_eq!(date("birthday").create_sql(), "`birthday` DATE");
    }

    #[test]
    fn test_datetime_default_current() {
        let col = datetime("published_at").not_null().default_current_timestamp();
        assert_eq!(
            col.create_sql(),
            "`published_at` DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_datetime_on_update() {
        let col = datetime("touched_at")
            .nullable()
            .default_value("NULL")
            .on_update_current_timestamp();
        assert_eq!(
            col.create_sql(),
            "`touched_at` DATETIME DEFAULT NULL ON UPDATE CURRENT_TIMESTAMP"
        );
    }
}
