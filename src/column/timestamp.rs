use super::Modifiers;

/// Column with a timestamp type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    name: String,
    modifiers: Modifiers,
}

impl Timestamp {
    /// Create a new timestamp column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    /// Set the default value of the column to the current timestamp.
    pub fn default_current_timestamp(mut self) -> Self {
        self.modifiers.push("DEFAULT CURRENT_TIMESTAMP");
        self
    }

    /// Refresh the value to the current timestamp whenever the row changes.
    pub fn on_update_current_timestamp(mut self) -> Self {
        self.modifiers.push("ON UPDATE CURRENT_TIMESTAMP");
        self
    }

    /// Default to the zero timestamp. Rejected by servers running with
    /// `NO_ZERO_DATE` in the SQL mode.
    pub fn zero_default(mut self) -> Self {
        self.modifiers.push("DEFAULT '0000-00-00 00:00:00'");
        self
    }

    fn sql_type(&self) -> String {
        "TIMESTAMP".to_string()
    }
}

column_modifiers!(Timestamp);
