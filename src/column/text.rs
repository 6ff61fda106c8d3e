use super::Modifiers;

/// Column with a text type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    name: String,
    modifiers: Modifiers,
}

impl Text {
    /// Create a new text column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        "TEXT".to_string()
    }
}

column_modifiers!(Text);

/// Column with a large text type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongText {
    name: String,
    modifiers: Modifiers,
}

impl LongText {
    /// Create a new large text column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        "LONGTEXT".to_string()
    }
}

column_modifiers!(LongText);
