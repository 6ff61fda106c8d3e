use super::Modifiers;

/// Column with a boolean type. MySQL stores it as `TINYINT(1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boolean {
    name: String,
    modifiers: Modifiers,
}

impl Boolean {
    /// Create a new boolean column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        "TINYINT(1)".to_string()
    }
}

column_modifiers!(Boolean);
