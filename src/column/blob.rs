use super::Modifiers;

/// Column with a large binary type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongBlob {
    name: String,
    modifiers: Modifiers,
}

impl LongBlob {
    /// Create a new large binary column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        "LONGBLOB".to_string()
    }
}

column_modifiers!(LongBlob);
