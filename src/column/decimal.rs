use super::Modifiers;

/// Column with a fixed-point decimal type, `DECIMAL(length, scale)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    name: String,
    length: u32,
    scale: u32,
    modifiers: Modifiers,
}

impl Decimal {
    /// `length` is the total number of digits, `scale` how many follow the point.
    pub fn new(name: impl Into<String>, length: u32, scale: u32) -> Self {
        Self {
            name: name.into(),
            length,
            scale,
            modifiers: Modifiers::default(),
        }
    }

    fn sql_type(&self) -> String {
        format!("DECIMAL({}, {})", self.length, self.scale)
    }
}

column_modifiers!(Decimal);

#[cfg(test)]
mod tests {
    use crate::column::{decimal, Column};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decimal() {
        assert_eq!(
            decimal("price", 10, 2).not_null().default_value("0.00").create_sql(),
            "`price` DECIMAL(10, 2) NOT NULL DEFAULT 0.00"
        );
    }
}
