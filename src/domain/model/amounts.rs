// Form amount-pair state: two decimal-string fields linked by price.
use crate::domain::enums::EditedField;
use crate::domain::error::EngineError;

/// The two linked input fields of an order-entry form. The field named by
/// `last_edited` is authoritative; the other one is always derived.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AmountPair {
    pub amount: String,
    pub total: String,
    pub last_edited: Option<EditedField>,
}

impl AmountPair {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.amount.clear();
        self.total.clear();
        self.last_edited = None;
    }

    /// Records a user edit of one field.
    pub fn record_edit(&mut self, field: EditedField, value: &str) {
        match field {
            EditedField::Amount => self.amount = value.to_string(),
            EditedField::Total => self.total = value.to_string(),
        }
        self.last_edited = Some(field);
    }

    pub fn field(&self, field: EditedField) -> &str {
        match field {
            EditedField::Amount => &self.amount,
            EditedField::Total => &self.total,
        }
    }

    pub fn set_field(&mut self, field: EditedField, value: String) {
        match field {
            EditedField::Amount => self.amount = value,
            EditedField::Total => self.total = value,
        }
    }

    /// The authoritative field's parsed value, if the user has entered one.
    pub fn edited_value(&self) -> Option<(EditedField, f64)> {
        let field = self.last_edited?;
        parse_amount(self.field(field)).ok().map(|v| (field, v))
    }
}

/// Parses a user-entered decimal string. Empty and zero inputs are not
/// quotable; negatives and garbage are invalid.
pub fn parse_amount(s: &str) -> Result<f64, EngineError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(EngineError::MissingAmount);
    }
    let value: f64 = trimmed
        .parse()
        .map_err(|_| EngineError::InvalidAmount(trimmed.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(EngineError::InvalidAmount(trimmed.to_string()));
    }
    Ok(value)
}

pub fn round_to_decimals(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Formats a derived value back into a field string, trimming the
/// trailing zeros a fixed-precision format leaves behind.
pub fn format_amount(value: f64, decimals: u32) -> String {
    let s = format!("{:.*}", decimals as usize, value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() { "0".to_string() } else { s.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_empty_zero_and_garbage() {
        assert!(matches!(parse_amount(""), Err(EngineError::MissingAmount)));
        assert!(matches!(parse_amount("  "), Err(EngineError::MissingAmount)));
        assert!(parse_amount("0").is_err());
        assert!(parse_amount("-1.5").is_err());
        assert!(parse_amount("1.2.3").is_err());
        assert_eq!(parse_amount(" 50 ").unwrap(), 50.0);
    }

    #[test]
    fn format_trims_trailing_zeros() {
        assert_eq!(format_amount(1.5, 8), "1.5");
        assert_eq!(format_amount(100.0, 8), "100");
        assert_eq!(format_amount(0.00000001, 8), "0.00000001");
    }

    #[test]
    fn edited_value_follows_discriminator() {
        let mut pair = AmountPair::new();
        pair.record_edit(EditedField::Amount, "2.5");
        assert_eq!(pair.edited_value(), Some((EditedField::Amount, 2.5)));

        pair.record_edit(EditedField::Total, "10");
        assert_eq!(pair.edited_value(), Some((EditedField::Total, 10.0)));

        pair.record_edit(EditedField::Total, "abc");
        assert_eq!(pair.edited_value(), None);
    }
}
