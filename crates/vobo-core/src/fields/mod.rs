//! Label-anchored field extraction for procurement request text.
//!
//! The parser scans normalized text for a fixed set of Spanish labels
//! (NOMBRE, REQUIRENTE (UNIDAD), OBJETIVO, MONTO ESTIMADO) plus a
//! long-form document date. Matching is first-occurrence-wins over the
//! whole text; a missing label produces an empty value, never an error.

pub mod patterns;

use regex::Regex;
use tracing::debug;

use crate::models::record::RequestFields;
use crate::text::normalize_text;
use patterns::{APPLICANT_NAME, DOCUMENT_DATE, ESTIMATED_AMOUNT, OBJECTIVE, REQUESTING_UNIT};

/// Default cap on the length of a captured field value, in characters.
pub const DEFAULT_MAX_VALUE_LEN: usize = 400;

/// Parser for the fixed procurement request field set.
pub struct FieldParser {
    max_value_len: usize,
}

impl FieldParser {
    pub fn new() -> Self {
        Self {
            max_value_len: DEFAULT_MAX_VALUE_LEN,
        }
    }

    /// Override the captured-value length cap.
    pub fn with_max_value_len(mut self, max: usize) -> Self {
        self.max_value_len = max;
        self
    }

    /// Parse all fields out of raw extracted text.
    ///
    /// The text is normalized first. Every field is best-effort: absent
    /// labels yield empty strings and an unparseable amount yields `None`.
    pub fn parse(&self, text: &str) -> RequestFields {
        let text = normalize_text(text);

        let fields = RequestFields {
            document_date: DOCUMENT_DATE
                .find(&text)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
            applicant_name: self.labeled_value(&APPLICANT_NAME, &text),
            requesting_unit: self.labeled_value(&REQUESTING_UNIT, &text),
            objective: self.labeled_value(&OBJECTIVE, &text),
            estimated_amount: digits_to_amount(&self.labeled_value(&ESTIMATED_AMOUNT, &text)),
        };

        debug!(
            "parsed fields: date={:?} name={:?} unit={:?} amount={:?}",
            fields.document_date, fields.applicant_name, fields.requesting_unit,
            fields.estimated_amount
        );

        fields
    }

    /// First line of the first capture of `pattern`, trimmed and capped.
    fn labeled_value(&self, pattern: &Regex, text: &str) -> String {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().lines().next())
            .map(|line| line.trim().chars().take(self.max_value_len).collect())
            .unwrap_or_default()
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the fixed field set from text using default settings.
pub fn extract_fields(text: &str) -> RequestFields {
    FieldParser::new().parse(text)
}

/// Strip every non-digit character and coerce the remainder to an integer.
///
/// Handles currency notation like `$12.500.000`; an empty remainder (or
/// one too large for `i64`) means the amount is absent.
fn digits_to_amount(value: &str) -> Option<i64> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_amount_with_thousand_separators() {
        let fields = extract_fields("MONTO ESTIMADO: $12.500.000");
        assert_eq!(fields.estimated_amount, Some(12_500_000));
    }

    #[test]
    fn test_amount_plain_digits() {
        let fields = extract_fields("MONTO ESTIMADO 450000 pesos");
        assert_eq!(fields.estimated_amount, Some(450_000));
    }

    #[test]
    fn test_amount_without_digits_is_absent() {
        let fields = extract_fields("MONTO ESTIMADO: por definir");
        assert_eq!(fields.estimated_amount, None);
    }

    #[test]
    fn test_amount_missing_label_is_absent() {
        let fields = extract_fields("sin montos en este documento");
        assert_eq!(fields.estimated_amount, None);
    }

    #[test]
    fn test_name_stops_at_first_line() {
        let fields = extract_fields("NOMBRE: Juana Pérez\nOTRO: x");
        assert_eq!(fields.applicant_name, "Juana Pérez");
    }

    #[test]
    fn test_name_case_insensitive_with_dash() {
        let fields = extract_fields("nombre - María José Rojas");
        assert_eq!(fields.applicant_name, "María José Rojas");
    }

    #[test]
    fn test_unit_label_with_parentheses() {
        let fields = extract_fields("REQUIRENTE (UNIDAD): Departamento de Educación");
        assert_eq!(fields.requesting_unit, "Departamento de Educación");
    }

    #[test]
    fn test_objective_trimmed() {
        let fields = extract_fields("OBJETIVO:    Compra de útiles escolares   \nfin");
        assert_eq!(fields.objective, "Compra de útiles escolares");
    }

    #[test]
    fn test_date_long_form() {
        let fields = extract_fields("Santiago, 4 de Agosto de 2025.\nNOMBRE: A");
        assert_eq!(fields.document_date, "4 de Agosto de 2025");
    }

    #[test]
    fn test_date_absent_is_empty() {
        let fields = extract_fields("NOMBRE: Juana\nOBJETIVO: algo");
        assert_eq!(fields.document_date, "");
    }

    #[test]
    fn test_no_labels_yields_all_empty() {
        let fields = extract_fields("texto sin ninguna etiqueta conocida");
        assert_eq!(fields.document_date, "");
        assert_eq!(fields.applicant_name, "");
        assert_eq!(fields.requesting_unit, "");
        assert_eq!(fields.objective, "");
        assert_eq!(fields.estimated_amount, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let fields = extract_fields("NOMBRE: Primera Persona\nNOMBRE: Segunda Persona");
        assert_eq!(fields.applicant_name, "Primera Persona");
    }

    #[test]
    fn test_value_capped_in_characters() {
        let long_value = "á".repeat(500);
        let text = format!("OBJETIVO: {long_value}");
        let fields = FieldParser::new().parse(&text);
        assert_eq!(fields.objective.chars().count(), 400);

        let fields = FieldParser::new().with_max_value_len(10).parse(&text);
        assert_eq!(fields.objective.chars().count(), 10);
    }

    #[test]
    fn test_normalization_applied_before_matching() {
        // Horizontal runs inside the value collapse to single spaces.
        let fields = extract_fields("NOMBRE:    Juana    Pérez\nresto");
        assert_eq!(fields.applicant_name, "Juana Pérez");
    }

    #[test]
    fn test_value_on_following_line() {
        let fields = extract_fields("MONTO ESTIMADO:\n$ 1.250.000");
        assert_eq!(fields.estimated_amount, Some(1_250_000));
    }
}
