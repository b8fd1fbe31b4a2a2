//! Regex patterns for procurement request field extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Compile a label-anchored capture: the literal label, an optional colon
/// or dash, then the rest of the occurrence. `.` does not match newlines,
/// so the capture never crosses into the next line of the document.
fn labeled(label: &str) -> Regex {
    Regex::new(&format!(r"(?i){}\s*[:\-]?\s*(.+)", regex::escape(label))).unwrap()
}

lazy_static! {
    // Spanish long-form date, e.g. "4 de agosto de 2025"
    pub static ref DOCUMENT_DATE: Regex = Regex::new(
        r"(?i)(\d{1,2}\s+de\s+\w+\s+de\s+\d{4})"
    ).unwrap();

    // Label-anchored field captures
    pub static ref APPLICANT_NAME: Regex = labeled("NOMBRE");

    pub static ref REQUESTING_UNIT: Regex = labeled("REQUIRENTE (UNIDAD)");

    pub static ref OBJECTIVE: Regex = labeled("OBJETIVO");

    pub static ref ESTIMATED_AMOUNT: Regex = labeled("MONTO ESTIMADO");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_date_matches_long_form() {
        let m = DOCUMENT_DATE.find("Valparaíso, 4 de agosto de 2025").unwrap();
        assert_eq!(m.as_str(), "4 de agosto de 2025");
    }

    #[test]
    fn document_date_is_case_insensitive() {
        assert!(DOCUMENT_DATE.is_match("12 DE MARZO DE 2024"));
    }

    #[test]
    fn labeled_escapes_metacharacters() {
        // The unit label carries literal parentheses.
        let caps = REQUESTING_UNIT
            .captures("REQUIRENTE (UNIDAD): Unidad de Compras")
            .unwrap();
        assert_eq!(&caps[1], "Unidad de Compras");
    }

    #[test]
    fn labeled_accepts_dash_separator() {
        let caps = APPLICANT_NAME.captures("nombre - Pedro Soto").unwrap();
        assert_eq!(&caps[1], "Pedro Soto");
    }

    #[test]
    fn labeled_value_may_sit_on_next_line() {
        // The whitespace class before the capture spans newlines.
        let caps = OBJECTIVE.captures("OBJETIVO:\nReposición de equipos").unwrap();
        assert_eq!(&caps[1], "Reposición de equipos");
    }
}
