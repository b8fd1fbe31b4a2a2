//! Whitespace normalization for extracted document text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HORIZONTAL_RUNS: Regex = Regex::new(r"[ \t]+").unwrap();
    static ref BLANK_LINE_RUNS: Regex = Regex::new(r"\n{2,}").unwrap();
}

/// Collapse whitespace noise in text extracted from documents.
///
/// Runs of spaces/tabs become a single space, runs of two or more
/// newlines become a single newline, and the result is trimmed. Total on
/// any input and idempotent, so downstream pattern matching can assume
/// one space between words and one newline between lines.
pub fn normalize_text(text: &str) -> String {
    let collapsed = HORIZONTAL_RUNS.replace_all(text, " ");
    let collapsed = BLANK_LINE_RUNS.replace_all(&collapsed, "\n");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collapses_horizontal_runs() {
        assert_eq!(normalize_text("a  \t b"), "a b");
        assert_eq!(normalize_text("uno\t\t\tdos"), "uno dos");
    }

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(normalize_text("a\n\n\nb"), "a\nb");
        assert_eq!(normalize_text("a\nb"), "a\nb");
    }

    #[test]
    fn trims_ends() {
        assert_eq!(normalize_text("  hola  \n"), "hola");
        assert_eq!(normalize_text("\n\n \t \n"), "");
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(normalize_text(""), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "",
            "   ",
            "a  b\n\n\nc\td",
            "SOLICITUD   DE COMPRA\n\n\nNOMBRE:  Juana Pérez\n\nOBJETIVO: útiles",
            "a \n \nb",
            "línea única",
        ];
        for s in samples {
            let once = normalize_text(s);
            assert_eq!(normalize_text(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn keeps_single_interior_spacing() {
        let text = "REQUIRENTE (UNIDAD): Unidad de Compras\nMONTO ESTIMADO: $1.000";
        assert_eq!(normalize_text(text), text);
    }
}
