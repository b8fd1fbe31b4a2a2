//! Request field set and register record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for the reception and signoff columns.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Fields parsed out of one procurement request document.
///
/// All values are best-effort: a label that was not found leaves an empty
/// string, an amount that did not parse is `None`. Absence is the expected
/// outcome on noisy documents, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestFields {
    /// Long-form document date as written, e.g. "4 de agosto de 2025".
    pub document_date: String,

    /// Applicant name (label NOMBRE).
    pub applicant_name: String,

    /// Requesting unit (label REQUIRENTE (UNIDAD)).
    pub requesting_unit: String,

    /// Purchase objective (label OBJETIVO).
    pub objective: String,

    /// Estimated amount in pesos (label MONTO ESTIMADO).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_amount: Option<i64>,
}

/// Signoff state of a registered request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// V°B° granted.
    Firmado,
    /// Awaiting V°B°.
    Pendiente,
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestStatus::Firmado => write!(f, "Firmado"),
            RequestStatus::Pendiente => write!(f, "Pendiente"),
        }
    }
}

/// One row of the request register.
///
/// Kept flat (no nested `RequestFields`) because the CSV serializer does
/// not flatten nested structs. The serde renames are the on-disk Spanish
/// column headers; their order here is the column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRecord {
    #[serde(rename = "Fecha Documento")]
    pub document_date: String,

    #[serde(rename = "Solicitante (Nombre)")]
    pub applicant_name: String,

    #[serde(rename = "Unidad Requirente")]
    pub requesting_unit: String,

    #[serde(rename = "Objetivo")]
    pub objective: String,

    #[serde(rename = "Monto Estimado")]
    pub estimated_amount: Option<i64>,

    #[serde(rename = "Fecha de Recepción")]
    pub received: String,

    /// Empty string until the request is signed.
    #[serde(rename = "Fecha Firma V°B°")]
    pub signoff: String,

    #[serde(rename = "Estado")]
    pub status: RequestStatus,

    #[serde(rename = "Archivo Origen")]
    pub source_file: String,
}

impl RegisterRecord {
    /// On-disk header row, in column order.
    pub const CSV_HEADERS: [&'static str; 9] = [
        "Fecha Documento",
        "Solicitante (Nombre)",
        "Unidad Requirente",
        "Objetivo",
        "Monto Estimado",
        "Fecha de Recepción",
        "Fecha Firma V°B°",
        "Estado",
        "Archivo Origen",
    ];

    /// Build a record from parsed fields plus the intake metadata.
    ///
    /// Status follows the signoff date: present means `Firmado`, absent
    /// means `Pendiente` with an empty signoff column.
    pub fn new(
        fields: RequestFields,
        received: NaiveDate,
        signoff: Option<NaiveDate>,
        source_file: impl Into<String>,
    ) -> Self {
        let status = if signoff.is_some() {
            RequestStatus::Firmado
        } else {
            RequestStatus::Pendiente
        };

        Self {
            document_date: fields.document_date,
            applicant_name: fields.applicant_name,
            requesting_unit: fields.requesting_unit,
            objective: fields.objective,
            estimated_amount: fields.estimated_amount,
            received: received.format(DATE_FORMAT).to_string(),
            signoff: signoff
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status,
            source_file: source_file.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_fields() -> RequestFields {
        RequestFields {
            document_date: "4 de agosto de 2025".to_string(),
            applicant_name: "Juana Pérez".to_string(),
            requesting_unit: "Unidad de Compras".to_string(),
            objective: "Útiles escolares".to_string(),
            estimated_amount: Some(12_500_000),
        }
    }

    #[test]
    fn test_pending_record_has_empty_signoff() {
        let received = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let record = RegisterRecord::new(sample_fields(), received, None, "solicitud.docx");

        assert_eq!(record.received, "05/08/2025");
        assert_eq!(record.signoff, "");
        assert_eq!(record.status, RequestStatus::Pendiente);
        assert_eq!(record.source_file, "solicitud.docx");
    }

    #[test]
    fn test_signed_record_formats_both_dates() {
        let received = NaiveDate::from_ymd_opt(2025, 8, 5).unwrap();
        let signed = NaiveDate::from_ymd_opt(2025, 8, 12).unwrap();
        let record = RegisterRecord::new(sample_fields(), received, Some(signed), "req.pdf");

        assert_eq!(record.signoff, "12/08/2025");
        assert_eq!(record.status, RequestStatus::Firmado);
    }

    #[test]
    fn test_status_display_matches_serialized_form() {
        assert_eq!(RequestStatus::Firmado.to_string(), "Firmado");
        assert_eq!(RequestStatus::Pendiente.to_string(), "Pendiente");
    }
}
