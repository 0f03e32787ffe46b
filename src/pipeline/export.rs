//! Export views of the canonical record: pretty JSON and a flattened
//! CSV table (one row per medicine, each row repeating the
//! patient/doctor/date/notes context). File packaging is the caller's
//! concern; these functions only produce the serialized text.

use thiserror::Error;

use super::record::ExtractionRecord;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV output was not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Column order for the flattened medicines table.
const CSV_HEADERS: [&str; 11] = [
    "Patient Name",
    "Patient Age",
    "Patient Gender",
    "Doctor Name",
    "Doctor Registration Number",
    "Date",
    "Medicine Name",
    "Dosage",
    "Frequency",
    "Duration",
    "Notes",
];

/// Serialize the record as pretty-printed JSON in the canonical field
/// order (Patient, Doctor, Date, Medicines, Notes; `raw_text` only when
/// non-empty).
pub fn to_pretty_json(record: &ExtractionRecord) -> serde_json::Result<String> {
    serde_json::to_string_pretty(record)
}

/// Flatten the record to CSV: one row per medicine. A record with no
/// medicines yields the header row only.
pub fn to_flattened_csv(record: &ExtractionRecord) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for medicine in &record.medicines {
        writer.write_record([
            record.patient.name.as_str(),
            record.patient.age.as_str(),
            record.patient.gender.as_str(),
            record.doctor.name.as_str(),
            record.doctor.registration_number.as_str(),
            record.date.as_str(),
            medicine.name.as_str(),
            medicine.dosage.as_str(),
            medicine.frequency.as_str(),
            medicine.duration.as_str(),
            record.notes.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8(bytes)?)
}
