//! Canonical prescription record — the pipeline's sole structured
//! output type.
//!
//! Every field is always present regardless of how sparse or malformed
//! the model output was: absent fields are defaulted, never omitted.
//! Serialized field names and order match the export contract
//! (Patient, Doctor, Date, Medicines, Notes; `raw_text` is an internal
//! extra emitted only when non-empty).

use serde::{Deserialize, Serialize};

/// Sentinel for record-level fields absent from the source.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Age")]
    pub age: String,
    #[serde(rename = "Gender")]
    pub gender: String,
}

impl Default for Patient {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            age: NOT_AVAILABLE.to_string(),
            gender: NOT_AVAILABLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "RegistrationNumber")]
    pub registration_number: String,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            registration_number: NOT_AVAILABLE.to_string(),
        }
    }
}

/// One prescribed medicine. Per-item fields default to the empty
/// string, not `"N/A"` — partial entries are common in model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Medicine {
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Dosage", default)]
    pub dosage: String,
    #[serde(rename = "Frequency", default)]
    pub frequency: String,
    #[serde(rename = "Duration", default)]
    pub duration: String,
}

/// Complete extraction result. `Default` is the fallback stub returned
/// when primary extraction fails: every field at its sentinel, no
/// medicines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRecord {
    #[serde(rename = "Patient")]
    pub patient: Patient,
    #[serde(rename = "Doctor")]
    pub doctor: Doctor,
    #[serde(rename = "Date")]
    pub date: String,
    /// Insertion order is the display and export order.
    #[serde(rename = "Medicines")]
    pub medicines: Vec<Medicine>,
    #[serde(rename = "Notes")]
    pub notes: String,
    /// OCR transcript carried on the fallback path; empty otherwise.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub raw_text: String,
}

impl Default for ExtractionRecord {
    fn default() -> Self {
        Self {
            patient: Patient::default(),
            doctor: Doctor::default(),
            date: NOT_AVAILABLE.to_string(),
            medicines: Vec::new(),
            notes: NOT_AVAILABLE.to_string(),
            raw_text: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stub_record_defaults_every_field() {
        let stub = ExtractionRecord::default();
        assert_eq!(stub.patient.name, NOT_AVAILABLE);
        assert_eq!(stub.patient.age, NOT_AVAILABLE);
        assert_eq!(stub.patient.gender, NOT_AVAILABLE);
        assert_eq!(stub.doctor.name, NOT_AVAILABLE);
        assert_eq!(stub.doctor.registration_number, NOT_AVAILABLE);
        assert_eq!(stub.date, NOT_AVAILABLE);
        assert!(stub.medicines.is_empty());
        assert_eq!(stub.notes, NOT_AVAILABLE);
        assert!(stub.raw_text.is_empty());
    }

    #[test]
    fn serializes_with_canonical_field_names_in_order() {
        let json = serde_json::to_string(&ExtractionRecord::default()).unwrap();
        let patient = json.find("\"Patient\"").unwrap();
        let doctor = json.find("\"Doctor\"").unwrap();
        let date = json.find("\"Date\"").unwrap();
        let medicines = json.find("\"Medicines\"").unwrap();
        let notes = json.find("\"Notes\"").unwrap();
        assert!(patient < doctor && doctor < date && date < medicines && medicines < notes);
    }

    #[test]
    fn empty_raw_text_is_not_serialized() {
        let json = serde_json::to_string(&ExtractionRecord::default()).unwrap();
        assert!(!json.contains("raw_text"));

        let mut record = ExtractionRecord::default();
        record.raw_text = "transcript".to_string();
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"raw_text\":\"transcript\""));
    }

    #[test]
    fn medicine_deserializes_with_missing_fields() {
        let med: Medicine = serde_json::from_str(r#"{"Name":"Ibuprofen"}"#).unwrap();
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.dosage, "");
        assert_eq!(med.frequency, "");
        assert_eq!(med.duration, "");
    }
}
