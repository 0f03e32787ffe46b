//! Normalization of loosely-typed model output into the canonical
//! record.
//!
//! This is the single chokepoint converting the externally-controlled
//! `serde_json::Value` tree into `ExtractionRecord`. It never fails:
//! absent or malformed fields degrade to their defaults independently
//! of each other, so partial malformation in one field cannot blank
//! out the rest.

use serde_json::Value;

use super::record::{Doctor, ExtractionRecord, Medicine, Patient, NOT_AVAILABLE};

/// Convert a raw extraction result into a complete `ExtractionRecord`.
///
/// Source labels are the natural-language field names the model is
/// prompted for (e.g. `"Patient Name"`, `"Medications"`). Every
/// canonical field is present in the output; `raw_text` defaults to the
/// empty string, everything else to `"N/A"`.
pub fn normalize(raw: &Value) -> ExtractionRecord {
    ExtractionRecord {
        patient: Patient {
            name: field(raw, "Patient Name"),
            age: field(raw, "Patient Age"),
            gender: field(raw, "Patient Gender"),
        },
        doctor: Doctor {
            name: field(raw, "Doctor Name"),
            registration_number: field(raw, "Doctor Registration Number"),
        },
        date: field(raw, "Date of prescription"),
        medicines: medicines(raw.get("Medications")),
        notes: field(raw, "Instructions or additional notes"),
        raw_text: raw
            .get("raw_text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn field(raw: &Value, label: &str) -> String {
    scalar(raw.get(label)).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Stringify a scalar value. Numbers and booleans are coerced rather
/// than discarded (models emit ages as numbers); arrays, objects and
/// null degrade to the field default.
fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A non-array `Medications` value degrades to the empty list.
fn medicines(value: Option<&Value>) -> Vec<Medicine> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items.iter().map(medicine).collect()
}

fn medicine(item: &Value) -> Medicine {
    Medicine {
        name: med_field(item, "Name"),
        dosage: med_field(item, "Dosage"),
        frequency: med_field(item, "Frequency"),
        duration: med_field(item, "Duration"),
    }
}

fn med_field(item: &Value, label: &str) -> String {
    scalar(item.get(label)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_mapping_yields_all_defaults() {
        let record = normalize(&json!({}));
        assert_eq!(record, ExtractionRecord::default());
    }

    #[test]
    fn non_object_input_yields_all_defaults() {
        assert_eq!(normalize(&json!(null)), ExtractionRecord::default());
        assert_eq!(normalize(&json!([1, 2, 3])), ExtractionRecord::default());
        assert_eq!(normalize(&json!("free text")), ExtractionRecord::default());
    }

    #[test]
    fn maps_every_source_label() {
        let raw = json!({
            "Patient Name": "Jane Doe",
            "Patient Age": "42",
            "Patient Gender": "F",
            "Doctor Name": "Dr. House",
            "Doctor Registration Number": "MH-12345",
            "Date of prescription": "2024-01-15",
            "Medications": [{"Name": "Ibuprofen", "Dosage": "200mg",
                             "Frequency": "twice daily", "Duration": "5 days"}],
            "Instructions or additional notes": "Take with food",
            "raw_text": "transcript"
        });
        let record = normalize(&raw);
        assert_eq!(record.patient.name, "Jane Doe");
        assert_eq!(record.patient.age, "42");
        assert_eq!(record.patient.gender, "F");
        assert_eq!(record.doctor.name, "Dr. House");
        assert_eq!(record.doctor.registration_number, "MH-12345");
        assert_eq!(record.date, "2024-01-15");
        assert_eq!(record.medicines.len(), 1);
        assert_eq!(record.medicines[0].frequency, "twice daily");
        assert_eq!(record.notes, "Take with food");
        assert_eq!(record.raw_text, "transcript");
    }

    #[test]
    fn partial_input_defaults_per_field() {
        let raw = json!({
            "Patient Name": "Jane Doe",
            "Medications": [{"Name": "Ibuprofen", "Dosage": "200mg"}]
        });
        let record = normalize(&raw);
        assert_eq!(record.patient.name, "Jane Doe");
        assert_eq!(record.patient.age, NOT_AVAILABLE);
        assert_eq!(record.patient.gender, NOT_AVAILABLE);
        assert_eq!(record.doctor.name, NOT_AVAILABLE);
        assert_eq!(record.notes, NOT_AVAILABLE);
        assert_eq!(record.medicines.len(), 1);
        assert_eq!(record.medicines[0].name, "Ibuprofen");
        assert_eq!(record.medicines[0].dosage, "200mg");
        // Per-medicine fields default to empty, not "N/A"
        assert_eq!(record.medicines[0].frequency, "");
        assert_eq!(record.medicines[0].duration, "");
    }

    #[test]
    fn malformed_medications_does_not_blank_other_fields() {
        let raw = json!({
            "Patient Name": "Jane Doe",
            "Medications": "not a list"
        });
        let record = normalize(&raw);
        assert!(record.medicines.is_empty());
        assert_eq!(record.patient.name, "Jane Doe");
    }

    #[test]
    fn scalar_values_are_coerced_to_strings() {
        let raw = json!({"Patient Age": 42, "Patient Gender": true});
        let record = normalize(&raw);
        assert_eq!(record.patient.age, "42");
        assert_eq!(record.patient.gender, "true");
    }

    #[test]
    fn nested_value_in_scalar_field_degrades_to_default() {
        let raw = json!({"Patient Name": {"first": "Jane"}, "Date of prescription": ["2024"]});
        let record = normalize(&raw);
        assert_eq!(record.patient.name, NOT_AVAILABLE);
        assert_eq!(record.date, NOT_AVAILABLE);
    }

    #[test]
    fn medicine_order_is_preserved() {
        let raw = json!({"Medications": [{"Name": "A"}, {"Name": "B"}]});
        let record = normalize(&raw);
        let names: Vec<&str> = record.medicines.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn non_object_medicine_entries_yield_empty_items() {
        let raw = json!({"Medications": ["Ibuprofen", {"Name": "B"}]});
        let record = normalize(&raw);
        assert_eq!(record.medicines.len(), 2);
        assert_eq!(record.medicines[0], Medicine::default());
        assert_eq!(record.medicines[1].name, "B");
    }
}
