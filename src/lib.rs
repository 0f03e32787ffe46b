//! Prescription vision pipeline.
//!
//! Extracts structured fields (patient, doctor, medicines, notes) from
//! a prescription image or PDF via the Gemini vision API, falling back
//! to a local Tesseract OCR transcript when the model is unreachable
//! or its output is unusable. Results export as JSON and as a
//! flattened CSV table.

pub mod config;
pub mod pipeline;

pub use config::{GeminiConfig, PipelineConfig};
pub use pipeline::{ExtractError, Extraction, ExtractionRecord, ExtractionTier, Extractor};
