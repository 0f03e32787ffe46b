pub mod export;
pub mod gemini;
pub mod normalize;
pub mod ocr;
pub mod orchestrator;
pub mod parse;
pub mod prompt;
pub mod record;
pub mod render;
pub mod sanitize;
pub mod types;

pub use orchestrator::{Extraction, ExtractionTier, Extractor};
pub use record::{Doctor, ExtractionRecord, Medicine, Patient};

use thiserror::Error;

/// Failure of the primary (vision model) extraction tier.
///
/// Never surfaced to callers: it drives the transition to the OCR
/// fallback and is logged with its cause attached.
#[derive(Error, Debug)]
pub enum PrimaryError {
    #[error("page preparation failed: {0}")]
    Render(String),

    #[error("request failed: {0}")]
    Http(String),

    #[error("model API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model output unparseable: {0}")]
    Parse(String),
}

/// Fatal extraction failure.
///
/// Raised only when the OCR fallback itself cannot produce a transcript
/// (or the document cannot be read or rendered on the fallback path).
/// There is no further fallback beyond this point.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("unsupported document format")]
    UnsupportedFormat,

    #[error("OCR engine initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    Ocr(String),
}
