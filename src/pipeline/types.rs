//! Capability traits at the pipeline's external seams.
//!
//! The orchestrator depends only on these traits, enabling dependency
//! injection: production code wires in `GeminiClient`, `TesseractOcr`
//! and `PdfiumRenderer`; tests wire in mocks.

use super::{ExtractError, PrimaryError};

/// A document reduced to a single encoded raster image: the first page
/// of a PDF rendered to PNG, or a native image's raw bytes.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

/// External multimodal model: maps an image plus instruction text to a
/// text response. Untrusted for availability and output conformance —
/// every failure here is recoverable via the OCR fallback.
pub trait VisionExtractor {
    fn generate(&self, image: &PreparedImage, prompt: &str) -> Result<String, PrimaryError>;
}

/// Local OCR engine: maps an encoded image to a plain-text transcript
/// with no field structure.
pub trait OcrEngine {
    fn image_to_text(&self, image_bytes: &[u8]) -> Result<String, ExtractError>;
}

/// Multi-page document rasterizer. The pipeline consumes only the first
/// page; a document with zero pages is an error.
pub trait PageRenderer {
    fn render_first_page(&self, pdf_bytes: &[u8], dpi: u32) -> Result<Vec<u8>, ExtractError>;
}
