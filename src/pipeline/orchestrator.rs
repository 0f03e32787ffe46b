//! Extraction orchestrator — the two-tier PRIMARY → SECONDARY protocol.
//!
//! PRIMARY sends the prepared image to the vision model, sanitizes and
//! parses its response, and normalizes the result. Any primary failure
//! is logged and absorbed by SECONDARY, which runs local OCR on the
//! same prepared image and returns the transcript alongside an
//! all-default stub record. Only a SECONDARY failure is fatal: the
//! system chooses availability over precision.

use std::path::Path;

use tracing::{info, warn};

use super::normalize::normalize;
use super::parse::parse_model_output;
use super::prompt::EXTRACTION_PROMPT;
use super::record::ExtractionRecord;
use super::render::DEFAULT_RENDER_DPI;
use super::sanitize::strip_code_fences;
use super::types::{OcrEngine, PageRenderer, PreparedImage, VisionExtractor};
use super::{ExtractError, PrimaryError};

/// Which tier produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    /// Vision model extraction succeeded; fields are model-derived.
    Primary,
    /// Primary failed; fields are defaults, only the transcript is real.
    OcrFallback,
}

/// Result of one extraction call: the raw transcript (empty on the
/// primary path) and the canonical record.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub raw_text: String,
    pub record: ExtractionRecord,
    pub tier: ExtractionTier,
}

/// Concrete extraction orchestrator.
/// Uses trait objects for the model, OCR and rendering capabilities,
/// enabling dependency injection.
pub struct Extractor {
    vision: Box<dyn VisionExtractor + Send + Sync>,
    ocr: Box<dyn OcrEngine + Send + Sync>,
    renderer: Box<dyn PageRenderer + Send + Sync>,
    render_dpi: u32,
}

impl Extractor {
    pub fn new(
        vision: Box<dyn VisionExtractor + Send + Sync>,
        ocr: Box<dyn OcrEngine + Send + Sync>,
        renderer: Box<dyn PageRenderer + Send + Sync>,
    ) -> Self {
        Self {
            vision,
            ocr,
            renderer,
            render_dpi: DEFAULT_RENDER_DPI,
        }
    }

    /// Override the PDF rendering resolution.
    pub fn with_render_dpi(mut self, dpi: u32) -> Self {
        self.render_dpi = dpi;
        self
    }

    /// Extract structured prescription data from an image or PDF path.
    ///
    /// Returns the transcript/record pair; see `ExtractionTier` for
    /// which tier produced it. Errors only when the OCR fallback itself
    /// fails — primary failures are absorbed.
    pub fn extract(&self, document: &Path) -> Result<Extraction, ExtractError> {
        match self.extract_primary(document) {
            Ok(record) => {
                info!(
                    document = %document.display(),
                    medicines = record.medicines.len(),
                    "Primary extraction complete"
                );
                Ok(Extraction {
                    raw_text: String::new(),
                    record,
                    tier: ExtractionTier::Primary,
                })
            }
            Err(e) => {
                warn!(
                    error = %e,
                    document = %document.display(),
                    "Primary extraction failed, falling back to OCR"
                );
                self.extract_fallback(document)
            }
        }
    }

    fn extract_primary(&self, document: &Path) -> Result<ExtractionRecord, PrimaryError> {
        let image = self
            .prepare_image(document)
            .map_err(|e| PrimaryError::Render(e.to_string()))?;
        let response = self.vision.generate(&image, EXTRACTION_PROMPT)?;
        let cleaned = strip_code_fences(&response);
        let raw = parse_model_output(&cleaned)?;
        Ok(normalize(&raw))
    }

    fn extract_fallback(&self, document: &Path) -> Result<Extraction, ExtractError> {
        let image = self.prepare_image(document)?;
        let transcript = self.ocr.image_to_text(&image.bytes)?;
        Ok(Extraction {
            raw_text: transcript,
            record: ExtractionRecord::default(),
            tier: ExtractionTier::OcrFallback,
        })
    }

    /// Read the document and reduce it to a single encoded image: the
    /// first page rendered to PNG for PDFs, the raw bytes otherwise.
    /// Prepared per tier, not shared — the fallback must not inherit a
    /// primary-tier preparation failure.
    fn prepare_image(&self, document: &Path) -> Result<PreparedImage, ExtractError> {
        let bytes = std::fs::read(document)?;

        if is_pdf(document, &bytes) {
            let png = self.renderer.render_first_page(&bytes, self.render_dpi)?;
            return Ok(PreparedImage {
                bytes: png,
                mime_type: "image/png",
            });
        }

        let format =
            image::guess_format(&bytes).map_err(|_| ExtractError::UnsupportedFormat)?;
        Ok(PreparedImage {
            bytes,
            mime_type: format_mime(format),
        })
    }
}

fn is_pdf(path: &Path, bytes: &[u8]) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
        || bytes.starts_with(b"%PDF-")
}

fn format_mime(format: image::ImageFormat) -> &'static str {
    match format {
        image::ImageFormat::Png => "image/png",
        image::ImageFormat::Jpeg => "image/jpeg",
        image::ImageFormat::Tiff => "image/tiff",
        image::ImageFormat::Bmp => "image/bmp",
        image::ImageFormat::WebP => "image/webp",
        _ => "application/octet-stream",
    }
}
