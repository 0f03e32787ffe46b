//! Tesseract OCR engine — the fallback extraction capability.
//!
//! Produces a plain-text transcript with no field structure. The
//! transcript is surfaced to the caller as raw evidence; it is not
//! parsed into fields.

use leptess::LepTess;
use tracing::info;

use super::types::OcrEngine;
use super::ExtractError;

/// Tesseract via the leptess bindings. Language defaults to English;
/// traineddata discovery follows Tesseract's `TESSDATA_PREFIX`
/// convention.
pub struct TesseractOcr {
    lang: String,
}

impl TesseractOcr {
    pub fn new() -> Self {
        Self {
            lang: "eng".to_string(),
        }
    }

    /// Set the OCR language(s), e.g. `"eng"` or `"eng+fra"`.
    pub fn with_language(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn image_to_text(&self, image_bytes: &[u8]) -> Result<String, ExtractError> {
        let start = std::time::Instant::now();

        let mut tess = LepTess::new(None, &self.lang)
            .map_err(|e| ExtractError::OcrInit(e.to_string()))?;

        tess.set_image_from_mem(image_bytes)
            .map_err(|e| ExtractError::Ocr(format!("failed to load image: {e}")))?;

        let text = tess
            .get_utf8_text()
            .map_err(|e| ExtractError::Ocr(format!("text extraction failed: {e}")))?;

        info!(
            lang = %self.lang,
            elapsed_ms = %start.elapsed().as_millis(),
            text_len = text.len(),
            "OCR transcript produced"
        );

        Ok(text)
    }
}
