//! PDF page rendering via Google PDFium.
//!
//! Renders the first page of a PDF to a PNG image for the vision model
//! and the OCR fallback. `PdfiumRenderer` is stateless; each operation
//! creates a fresh `Pdfium` instance because the upstream type is
//! `!Send`. The OS caches `dlopen`/`LoadLibrary` calls, so repeat loads
//! are near-free.

use std::io::Cursor;

use image::ImageOutputFormat;
use pdfium_render::prelude::*;
use tracing::{debug, warn};

use super::types::PageRenderer;
use super::ExtractError;

/// Default rendering resolution for prescription scans.
pub const DEFAULT_RENDER_DPI: u32 = 300;

/// Maximum dimension (width or height) for rendered page images.
/// Prevents OOM on extremely large pages or absurd DPI settings.
const MAX_DIMENSION_PX: u32 = 4096;

/// PDF points per inch (standard PDF unit).
const POINTS_PER_INCH: f32 = 72.0;

pub struct PdfiumRenderer;

impl PdfiumRenderer {
    /// Create a new renderer, verifying the PDFium library is loadable.
    pub fn new() -> Result<Self, ExtractError> {
        let _ = load_pdfium()?;
        Ok(Self)
    }
}

/// Load the PDFium dynamic library: `PDFIUM_DYNAMIC_LIB_PATH` env var
/// first, then the system library search paths.
fn load_pdfium() -> Result<Pdfium, ExtractError> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        debug!(path = %path, "Loading PDFium from env var");
        let bindings = Pdfium::bind_to_library(&path).map_err(|e| {
            ExtractError::Render(format!("failed to load PDFium from {path}: {e}"))
        })?;
        return Ok(Pdfium::new(bindings));
    }

    let bindings = Pdfium::bind_to_system_library().map_err(|e| {
        ExtractError::Render(format!(
            "PDFium library not found; set PDFIUM_DYNAMIC_LIB_PATH or install PDFium: {e}"
        ))
    })?;
    Ok(Pdfium::new(bindings))
}

/// Compute pixel dimensions for rendering, clamped to
/// `[1, MAX_DIMENSION_PX]` with aspect ratio preserved when capping.
fn compute_render_dimensions(width_points: f32, height_points: f32, dpi: u32) -> (u32, u32) {
    let scale = dpi as f32 / POINTS_PER_INCH;
    let raw_w = (width_points * scale).max(1.0);
    let raw_h = (height_points * scale).max(1.0);

    let max_dim = raw_w.max(raw_h);
    if max_dim > MAX_DIMENSION_PX as f32 {
        let ratio = MAX_DIMENSION_PX as f32 / max_dim;
        let w = ((raw_w * ratio) as u32).clamp(1, MAX_DIMENSION_PX);
        let h = ((raw_h * ratio) as u32).clamp(1, MAX_DIMENSION_PX);
        (w, h)
    } else {
        (raw_w as u32, raw_h as u32)
    }
}

impl PageRenderer for PdfiumRenderer {
    fn render_first_page(&self, pdf_bytes: &[u8], dpi: u32) -> Result<Vec<u8>, ExtractError> {
        let pdfium = load_pdfium()?;
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| ExtractError::Render(format!("failed to load PDF: {e}")))?;

        let pages = document.pages();
        let page = pages
            .first()
            .map_err(|_| ExtractError::Render("document has no pages".to_string()))?;

        let width_points = page.width().value;
        let height_points = page.height().value;
        let (target_w, target_h) = compute_render_dimensions(width_points, height_points, dpi);

        let uncapped_w = (width_points * dpi as f32 / POINTS_PER_INCH) as u32;
        let uncapped_h = (height_points * dpi as f32 / POINTS_PER_INCH) as u32;
        if target_w != uncapped_w || target_h != uncapped_h {
            warn!(
                raw_width = uncapped_w,
                raw_height = uncapped_h,
                capped_width = target_w,
                capped_height = target_h,
                "Page dimensions capped to {MAX_DIMENSION_PX}px",
            );
        }

        let config = PdfRenderConfig::new()
            .set_target_width(target_w as i32)
            .set_maximum_height(target_h as i32);

        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| ExtractError::Render(format!("rendering failed: {e}")))?;

        let dynamic_image = bitmap.as_image();
        let mut cursor = Cursor::new(Vec::new());
        dynamic_image
            .write_to(&mut cursor, ImageOutputFormat::Png)
            .map_err(|e| ExtractError::Render(format!("PNG encoding failed: {e}")))?;

        let png_bytes = cursor.into_inner();
        debug!(
            width = target_w,
            height = target_h,
            png_size = png_bytes.len(),
            "Rendered first PDF page to PNG"
        );

        Ok(png_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_at_300_dpi_is_uncapped() {
        // A4: 595 x 842 points
        let (w, h) = compute_render_dimensions(595.0, 842.0, 300);
        assert_eq!(w, 2479);
        assert_eq!(h, 3508);
    }

    #[test]
    fn oversized_page_is_capped_with_aspect_ratio() {
        let (w, h) = compute_render_dimensions(595.0, 842.0, 1200);
        // f32 rounding may land one pixel under the cap
        assert!(h <= MAX_DIMENSION_PX && h >= MAX_DIMENSION_PX - 1);
        assert!(w < h);
        let ratio = w as f32 / h as f32;
        assert!((ratio - 595.0 / 842.0).abs() < 0.01);
    }

    #[test]
    fn degenerate_page_renders_at_least_one_pixel() {
        let (w, h) = compute_render_dimensions(0.0, 0.0, 300);
        assert_eq!((w, h), (1, 1));
    }
}
