//! rxvision CLI — extract structured data from a prescription document.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rxvision::config::PipelineConfig;
use rxvision::pipeline::export::{to_flattened_csv, to_pretty_json};
use rxvision::pipeline::gemini::GeminiClient;
use rxvision::pipeline::ocr::TesseractOcr;
use rxvision::pipeline::render::PdfiumRenderer;
use rxvision::pipeline::{ExtractionTier, Extractor};

/// Extract structured prescription data from an image or PDF.
#[derive(Parser)]
#[command(name = "rxvision", version, about)]
struct Cli {
    /// Path to the prescription document (JPEG, PNG or PDF)
    document: PathBuf,

    /// Write the extracted record as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write the flattened medicines table as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,

    /// OCR language(s) for the fallback pass, e.g. "eng" or "eng+fra"
    #[arg(long, default_value = "eng")]
    ocr_lang: String,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::from_env().context("configuration error")?;

    let vision = Box::new(GeminiClient::new(&config.gemini));
    let ocr = Box::new(TesseractOcr::new().with_language(&cli.ocr_lang));
    let renderer = Box::new(PdfiumRenderer::new().context("PDF renderer unavailable")?);

    let extractor = Extractor::new(vision, ocr, renderer).with_render_dpi(config.render_dpi);

    let extraction = extractor
        .extract(&cli.document)
        .with_context(|| format!("extraction failed for {}", cli.document.display()))?;

    if extraction.tier == ExtractionTier::OcrFallback {
        eprintln!(
            "warning: primary extraction degraded to OCR-only mode; \
             structured fields are defaults, only the raw transcript is available"
        );
        if !extraction.raw_text.trim().is_empty() {
            eprintln!("--- OCR transcript ---\n{}", extraction.raw_text.trim());
        }
    }

    let json = to_pretty_json(&extraction.record)?;
    println!("{json}");

    if let Some(path) = &cli.json {
        fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
    }

    if let Some(path) = &cli.csv {
        let csv = to_flattened_csv(&extraction.record)?;
        fs::write(path, csv).with_context(|| format!("writing {}", path.display()))?;
    }

    Ok(())
}
