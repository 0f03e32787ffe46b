//! Extraction instruction sent to the vision model.

/// Fixed prompt requesting the nine semantic prescription fields as a
/// flat JSON object. The "no markdown" demand is not reliably honored,
/// which is why `sanitize::strip_code_fences` runs on every response.
pub const EXTRACTION_PROMPT: &str = "\
Extract the following fields from this medical prescription image:\n\
- Patient Name\n\
- Patient Age\n\
- Patient Gender\n\
- Doctor Name\n\
- Doctor Registration Number\n\
- Date of prescription\n\
- Medications (Name, Dosage, Frequency, Duration)\n\
- Instructions or additional notes\n\
Return ONLY a raw JSON object using double quotes, without markdown, no triple backticks.";
