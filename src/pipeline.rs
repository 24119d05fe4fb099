//! One-shot pipeline entry points for callers that do not need the
//! incremental engine: parse a document, run the full cycle, hand back a
//! plan or PDF bytes.

use crate::document::Resume;
use crate::engine::LayoutEngine;
use crate::error::LayoutError;
use crate::metrics::PageMetrics;
use crate::plan::LayoutPlan;

/// Options for a pipeline run.
#[derive(Debug, Clone)]
pub struct PressConfig {
    /// Document title, used in PDF metadata.
    pub title: String,
    pub metrics: PageMetrics,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            title: "resume".to_string(),
            metrics: PageMetrics::A4,
        }
    }
}

/// Lay out a resume and return the fixed-page preview plan.
pub fn preview_plan(resume: &Resume, config: &PressConfig) -> Result<LayoutPlan, LayoutError> {
    let mut engine = LayoutEngine::new(resume.clone(), config.metrics);
    engine.preview(&config.title)
}

/// Lay out a resume and return the exported PDF bytes.
pub fn export_pdf(resume: &Resume, config: &PressConfig) -> Result<Vec<u8>, LayoutError> {
    let mut engine = LayoutEngine::new(resume.clone(), config.metrics);
    engine.export(&config.title)
}

/// Parse a resume from JSON and export it in one call.
pub fn export_pdf_from_json(json: &str, config: &PressConfig) -> Result<Vec<u8>, LayoutError> {
    let resume = Resume::from_json(json)?;
    export_pdf(&resume, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_plan_for_empty_resume() {
        let plan = preview_plan(&Resume::default(), &PressConfig::default()).unwrap();
        assert_eq!(plan.pages.len(), 1);
        // The header placeholder is always present.
        assert!(!plan.pages[0].boxes.is_empty());
    }

    #[test]
    fn export_pdf_from_json_end_to_end() {
        let json = r#"{"full_name":"Grace Hopper","job_title":"Rear Admiral","summary":"Compilers."}"#;
        let bytes = export_pdf_from_json(json, &PressConfig::default()).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
    }

    #[test]
    fn invalid_json_is_rejected() {
        let err = export_pdf_from_json("{not json", &PressConfig::default()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidDocument(_)));
    }
}
