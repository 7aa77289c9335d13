//! JSON report: structured output for tooling integration.

use crate::model::ValidationReport;
use crate::render::Renderer;

pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, reports: &[ValidationReport]) -> String {
        let mut out = serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string());
        out.push('\n');
        out
    }
}
