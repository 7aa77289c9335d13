//! Terminal report: one block per object with findings, then a tally.

use crate::model::ValidationReport;
use crate::render::Renderer;

pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, reports: &[ValidationReport]) -> String {
        let mut out = String::new();
        let mut total_findings = 0;
        let mut objects_with_findings = 0;

        for report in reports {
            if report.errors.is_empty() {
                continue;
            }
            objects_with_findings += 1;
            total_findings += report.errors.len();

            out.push_str(&format!(
                "{} ({}:{}){}\n",
                report.path,
                report.file,
                report.line,
                if report.deprecated { " [deprecated]" } else { "" }
            ));
            for finding in &report.errors {
                out.push_str(&format!("    {}\n", finding.message));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "{} object{} checked, {} finding{} in {} object{}\n",
            reports.len(),
            plural(reports.len()),
            total_findings,
            plural(total_findings),
            objects_with_findings,
            plural(objects_with_findings),
        ));
        out
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
