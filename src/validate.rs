//! Validator: runs the whole catalog over one resolved object.

use crate::checks::{self, Vocabulary};
use crate::model::ValidationReport;
use crate::parser::docstring;
use crate::registry::Registry;
use anyhow::Result;

/// Validate one dotted import path.
///
/// Documentation problems come back as findings inside the report; only a
/// path that does not resolve is an error.
pub fn validate_one(registry: &Registry, path: &str) -> Result<ValidationReport> {
    let item = registry.resolve(path)?;
    let record = docstring::build(item);
    let errors = checks::run_all(&record, &Vocabulary::default());
    Ok(ValidationReport {
        path: item.path.clone(),
        kind: item.kind,
        file: item.file.clone(),
        line: item.line,
        deprecated: record.deprecated,
        errors,
    })
}
