//! Parameter rules: coverage against the signature, types, descriptions.

use crate::checks::{Finding, Vocabulary};
use crate::model::{DocstringRecord, ParameterEntry};

/// Cross-check documented entries against the signature, both directions.
///
/// Variadic parameters keep their stars in the message (`**kwargs`), and a
/// bad-spacing entry surfaces under its whole-line name, so the mismatch is
/// visible exactly as written in the docstring.
pub fn coverage(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.signature.is_empty() && record.parameters().is_empty() {
        return Vec::new();
    }
    let documented: Vec<&str> = record.parameters().iter().map(|e| e.name.as_str()).collect();
    let declared: Vec<&str> = record.signature.iter().map(|p| p.name.as_str()).collect();

    let mut findings = Vec::new();
    let missing: Vec<&str> = declared
        .iter()
        .filter(|name| !documented.contains(name))
        .copied()
        .collect();
    if !missing.is_empty() {
        findings.push(Finding::new(
            "params-coverage",
            format!("Parameters {{{}}} not documented", missing.join(", ")),
        ));
    }
    let unknown: Vec<&str> = documented
        .iter()
        .filter(|name| !declared.contains(name))
        .copied()
        .collect();
    if !unknown.is_empty() {
        findings.push(Finding::new(
            "params-coverage",
            format!("Unknown parameters {{{}}}", unknown.join(", ")),
        ));
    }
    findings
}

/// Every entry needs a type, except variadics: `**kwargs` documents
/// pass-through arguments and carries none by convention.
pub fn missing_type(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    record
        .parameters()
        .iter()
        .filter(|e| !e.name.starts_with('*'))
        .filter(|e| e.type_name.as_deref().map(str::is_empty).unwrap_or(true))
        .map(|e| {
            Finding::at(
                "param-type-missing",
                format!("Parameter \"{}\" has no type", e.name),
                &e.name,
            )
        })
        .collect()
}

/// The description must finish with a period. Directive blocks trail the
/// prose and are excluded: the check reads the last prose line only.
pub fn description_punctuation(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    record
        .parameters()
        .iter()
        .filter_map(|e| {
            let last = last_prose_line(e)?;
            if last.ends_with('.') {
                None
            } else {
                Some(Finding::at(
                    "param-desc-period",
                    format!("Parameter \"{}\" description should finish with \".\"", e.name),
                    &e.name,
                ))
            }
        })
        .collect()
}

pub fn description_capitalization(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    record
        .parameters()
        .iter()
        .filter_map(|e| {
            let first = e.description.iter().find(|l| !l.is_empty())?;
            if first.chars().next()?.is_lowercase() {
                Some(Finding::at(
                    "param-desc-capital",
                    format!(
                        "Parameter \"{}\" description should start with a capital letter",
                        e.name
                    ),
                    &e.name,
                ))
            } else {
                None
            }
        })
        .collect()
}

/// Banned type spellings, one finding per token in appearance order;
/// compound types like `list of boolean, integer or string` report each.
pub fn type_tokens(record: &DocstringRecord, vocab: &Vocabulary) -> Vec<Finding> {
    let mut findings = Vec::new();
    for entry in record.parameters() {
        let declared = match entry.type_name.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => continue,
        };
        for token in declared.split(|c: char| !c.is_alphanumeric() && c != '_') {
            if let Some((banned, canonical)) =
                vocab.type_aliases.iter().find(|(banned, _)| *banned == token)
            {
                findings.push(Finding::at(
                    "param-type-token",
                    format!(
                        "Parameter \"{}\" type should use \"{}\" instead of \"{}\"",
                        entry.name, canonical, banned
                    ),
                    &entry.name,
                ));
            }
        }
    }
    findings
}

fn last_prose_line(entry: &ParameterEntry) -> Option<&str> {
    entry
        .description
        .iter()
        .rev()
        .find(|l| !l.is_empty())
        .map(|l| l.as_str())
}
