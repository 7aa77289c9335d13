//! Docstring model: raw text plus signature into a structured record.
//!
//! All derived fields (summary, extended description, sections, examples)
//! are computed here once; rules only ever read the finished record.

use crate::model::*;
use crate::parser::sections;

/// Build the structured record for one scanned item.
pub fn build(item: &SourceItem) -> DocstringRecord {
    let doc = item.docstring.clone().unwrap_or_default();
    let lines = dedent(&doc);

    let mut summary_block: Vec<&str> = Vec::new();
    let mut idx = 0;
    while idx < lines.len() && lines[idx].trim().is_empty() {
        idx += 1;
    }
    while idx < lines.len()
        && !lines[idx].trim().is_empty()
        && !is_section_header(&lines, idx)
    {
        summary_block.push(lines[idx].trim());
        idx += 1;
    }
    let summary = summary_block.join(" ");
    let summary_lines = summary_block.len();

    // Extended description runs to the first section header.
    let mut extended_lines: Vec<&str> = Vec::new();
    while idx < lines.len() && !is_section_header(&lines, idx) {
        extended_lines.push(lines[idx].trim_end());
        idx += 1;
    }
    while extended_lines.first().map(|l| l.is_empty()).unwrap_or(false) {
        extended_lines.remove(0);
    }
    while extended_lines.last().map(|l| l.is_empty()).unwrap_or(false) {
        extended_lines.pop();
    }
    let extended = extended_lines.join("\n");

    let mut parsed_sections: Vec<Section> = Vec::new();
    while idx < lines.len() {
        if let Some(kind) = header_kind(&lines, idx) {
            let body_start = idx + 2;
            let mut body_end = body_start;
            while body_end < lines.len() && !is_section_header(&lines, body_end) {
                body_end += 1;
            }
            let body: Vec<String> =
                lines[body_start..body_end].iter().map(|l| l.to_string()).collect();
            parsed_sections.push(Section {
                kind,
                body: sections::parse_section(kind, &body),
            });
            idx = body_end;
        } else {
            idx += 1;
        }
    }

    let examples = parsed_sections
        .iter()
        .find_map(|s| match &s.body {
            SectionBody::Examples(ex) if s.kind == SectionKind::Examples => Some(ex.clone()),
            _ => None,
        })
        .unwrap_or_default();

    let deprecated = extended.contains(".. deprecated::");

    DocstringRecord {
        path: item.path.clone(),
        kind: item.kind,
        raw: lines.join("\n"),
        summary,
        summary_lines,
        opens_with_text: doc.opens_with_text,
        first_line_blank: doc.first_line_blank,
        blank_before_close: doc.blank_before_close,
        closes_after_text: doc.closes_after_text,
        extended,
        sections: parsed_sections,
        examples,
        deprecated,
        signature: item.signature.clone(),
        returns_value: item.returns_value,
        yields_value: item.yields_value,
    }
}

/// Strip the common leading indentation from the docstring body.
///
/// The line sharing the opening quotes (if any) carries no indentation of
/// its own and is only trimmed.
fn dedent(doc: &RawDocstring) -> Vec<String> {
    let skip_first = if doc.opens_with_text { 1 } else { 0 };
    let common = doc
        .lines
        .iter()
        .skip(skip_first)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    doc.lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if i < skip_first {
                line.trim().to_string()
            } else if line.len() >= common {
                line[common..].trim_end().to_string()
            } else {
                line.trim_end().to_string()
            }
        })
        .collect()
}

fn is_section_header(lines: &[String], idx: usize) -> bool {
    header_kind(lines, idx).is_some()
}

/// A header is a recognized section name underlined by dashes of the
/// same length on the following line.
fn header_kind(lines: &[String], idx: usize) -> Option<SectionKind> {
    let name = lines.get(idx)?.trim_end();
    let kind = SectionKind::from_header(name)?;
    let underline = lines.get(idx + 1)?.trim_end();
    if !underline.is_empty()
        && underline.len() == name.len()
        && underline.chars().all(|c| c == '-')
    {
        Some(kind)
    } else {
        None
    }
}
