//! Section body parsers, one per recognized section shape.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

/// Version / deprecation markers excluded from prose-style checks.
pub const DIRECTIVE_MARKERS: &[&str] =
    &[".. versionadded::", ".. versionchanged::", ".. deprecated::"];

static RE_TYPE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][\w.]*$").unwrap());

/// Parse a section body into its typed entries.
pub fn parse_section(kind: SectionKind, body: &[String]) -> SectionBody {
    match kind {
        SectionKind::Parameters => SectionBody::Parameters(parse_parameters(body)),
        SectionKind::Returns | SectionKind::Yields => {
            SectionBody::Returns(parse_returns(body))
        }
        SectionKind::SeeAlso => SectionBody::SeeAlso(parse_see_also(body)),
        SectionKind::Examples => SectionBody::Examples(parse_examples(body)),
        _ => SectionBody::Raw(body.to_vec()),
    }
}

/// Parse Parameters entries: `name : type` lines with indented descriptions.
///
/// A colon without the canonical ` : ` separator still starts an entry:
/// the whole line becomes the name and the type stays empty, so the
/// mismatch surfaces through the signature cross-check. Leading blank
/// lines in the body are tolerated.
pub fn parse_parameters(body: &[String]) -> Vec<ParameterEntry> {
    let mut entries: Vec<ParameterEntry> = Vec::new();
    let mut pending: Vec<String> = Vec::new();

    for line in body {
        if line.trim().is_empty() {
            if !entries.is_empty() {
                pending.push(String::new());
            }
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            pending.push(line.clone());
            continue;
        }
        if let Some(entry) = entries.last_mut() {
            attach_description(entry, &pending);
            pending.clear();
        }
        entries.push(parse_entry_line(line.trim_end()));
    }
    if let Some(entry) = entries.last_mut() {
        attach_description(entry, &pending);
    }
    entries
}

fn parse_entry_line(line: &str) -> ParameterEntry {
    if let Some(pos) = line.find(" : ") {
        return ParameterEntry {
            name: line[..pos].trim_end().to_string(),
            type_name: Some(line[pos + 3..].trim().to_string()),
            description: Vec::new(),
            directives: Vec::new(),
        };
    }
    // `name:type` / `name:  type`: the whole line is taken as the name so
    // the mismatch against the signature stays visible downstream.
    ParameterEntry {
        name: line.to_string(),
        type_name: None,
        description: Vec::new(),
        directives: Vec::new(),
    }
}

/// Split an entry's indented lines into prose and trailing directive blocks.
fn attach_description(entry: &mut ParameterEntry, lines: &[String]) {
    let mut current: Option<DirectiveBlock> = None;
    for line in lines {
        let t = line.trim();
        if let Some(marker) = DIRECTIVE_MARKERS.iter().find(|m| t.starts_with(**m)) {
            if let Some(block) = current.take() {
                entry.directives.push(block);
            }
            let name = marker
                .trim_matches(|c| c == '.' || c == ':' || c == ' ')
                .to_string();
            let arg = t[marker.len()..].trim();
            let mut content = Vec::new();
            if !arg.is_empty() {
                content.push(arg.to_string());
            }
            current = Some(DirectiveBlock { name, content });
        } else if let Some(block) = current.as_mut() {
            if !t.is_empty() {
                block.content.push(t.to_string());
            }
        } else {
            entry.description.push(t.to_string());
        }
    }
    if let Some(block) = current.take() {
        entry.directives.push(block);
    }
    while entry.description.last().map(|l| l.is_empty()).unwrap_or(false) {
        entry.description.pop();
    }
}

/// Parse a Returns / Yields body.
///
/// Accepts `type`, `name : type` and bare free-text lines; a single
/// free-text line becomes a description-only entry, a single type token a
/// type-only entry. Neither shape is dropped.
pub fn parse_returns(body: &[String]) -> Vec<ReturnEntry> {
    let mut entries: Vec<ReturnEntry> = Vec::new();
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(entry) = entries.last_mut() {
                entry.description.push(line.trim().to_string());
            }
            continue;
        }
        let t = line.trim_end();
        if let Some(pos) = t.find(" : ") {
            entries.push(ReturnEntry {
                type_name: Some(t[pos + 3..].trim().to_string()),
                description: Vec::new(),
            });
        } else if RE_TYPE_TOKEN.is_match(t) {
            entries.push(ReturnEntry {
                type_name: Some(t.to_string()),
                description: Vec::new(),
            });
        } else {
            entries.push(ReturnEntry {
                type_name: None,
                description: vec![t.to_string()],
            });
        }
    }
    entries
}

/// Parse See Also entries: `name : description` or a bare name, with
/// indented continuation lines extending the description.
pub fn parse_see_also(body: &[String]) -> Vec<SeeAlsoEntry> {
    let mut entries: Vec<SeeAlsoEntry> = Vec::new();
    for line in body {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(' ') || line.starts_with('\t') {
            if let Some(entry) = entries.last_mut() {
                entry.description.push(line.trim().to_string());
            }
            continue;
        }
        let t = line.trim_end();
        if let Some(pos) = t.find(" : ") {
            entries.push(SeeAlsoEntry {
                name: t[..pos].to_string(),
                description: vec![t[pos + 3..].trim().to_string()],
            });
        } else {
            entries.push(SeeAlsoEntry {
                name: t.to_string(),
                description: Vec::new(),
            });
        }
    }
    entries
}

/// Segment an Examples body into prompt / output pairs.
///
/// Prompts are `>>> ` lines with `... ` continuations; output runs to the
/// next blank line. Narrative prose between examples is skipped. Nothing
/// is evaluated here.
pub fn parse_examples(body: &[String]) -> Vec<Example> {
    let mut examples: Vec<Example> = Vec::new();
    let mut i = 0;
    while i < body.len() {
        let t = body[i].trim();
        if let Some(first) = strip_prompt(t, ">>>") {
            let mut example = Example {
                prompt: vec![first.to_string()],
                output: Vec::new(),
            };
            i += 1;
            while i < body.len() {
                let t = body[i].trim();
                if let Some(cont) = strip_prompt(t, "...") {
                    example.prompt.push(cont.to_string());
                    i += 1;
                } else {
                    break;
                }
            }
            while i < body.len() {
                let t = body[i].trim();
                if t.is_empty() || t.starts_with(">>>") {
                    break;
                }
                example.output.push(t.to_string());
                i += 1;
            }
            examples.push(example);
        } else {
            i += 1;
        }
    }
    examples
}

fn strip_prompt<'a>(line: &'a str, prompt: &str) -> Option<&'a str> {
    if let Some(rest) = line.strip_prefix(prompt) {
        if rest.is_empty() {
            return Some(rest);
        }
        if let Some(rest) = rest.strip_prefix(' ') {
            return Some(rest);
        }
    }
    None
}
