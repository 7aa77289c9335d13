//! Outline traversal: enumerate the public surface from an RST outline.
//!
//! Small explicit state machine: the current module, section and
//! subsection carry forward until a new header of that level appears.
//! Sections are dash-underlined, subsections tilde-underlined, and item
//! lists follow an `.. autosummary::` directive.

use crate::checks::Finding;
use crate::model::SourceItem;
use crate::registry::Registry;
use regex::Regex;
use std::sync::LazyLock;

static RE_CURRENTMODULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.\s+currentmodule::\s+(\S+)").unwrap());

static RE_AUTOSUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.\.\s+autosummary::").unwrap());

/// One listed object, with the outline position it was declared under.
#[derive(Debug)]
pub struct ApiItem<'a> {
    /// Fully qualified name, `module.listed_name`.
    pub name: String,
    pub item: &'a SourceItem,
    pub section: String,
    pub subsection: String,
}

/// Everything one pass over an outline produces.
#[derive(Debug, Default)]
pub struct OutlineScan<'a> {
    /// Items in document order.
    pub items: Vec<ApiItem<'a>>,
    /// Outline-level problems: unresolvable names, malformed headers,
    /// names listed before any module context. One bad entry never aborts
    /// the traversal.
    pub findings: Vec<Finding>,
}

/// Walk an outline document, resolving each listed name against the
/// registry under the most recent `.. currentmodule::` context.
pub fn get_api_items<'a>(registry: &'a Registry, input: &str) -> OutlineScan<'a> {
    let lines: Vec<&str> = input.lines().collect();
    let mut scan = OutlineScan::default();

    let mut module: Option<String> = None;
    let mut section = String::new();
    let mut subsection = String::new();
    let mut in_list = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim_end();

        if let Some(caps) = RE_CURRENTMODULE.captures(trimmed) {
            module = Some(caps[1].to_string());
            in_list = false;
            i += 1;
            continue;
        }
        if RE_AUTOSUMMARY.is_match(trimmed) {
            in_list = true;
            i += 1;
            continue;
        }
        // Headers reset the list state and the context below their level.
        if let Some(title) = header_at(&lines, i, '-') {
            section = title;
            subsection.clear();
            in_list = false;
            i += 2;
            continue;
        }
        if let Some(title) = header_at(&lines, i, '~') {
            subsection = title;
            in_list = false;
            i += 2;
            continue;
        }
        // A mismatched underline would silently leave items under a stale
        // section, so it is reported instead of skipped.
        if let Some(title) = malformed_header_at(&lines, i) {
            let message = format!(
                "Outline line {}: header '{title}' underline length does not match",
                i + 1
            );
            scan.findings.push(Finding::at("outline-header", message, title));
            in_list = false;
            i += 2;
            continue;
        }

        if in_list {
            if trimmed.is_empty() {
                i += 1;
                continue;
            }
            if !line.starts_with(' ') && !line.starts_with('\t') {
                in_list = false;
                continue;
            }
            let listed = trimmed.trim();
            match &module {
                Some(module) => {
                    let full = format!("{module}.{listed}");
                    match registry.get(&full) {
                        Some(item) => scan.items.push(ApiItem {
                            name: full,
                            item,
                            section: section.clone(),
                            subsection: subsection.clone(),
                        }),
                        None => scan.findings.push(Finding::at(
                            "outline-resolve",
                            format!("Outline line {}: cannot resolve '{full}'", i + 1),
                            full,
                        )),
                    }
                }
                None => scan.findings.push(Finding::at(
                    "outline-resolve",
                    format!("Outline line {}: '{listed}' listed before any currentmodule", i + 1),
                    listed,
                )),
            }
        }
        i += 1;
    }

    scan
}

/// A title whose dash or tilde underline has the wrong length.
fn malformed_header_at(lines: &[&str], idx: usize) -> Option<String> {
    let title = lines.get(idx)?.trim_end();
    if title.is_empty() || title.starts_with(' ') || title.starts_with("..") {
        return None;
    }
    let underline = lines.get(idx + 1)?.trim_end();
    if underline.is_empty() || underline.len() == title.len() {
        return None;
    }
    let all = |m: char| underline.chars().all(|c| c == m);
    if all('-') || all('~') {
        Some(title.to_string())
    } else {
        None
    }
}

/// A header is a non-blank line underlined by `marker` characters of the
/// same length on the next line.
fn header_at(lines: &[&str], idx: usize, marker: char) -> Option<String> {
    let title = lines.get(idx)?.trim_end();
    if title.is_empty() || title.starts_with(' ') || title.starts_with("..") {
        return None;
    }
    let underline = lines.get(idx + 1)?.trim_end();
    if !underline.is_empty()
        && underline.len() == title.len()
        && underline.chars().all(|c| c == marker)
    {
        Some(title.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTLINE: &str = "\n.. currentmodule:: itertools\n\nItertools\n---------\n\nInfinite\n~~~~~~~~\n\n.. autosummary::\n\n    cycle\n    count\n\nFinite\n~~~~~~\n\n.. autosummary::\n\n    chain\n\n.. currentmodule:: random\n\nRandom\n------\n\nAll\n~~~\n\n.. autosummary::\n\n    seed\n    randint\n";

    fn registry() -> Registry {
        let mut registry = Registry::default();
        registry.add_file(
            "def cycle():\n    \"\"\"\n    Cycle forever.\n    \"\"\"\n    pass\n\n\ndef count():\n    \"\"\"\n    Count up.\n    \"\"\"\n    pass\n\n\ndef chain():\n    \"\"\"\n    Chain iterables.\n    \"\"\"\n    pass\n",
            "itertools",
            "itertools.py",
        );
        registry.add_file(
            "def seed():\n    \"\"\"\n    Seed the generator.\n    \"\"\"\n    pass\n\n\ndef randint():\n    \"\"\"\n    Draw an integer.\n    \"\"\"\n    pass\n",
            "random",
            "random.py",
        );
        registry
    }

    #[test]
    fn five_names_in_document_order() {
        let registry = registry();
        let scan = get_api_items(&registry, OUTLINE);
        assert!(scan.findings.is_empty(), "unexpected: {:?}", scan.findings);
        let names: Vec<&str> = scan.items.iter().map(|it| it.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "itertools.cycle",
                "itertools.count",
                "itertools.chain",
                "random.seed",
                "random.randint",
            ]
        );
    }

    #[test]
    fn sections_and_subsections_carry_forward() {
        let registry = registry();
        let scan = get_api_items(&registry, OUTLINE);
        let positions: Vec<(&str, &str)> = scan
            .items
            .iter()
            .map(|it| (it.section.as_str(), it.subsection.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![
                ("Itertools", "Infinite"),
                ("Itertools", "Infinite"),
                ("Itertools", "Finite"),
                ("Random", "All"),
                ("Random", "All"),
            ]
        );
    }

    #[test]
    fn resolved_items_point_into_registry() {
        let registry = registry();
        let scan = get_api_items(&registry, OUTLINE);
        assert_eq!(scan.items[0].item.path, "itertools.cycle");
        assert_eq!(scan.items[0].item.file, "itertools.py");
    }

    #[test]
    fn unresolvable_name_is_a_finding_not_an_error() {
        let registry = registry();
        let outline = ".. currentmodule:: itertools\n\n.. autosummary::\n\n    cycle\n    missing\n    count\n";
        let scan = get_api_items(&registry, outline);
        assert_eq!(scan.items.len(), 2);
        assert_eq!(scan.findings.len(), 1);
        assert!(scan.findings[0].message.contains("itertools.missing"));
    }

    #[test]
    fn mismatched_underline_is_a_finding() {
        let registry = registry();
        let outline =
            ".. currentmodule:: itertools\n\nItertools\n------\n\n.. autosummary::\n\n    cycle\n";
        let scan = get_api_items(&registry, outline);
        assert_eq!(scan.findings.len(), 1);
        assert!(scan.findings[0].message.contains("'Itertools'"));
        assert!(scan.findings[0].message.contains("underline length"));
        // The listed name still resolves, under no section.
        assert_eq!(scan.items.len(), 1);
        assert_eq!(scan.items[0].name, "itertools.cycle");
        assert!(scan.items[0].section.is_empty());
    }

    #[test]
    fn name_before_module_context_is_a_finding() {
        let registry = registry();
        let outline = ".. autosummary::\n\n    cycle\n";
        let scan = get_api_items(&registry, outline);
        assert!(scan.items.is_empty());
        assert_eq!(scan.findings.len(), 1);
    }

    #[test]
    fn traversal_is_restartable() {
        let registry = registry();
        let first = get_api_items(&registry, OUTLINE).items.len();
        let second = get_api_items(&registry, OUTLINE).items.len();
        assert_eq!(first, 5);
        assert_eq!(second, 5);
    }
}
