//! Rule catalog: independent predicate+message checks over a record.
//!
//! Every rule is a plain function `(record, vocabulary) -> findings`.
//! The catalog is a fixed ordered list; all rules run on every record and
//! their findings concatenate. Nothing short-circuits, so a parameter can
//! collect a missing-type and a bad-spacing finding at the same time.

pub mod params;
pub mod returns;
pub mod summary;

use crate::model::DocstringRecord;
use serde::Serialize;

/// One reported rule violation. Pure value; never mutates the record.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule: &'static str,
    pub message: String,
    /// Parameter name or similar hint, when the rule targets one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl Finding {
    pub fn new(rule: &'static str, message: impl Into<String>) -> Finding {
        Finding {
            rule,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(rule: &'static str, message: impl Into<String>, location: impl Into<String>) -> Finding {
        Finding {
            rule,
            message: message.into(),
            location: Some(location.into()),
        }
    }
}

/// Fixed-vocabulary lookup tables used by individual rules.
///
/// Kept as data so the recognized corpus is testable and extensible
/// without touching rule logic.
pub struct Vocabulary {
    /// Infinitive verb stems; the mood rule fires when a summary starts
    /// with `<stem>s`.
    pub infinitive_verbs: &'static [&'static str],
    /// Banned type tokens and their canonical spellings.
    pub type_aliases: &'static [(&'static str, &'static str)],
}

impl Default for Vocabulary {
    fn default() -> Vocabulary {
        Vocabulary {
            infinitive_verbs: INFINITIVE_VERBS,
            type_aliases: TYPE_ALIASES,
        }
    }
}

static INFINITIVE_VERBS: &[&str] = &[
    "append", "apply", "build", "cast", "check", "compute", "convert",
    "create", "describe", "drop", "ensure", "exist", "extend", "fill",
    "filter", "generate", "get", "give", "group", "hold", "insert",
    "iterate", "list", "load", "make", "map", "merge", "parse", "plot",
    "provide", "read", "remove", "render", "return", "sample", "select",
    "set", "sort", "specify", "split", "transform", "update", "use",
    "validate", "write", "yield",
];

static TYPE_ALIASES: &[(&str, &str)] = &[
    ("integer", "int"),
    ("string", "str"),
    ("boolean", "bool"),
];

type Rule = fn(&DocstringRecord, &Vocabulary) -> Vec<Finding>;

/// The catalog, in the fixed order findings are reported.
pub fn catalog() -> &'static [(&'static str, Rule)] {
    &[
        ("summary-placement", summary::placement),
        ("closing-quotes", summary::closing_quotes),
        ("no-summary", summary::no_summary),
        ("summary-period", summary::punctuation),
        ("summary-capital", summary::capitalization),
        ("summary-mood", summary::mood),
        ("summary-single-line", summary::single_line),
        ("params-coverage", params::coverage),
        ("param-type-missing", params::missing_type),
        ("param-desc-period", params::description_punctuation),
        ("param-desc-capital", params::description_capitalization),
        ("param-type-token", params::type_tokens),
        ("returns-missing", returns::returns_section),
        ("yields-missing", returns::yields_section),
    ]
}

/// Run every rule over one record and concatenate the findings.
pub fn run_all(record: &DocstringRecord, vocab: &Vocabulary) -> Vec<Finding> {
    let mut findings = Vec::new();
    for (_, rule) in catalog() {
        findings.extend(rule(record, vocab));
    }
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemKind, RawDocstring, SourceItem};
    use crate::parser::docstring;

    pub(crate) fn record_from(docstring_text: &str) -> DocstringRecord {
        record_with_signature(docstring_text, &[])
    }

    pub(crate) fn record_with_signature(
        docstring_text: &str,
        params: &[&str],
    ) -> DocstringRecord {
        let item = SourceItem {
            path: "m.f".to_string(),
            kind: ItemKind::Function,
            file: "m.py".to_string(),
            line: 1,
            docstring: Some(RawDocstring {
                lines: docstring_text.lines().map(|l| l.to_string()).collect(),
                ..Default::default()
            }),
            signature: params
                .iter()
                .map(|p| crate::model::SignatureParameter {
                    name: p.to_string(),
                    variadic: p.starts_with('*'),
                })
                .collect(),
            returns_value: false,
            yields_value: false,
        };
        docstring::build(&item)
    }

    #[test]
    fn well_formed_docstring_passes_every_rule() {
        let record = record_with_signature(
            "    Generate a plot.\n\n    Render the data as a plot of the\n    specified kind.\n\n    Parameters\n    ----------\n    kind : str\n        Kind of matplotlib plot.\n    **kwargs\n        These parameters will be passed along.",
            &["kind", "**kwargs"],
        );
        let findings = run_all(&record, &Vocabulary::default());
        assert!(findings.is_empty(), "unexpected findings: {findings:?}");
    }

    #[test]
    fn rules_fire_independently() {
        // A perfect summary with a missing Returns section must produce
        // exactly the returns finding and nothing else.
        let mut record = record_from("    Generate a value.");
        record.returns_value = true;
        let findings = run_all(&record, &Vocabulary::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].message, "No Returns section found");
    }

    #[test]
    fn run_all_is_idempotent() {
        let record = record_from("    generate a plot");
        let first = run_all(&record, &Vocabulary::default());
        let second = run_all(&record, &Vocabulary::default());
        let first_msgs: Vec<&str> = first.iter().map(|f| f.message.as_str()).collect();
        let second_msgs: Vec<&str> = second.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(first_msgs, second_msgs);
    }

    #[test]
    fn kwargs_and_type_token_scenario() {
        let record = record_with_signature(
            "    Generate a plot.\n\n    Parameters\n    ----------\n    kind : integer\n        Foo bar baz.",
            &["kind", "**kwargs"],
        );
        let findings = run_all(&record, &Vocabulary::default());
        let msgs: Vec<&str> = findings.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            msgs,
            vec![
                "Parameters {**kwargs} not documented",
                "Parameter \"kind\" type should use \"int\" instead of \"integer\"",
            ]
        );
    }
}
