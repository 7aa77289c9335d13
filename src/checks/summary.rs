//! Summary rules: placement, punctuation, capitalization, mood, length.
//!
//! Message text is an observable contract; downstream tooling greps it.

use crate::checks::{Finding, Vocabulary};
use crate::model::DocstringRecord;

const PLACEMENT: &str = "Docstring text (summary) should start in the line immediately \
     after the opening quotes (not in the same line, or leaving a blank line in between)";

const CLOSING: &str = "Closing quotes should be placed in the line after the last text \
     in the docstring (do not close the quotes in the same line as the text, or leave a \
     blank line between the last text and the quotes)";

const NO_SUMMARY: &str = "No summary found (a short summary in a single line should be \
     present at the beginning of the docstring)";

pub fn placement(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.opens_with_text || record.first_line_blank {
        vec![Finding::new("summary-placement", PLACEMENT)]
    } else {
        Vec::new()
    }
}

pub fn closing_quotes(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.closes_after_text || record.blank_before_close {
        vec![Finding::new("closing-quotes", CLOSING)]
    } else {
        Vec::new()
    }
}

pub fn no_summary(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.summary.is_empty() {
        vec![Finding::new("no-summary", NO_SUMMARY)]
    } else {
        Vec::new()
    }
}

pub fn punctuation(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if !record.summary.is_empty() && !record.summary.ends_with('.') {
        vec![Finding::new(
            "summary-period",
            "Summary does not end with a period",
        )]
    } else {
        Vec::new()
    }
}

pub fn capitalization(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.summary.chars().next().map(|c| c.is_lowercase()).unwrap_or(false) {
        vec![Finding::new(
            "summary-capital",
            "Summary does not start with a capital letter",
        )]
    } else {
        Vec::new()
    }
}

/// Third-person heuristic: the first word ends in `s` and its stem is a
/// known infinitive. Prose starting with a noun ("Axis ...") never trips.
pub fn mood(record: &DocstringRecord, vocab: &Vocabulary) -> Vec<Finding> {
    let first = match record.summary.split_whitespace().next() {
        Some(word) => word,
        None => return Vec::new(),
    };
    let lowered = first.to_lowercase();
    if let Some(stem) = lowered.strip_suffix('s') {
        if vocab.infinitive_verbs.contains(&stem) {
            return vec![Finding::new(
                "summary-mood",
                "Summary must start with infinitive verb, not third person \
                 (e.g. use \"Generate\" instead of \"Generates\")",
            )];
        }
    }
    Vec::new()
}

pub fn single_line(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.summary_lines > 1 {
        vec![Finding::new(
            "summary-single-line",
            "Summary should fit in a single line.",
        )]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::tests::record_from;
    use crate::checks::Vocabulary;

    fn messages(findings: Vec<Finding>) -> Vec<String> {
        findings.into_iter().map(|f| f.message).collect()
    }

    #[test]
    fn summary_on_opening_line_flagged() {
        let mut record = record_from("Exists on the wrong line");
        record.opens_with_text = true;
        record.closes_after_text = true;
        let vocab = Vocabulary::default();
        let msgs = messages(placement(&record, &vocab));
        assert_eq!(msgs.len(), 1);
        assert!(msgs[0].contains("should start in the line immediately after the opening quotes"));
        assert_eq!(closing_quotes(&record, &vocab).len(), 1);
    }

    #[test]
    fn blank_first_line_flagged() {
        let mut record = record_from("    Late summary.");
        record.first_line_blank = true;
        assert_eq!(placement(&record, &Vocabulary::default()).len(), 1);
    }

    #[test]
    fn missing_period() {
        let record = record_from("    Has the right line but forgets punctuation");
        let msgs = messages(punctuation(&record, &Vocabulary::default()));
        assert_eq!(msgs, vec!["Summary does not end with a period"]);
    }

    #[test]
    fn lowercase_summary() {
        let record = record_from("    provides a lowercase summary.");
        let vocab = Vocabulary::default();
        let msgs = messages(capitalization(&record, &vocab));
        assert_eq!(msgs, vec!["Summary does not start with a capital letter"]);
        // Third person of a known verb fires the mood rule as well.
        let msgs = messages(mood(&record, &vocab));
        assert!(msgs[0].contains("Summary must start with infinitive verb"));
    }

    #[test]
    fn third_person_verb() {
        let record = record_from("    Casts Series type.");
        let msgs = messages(mood(&record, &Vocabulary::default()));
        assert_eq!(msgs.len(), 1);
    }

    #[test]
    fn noun_ending_in_s_not_flagged() {
        let record = record_from("    Axis labels for the object.");
        assert!(mood(&record, &Vocabulary::default()).is_empty());
    }

    #[test]
    fn multi_line_summary() {
        let record = record_from("    Extends beyond one line\n    which is not correct.");
        let msgs = messages(single_line(&record, &Vocabulary::default()));
        assert_eq!(msgs, vec!["Summary should fit in a single line."]);
    }

    #[test]
    fn two_paragraph_multi_line_summary() {
        let record = record_from(
            "    Extends beyond one line\n    which is not correct.\n\n    A second paragraph does not\n    excuse the first.",
        );
        assert_eq!(single_line(&record, &Vocabulary::default()).len(), 1);
    }

    #[test]
    fn empty_docstring_only_reports_missing_summary() {
        let record = record_from("");
        let vocab = Vocabulary::default();
        assert_eq!(no_summary(&record, &vocab).len(), 1);
        assert!(placement(&record, &vocab).is_empty());
        assert!(punctuation(&record, &vocab).is_empty());
    }
}
