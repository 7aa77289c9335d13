//! Returns / Yields rules: a value-producing body needs its section.
//!
//! These rules apply to function items only; a class source block
//! contains its methods' return statements, which say nothing about the
//! class docstring itself.

use crate::checks::{Finding, Vocabulary};
use crate::model::{DocstringRecord, ItemKind, SectionKind};

pub fn returns_section(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.kind == ItemKind::Function
        && record.returns_value
        && record.section(SectionKind::Returns).is_none()
    {
        vec![Finding::new("returns-missing", "No Returns section found")]
    } else {
        Vec::new()
    }
}

pub fn yields_section(record: &DocstringRecord, _vocab: &Vocabulary) -> Vec<Finding> {
    if record.kind == ItemKind::Function
        && record.yields_value
        && record.section(SectionKind::Yields).is_none()
    {
        vec![Finding::new("yields-missing", "No Yields section found")]
    } else {
        Vec::new()
    }
}
