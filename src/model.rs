//! Data model for scanned source items and parsed docstrings.

use serde::Serialize;

/// Kind of object a dotted import path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Module,
    Class,
    Function,
}

/// One documented object discovered by the source scanner.
#[derive(Debug, Clone)]
pub struct SourceItem {
    /// Fully qualified dotted path, e.g. `mylib.Series.head`.
    pub path: String,
    pub kind: ItemKind,
    pub file: String,
    /// 1-based line of the `def` / `class` statement (1 for modules).
    pub line: usize,
    pub docstring: Option<RawDocstring>,
    /// Signature parameters in declaration order (`self` / `cls` dropped).
    pub signature: Vec<SignatureParameter>,
    /// Body contains a `return <expr>` statement.
    pub returns_value: bool,
    /// Body contains a `yield <expr>` statement.
    pub yields_value: bool,
}

/// Raw docstring text plus delimiter layout captured at scan time.
#[derive(Debug, Clone, Default)]
pub struct RawDocstring {
    /// Inner text, one entry per physical line, original indentation kept.
    pub lines: Vec<String>,
    /// Text follows the opening triple quote on the same line.
    pub opens_with_text: bool,
    /// First body line after the opening quotes is blank.
    pub first_line_blank: bool,
    /// Blank line immediately before the closing quotes.
    pub blank_before_close: bool,
    /// Closing quotes share a line with docstring text.
    pub closes_after_text: bool,
}

/// A parameter taken from the callable's signature, not the docstring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParameter {
    /// Name as rendered in messages: variadics keep their stars (`**kwargs`).
    pub name: String,
    pub variadic: bool,
}

/// Structured view of one docstring, derived once at parse time.
#[derive(Debug, Clone)]
pub struct DocstringRecord {
    pub path: String,
    pub kind: ItemKind,
    /// Dedented docstring text.
    pub raw: String,
    /// First paragraph joined into one string (empty if no text).
    pub summary: String,
    /// Physical lines spanned by the summary paragraph.
    pub summary_lines: usize,
    pub opens_with_text: bool,
    pub first_line_blank: bool,
    pub blank_before_close: bool,
    pub closes_after_text: bool,
    /// Prose between the summary and the first section header.
    pub extended: String,
    pub sections: Vec<Section>,
    pub examples: Vec<Example>,
    pub deprecated: bool,
    pub signature: Vec<SignatureParameter>,
    pub returns_value: bool,
    pub yields_value: bool,
}

impl DocstringRecord {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn parameters(&self) -> &[ParameterEntry] {
        match self.section(SectionKind::Parameters).map(|s| &s.body) {
            Some(SectionBody::Parameters(entries)) => entries,
            _ => &[],
        }
    }
}

/// Recognized dash-underlined section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SectionKind {
    Parameters,
    Returns,
    Yields,
    Raises,
    SeeAlso,
    Examples,
    Notes,
    References,
}

impl SectionKind {
    pub fn from_header(name: &str) -> Option<SectionKind> {
        match name {
            "Parameters" => Some(SectionKind::Parameters),
            "Returns" => Some(SectionKind::Returns),
            "Yields" => Some(SectionKind::Yields),
            "Raises" => Some(SectionKind::Raises),
            "See Also" => Some(SectionKind::SeeAlso),
            "Examples" => Some(SectionKind::Examples),
            "Notes" => Some(SectionKind::Notes),
            "References" => Some(SectionKind::References),
            _ => None,
        }
    }
}

/// One named section with its parsed body.
#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

#[derive(Debug, Clone)]
pub enum SectionBody {
    Parameters(Vec<ParameterEntry>),
    Returns(Vec<ReturnEntry>),
    SeeAlso(Vec<SeeAlsoEntry>),
    Examples(Vec<Example>),
    /// Sections without structured entries keep their raw lines.
    Raw(Vec<String>),
}

/// One documented parameter from a Parameters section.
#[derive(Debug, Clone)]
pub struct ParameterEntry {
    pub name: String,
    /// None when the entry line carries no ` : type` part.
    pub type_name: Option<String>,
    /// Prose description lines, directives excluded.
    pub description: Vec<String>,
    /// Trailing version / deprecation markers.
    pub directives: Vec<DirectiveBlock>,
}

/// A `.. versionadded::` / `.. versionchanged::` / `.. deprecated::` block.
#[derive(Debug, Clone)]
pub struct DirectiveBlock {
    /// Marker name without dots or colons, e.g. `versionadded`.
    pub name: String,
    /// Argument on the marker line plus indented continuation lines.
    pub content: Vec<String>,
}

/// One entry from a Returns or Yields section.
#[derive(Debug, Clone)]
pub struct ReturnEntry {
    pub type_name: Option<String>,
    pub description: Vec<String>,
}

impl ReturnEntry {
    pub fn is_type_only(&self) -> bool {
        self.type_name.is_some() && self.description.is_empty()
    }

    pub fn is_description_only(&self) -> bool {
        self.type_name.is_none() && !self.description.is_empty()
    }
}

/// One entry from a See Also section.
#[derive(Debug, Clone)]
pub struct SeeAlsoEntry {
    pub name: String,
    pub description: Vec<String>,
}

/// One interactive example: prompt block plus its output lines.
#[derive(Debug, Clone)]
pub struct Example {
    /// `>>> ` line and its `... ` continuations, prefixes stripped.
    pub prompt: Vec<String>,
    pub output: Vec<String>,
}

/// Everything `validate_one` reports for a single object.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub path: String,
    pub kind: ItemKind,
    pub file: String,
    pub line: usize,
    pub deprecated: bool,
    pub errors: Vec<crate::checks::Finding>,
}
