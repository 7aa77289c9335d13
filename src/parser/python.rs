//! Python source scanner, a line-by-line state machine.
//!
//! Extracts documented objects from `.py` files without running an
//! interpreter: `def` / `class` headers with their indentation nesting,
//! the attached docstring (text plus delimiter layout), the signature
//! parameter list, and whether the body returns or yields a value.

use crate::model::*;
use regex::Regex;
use std::sync::LazyLock;

static RE_DEF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)def[ \t]+(\w+)[ \t]*\(").unwrap());

static RE_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)class[ \t]+(\w+)[ \t]*[:(]").unwrap());

static RE_RETURN_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*return[ \t]+\S").unwrap());

static RE_YIELD_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*yield[ \t]+\S").unwrap());

/// One level of def/class nesting during the scan.
struct Scope {
    indent: usize,
    name: String,
    kind: ItemKind,
}

/// Scan one source file into its documented items.
///
/// `module` is the dotted module path derived from the file location;
/// it prefixes every item path and names the module item itself.
pub fn parse(input: &str, module: &str, file: &str) -> Vec<SourceItem> {
    let lines: Vec<&str> = input.lines().collect();
    let mut items: Vec<SourceItem> = Vec::new();
    let mut stack: Vec<Scope> = Vec::new();

    // Module docstring: the first statement of the file, if it is a string.
    let mut module_doc = None;
    for (i, line) in lines.iter().enumerate() {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if t.starts_with("\"\"\"") || t.starts_with("'''") {
            module_doc = Some(read_docstring(&lines, i).0);
        }
        break;
    }
    items.push(SourceItem {
        path: module.to_string(),
        kind: ItemKind::Module,
        file: file.to_string(),
        line: 1,
        docstring: module_doc,
        signature: Vec::new(),
        returns_value: false,
        yields_value: false,
    });

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        let (indent, name, kind) = if let Some(caps) = RE_DEF.captures(line) {
            (caps[1].len(), caps[2].to_string(), ItemKind::Function)
        } else if let Some(caps) = RE_CLASS.captures(line) {
            (caps[1].len(), caps[2].to_string(), ItemKind::Class)
        } else {
            i += 1;
            continue;
        };

        stack.retain(|scope| scope.indent < indent);
        let in_class = matches!(stack.last(), Some(s) if s.kind == ItemKind::Class);

        let mut path = module.to_string();
        for scope in &stack {
            path.push('.');
            path.push_str(&scope.name);
        }
        path.push('.');
        path.push_str(&name);

        // A def header may spread its parameter list over several lines.
        let (header, header_end) = read_header(&lines, i);
        let signature = if kind == ItemKind::Function {
            parse_signature(&header, in_class)
        } else {
            Vec::new()
        };

        // Docstring: first statement of the block, if it is a string.
        let mut body_start = header_end + 1;
        let mut docstring = None;
        let mut j = header_end + 1;
        while j < lines.len() && lines[j].trim().is_empty() {
            j += 1;
        }
        if j < lines.len() && line_indent(lines[j]) > indent {
            let t = lines[j].trim_start();
            if t.starts_with("\"\"\"") || t.starts_with("'''") {
                let (doc, next) = read_docstring(&lines, j);
                docstring = Some(doc);
                body_start = next;
            }
        }

        let (returns_value, yields_value) = if kind == ItemKind::Function {
            scan_body(&lines, body_start, indent)
        } else {
            (false, false)
        };

        items.push(SourceItem {
            path,
            kind,
            file: file.to_string(),
            line: i + 1,
            docstring,
            signature,
            returns_value,
            yields_value,
        });

        stack.push(Scope { indent, name, kind });
        // Resume after the docstring so its prose is never scanned for
        // def/class headers.
        i = body_start.max(header_end + 1);
    }

    items
}

fn line_indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Join a def/class header until its parentheses balance and it ends in `:`.
fn read_header(lines: &[&str], start: usize) -> (String, usize) {
    let mut header = lines[start].to_string();
    let mut end = start;
    while paren_depth(&header) > 0 && end + 1 < lines.len() {
        end += 1;
        header.push(' ');
        header.push_str(lines[end].trim());
    }
    (header, end)
}

fn paren_depth(text: &str) -> i32 {
    let mut depth = 0;
    let mut quote: Option<char> = None;
    for c in text.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ => {}
        }
    }
    depth
}

/// Read a triple-quoted docstring starting at `start`.
///
/// Returns the raw docstring plus the index of the first line after it.
fn read_docstring(lines: &[&str], start: usize) -> (RawDocstring, usize) {
    let trimmed = lines[start].trim_start();
    let delim = if trimmed.starts_with("'''") { "'''" } else { "\"\"\"" };
    let rest = &trimmed[delim.len()..];

    // Single-line docstring: """text"""
    if let Some(pos) = rest.find(delim) {
        let text = &rest[..pos];
        let has_text = !text.trim().is_empty();
        let mut doc = RawDocstring {
            opens_with_text: has_text,
            closes_after_text: has_text,
            ..Default::default()
        };
        if has_text {
            doc.lines.push(text.to_string());
        }
        return (doc, start + 1);
    }

    let mut doc = RawDocstring::default();
    if !rest.trim().is_empty() {
        doc.opens_with_text = true;
        doc.lines.push(rest.to_string());
    }

    let mut i = start + 1;
    while i < lines.len() {
        if let Some(pos) = lines[i].find(delim) {
            let before = &lines[i][..pos];
            if !before.trim().is_empty() {
                doc.lines.push(before.to_string());
                doc.closes_after_text = true;
            } else {
                doc.blank_before_close = doc
                    .lines
                    .last()
                    .map(|l| l.trim().is_empty())
                    .unwrap_or(false);
            }
            i += 1;
            break;
        }
        doc.lines.push(lines[i].to_string());
        i += 1;
    }

    doc.first_line_blank = !doc.opens_with_text
        && doc.lines.first().map(|l| l.trim().is_empty()).unwrap_or(false);

    // Trailing blank lines carry no information once layout is captured.
    while doc.lines.last().map(|l| l.trim().is_empty()).unwrap_or(false) {
        doc.lines.pop();
    }

    (doc, i)
}

/// Extract signature parameters from a joined header line.
fn parse_signature(header: &str, in_class: bool) -> Vec<SignatureParameter> {
    let open = match header.find('(') {
        Some(pos) => pos,
        None => return Vec::new(),
    };
    let mut depth = 0;
    let mut close = header.len();
    for (idx, c) in header.char_indices().skip(open) {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    close = idx;
                    break;
                }
            }
            _ => {}
        }
    }

    let inner = &header[open + 1..close];
    let mut params = Vec::new();
    for (idx, piece) in split_top_level(inner).into_iter().enumerate() {
        // Drop default values and annotations; keep variadic stars.
        let piece = piece.split('=').next().unwrap_or("").trim();
        let piece = piece.split(':').next().unwrap_or("").trim();
        if piece.is_empty() || piece == "*" || piece == "/" {
            continue;
        }
        if idx == 0 && in_class && (piece == "self" || piece == "cls") {
            continue;
        }
        params.push(SignatureParameter {
            name: piece.to_string(),
            variadic: piece.starts_with('*'),
        });
    }
    params
}

/// Split on commas outside any bracket nesting or string literal.
fn split_top_level(text: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut depth = 0;
    let mut quote: Option<char> = None;
    let mut current = String::new();
    for c in text.chars() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            current.push(c);
            continue;
        }
        match c {
            '\'' | '"' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth -= 1;
                current.push(c);
            }
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if !current.trim().is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Scan a function body for value-carrying return / yield statements.
///
/// The block ends at the first non-blank, non-comment line whose indent
/// falls back to the header's level or less.
fn scan_body(lines: &[&str], start: usize, header_indent: usize) -> (bool, bool) {
    let mut returns = false;
    let mut yields = false;
    for line in &lines[start.min(lines.len())..] {
        let t = line.trim();
        if t.is_empty() || t.starts_with('#') {
            continue;
        }
        if line_indent(line) <= header_indent {
            break;
        }
        if RE_RETURN_VALUE.is_match(line) {
            returns = true;
        }
        if RE_YIELD_VALUE.is_match(line) {
            yields = true;
        }
    }
    (returns, yields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_module_and_function() {
        let input = "\"\"\"\nModule docs.\n\"\"\"\n\n\ndef head(n=5):\n    \"\"\"\n    Return the first elements.\n    \"\"\"\n    return n\n";
        let items = parse(input, "mylib", "mylib.py");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, "mylib");
        assert_eq!(items[0].kind, ItemKind::Module);
        assert_eq!(items[1].path, "mylib.head");
        assert_eq!(items[1].kind, ItemKind::Function);
        assert_eq!(items[1].line, 6);
        assert!(items[1].returns_value);
        assert!(!items[1].yields_value);
    }

    #[test]
    fn parse_method_path_and_self_dropped() {
        let input = "class Series:\n    def head(self, n=5):\n        \"\"\"\n        Return the first elements.\n        \"\"\"\n        return n\n";
        let items = parse(input, "mylib", "mylib.py");
        assert_eq!(items[2].path, "mylib.Series.head");
        let names: Vec<&str> = items[2].signature.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["n"]);
    }

    #[test]
    fn parse_variadic_signature() {
        let input = "def plot(kind, color='blue', **kwargs):\n    pass\n";
        let items = parse(input, "m", "m.py");
        let names: Vec<&str> = items[1].signature.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["kind", "color", "**kwargs"]);
        assert!(items[1].signature[2].variadic);
    }

    #[test]
    fn parse_multi_line_signature() {
        let input = "def f(a,\n      b=(1, 2),\n      *args):\n    return a\n";
        let items = parse(input, "m", "m.py");
        let names: Vec<&str> = items[1].signature.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "*args"]);
    }

    #[test]
    fn docstring_layout_flags() {
        let input = "def f():\n    \"\"\"Wrong line\"\"\"\n    pass\n";
        let items = parse(input, "m", "m.py");
        let doc = items[1].docstring.as_ref().unwrap();
        assert!(doc.opens_with_text);
        assert!(doc.closes_after_text);
    }

    #[test]
    fn docstring_first_line_blank() {
        let input = "def f():\n    \"\"\"\n\n    Late summary.\n    \"\"\"\n    pass\n";
        let items = parse(input, "m", "m.py");
        let doc = items[1].docstring.as_ref().unwrap();
        assert!(doc.first_line_blank);
        assert!(!doc.opens_with_text);
    }

    #[test]
    fn docstring_blank_line_before_close() {
        let input = "def f():\n    \"\"\"\n    Do nothing.\n\n    \"\"\"\n    pass\n";
        let items = parse(input, "m", "m.py");
        let doc = items[1].docstring.as_ref().unwrap();
        assert!(doc.blank_before_close);
        assert!(!doc.closes_after_text);
        assert_eq!(doc.lines, vec!["    Do nothing."]);
    }

    #[test]
    fn docstring_text_on_closing_line() {
        let input = "def f():\n    \"\"\"\n    Do nothing.\n    Ends here.\"\"\"\n    pass\n";
        let items = parse(input, "m", "m.py");
        let doc = items[1].docstring.as_ref().unwrap();
        assert!(doc.closes_after_text);
        assert!(!doc.blank_before_close);
    }

    #[test]
    fn bare_return_not_counted() {
        let input = "def f():\n    \"\"\"\n    Do nothing.\n    \"\"\"\n    return\n";
        let items = parse(input, "m", "m.py");
        assert!(!items[1].returns_value);
    }

    #[test]
    fn yield_detected() {
        let input = "def gen():\n    \"\"\"\n    Generate values.\n    \"\"\"\n    while True:\n        yield 1\n";
        let items = parse(input, "m", "m.py");
        assert!(items[1].yields_value);
    }

    #[test]
    fn class_body_returns_not_attributed_to_class() {
        let input = "class C:\n    \"\"\"\n    Collect things.\n    \"\"\"\n\n    def get(self):\n        return 1\n";
        let items = parse(input, "m", "m.py");
        assert_eq!(items[1].kind, ItemKind::Class);
        assert!(!items[1].returns_value);
        assert!(items[2].returns_value);
    }

    #[test]
    fn docstring_drops_method_scope_correctly() {
        let input = "class A:\n    def f(self):\n        return 1\n\n    def g(self):\n        return 2\n\nclass B:\n    def h(self):\n        return 3\n";
        let items = parse(input, "m", "m.py");
        let paths: Vec<&str> = items.iter().map(|it| it.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["m", "m.A", "m.A.f", "m.A.g", "m.B", "m.B.h"]
        );
    }
}
