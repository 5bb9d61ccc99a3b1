//! Part projections over an element's text.
//!
//! `def`, `body`, `signature`, `decorators`, `comments`, and `doc` slice the
//! element's content. Curly-brace languages get real brace matching with a
//! string- and comment-aware scanner; indentation-sensitive languages use
//! the header colon plus a minimum-indent dedent. A projection undefined
//! for an element comes back empty.

use super::parser::PathPart;
use crate::features::registry::LanguageFlavor;
use crate::shared::models::Element;

pub fn extract_part(element: &Element, part: PathPart, flavor: LanguageFlavor) -> String {
    let content = element.content.as_str();
    match part {
        PathPart::All => content.to_string(),
        PathPart::Decorators => leading_lines(content, |t| t.starts_with('@')),
        PathPart::Comments => leading_lines(content, |t| {
            t.starts_with('#') || t.starts_with("//") || t.starts_with("/*") || t.starts_with('*')
        }),
        PathPart::Def if has_definition_shape(element) => definition(content, flavor),
        PathPart::Body if has_definition_shape(element) => body(content, flavor),
        PathPart::Signature if has_definition_shape(element) => signature(content, flavor),
        PathPart::Doc if has_definition_shape(element) => match flavor {
            LanguageFlavor::Indentation => docstring(content),
            LanguageFlavor::CurlyBrace => String::new(),
        },
        // Projection undefined for this kind.
        PathPart::Def | PathPart::Body | PathPart::Signature | PathPart::Doc => String::new(),
    }
}

/// Kinds with a header and a body, where `def`/`body`/`signature`/`doc`
/// make sense.
fn has_definition_shape(element: &Element) -> bool {
    use crate::shared::models::ElementKind;
    element.kind.is_callable()
        || element.kind.is_class_like()
        || matches!(
            element.kind,
            ElementKind::Namespace | ElementKind::Enum | ElementKind::Module
        )
}

/// Line index of the first line that is not a decorator, comment, or blank.
fn header_line_index(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| {
            let t = line.trim_start();
            !(t.is_empty()
                || t.starts_with('@')
                || t.starts_with('#')
                || t.starts_with("//")
                || t.starts_with("/*")
                || t.starts_with('*'))
        })
        .unwrap_or(0)
}

/// Leading decorator/comment lines before the header, dedented.
fn leading_lines(content: &str, matches: fn(&str) -> bool) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let header = header_line_index(&lines);
    let selected: Vec<&str> = lines[..header]
        .iter()
        .copied()
        .filter(|line| matches(line.trim_start()))
        .collect();
    if selected.is_empty() {
        String::new()
    } else {
        dedent(&selected)
    }
}

fn definition(content: &str, flavor: LanguageFlavor) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let header = header_line_index(&lines);
    match flavor {
        LanguageFlavor::Indentation => lines[header..].join("\n"),
        LanguageFlavor::CurlyBrace => {
            let start = line_byte_offset(content, header);
            match find_body_brace(content, start).and_then(|open| {
                find_matching_brace(content, open).map(|close| (start, close))
            }) {
                Some((start, close)) => content[start..=close].to_string(),
                None => lines[header..].join("\n"),
            }
        }
    }
}

fn signature(content: &str, flavor: LanguageFlavor) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let header = header_line_index(&lines);
    let start = line_byte_offset(content, header);
    match flavor {
        LanguageFlavor::Indentation => match find_header_colon(content, start) {
            Some(colon) => content[start..=colon].trim().to_string(),
            None => lines.get(header).map(|l| l.trim().to_string()).unwrap_or_default(),
        },
        LanguageFlavor::CurlyBrace => match find_body_brace(content, start) {
            Some(open) => content[start..open].trim().to_string(),
            None => lines.get(header).map(|l| l.trim().to_string()).unwrap_or_default(),
        },
    }
}

fn body(content: &str, flavor: LanguageFlavor) -> String {
    match flavor {
        LanguageFlavor::Indentation => {
            let lines: Vec<&str> = content.split('\n').collect();
            let header = header_line_index(&lines);
            let start = line_byte_offset(content, header);
            let Some(colon) = find_header_colon(content, start) else {
                return String::new();
            };
            let rest_of_line = content[colon + 1..]
                .split('\n')
                .next()
                .unwrap_or("")
                .trim();
            if !rest_of_line.is_empty() {
                return rest_of_line.to_string();
            }
            let colon_line = content[..colon].matches('\n').count();
            let body_lines: Vec<&str> = lines[colon_line + 1..].to_vec();
            if body_lines.is_empty() {
                return String::new();
            }
            dedent(&body_lines).trim_end().to_string()
        }
        LanguageFlavor::CurlyBrace => {
            let lines: Vec<&str> = content.split('\n').collect();
            let header = header_line_index(&lines);
            let start = line_byte_offset(content, header);
            let Some(open) = find_body_brace(content, start) else {
                return String::new();
            };
            let Some(close) = find_matching_brace(content, open) else {
                return String::new();
            };
            let inner = &content[open + 1..close];
            let trimmed: Vec<&str> = inner
                .split('\n')
                .collect::<Vec<_>>()
                .into_iter()
                .skip_while(|l| l.trim().is_empty())
                .collect();
            let trimmed: Vec<&str> = trimmed
                .into_iter()
                .rev()
                .skip_while(|l| l.trim().is_empty())
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            if trimmed.is_empty() {
                return String::new();
            }
            dedent(&trimmed).trim().to_string()
        }
    }
}

/// Docstring right after the header colon: a triple-quoted literal.
fn docstring(content: &str) -> String {
    let lines: Vec<&str> = content.split('\n').collect();
    let header = header_line_index(&lines);
    let start = line_byte_offset(content, header);
    let Some(colon) = find_header_colon(content, start) else {
        return String::new();
    };
    let after = content[colon + 1..].trim_start();
    for delim in ["\"\"\"", "'''"] {
        if let Some(rest) = after.strip_prefix(delim) {
            if let Some(end) = rest.find(delim) {
                return rest[..end].trim().to_string();
            }
        }
    }
    String::new()
}

/// Byte offset of the start of a 0-based line.
fn line_byte_offset(content: &str, line: usize) -> usize {
    if line == 0 {
        return 0;
    }
    content
        .char_indices()
        .filter(|(_, c)| *c == '\n')
        .nth(line - 1)
        .map(|(i, _)| i + 1)
        .unwrap_or(content.len())
}

/// First `:` at bracket depth zero outside strings and comments, scanning
/// from `from`. This is the colon that closes an indentation-language
/// header.
fn find_header_colon(content: &str, from: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth: i32 = 0;
    let mut string_delim: Option<u8> = None;
    let mut in_comment = false;
    let mut escaped = false;
    for i in from..bytes.len() {
        let b = bytes[i];
        if let Some(delim) = string_delim {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                string_delim = None;
            }
            continue;
        }
        if in_comment {
            if b == b'\n' {
                in_comment = false;
            }
            continue;
        }
        match b {
            b'#' => in_comment = true,
            b'\'' | b'"' => string_delim = Some(b),
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth -= 1,
            b':' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// First `{` outside parens, brackets, strings, and comments: the body
/// delimiter of a curly-brace definition.
fn find_body_brace(content: &str, from: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth: i32 = 0;
    let mut string_delim: Option<u8> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut escaped = false;
    for i in from..bytes.len() {
        let b = bytes[i];
        if let Some(delim) = string_delim {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                string_delim = None;
            }
            continue;
        }
        if in_line_comment {
            if b == b'\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            if b == b'/' && i > 0 && bytes[i - 1] == b'*' {
                in_block_comment = false;
            }
            continue;
        }
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => in_line_comment = true,
            b'/' if bytes.get(i + 1) == Some(&b'*') => in_block_comment = true,
            b'\'' | b'"' | b'`' => string_delim = Some(b),
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            b'{' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Index of the `}` matching the `{` at `open`.
fn find_matching_brace(content: &str, open: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth: i32 = 0;
    let mut string_delim: Option<u8> = None;
    let mut in_line_comment = false;
    let mut in_block_comment = false;
    let mut escaped = false;
    for i in open..bytes.len() {
        let b = bytes[i];
        if let Some(delim) = string_delim {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == delim {
                string_delim = None;
            }
            continue;
        }
        if in_line_comment {
            if b == b'\n' {
                in_line_comment = false;
            }
            continue;
        }
        if in_block_comment {
            if b == b'/' && i > 0 && bytes[i - 1] == b'*' {
                in_block_comment = false;
            }
            continue;
        }
        match b {
            b'/' if bytes.get(i + 1) == Some(&b'/') => in_line_comment = true,
            b'/' if bytes.get(i + 1) == Some(&b'*') => in_block_comment = true,
            b'\'' | b'"' | b'`' => string_delim = Some(b),
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Strip the minimum leading-whitespace prefix common to non-blank lines.
fn dedent(lines: &[&str]) -> String {
    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);
    lines
        .iter()
        .map(|l| if l.len() >= min_indent { &l[min_indent..] } else { "" })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::ElementKind;

    fn getter() -> Element {
        Element::new(
            ElementKind::PropertyGetter,
            "v",
            "    @property\n    def v(self):\n        return self._v",
        )
    }

    #[test]
    fn test_python_body_dedents() {
        let body = extract_part(&getter(), PathPart::Body, LanguageFlavor::Indentation);
        assert_eq!(body, "return self._v");
    }

    #[test]
    fn test_python_single_line_body() {
        let element = Element::new(
            ElementKind::PropertyGetter,
            "v",
            "    @property\n    def v(self): return self._v",
        );
        let body = extract_part(&element, PathPart::Body, LanguageFlavor::Indentation);
        assert_eq!(body, "return self._v");
    }

    #[test]
    fn test_python_def_skips_decorators() {
        let def = extract_part(&getter(), PathPart::Def, LanguageFlavor::Indentation);
        assert_eq!(def, "    def v(self):\n        return self._v");
    }

    #[test]
    fn test_python_signature_and_decorators() {
        let signature = extract_part(&getter(), PathPart::Signature, LanguageFlavor::Indentation);
        assert_eq!(signature, "def v(self):");
        let decorators =
            extract_part(&getter(), PathPart::Decorators, LanguageFlavor::Indentation);
        assert_eq!(decorators, "@property");
    }

    #[test]
    fn test_python_signature_with_annotated_params() {
        let element = Element::new(
            ElementKind::Function,
            "f",
            "def f(x: int, y: dict[str, int]) -> int:\n    return x",
        );
        let signature = extract_part(&element, PathPart::Signature, LanguageFlavor::Indentation);
        assert_eq!(signature, "def f(x: int, y: dict[str, int]) -> int:");
        let body = extract_part(&element, PathPart::Body, LanguageFlavor::Indentation);
        assert_eq!(body, "return x");
    }

    #[test]
    fn test_python_docstring() {
        let element = Element::new(
            ElementKind::Function,
            "f",
            "def f():\n    \"\"\"Does things.\"\"\"\n    return 1",
        );
        let doc = extract_part(&element, PathPart::Doc, LanguageFlavor::Indentation);
        assert_eq!(doc, "Does things.");
    }

    #[test]
    fn test_curly_body_brace_matching() {
        let element = Element::new(
            ElementKind::Method,
            "area",
            "@memo\narea(): number {\n    if (x) { return 1; }\n    return 0;\n}",
        );
        let body = extract_part(&element, PathPart::Body, LanguageFlavor::CurlyBrace);
        assert_eq!(body, "if (x) { return 1; }\nreturn 0;");
        let def = extract_part(&element, PathPart::Def, LanguageFlavor::CurlyBrace);
        assert!(def.starts_with("area(): number {"));
        assert!(def.ends_with('}'));
        let signature = extract_part(&element, PathPart::Signature, LanguageFlavor::CurlyBrace);
        assert_eq!(signature, "area(): number");
    }

    #[test]
    fn test_curly_braces_inside_strings_ignored() {
        let element = Element::new(
            ElementKind::Function,
            "f",
            "function f() {\n    return \"{ not a brace }\";\n}",
        );
        let body = extract_part(&element, PathPart::Body, LanguageFlavor::CurlyBrace);
        assert_eq!(body, "return \"{ not a brace }\";");
    }

    #[test]
    fn test_undefined_projection_is_empty() {
        let field = Element::new(ElementKind::StaticField, "N", "    N = 2");
        let body = extract_part(&field, PathPart::Body, LanguageFlavor::Indentation);
        assert_eq!(body, "");
        let doc = extract_part(&field, PathPart::Doc, LanguageFlavor::CurlyBrace);
        assert_eq!(doc, "");
    }
}
