//! Source Extractor
//!
//! Recovers a unit's definition from the source file embedded with it and
//! turns it into display text. Nothing here affects execution: the parameter
//! reordering applied for display mirrors what a trial does at call time.

use regex::Regex;
use thiserror::Error;

use crate::engine::Permutation;
use crate::unit::CodeUnit;

#[derive(Debug, Error, PartialEq)]
pub enum SourceError {
    #[error("could not find a definition of `{name}` in {path}")]
    DefinitionNotFound { name: String, path: String },

    #[error("definition of `{name}` in {path} has unbalanced braces")]
    Unbalanced { name: String, path: String },

    #[error("failed to extract arguments from function definition:\n{source_text}")]
    Parameters { source_text: String },

    #[error("`{name}` declares {found} parameters but the permutation has {expected}")]
    ParameterMismatch { name: String, expected: usize, found: usize },
}

/// A definition as written in its file, attached comments and attributes included
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// 1-based line of the first attached line
    pub line: usize,
    /// 1-based line of the `fn` header
    pub header_line: usize,
    /// Byte offset of the header's line within `text`
    pub header_offset: usize,
    pub text: String,
}

impl Definition {
    /// Comments and attributes attached above the header
    pub fn attached(&self) -> &str {
        &self.text[..self.header_offset]
    }

    /// The definition from its `fn` header onwards
    pub fn from_header(&self) -> &str {
        self.text[self.header_offset..].trim()
    }
}

fn header_regex(name: &str) -> Regex {
    let pattern = format!(
        r"(?m)^[ \t]*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?fn\s+{}\s*[<(]",
        regex::escape(name)
    );
    Regex::new(&pattern).expect("escaped identifier always forms a valid pattern")
}

/// Full definition of `unit`: attached lines, header and brace-balanced body
pub fn definition(unit: &CodeUnit) -> Result<Definition, SourceError> {
    let file = unit.source();
    let text = file.text();
    let not_found = || SourceError::DefinitionNotFound {
        name: unit.name().to_string(),
        path: file.path().to_string(),
    };

    let header = header_regex(unit.name()).find(text).ok_or_else(not_found)?;
    let end = body_end(text, header.start()).ok_or_else(|| SourceError::Unbalanced {
        name: unit.name().to_string(),
        path: file.path().to_string(),
    })?;

    let start = attached_start(text, header.start());
    let line = text[..start].matches('\n').count() + 1;
    let header_line = text[..header.start()].matches('\n').count() + 1;
    Ok(Definition {
        line,
        header_line,
        header_offset: header.start() - start,
        text: text[start..end].to_string(),
    })
}

/// Offset of the first doc comment, attribute or comment line directly above `header`
fn attached_start(text: &str, header: usize) -> usize {
    let mut start = header;
    for line in text[..header].lines().rev() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with("#[") {
            start -= line.len() + 1;
        } else {
            break;
        }
    }
    start
}

/// Byte offset just past the closing brace of the body that starts after `from`
fn body_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut opened = false;
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            b'"' => i = skip_string(bytes, i + 1, 0),
            b'r' if is_raw_string_start(bytes, i) => {
                let mut hashes = 0;
                let mut j = i + 1;
                while bytes.get(j) == Some(&b'#') {
                    hashes += 1;
                    j += 1;
                }
                i = skip_string(bytes, j + 1, hashes);
            }
            b'\'' => i = skip_char_literal(bytes, i),
            b'{' => {
                depth += 1;
                opened = true;
            }
            b'}' => {
                depth = depth.checked_sub(1)?;
                if opened && depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

fn is_raw_string_start(bytes: &[u8], i: usize) -> bool {
    let preceded_by_ident = i > 0 && (bytes[i - 1].is_ascii_alphanumeric() || bytes[i - 1] == b'_');
    if preceded_by_ident {
        return false;
    }
    let mut j = i + 1;
    while bytes.get(j) == Some(&b'#') {
        j += 1;
    }
    bytes.get(j) == Some(&b'"')
}

/// Index of the closing quote of a string whose contents start at `i`
fn skip_string(bytes: &[u8], mut i: usize, hashes: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if hashes == 0 => i += 1,
            b'"' => {
                let closes = (1..=hashes).all(|k| bytes.get(i + k) == Some(&b'#'));
                if closes {
                    return i + hashes;
                }
            }
            _ => {}
        }
        i += 1;
    }
    i
}

/// Skip a char literal starting at `i`; lifetimes are left alone
fn skip_char_literal(bytes: &[u8], i: usize) -> usize {
    match (bytes.get(i + 1), bytes.get(i + 2)) {
        (Some(b'\\'), _) => {
            let mut j = i + 2;
            while j < bytes.len() && bytes[j] != b'\'' {
                j += 1;
            }
            j
        }
        (Some(_), Some(b'\'')) => i + 2,
        // multi-byte chars such as '→'
        _ => multibyte_char_end(bytes, i).unwrap_or(i),
    }
}

fn multibyte_char_end(bytes: &[u8], i: usize) -> Option<usize> {
    let first = *bytes.get(i + 1)?;
    let width = match first {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    (bytes.get(i + 1 + width) == Some(&b'\'')).then_some(i + 1 + width)
}

/// Doc comment attached to the unit's definition, markers stripped
pub fn doc_comment(unit: &CodeUnit) -> String {
    let Ok(def) = definition(unit) else {
        return String::new();
    };
    def.attached()
        .lines()
        .map(str::trim_start)
        .filter_map(|line| line.strip_prefix("///"))
        .map(|line| line.strip_prefix(' ').unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display source of `unit`, starting at its definition header.
///
/// With a non-identity permutation the displayed parameter list is reordered
/// the same way a trial reorders arguments.
pub fn extract_source(unit: &CodeUnit, permutation: Option<&Permutation>) -> Result<String, SourceError> {
    let def = definition(unit)?;
    let source = def.from_header();

    match permutation {
        Some(p) if p.len() > 1 && !p.is_identity() => permute_parameters(unit.name(), source, p),
        _ => Ok(source.to_string()),
    }
}

fn permute_parameters(name: &str, source: &str, permutation: &Permutation) -> Result<String, SourceError> {
    let pattern = Regex::new(&format!(r"(?s)^((?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?fn\s+{}\s*(?:<[^>]*>)?)\((.+?)\)(.*)$", regex::escape(name)))
        .expect("escaped identifier always forms a valid pattern");
    let caps = pattern.captures(source).ok_or_else(|| SourceError::Parameters {
        source_text: source.to_string(),
    })?;

    let splitter = Regex::new(r"\s*,\s*").expect("static pattern");
    let params: Vec<&str> = splitter
        .split(caps[2].trim())
        .filter(|p| !p.is_empty())
        .collect();
    if params.len() != permutation.len() {
        return Err(SourceError::ParameterMismatch {
            name: name.to_string(),
            expected: permutation.len(),
            found: params.len(),
        });
    }

    Ok(format!(
        "{}({}){}",
        &caps[1],
        permutation.apply(&params).join(", "),
        &caps[3]
    ))
}
