//! Line-oriented frontmatter parsing for SKILL.md files.
//!
//! A skill file opens with a `---` delimiter line, carries a block of
//! `key: value` entries, and closes with a second `---` line; everything
//! after that is the markdown body. The block is parsed as a deliberately
//! narrow subset of YAML: scalar entries at the top level, plus exactly one
//! level of nesting (a flat mapping or a list) under the `metadata` key.
//! No anchors, no multi-line scalars, no general recursion.

use indexmap::IndexMap;
use skillcheck_core::errors::ParseError;
use skillcheck_core::types::{Frontmatter, FrontmatterValue};

/// A SKILL.md file split into its two halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Ordered frontmatter entries from the delimited block.
    pub frontmatter: Frontmatter,
    /// Markdown body: everything after the closing delimiter line.
    pub body: String,
}

/// One raw line of the input, tracked with enough position data to slice
/// the body out of the original text without re-joining lines.
struct RawLine<'a> {
    /// 1-based line number in the file.
    number: usize,
    /// Line content without its `\n` or `\r\n` terminator.
    content: &'a str,
    /// Byte offset just past this line's terminator.
    end: usize,
}

/// Parse the frontmatter block of `text` and slice off the body.
///
/// Pure function over the file content. Errors carry the 1-based file line
/// number of the offending line where one exists.
pub fn parse_document(text: &str) -> Result<ParsedDocument, ParseError> {
    let lines = split_lines(text);

    match lines.first() {
        Some(first) if first.content == "---" => {}
        _ => return Err(ParseError::MissingOpeningDelimiter),
    }

    let Some(close) = lines.iter().skip(1).position(|line| line.content == "---") else {
        return Err(ParseError::UnterminatedBlock);
    };
    let close = close + 1;

    let frontmatter = parse_block(&lines[1..close])?;
    let body = text[lines[close].end..].to_string();

    Ok(ParsedDocument { frontmatter, body })
}

/// Parse the lines between the delimiters into an ordered mapping.
fn parse_block(lines: &[RawLine<'_>]) -> Result<Frontmatter, ParseError> {
    let mut entries: IndexMap<String, FrontmatterValue> = IndexMap::new();

    // Children of an open `metadata:` entry are collected here until the
    // next top-level line closes the block.
    let mut metadata_open = false;
    let mut metadata_indent: Option<usize> = None;
    let mut metadata_map: IndexMap<String, String> = IndexMap::new();
    let mut metadata_list: Vec<String> = Vec::new();

    for line in lines {
        if line.content.trim().is_empty() {
            continue;
        }
        let indent = indent_width(line.content);

        if indent == 0 {
            if metadata_open {
                flush_metadata(&mut entries, &mut metadata_map, &mut metadata_list);
                metadata_open = false;
                metadata_indent = None;
            }
            let (key, value) = split_entry(line)?;
            if key == "metadata" && value.is_empty() {
                metadata_open = true;
            } else {
                // Duplicate keys keep the last value.
                let scalar = FrontmatterValue::Scalar(unquote(value).to_string());
                let _ = entries.insert(key.to_string(), scalar);
            }
            continue;
        }

        if !metadata_open {
            return Err(ParseError::UnexpectedIndent { line: line.number });
        }
        match metadata_indent {
            None => metadata_indent = Some(indent),
            Some(expected) if indent != expected => {
                return Err(ParseError::InvalidMetadataEntry { line: line.number });
            }
            Some(_) => {}
        }

        let item = line.content.trim();
        if item == "-" || item.starts_with("- ") {
            if !metadata_map.is_empty() {
                return Err(ParseError::InvalidMetadataEntry { line: line.number });
            }
            let value = item.strip_prefix('-').unwrap_or(item).trim();
            metadata_list.push(unquote(value).to_string());
        } else {
            if !metadata_list.is_empty() {
                return Err(ParseError::InvalidMetadataEntry { line: line.number });
            }
            let Some((key, value)) = split_child(item) else {
                return Err(ParseError::InvalidMetadataEntry { line: line.number });
            };
            let _ = metadata_map.insert(key.to_string(), unquote(value).to_string());
        }
    }

    if metadata_open {
        flush_metadata(&mut entries, &mut metadata_map, &mut metadata_list);
    }

    Ok(Frontmatter::from_entries(entries))
}

/// Store a completed metadata block, draining the collectors.
fn flush_metadata(
    entries: &mut IndexMap<String, FrontmatterValue>,
    map: &mut IndexMap<String, String>,
    list: &mut Vec<String>,
) {
    let value = if list.is_empty() {
        FrontmatterValue::Map(std::mem::take(map))
    } else {
        FrontmatterValue::List(std::mem::take(list))
    };
    let _ = entries.insert("metadata".to_string(), value);
}

/// Split a top-level `key: value` line at its first colon.
///
/// The key must be non-empty and free of whitespace; the value may contain
/// further colons (`description: Use when: reviewing pages` keeps
/// everything after the first colon).
fn split_entry<'a>(line: &RawLine<'a>) -> Result<(&'a str, &'a str), ParseError> {
    let content = line.content.trim_end();
    let Some(colon) = content.find(':') else {
        return Err(ParseError::InvalidEntry { line: line.number });
    };
    let key = content[..colon].trim();
    let value = content[colon + 1..].trim();
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return Err(ParseError::InvalidEntry { line: line.number });
    }
    Ok((key, value))
}

/// Split an indented metadata child at its first colon.
fn split_child(item: &str) -> Option<(&str, &str)> {
    let colon = item.find(':')?;
    let key = item[..colon].trim();
    let value = item[colon + 1..].trim();
    if key.is_empty() || key.chars().any(char::is_whitespace) {
        return None;
    }
    Some((key, value))
}

/// Strip one matching pair of surrounding quotes, if present.
fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Split `text` into lines, keeping 1-based numbers and byte offsets.
///
/// Handles both `\n` and `\r\n` terminators; a final line without a
/// terminator is still yielded.
fn split_lines(text: &str) -> Vec<RawLine<'_>> {
    let mut lines = Vec::new();
    let mut offset = 0;
    for (index, piece) in text.split_inclusive('\n').enumerate() {
        offset += piece.len();
        let content = piece.strip_suffix('\n').unwrap_or(piece);
        let content = content.strip_suffix('\r').unwrap_or(content);
        lines.push(RawLine { number: index + 1, content, end: offset });
    }
    lines
}

/// Width of a line's leading whitespace, in characters.
fn indent_width(content: &str) -> usize {
    content.chars().take_while(|c| c.is_whitespace()).count()
}

// ─────────────────────────────────────────────────────────────────────────────
