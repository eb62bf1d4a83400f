//! TOML adapter (Cargo.toml, pyproject.toml)
//!
//! Writes patch the addressed string in place so comments, ordering and
//! formatting of the rest of the file survive. The in-place path covers
//! top-level pairs, `[table]` sections, dotted keys and inline tables holding
//! a single-line string. Anything else (missing key, non-string value, value
//! that would need escaping) falls back to re-serializing the document.

use std::ops::Range;

use tracing::{debug, warn};

use crate::field;
use crate::format::traits::{FormatAdapter, FormatError, Locator, ensure_trailing_newline};
use crate::format::types::FileFormat;

pub struct TomlAdapter;

impl FormatAdapter for TomlAdapter {
    fn format(&self) -> FileFormat {
        FileFormat::Toml
    }

    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Toml)?;
        let tree = parse_document(content)?;
        Ok(field::get_scalar(&tree, address)?)
    }

    fn write(
        &self,
        content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Toml)?;
        let mut tree = parse_document(content)?;

        if let Some(patched) = patch_in_place(content, address, new_value)? {
            let verified = parse_document(&patched)
                .ok()
                .and_then(|tree| field::get_scalar(&tree, address).ok())
                .is_some_and(|value| value == new_value);
            if verified {
                return Ok(ensure_trailing_newline(patched));
            }
            debug!("In-place TOML patch of '{}' did not verify", address);
        }

        field::set(&mut tree, address, new_value)?;
        Ok(ensure_trailing_newline(toml::to_string(&tree)?))
    }
}

fn parse_document(content: &str) -> Result<toml::Value, FormatError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(toml::Value::Table(table))
}

/// Splice `new_value` into the string at `address`, or `None` if the value
/// cannot be patched in place
fn patch_in_place(
    content: &str,
    address: &str,
    new_value: &str,
) -> Result<Option<String>, FormatError> {
    if new_value.contains(['"', '\'', '\\', '\n', '\r']) {
        return Ok(None);
    }

    let target: Vec<&str> = address.split('.').collect();
    let Some(span) = locate_string(content, &target)? else {
        return Ok(None);
    };

    let mut patched = String::with_capacity(content.len() + new_value.len());
    patched.push_str(&content[..span.start]);
    patched.push_str(new_value);
    patched.push_str(&content[span.end..]);
    Ok(Some(patched))
}

/// Byte range of the contents (between the quotes) of the single-line string
/// stored at `target`
fn locate_string(content: &str, target: &[&str]) -> Result<Option<Range<usize>>, FormatError> {
    let mut parser = tree_sitter::Parser::new();
    let language = tree_sitter_toml_ng::LANGUAGE;
    parser.set_language(&language.into()).map_err(|e| {
        warn!("Failed to set TOML language for tree-sitter: {}", e);
        FormatError::TreeSitter(e.to_string())
    })?;

    let tree = parser.parse(content, None).ok_or_else(|| {
        warn!("Failed to parse TOML content");
        FormatError::TreeSitter("Failed to parse TOML".to_string())
    })?;

    let Some(value) = find_value(tree.root_node(), content, target) else {
        return Ok(None);
    };
    if value.kind() != "string" {
        return Ok(None);
    }

    let range = value.byte_range();
    let text = &content[range.clone()];
    let single_line = !(text.starts_with("\"\"\"") || text.starts_with("'''"));
    let quoted = text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')));

    if single_line && quoted {
        Ok(Some(range.start + 1..range.end - 1))
    } else {
        Ok(None)
    }
}

/// Find the value node for `target` among top-level pairs and `[table]` sections
fn find_value<'t>(
    root: tree_sitter::Node<'t>,
    content: &str,
    target: &[&str],
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = root.walk();

    for child in root.children(&mut cursor) {
        match child.kind() {
            "pair" => {
                if let Some(value) = match_pair(child, content, &[], target) {
                    return Some(value);
                }
            }
            "table" => {
                let Some(prefix) = table_name(child, content) else {
                    continue;
                };
                if !is_prefix(&prefix, target) {
                    continue;
                }

                let mut table_cursor = child.walk();
                for pair in child.children(&mut table_cursor) {
                    if pair.kind() != "pair" {
                        continue;
                    }
                    if let Some(value) = match_pair(pair, content, &prefix, target) {
                        return Some(value);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// Match one `key = value` pair, descending into inline tables
fn match_pair<'t>(
    pair: tree_sitter::Node<'t>,
    content: &str,
    prefix: &[String],
    target: &[&str],
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = pair.walk();
    let mut key: Option<tree_sitter::Node<'t>> = None;
    let mut value: Option<tree_sitter::Node<'t>> = None;

    for child in pair.children(&mut cursor) {
        if key.is_none() && is_key(child.kind()) {
            key = Some(child);
        } else if child.is_named() && child.kind() != "comment" {
            value = Some(child);
        }
    }

    let (key, value) = (key?, value?);
    let mut path = prefix.to_vec();
    key_segments(key, content, &mut path);

    if path.len() == target.len() && is_prefix(&path, target) {
        return Some(value);
    }

    if value.kind() == "inline_table" && is_prefix(&path, target) {
        let mut inline_cursor = value.walk();
        for inner in value.children(&mut inline_cursor) {
            if inner.kind() != "pair" {
                continue;
            }
            if let Some(found) = match_pair(inner, content, &path, target) {
                return Some(found);
            }
        }
    }

    None
}

/// Name of a `[table]` header as key segments
fn table_name(table: tree_sitter::Node, content: &str) -> Option<Vec<String>> {
    let header = table.child(0)?;
    if header.kind() != "[" {
        return None;
    }

    let mut cursor = table.walk();
    for child in table.children(&mut cursor) {
        if is_key(child.kind()) {
            let mut segments = Vec::new();
            key_segments(child, content, &mut segments);
            return Some(segments);
        }
    }

    None
}

fn is_key(kind: &str) -> bool {
    matches!(kind, "bare_key" | "quoted_key" | "dotted_key")
}

/// Flatten a (possibly dotted, possibly quoted) key into its segments
fn key_segments(node: tree_sitter::Node, content: &str, segments: &mut Vec<String>) {
    match node.kind() {
        "bare_key" => segments.push(content[node.byte_range()].trim().to_string()),
        "quoted_key" => {
            let text = content[node.byte_range()].trim();
            let unquoted = text
                .strip_prefix(['"', '\''])
                .and_then(|t| t.strip_suffix(['"', '\'']))
                .unwrap_or(text);
            segments.push(unquoted.to_string());
        }
        "dotted_key" => {
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                if is_key(child.kind()) {
                    key_segments(child, content, segments);
                }
            }
        }
        _ => {}
    }
}

fn is_prefix(prefix: &[String], target: &[&str]) -> bool {
    prefix.len() <= target.len() && prefix.iter().zip(target).all(|(a, b)| a == b)
}
