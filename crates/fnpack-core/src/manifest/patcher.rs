//! Text-level insertion and removal of function blocks.
//!
//! The manifest is never re-serialized: only the lines of the affected block
//! change, so comments, anchors, ordering and formatting elsewhere survive.
//!
//! Block rule: a function block starts at its `<name>:` key line (indentation
//! M) and ends at the first later line that is neither blank nor a comment and
//! is indented M or less, or at end of document. Blank lines and comments
//! indented M or less that sit right before that boundary belong to what
//! follows, not to the block.

use serde_yaml::{Mapping, Value};

use super::ManifestEditor;
use super::defaults::FunctionEntry;
use super::document::ManifestDocument;
use crate::error::FnpackError;

const FUNCTIONS_KEY: &str = "functions:";
const BLOCK_INDENT: &str = "  ";
const COMMENT_MARKER: &str = "# ";
const HANDLER_KEY: &str = "handler:";

/// Line-heuristic manifest editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinePatcher;

impl LinePatcher {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestEditor for LinePatcher {
    fn insert_function(
        &self,
        document: &ManifestDocument,
        name: &str,
        entry: &FunctionEntry,
    ) -> Result<ManifestDocument, FnpackError> {
        let block = render_inert_block(name, entry)?;
        let lines = document.lines();

        let mut patched = Vec::with_capacity(lines.len() + block.len() + 1);
        match find_functions_key(lines)? {
            Some(index) => {
                patched.extend_from_slice(&lines[..=index]);
                patched.extend(block);
                patched.extend_from_slice(&lines[index + 1..]);
            }
            None => {
                patched.extend_from_slice(lines);
                patched.push(FUNCTIONS_KEY.to_string());
                patched.extend(block);
            }
        }

        Ok(ManifestDocument::from_lines(patched))
    }

    fn remove_function(
        &self,
        document: &ManifestDocument,
        name: &str,
    ) -> Result<ManifestDocument, FnpackError> {
        let lines = document.lines();
        let (start, end) = find_block(lines, name)?;

        let mut patched = Vec::with_capacity(lines.len() - (end - start));
        patched.extend_from_slice(&lines[..start]);
        patched.extend_from_slice(&lines[end..]);

        Ok(ManifestDocument::from_lines(patched))
    }
}

/// Serialize `{ name: entry }` and comment out everything except the key and
/// handler lines, shifted one level deeper to sit under `functions:`.
pub fn render_inert_block(name: &str, entry: &FunctionEntry) -> Result<Vec<String>, FnpackError> {
    let mut root = Mapping::new();
    root.insert(Value::String(name.to_string()), serde_yaml::to_value(entry)?);
    let text = serde_yaml::to_string(&root)?;

    let block = text
        .trim_end_matches('\n')
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            // The serializer always emits the function key first.
            let is_key_line = index == 0;
            if is_key_line || is_handler_line(line) || line.trim().is_empty() {
                format!("{}{}", BLOCK_INDENT, line)
            } else {
                let indent = indentation(line);
                format!(
                    "{}{}{}{}",
                    BLOCK_INDENT,
                    &line[..indent],
                    COMMENT_MARKER,
                    &line[indent..]
                )
            }
        })
        .collect();

    Ok(block)
}

/// `handler:` directly under the function key.
fn is_handler_line(line: &str) -> bool {
    line.strip_prefix(BLOCK_INDENT)
        .is_some_and(|rest| rest.starts_with(HANDLER_KEY))
}

/// Key forms the serializer may emit for `name`: plain, single or double quoted.
fn key_forms(name: &str) -> [String; 3] {
    [
        format!("{}:", name),
        format!("'{}':", name.replace('\'', "''")),
        format!("\"{}\":", name.replace('\\', "\\\\").replace('"', "\\\"")),
    ]
}

/// Index of the first top-level `functions:` line.
fn find_functions_key(lines: &[String]) -> Result<Option<usize>, FnpackError> {
    let Some(index) = lines.iter().position(|line| line.starts_with(FUNCTIONS_KEY)) else {
        return Ok(None);
    };

    let rest = lines[index][FUNCTIONS_KEY.len()..].trim();
    if !rest.is_empty() && !rest.starts_with('#') {
        return Err(FnpackError::ManifestFormat(format!(
            "line {} declares 'functions' inline ({}); expected a block mapping",
            index + 1,
            rest
        )));
    }

    Ok(Some(index))
}

/// Half-open line range `[start, end)` of a function block.
fn find_block(lines: &[String], name: &str) -> Result<(usize, usize), FnpackError> {
    let keys = key_forms(name);
    let search_from = lines
        .iter()
        .position(|line| line.starts_with(FUNCTIONS_KEY))
        .map(|index| index + 1)
        .unwrap_or(0);

    let start = lines[search_from..]
        .iter()
        .position(|line| {
            let trimmed = line.trim_start();
            keys.iter().any(|key| trimmed.starts_with(key.as_str()))
        })
        .map(|offset| search_from + offset)
        .ok_or_else(|| {
            FnpackError::ManifestFormat(format!(
                "no '{}' key line found for function '{}'",
                keys[0], name
            ))
        })?;

    let key_indent = indentation(&lines[start]);
    let mut end = lines[start + 1..]
        .iter()
        .position(|line| is_content(line) && indentation(line) <= key_indent)
        .map(|offset| start + 1 + offset)
        .unwrap_or(lines.len());

    // Trailing blanks and shallow comments belong to whatever follows.
    while end > start + 1 {
        let line = &lines[end - 1];
        let shallow_comment = !is_content(line) && indentation(line) <= key_indent;
        if !is_blank(line) && !shallow_comment {
            break;
        }
        end -= 1;
    }

    Ok((start, end))
}

fn indentation(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Neither blank nor a comment.
fn is_content(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with('#')
}
