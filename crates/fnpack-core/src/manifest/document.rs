//! Line-oriented view of the service manifest text.

use std::fmt;

/// The manifest as an ordered sequence of lines.
///
/// Built by splitting on `\n` and rendered by joining with `\n`, so a
/// document that is not edited renders back to exactly the original text
/// (including a trailing newline, which shows up as a final empty line).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestDocument {
    lines: Vec<String>,
}

impl ManifestDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for ManifestDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
