use super::comments::{mask_literals, strip_comments};

/// Comment-free views of one Java source text
///
/// Both views have the byte length and newline positions of the original,
/// so an offset found in one is valid in the other and in the original.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    cleaned: String,
    masked: String,
    lines: LineIndex,
}

impl SourceUnit {
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref();
        Self {
            cleaned: strip_comments(raw),
            masked: mask_literals(raw),
            lines: LineIndex::new(raw),
        }
    }

    /// Source with comments blanked, literals intact
    pub fn cleaned(&self) -> &str {
        &self.cleaned
    }

    /// Source with comments and literal contents blanked
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// 1-based line number of a byte offset, counted in the original text
    pub fn line_of(&self, offset: usize) -> usize {
        self.lines.line_of(offset)
    }
}

/// Positions of every `\n` in a text
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        Self {
            newlines: text
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Number of newlines strictly before `offset`, plus one
    pub fn line_of(&self, offset: usize) -> usize {
        self.newlines.partition_point(|&nl| nl < offset) + 1
    }
}
