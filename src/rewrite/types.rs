use std::fmt;

/// Which part of the clone a replacement comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementKind {
    Episode,
    Sequence,
    Shot,
    FileName,
    VersionedStem,
}

impl ReplacementKind {
    pub fn description(&self) -> &'static str {
        match self {
            ReplacementKind::Episode => "episode token",
            ReplacementKind::Sequence => "sequence token",
            ReplacementKind::Shot => "shot token",
            ReplacementKind::FileName => "file name",
            ReplacementKind::VersionedStem => "versioned name",
        }
    }
}

/// A single literal substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub kind: ReplacementKind,
    pub from: String,
    pub to: String,
}

impl Replacement {
    pub fn new(kind: ReplacementKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.kind.description(), self.from, self.to)
    }
}

/// Old and new names of the scene file being cloned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRename {
    /// e.g. `lighting_v003.ma`
    pub old_file_name: String,
    /// e.g. `lighting_v001.ma`
    pub new_file_name: String,
    /// e.g. `lighting_v003`
    pub old_stem: String,
    /// e.g. `lighting_v001`
    pub new_stem: String,
}

/// Rewritten content with per-replacement hit counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteOutput {
    pub content: String,
    /// Occurrences replaced, in the order the replacements were applied
    pub counts: Vec<(ReplacementKind, usize)>,
}

impl RewriteOutput {
    pub fn total_replaced(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}
