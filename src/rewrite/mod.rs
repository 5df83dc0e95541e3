//! Ordered literal substitution over scene file content.
//!
//! Replacements run one after another over the whole current text, so each
//! step sees the output of the previous one. Matching is plain substring
//! matching with no notion of word or token boundaries: an old token that is
//! also a substring of unrelated text is replaced there too.

mod types;

pub use types::*;

use crate::parser::TokenMapping;
use tracing::{debug, trace};

/// Version every cloned file starts over at
pub const RESET_VERSION_SUFFIX: &str = "_v001";

/// Strategy for applying an ordered replacement list to file content
pub trait ContentRewriter {
    fn rewrite(&self, content: &str, replacements: &[Replacement]) -> RewriteOutput;
}

/// Global, non-overlapping, boundary-unaware substring replacement
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralRewriter;

impl ContentRewriter for LiteralRewriter {
    fn rewrite(&self, content: &str, replacements: &[Replacement]) -> RewriteOutput {
        let mut current = content.to_string();
        let mut counts = Vec::with_capacity(replacements.len());

        for replacement in replacements {
            if replacement.from.is_empty() {
                trace!(kind = ?replacement.kind, "Skipping empty pattern");
                counts.push((replacement.kind, 0));
                continue;
            }

            let hits = current.matches(replacement.from.as_str()).count();
            if hits > 0 {
                current = current.replace(replacement.from.as_str(), &replacement.to);
            }

            debug!(%replacement, hits, "Applied replacement");
            counts.push((replacement.kind, hits));
        }

        RewriteOutput {
            content: current,
            counts,
        }
    }
}

/// Build the five substitutions for a clone, in application order:
/// episode, sequence, shot, full file name, then versioned stem.
pub fn build_replacements(mapping: &TokenMapping, rename: &FileRename) -> Vec<Replacement> {
    vec![
        Replacement::new(
            ReplacementKind::Episode,
            &mapping.episode.old,
            &mapping.episode.new,
        ),
        Replacement::new(
            ReplacementKind::Sequence,
            &mapping.sequence.old,
            &mapping.sequence.new,
        ),
        Replacement::new(ReplacementKind::Shot, &mapping.shot.old, &mapping.shot.new),
        Replacement::new(
            ReplacementKind::FileName,
            &rename.old_file_name,
            &rename.new_file_name,
        ),
        Replacement::new(
            ReplacementKind::VersionedStem,
            &rename.old_stem,
            &rename.new_stem,
        ),
    ]
}

/// Apply `replacements` with the default literal strategy
pub fn rewrite_content(content: &str, replacements: &[Replacement]) -> RewriteOutput {
    LiteralRewriter.rewrite(content, replacements)
}
