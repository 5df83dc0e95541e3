mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;

// Tokens are `<prefix>_<digits>`, matched anywhere in the path.
// Examples: "ep_01", "sq_034", "sh_5"
static EPISODE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"ep_\d+").unwrap());
static SEQUENCE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"sq_\d+").unwrap());
static SHOT_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"sh_\d+").unwrap());

fn regex_for(kind: TokenKind) -> &'static Regex {
    match kind {
        TokenKind::Episode => &*EPISODE_REGEX,
        TokenKind::Sequence => &*SEQUENCE_REGEX,
        TokenKind::Shot => &*SHOT_REGEX,
    }
}

/// Convert Windows separators to forward slashes
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Lexically normalize a path string for comparison.
///
/// Separators become `/`, repeated separators and `.` segments collapse,
/// `..` pops the previous segment where one exists, and trailing slashes are
/// dropped. The filesystem is never consulted.
pub fn normalize_path(path: &str) -> String {
    let unified = normalize_separators(path);
    let absolute = unified.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// First substring of `path` matching the token pattern for `kind`
pub fn extract_token(kind: TokenKind, path: &str) -> Option<String> {
    let normalized = normalize_separators(path);
    regex_for(kind)
        .find(&normalized)
        .map(|m| m.as_str().to_string())
}

/// Search a path for all three tokens independently
pub fn extract_shot_tokens(path: &str) -> TokenSearch {
    TokenSearch {
        episode: extract_token(TokenKind::Episode, path),
        sequence: extract_token(TokenKind::Sequence, path),
        shot: extract_token(TokenKind::Shot, path),
    }
}
