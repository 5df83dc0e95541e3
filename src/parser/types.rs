use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Episode,
    Sequence,
    Shot,
}

impl TokenKind {
    pub const ALL: [TokenKind; 3] = [TokenKind::Episode, TokenKind::Sequence, TokenKind::Shot];

    /// Placeholder used in user-facing messages, e.g. `ep_###`
    pub fn placeholder(&self) -> &'static str {
        match self {
            TokenKind::Episode => "ep_###",
            TokenKind::Sequence => "sq_###",
            TokenKind::Shot => "sh_###",
        }
    }
}

/// Which side of the clone a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    Source,
    Destination,
}

impl PathRole {
    pub fn label(&self) -> &'static str {
        match self {
            PathRole::Source => "Source",
            PathRole::Destination => "Destination",
        }
    }
}

/// Raw result of searching a path for each token; any of them may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenSearch {
    pub episode: Option<String>,
    pub sequence: Option<String>,
    pub shot: Option<String>,
}

impl TokenSearch {
    pub fn get(&self, kind: TokenKind) -> Option<&str> {
        match kind {
            TokenKind::Episode => self.episode.as_deref(),
            TokenKind::Sequence => self.sequence.as_deref(),
            TokenKind::Shot => self.shot.as_deref(),
        }
    }

    pub fn missing(&self) -> Vec<TokenKind> {
        TokenKind::ALL
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.episode.is_some() && self.sequence.is_some() && self.shot.is_some()
    }

    /// Promote to a full token set, or report which tokens were not found
    pub fn resolve(self, role: PathRole) -> Result<ShotTokens, MissingTokens> {
        match (self.episode.clone(), self.sequence.clone(), self.shot.clone()) {
            (Some(episode), Some(sequence), Some(shot)) => Ok(ShotTokens {
                episode,
                sequence,
                shot,
            }),
            _ => Err(MissingTokens { role, found: self }),
        }
    }
}

/// The three naming tokens of a shot path, all present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotTokens {
    pub episode: String,
    pub sequence: String,
    pub shot: String,
}

impl ShotTokens {
    pub fn get(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Episode => &self.episode,
            TokenKind::Sequence => &self.sequence,
            TokenKind::Shot => &self.shot,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenPair {
    pub old: String,
    pub new: String,
}

impl fmt::Display for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.old, self.new)
    }
}

/// Old-to-new token pairs in episode, sequence, shot order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMapping {
    pub episode: TokenPair,
    pub sequence: TokenPair,
    pub shot: TokenPair,
}

impl TokenMapping {
    pub fn new(old: &ShotTokens, new: &ShotTokens) -> Self {
        let pair = |kind| TokenPair {
            old: old.get(kind).to_string(),
            new: new.get(kind).to_string(),
        };

        Self {
            episode: pair(TokenKind::Episode),
            sequence: pair(TokenKind::Sequence),
            shot: pair(TokenKind::Shot),
        }
    }

    pub fn pairs(&self) -> [&TokenPair; 3] {
        [&self.episode, &self.sequence, &self.shot]
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} folder is missing required tokens", .role.label())]
pub struct MissingTokens {
    pub role: PathRole,
    pub found: TokenSearch,
}

impl MissingTokens {
    pub fn missing(&self) -> Vec<TokenKind> {
        self.found.missing()
    }

    /// Message listing what was found, with `None` in place of absent tokens
    pub fn format_error_message(&self) -> String {
        let show = |kind| self.found.get(kind).unwrap_or("None");
        format!(
            "{} folder must contain ep_###, sq_###, and sh_###.\n\
             Found: ep={}, sq={}, sh={}",
            self.role.label(),
            show(TokenKind::Episode),
            show(TokenKind::Sequence),
            show(TokenKind::Shot)
        )
    }
}
