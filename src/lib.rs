pub mod cli;
pub mod clone;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod rewrite;
pub mod scanner;
pub mod ui;
pub mod validator;

pub use clone::{
    clone_latest, clone_latest_with, AlwaysOverwrite, CloneOptions, CloneOutcome, ClonePlan,
    CloneReport, NeverOverwrite, OverwritePrompt,
};
pub use error::{AppError, ExitCode};
pub use parser::{
    extract_shot_tokens, extract_token, normalize_path, MissingTokens, PathRole, ShotTokens,
    TokenKind, TokenMapping, TokenPair, TokenSearch,
};
pub use rewrite::{
    build_replacements, rewrite_content, ContentRewriter, FileRename, LiteralRewriter,
    Replacement, ReplacementKind, RewriteOutput,
};
pub use scanner::{scan_versioned_files, select_latest, ScannerError, VersionedFile};
pub use validator::{validate_inputs, ValidatedInputs, ValidationError};
