mod types;

pub use types::*;

use crate::parser::{extract_shot_tokens, normalize_path, PathRole, ShotTokens, TokenMapping};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Check the source and destination folders before anything touches disk.
///
/// Checks run in a fixed order and the first failure is returned: source is
/// an existing directory, destination is non-empty, source tokens, destination
/// tokens, then the two paths differ after normalization.
pub fn validate_inputs(source: &str, destination: &str) -> Result<ValidatedInputs, ValidationError> {
    let source = source.trim();
    let destination = destination.trim();

    info!(source, destination, "Validating inputs");

    if source.is_empty() || !Path::new(source).is_dir() {
        warn!(source, "Source is not an existing directory");
        return Err(ValidationError::InvalidSource {
            path: PathBuf::from(source),
        });
    }

    if destination.is_empty() {
        warn!("Destination is empty");
        return Err(ValidationError::EmptyDestination);
    }

    let old = resolve_tokens(source, PathRole::Source)?;
    let new = resolve_tokens(destination, PathRole::Destination)?;

    let normalized_source = normalize_path(source);
    if normalized_source == normalize_path(destination) {
        warn!(path = %normalized_source, "Source and destination are identical");
        return Err(ValidationError::IdenticalPaths {
            path: normalized_source,
        });
    }

    let mapping = TokenMapping::new(&old, &new);
    info!(
        episode = %mapping.episode,
        sequence = %mapping.sequence,
        shot = %mapping.shot,
        "Validation passed"
    );

    Ok(ValidatedInputs {
        source: PathBuf::from(source),
        destination: PathBuf::from(destination),
        mapping,
    })
}

fn resolve_tokens(path: &str, role: PathRole) -> Result<ShotTokens, ValidationError> {
    let found = extract_shot_tokens(path);
    debug!(role = role.label(), found = ?found, "Extracted tokens");

    found.resolve(role).map_err(|missing| {
        let names: Vec<&str> = missing.missing().iter().map(|k| k.placeholder()).collect();
        warn!(role = role.label(), missing = %names.join(", "), "Missing tokens");
        ValidationError::MissingTokens(missing)
    })
}
