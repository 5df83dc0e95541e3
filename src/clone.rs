use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::parser::TokenMapping;
use crate::rewrite::{
    build_replacements, ContentRewriter, FileRename, LiteralRewriter, RESET_VERSION_SUFFIX,
};
use crate::scanner::{scan_versioned_files, select_latest, unversioned_base, VersionedFile};
use crate::validator::validate_inputs;

/// Decides whether an existing destination file may be replaced
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, file_name: &str, path: &Path) -> bool;
}

/// Replace existing files without asking
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOverwrite;

impl OverwritePrompt for AlwaysOverwrite {
    fn confirm_overwrite(&mut self, _file_name: &str, _path: &Path) -> bool {
        true
    }
}

/// Never replace an existing file; the clone is cancelled instead
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverOverwrite;

impl OverwritePrompt for NeverOverwrite {
    fn confirm_overwrite(&mut self, _file_name: &str, _path: &Path) -> bool {
        false
    }
}

#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    /// Stop after planning; nothing is created or written
    pub dry_run: bool,
}

/// Details of a completed clone
#[derive(Debug, Clone, Serialize)]
pub struct CloneReport {
    pub source_file: PathBuf,
    pub destination_file: PathBuf,
    pub tokens: TokenMapping,
    pub source_version: u64,
    /// Total occurrences replaced in the file content
    pub replacements: usize,
    pub overwritten: bool,
}

/// What a clone would do, produced by a dry run
#[derive(Debug, Clone, Serialize)]
pub struct ClonePlan {
    pub source_file: PathBuf,
    pub destination_file: PathBuf,
    pub tokens: TokenMapping,
    pub source_version: u64,
    pub would_overwrite: bool,
}

#[derive(Debug, Clone)]
pub enum CloneOutcome {
    Completed(CloneReport),
    /// The user declined to overwrite an existing file
    Cancelled { destination_file: PathBuf },
    Planned(ClonePlan),
}

/// Clone the latest versioned scene from `source` into `destination` using
/// literal token replacement.
pub fn clone_latest(
    source: &str,
    destination: &str,
    options: &CloneOptions,
    prompt: &mut dyn OverwritePrompt,
) -> Result<CloneOutcome, AppError> {
    clone_latest_with(source, destination, options, prompt, &LiteralRewriter)
}

/// Same as [`clone_latest`] with a caller-supplied rewriting strategy
pub fn clone_latest_with<R: ContentRewriter>(
    source: &str,
    destination: &str,
    options: &CloneOptions,
    prompt: &mut dyn OverwritePrompt,
    rewriter: &R,
) -> Result<CloneOutcome, AppError> {
    let inputs = validate_inputs(source, destination)?;

    let candidates = scan_versioned_files(&inputs.source)?;
    if candidates.is_empty() {
        warn!(root = ?inputs.source, "No versioned scene files found");
        return Err(AppError::NoCandidates {
            root: inputs.source,
        });
    }
    info!(count = candidates.len(), "Found versioned scene files");

    let latest = select_latest(&candidates).ok_or(AppError::NoLatest)?;
    let rename = derive_file_rename(latest)?;

    let destination_file = inputs.destination.join(&rename.new_file_name);
    info!(
        from = ?latest.path,
        to = ?destination_file,
        version = latest.version,
        "Planned clone"
    );

    if options.dry_run {
        return Ok(CloneOutcome::Planned(ClonePlan {
            source_file: latest.path.clone(),
            would_overwrite: destination_file.is_file(),
            destination_file,
            tokens: inputs.mapping,
            source_version: latest.version,
        }));
    }

    fs::create_dir_all(&inputs.destination).map_err(|e| AppError::CreateDirError {
        path: inputs.destination.clone(),
        source: e,
    })?;

    let overwritten = destination_file.is_file();
    if overwritten {
        debug!(path = ?destination_file, "Destination file exists, asking to overwrite");
        if !prompt.confirm_overwrite(&rename.new_file_name, &destination_file) {
            info!(path = ?destination_file, "Overwrite declined");
            return Ok(CloneOutcome::Cancelled { destination_file });
        }
    }

    let content = fs::read_to_string(&latest.path).map_err(|e| AppError::ReadError {
        path: latest.path.clone(),
        source: e,
    })?;

    let replacements = build_replacements(&inputs.mapping, &rename);
    let output = rewriter.rewrite(&content, &replacements);

    fs::write(&destination_file, &output.content).map_err(|e| AppError::WriteError {
        path: destination_file.clone(),
        source: e,
    })?;

    info!(
        path = ?destination_file,
        replaced = output.total_replaced(),
        "Wrote cloned scene"
    );

    Ok(CloneOutcome::Completed(CloneReport {
        source_file: latest.path.clone(),
        destination_file,
        tokens: inputs.mapping,
        source_version: latest.version,
        replacements: output.total_replaced(),
        overwritten,
    }))
}

/// Work out the version-reset name for the selected file.
///
/// The stem is decomposed again here rather than trusting the scanner, so a
/// name that somehow lacks the `_v<digits>` suffix is reported instead of
/// producing a bogus file name.
fn derive_file_rename(latest: &VersionedFile) -> Result<FileRename, AppError> {
    let old_stem = latest.stem();
    let base = unversioned_base(old_stem).ok_or_else(|| AppError::UnparseableLatest {
        file_name: latest.file_name.clone(),
    })?;

    let new_stem = format!("{}{}", base, RESET_VERSION_SUFFIX);
    let new_file_name = format!("{}.{}", new_stem, latest.extension);

    debug!(old = %latest.file_name, new = %new_file_name, "Derived file name");

    Ok(FileRename {
        old_file_name: latest.file_name.clone(),
        new_file_name,
        old_stem: old_stem.to_string(),
        new_stem,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::{Replacement, RewriteOutput};
    use tempfile::{tempdir, TempDir};

    struct Fixture {
        _root: TempDir,
        source: PathBuf,
        destination: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let root = tempdir().unwrap();
            let source = root.path().join("show/ep_01/sq_010/sh_020/work");
            let destination = root.path().join("show/ep_02/sq_020/sh_030/work");
            fs::create_dir_all(&source).unwrap();
            Self {
                _root: root,
                source,
                destination,
            }
        }

        fn write_source(&self, name: &str, content: &str) {
            let path = self.source.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn run(&self, prompt: &mut dyn OverwritePrompt) -> Result<CloneOutcome, AppError> {
            self.run_with(&CloneOptions::default(), prompt)
        }

        fn run_with(
            &self,
            options: &CloneOptions,
            prompt: &mut dyn OverwritePrompt,
        ) -> Result<CloneOutcome, AppError> {
            clone_latest(
                &self.source.to_string_lossy(),
                &self.destination.to_string_lossy(),
                options,
                prompt,
            )
        }
    }

    struct CountingPrompt {
        answer: bool,
        asked: usize,
    }

    impl OverwritePrompt for CountingPrompt {
        fn confirm_overwrite(&mut self, file_name: &str, _path: &Path) -> bool {
            assert_eq!(file_name, "lighting_v001.ma");
            self.asked += 1;
            self.answer
        }
    }

    fn expect_completed(outcome: CloneOutcome) -> CloneReport {
        match outcome {
            CloneOutcome::Completed(report) => report,
            other => panic!("Expected completed clone, got {:?}", other),
        }
    }

    #[test]
    fn test_clone_end_to_end() {
        let fx = Fixture::new();
        fx.write_source(
            "lighting_v003.ma",
            "//Maya ASCII scene\n\
             //Name: lighting_v003.ma\n\
             fileInfo \"shot\" \"ep_01_sq_010_sh_020_lighting_v003\";\n",
        );
        fx.write_source("lighting_v002.ma", "old");

        let report = expect_completed(fx.run(&mut AlwaysOverwrite).unwrap());

        assert_eq!(report.destination_file, fx.destination.join("lighting_v001.ma"));
        assert_eq!(report.source_file, fx.source.join("lighting_v003.ma"));
        assert_eq!(report.source_version, 3);
        assert!(!report.overwritten);

        let written = fs::read_to_string(&report.destination_file).unwrap();
        assert!(written.contains("ep_02_sq_020_sh_030_lighting_v001"));
        assert!(written.contains("//Name: lighting_v001.ma"));
        for stale in ["ep_01", "sq_010", "sh_020", "_v003"] {
            assert!(!written.contains(stale), "{} survived", stale);
        }

        let entries: Vec<_> = fs::read_dir(&fx.destination).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_clone_picks_numeric_latest_from_subdirectories() {
        let fx = Fixture::new();
        fx.write_source("scenes/scene_v1.ma", "v1");
        fx.write_source("scenes/scene_v10.ma", "v10");
        fx.write_source("scene_v2.ma", "v2");

        let report = expect_completed(fx.run(&mut AlwaysOverwrite).unwrap());

        assert_eq!(report.source_version, 10);
        assert_eq!(
            fs::read_to_string(fx.destination.join("scene_v001.ma")).unwrap(),
            "v10"
        );
    }

    #[test]
    fn test_no_candidates_leaves_destination_untouched() {
        let fx = Fixture::new();
        fx.write_source("notes.txt", "nothing versioned");
        fx.write_source("scene.ma", "unversioned");

        let err = fx.run(&mut AlwaysOverwrite).unwrap_err();

        assert!(matches!(err, AppError::NoCandidates { .. }));
        assert!(!fx.destination.exists());
    }

    #[test]
    fn test_validation_failure_creates_nothing() {
        let root = tempdir().unwrap();
        let source = root.path().join("ep_01/sq_010/sh_020");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("a_v001.ma"), "").unwrap();
        let destination = root.path().join("ep_02/nowhere");

        let err = clone_latest(
            &source.to_string_lossy(),
            &destination.to_string_lossy(),
            &CloneOptions::default(),
            &mut AlwaysOverwrite,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::MissingTokens(_)));
        assert!(!destination.exists());
    }

    #[test]
    fn test_declined_overwrite_keeps_existing_file() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "ep_01 first");

        expect_completed(fx.run(&mut AlwaysOverwrite).unwrap());
        let target = fx.destination.join("lighting_v001.ma");
        let first = fs::read_to_string(&target).unwrap();

        fx.write_source("lighting_v004.ma", "ep_01 second");
        let mut prompt = CountingPrompt {
            answer: false,
            asked: 0,
        };
        let outcome = fx.run(&mut prompt).unwrap();

        assert!(matches!(outcome, CloneOutcome::Cancelled { .. }));
        assert_eq!(prompt.asked, 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), first);
    }

    #[test]
    fn test_confirmed_overwrite_replaces_file() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "first");
        expect_completed(fx.run(&mut AlwaysOverwrite).unwrap());

        fx.write_source("lighting_v004.ma", "second");
        let mut prompt = CountingPrompt {
            answer: true,
            asked: 0,
        };
        let report = expect_completed(fx.run(&mut prompt).unwrap());

        assert!(report.overwritten);
        assert_eq!(
            fs::read_to_string(fx.destination.join("lighting_v001.ma")).unwrap(),
            "second"
        );
    }

    #[test]
    fn test_prompt_not_consulted_for_new_file() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "");

        let mut prompt = CountingPrompt {
            answer: false,
            asked: 0,
        };
        expect_completed(fx.run(&mut prompt).unwrap());
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "ep_01");

        let options = CloneOptions { dry_run: true };
        let outcome = fx.run_with(&options, &mut NeverOverwrite).unwrap();

        match outcome {
            CloneOutcome::Planned(plan) => {
                assert_eq!(plan.destination_file, fx.destination.join("lighting_v001.ma"));
                assert_eq!(plan.tokens.episode.new, "ep_02");
                assert!(!plan.would_overwrite);
            }
            other => panic!("Expected plan, got {:?}", other),
        }
        assert!(!fx.destination.exists());
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let fx = Fixture::new();
        fs::write(fx.source.join("lighting_v003.ma"), [0xff, 0xfe, 0x00]).unwrap();

        let err = fx.run(&mut AlwaysOverwrite).unwrap_err();

        assert!(matches!(err, AppError::ReadError { .. }));
        assert!(!fx.destination.join("lighting_v001.ma").exists());
    }

    #[test]
    fn test_destination_parent_is_file_is_create_dir_error() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "ep_01");
        let blocker = fx._root.path().join("blocker");
        fs::write(&blocker, "not a folder").unwrap();
        let destination = blocker.join("ep_02/sq_020/sh_030");

        let err = clone_latest(
            &fx.source.to_string_lossy(),
            &destination.to_string_lossy(),
            &CloneOptions::default(),
            &mut AlwaysOverwrite,
        )
        .unwrap_err();

        assert!(matches!(err, AppError::CreateDirError { .. }));
        assert_eq!(err.exit_code(), crate::error::ExitCode::DirectoryCreateError);
        assert!(err
            .detailed_message()
            .starts_with("Could not create Destination folder:\n"));
    }

    #[test]
    fn test_directory_in_place_of_output_is_write_error() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "ep_01");
        let target = fx.destination.join("lighting_v001.ma");
        fs::create_dir_all(&target).unwrap();

        let mut prompt = CountingPrompt {
            answer: false,
            asked: 0,
        };
        let err = fx.run(&mut prompt).unwrap_err();

        assert_eq!(prompt.asked, 0);
        assert_eq!(err.exit_code(), crate::error::ExitCode::WriteError);
        match &err {
            AppError::WriteError { path, source } => {
                assert_eq!(path, &target);
                let msg = err.detailed_message();
                assert!(msg.starts_with("Failed to write new .ma:\n"));
                assert!(msg.contains(&target.display().to_string()));
                assert!(msg.contains(&source.to_string()));
            }
            other => panic!("Expected write error, got {:?}", other),
        }
        assert!(target.is_dir());
    }

    /// Remove every permission bit; false when the directory stays listable
    /// (running as root), in which case the test has nothing to check.
    #[cfg(unix)]
    fn lock_dir(path: &Path) -> bool {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(path).is_ok() {
            unlock_dir(path);
            return false;
        }
        true
    }

    #[cfg(unix)]
    fn unlock_dir(path: &Path) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_unlistable_source_is_invalid_source() {
        let fx = Fixture::new();
        fx.write_source("lighting_v003.ma", "ep_01");

        if !lock_dir(&fx.source) {
            return;
        }
        let result = fx.run(&mut AlwaysOverwrite);
        unlock_dir(&fx.source);

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::InvalidSource { .. }));
        assert_eq!(err.detailed_message(), "Please choose a valid Source Shot folder.");
        assert!(!fx.destination.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subfolder_is_skipped() {
        let fx = Fixture::new();
        fx.write_source("scene_v001.ma", "ep_01 reachable");
        fx.write_source("locked/scene_v009.ma", "ep_01 hidden");
        let locked = fx.source.join("locked");

        if !lock_dir(&locked) {
            return;
        }
        let result = fx.run(&mut AlwaysOverwrite);
        unlock_dir(&locked);

        let report = expect_completed(result.unwrap());
        assert_eq!(report.source_version, 1);
        assert_eq!(
            fs::read_to_string(fx.destination.join("scene_v001.ma")).unwrap(),
            "ep_02 reachable"
        );
    }

    #[test]
    fn test_extension_case_preserved() {
        let fx = Fixture::new();
        fx.write_source("Layout_V007.MA", "Layout_V007");

        let report = expect_completed(fx.run(&mut AlwaysOverwrite).unwrap());

        assert_eq!(report.destination_file, fx.destination.join("Layout_v001.MA"));
        assert_eq!(
            fs::read_to_string(&report.destination_file).unwrap(),
            "Layout_v001"
        );
    }

    #[test]
    fn test_custom_rewriter_is_used() {
        struct Upper;
        impl ContentRewriter for Upper {
            fn rewrite(&self, content: &str, _replacements: &[Replacement]) -> RewriteOutput {
                RewriteOutput {
                    content: content.to_uppercase(),
                    counts: Vec::new(),
                }
            }
        }

        let fx = Fixture::new();
        fx.write_source("fx_v002.ma", "smoke");

        clone_latest_with(
            &fx.source.to_string_lossy(),
            &fx.destination.to_string_lossy(),
            &CloneOptions::default(),
            &mut AlwaysOverwrite,
            &Upper,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(fx.destination.join("fx_v001.ma")).unwrap(),
            "SMOKE"
        );
    }

    #[test]
    fn test_derive_file_rename() {
        let file = VersionedFile {
            path: PathBuf::from("/s/comp_v2_v010.ma"),
            file_name: "comp_v2_v010.ma".to_string(),
            base_name: "comp_v2".to_string(),
            version: 10,
            extension: "ma".to_string(),
        };

        let rename = derive_file_rename(&file).unwrap();

        assert_eq!(rename.old_stem, "comp_v2_v010");
        assert_eq!(rename.new_stem, "comp_v2_v001");
        assert_eq!(rename.new_file_name, "comp_v2_v001.ma");
    }

    #[test]
    fn test_derive_file_rename_rejects_unversioned() {
        let file = VersionedFile {
            path: PathBuf::from("/s/broken.ma"),
            file_name: "broken.ma".to_string(),
            base_name: "broken".to_string(),
            version: 1,
            extension: "ma".to_string(),
        };

        let err = derive_file_rename(&file).unwrap_err();
        assert!(matches!(err, AppError::UnparseableLatest { .. }));
    }
}
