use crate::error::{Result, ToolchainError};
use crate::registry::BUILD_OUTPUTS;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Glob patterns expanded in the project root
pub const CLEAN_PATTERNS: &[&str] = &["*.o", "*~"];

/// What `clean` removes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSet {
    pub patterns: Vec<String>,
    pub paths: Vec<PathBuf>,
}

impl ArtifactSet {
    /// Object files, editor backups and every build output
    pub fn standard() -> Self {
        Self {
            patterns: CLEAN_PATTERNS.iter().map(|p| p.to_string()).collect(),
            paths: BUILD_OUTPUTS.iter().map(PathBuf::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub missing: usize,
    pub failed: usize,
}

/// Force-remove artifacts under `root`; absent paths are not an error
pub fn clean(root: &Path, artifacts: &ArtifactSet) -> Result<CleanReport> {
    let mut candidates = Vec::new();
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    for pattern in &artifacts.patterns {
        let full = format!("{escaped_root}/{pattern}");
        let paths = glob::glob(&full).map_err(|e| ToolchainError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        for entry in paths {
            match entry {
                Ok(path) => candidates.push(path),
                Err(e) => log::warn!("Cannot read {}: {}", e.path().display(), e.error()),
            }
        }
    }
    candidates.extend(artifacts.paths.iter().map(|p| root.join(p)));

    let mut report = CleanReport::default();
    for path in candidates {
        match fs::remove_file(&path) {
            Ok(()) => {
                log::debug!("Removed {}", path.display());
                report.removed.push(path);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => report.missing += 1,
            Err(e) => {
                log::warn!("Cannot remove {}: {e}", path.display());
                report.failed += 1;
            }
        }
    }
    log::info!(
        "Clean removed {} artifacts ({} already absent)",
        report.removed.len(),
        report.missing
    );
    Ok(report)
}
