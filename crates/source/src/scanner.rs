use crate::error::{Result, SourceError};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Which files count as sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Single-letter extensions to keep, matched case-sensitively
    pub extensions: Vec<char>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            extensions: vec!['c', 'h'],
        }
    }
}

impl ScanOptions {
    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(SourceError::invalid_config(
                "at least one source extension is required",
            ));
        }
        if let Some(bad) = self.extensions.iter().find(|c| !c.is_ascii_alphabetic()) {
            return Err(SourceError::invalid_config(format!(
                "source extension '{bad}' must be a single ASCII letter"
            )));
        }
        Ok(())
    }

    /// Human readable list, e.g. `.c and .h`
    pub fn describe(&self) -> String {
        let dotted: Vec<String> = self.extensions.iter().map(|c| format!(".{c}")).collect();
        match dotted.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, init)) => format!("{} and {last}", init.join(", ")),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };
        let mut chars = ext.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => self.extensions.contains(&c),
            _ => false,
        }
    }
}

/// Scanner for finding C sources under a project root
pub struct FileScanner {
    root: PathBuf,
    options: ScanOptions,
}

impl FileScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_options(root, ScanOptions::default())
    }

    pub fn with_options(root: impl AsRef<Path>, options: ScanOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Recursively collect matching files, relative to the root and sorted
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false) // hidden dirs and ignore files are walked too
            .follow_links(false);
        builder.filter_entry(|entry| !FileScanner::is_vcs_dir(entry.path()));

        for result in builder.build() {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if !file_type.is_file() {
                        continue;
                    }

                    let path = entry.path();
                    if !self.options.matches(path) {
                        continue;
                    }

                    let relative = path.strip_prefix(&self.root).unwrap_or(path);
                    files.push(relative.to_path_buf());
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        files.sort();
        log::debug!(
            "Found {} {} files under {}",
            files.len(),
            self.options.describe(),
            self.root.display()
        );
        files
    }

    fn is_vcs_dir(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| VCS_DIRS.contains(&name))
    }
}

const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];
