use crate::error::{Result, SourceError};
use crate::include::{rewrite_include, MarkerPolicy, LOCAL_HEADER_MARKER};
use crate::scanner::FileScanner;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for source normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerConfig {
    /// Path prefix that marks a project-local header
    pub local_marker: String,

    /// Whether the marker survives the angle-to-quote rewrite
    pub marker_policy: MarkerPolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            local_marker: LOCAL_HEADER_MARKER.to_string(),
            marker_policy: MarkerPolicy::Retain,
        }
    }
}

impl NormalizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.local_marker.is_empty() {
            return Err(SourceError::invalid_config("local header marker is empty"));
        }
        if self.local_marker.contains('>') {
            return Err(SourceError::invalid_config(format!(
                "local header marker '{}' must not contain '>'",
                self.local_marker
            )));
        }
        Ok(())
    }
}

/// A file left untouched because it could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatReport {
    pub rewritten: Vec<PathBuf>,
    pub unchanged: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Replace a line made only of spaces plus `\n` with a bare `\n`
pub fn blank_whitespace_line(line: &str) -> Cow<'_, str> {
    match line.strip_suffix('\n') {
        Some(body) if !body.is_empty() && body.bytes().all(|b| b == b' ') => Cow::Borrowed("\n"),
        _ => Cow::Borrowed(line),
    }
}

/// Decode bytes as strict single-byte ASCII text
pub fn decode_ascii(path: &Path, bytes: Vec<u8>) -> Result<String> {
    if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
        return Err(SourceError::Decode {
            path: path.to_path_buf(),
            offset,
            byte: bytes[offset],
        });
    }
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Line-oriented rewriting of C sources
pub struct SourceNormalizer {
    config: NormalizerConfig,
}

impl SourceNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Run both transforms on a single line, include rewrite first
    pub fn normalize_line<'a>(&self, line: &'a str) -> Cow<'a, str> {
        match rewrite_include(line, &self.config.local_marker, self.config.marker_policy) {
            Cow::Borrowed(line) => blank_whitespace_line(line),
            Cow::Owned(line) => Cow::Owned(blank_whitespace_line(&line).into_owned()),
        }
    }

    /// Normalize a whole text, keeping every line terminator
    pub fn normalize_text(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.split_inclusive('\n') {
            out.push_str(&self.normalize_line(line));
        }
        out
    }

    /// Rewrite one file in place; returns whether its content changed
    pub fn normalize_file(&self, path: &Path) -> Result<bool> {
        let bytes = fs::read(path).map_err(|e| SourceError::file_io(path, e))?;
        let text = decode_ascii(path, bytes)?;
        let normalized = self.normalize_text(&text);
        if normalized == text {
            return Ok(false);
        }
        fs::write(path, normalized).map_err(|e| SourceError::file_io(path, e))?;
        Ok(true)
    }

    /// Normalize every scanned file; undecodable files are skipped, IO errors abort
    pub fn format(&self, scanner: &FileScanner) -> Result<FormatReport> {
        let mut report = FormatReport::default();
        for relative in scanner.scan() {
            let path = scanner.root().join(&relative);
            match self.normalize_file(&path) {
                Ok(true) => {
                    log::debug!("Rewrote {}", relative.display());
                    report.rewritten.push(relative);
                }
                Ok(false) => report.unchanged += 1,
                Err(err @ SourceError::Decode { .. }) => {
                    log::warn!("Skipping {}: {err}", relative.display());
                    report.skipped.push(SkippedFile {
                        path: relative,
                        reason: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        log::info!(
            "Formatted sources: {} rewritten, {} unchanged, {} skipped",
            report.rewritten.len(),
            report.unchanged,
            report.skipped.len()
        );
        Ok(report)
    }
}

impl Default for SourceNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}
