use crate::error::{Result, SourceError};
use crate::scanner::FileScanner;
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Line count of a single source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub path: PathBuf,
    pub lines: usize,
}

/// Per-file counts ordered by descending line count
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CountReport {
    /// Label for the counted file kinds, e.g. `.c and .h`
    #[serde(skip)]
    pub label: String,

    pub records: Vec<LineRecord>,

    pub total: usize,
}

impl CountReport {
    pub fn from_records(label: impl Into<String>, mut records: Vec<LineRecord>) -> Self {
        records.sort_by(|a, b| b.lines.cmp(&a.lines).then_with(|| a.path.cmp(&b.path)));
        let total = records.iter().map(|r| r.lines).sum();
        Self {
            label: label.into(),
            records,
            total,
        }
    }

    /// Column width: longest path rounded past the next multiple of four
    pub fn column_width(&self) -> usize {
        let longest = self
            .records
            .iter()
            .map(|r| r.path.display().to_string().chars().count())
            .max()
            .unwrap_or(0);
        (longest / 4 + 1) * 4
    }

    /// Render the plain-text table
    pub fn render(&self) -> String {
        let width = self.column_width();
        let mut out = String::new();
        let _ = writeln!(out, "count {} files lines:", self.label);
        for record in &self.records {
            let _ = writeln!(
                out,
                "{:<width$}{}",
                record.path.display().to_string(),
                record.lines
            );
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Total: {}", self.total);
        out
    }
}

/// Count lines the way a line iterator sees them: `\n`, `\r\n` and a lone
/// `\r` each end a line, a trailing unterminated line still counts, an empty
/// file has none.
pub fn count_lines(content: &[u8]) -> usize {
    let mut lines = 0;
    let mut bytes = content.iter().peekable();
    while let Some(&byte) = bytes.next() {
        match byte {
            b'\n' => lines += 1,
            b'\r' => {
                bytes.next_if_eq(&&b'\n');
                lines += 1;
            }
            _ => {}
        }
    }
    match content.last() {
        Some(b'\n' | b'\r') | None => lines,
        Some(_) => lines + 1,
    }
}

/// Counts lines across every scanned source file
pub struct LineCounter<'a> {
    scanner: &'a FileScanner,
}

impl<'a> LineCounter<'a> {
    pub fn new(scanner: &'a FileScanner) -> Self {
        Self { scanner }
    }

    pub fn count(&self) -> Result<CountReport> {
        let mut records = Vec::new();
        for relative in self.scanner.scan() {
            let path = self.scanner.root().join(&relative);
            let content = fs::read(&path).map_err(|e| SourceError::file_io(&path, e))?;
            let lines = count_lines(&content);
            log::debug!("{}: {lines} lines", relative.display());
            records.push(LineRecord {
                path: relative,
                lines,
            });
        }
        Ok(CountReport::from_records(
            self.scanner.options().describe(),
            records,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(path: &str, lines: usize) -> LineRecord {
        LineRecord {
            path: PathBuf::from(path),
            lines,
        }
    }

    #[test]
    fn final_unterminated_line_counts() {
        assert_eq!(count_lines(b""), 0);
        assert_eq!(count_lines(b"\n"), 1);
        assert_eq!(count_lines(b"a\nb"), 2);
        assert_eq!(count_lines(b"a\nb\n"), 2);
        assert_eq!(count_lines(b"\n\n\n"), 3);
    }

    #[test]
    fn carriage_returns_end_lines_too() {
        assert_eq!(count_lines(b"a\r\nb\r\n"), 2);
        assert_eq!(count_lines(b"a\rb\rc"), 3);
        assert_eq!(count_lines(b"a\r"), 1);
        assert_eq!(count_lines(b"\r\r\n\n"), 3);
    }

    #[test]
    fn orders_by_descending_count_then_path() {
        let report = CountReport::from_records(
            ".c and .h",
            vec![record("b.c", 3), record("a.h", 10), record("a.c", 3)],
        );
        let order: Vec<_> = report
            .records
            .iter()
            .map(|r| r.path.display().to_string())
            .collect();
        assert_eq!(order, vec!["a.h", "a.c", "b.c"]);
        assert_eq!(report.total, 16);
    }

    #[test]
    fn pads_paths_past_next_multiple_of_four() {
        let report = CountReport::from_records(
            ".c and .h",
            vec![record("src/x.c", 12), record("src/long.h", 4)],
        );
        // longest path is 10 chars, so columns are 12 wide
        assert_eq!(report.column_width(), 12);
        assert_eq!(
            report.render(),
            "count .c and .h files lines:\n\
             src/x.c     12\n\
             src/long.h  4\n\
             \n\
             Total: 16\n"
        );
    }

    #[test]
    fn exact_multiple_of_four_still_gets_a_gap() {
        let report = CountReport::from_records(".c", vec![record("ab.c", 1)]);
        assert_eq!(report.column_width(), 8);
    }

    #[test]
    fn empty_report_renders_zero_total() {
        let report = CountReport::from_records(".c and .h", Vec::new());
        assert_eq!(
            report.render(),
            "count .c and .h files lines:\n\nTotal: 0\n"
        );
    }
}
