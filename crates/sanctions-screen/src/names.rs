//! Name sources: explicit arguments, line-delimited files and CSV files.
//!
//! All sources are concatenated in the order explicit, line file, CSV. Blank
//! entries are dropped everywhere. CSV rows that yield no name are reported
//! back as skipped row numbers (header = row 1) instead of failing the load.

use crate::error::LoadError;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default CSV column holding given names.
pub const DEFAULT_FIRST_NAME_COLUMN: &str = "Vorname";

/// Default CSV column holding family names.
pub const DEFAULT_LAST_NAME_COLUMN: &str = "Nachname";

/// Maximum skipped row numbers spelled out in a notice.
const NOTICE_ROW_LIMIT: usize = 10;

/// How a CSV row is turned into a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnMapping {
    /// A single column with the full name.
    FullName(String),
    /// Separate given/family columns joined by one space.
    FirstLast { first: String, last: String },
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping::FirstLast {
            first: DEFAULT_FIRST_NAME_COLUMN.to_string(),
            last: DEFAULT_LAST_NAME_COLUMN.to_string(),
        }
    }
}

impl ColumnMapping {
    /// Build a mapping from optional CLI values; a non-blank full-name column wins.
    pub fn from_options(full: Option<&str>, first: &str, last: &str) -> Self {
        match full.map(str::trim).filter(|c| !c.is_empty()) {
            Some(column) => ColumnMapping::FullName(column.to_string()),
            None => ColumnMapping::FirstLast {
                first: first.to_string(),
                last: last.to_string(),
            },
        }
    }
}

/// Where to read names from.
#[derive(Debug, Clone, Default)]
pub struct NameSources {
    pub explicit: Vec<String>,
    pub line_file: Option<PathBuf>,
    pub csv_file: Option<PathBuf>,
    pub columns: ColumnMapping,
}

/// Names resolved from all sources plus non-fatal diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedNames {
    pub names: Vec<String>,
    /// 1-based CSV row numbers that produced no name.
    pub skipped_rows: Vec<usize>,
    pub notices: Vec<String>,
}

impl NameSources {
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty() && self.line_file.is_none() && self.csv_file.is_none()
    }

    /// Load every configured source. Any unreadable file aborts the load.
    pub fn load(&self) -> Result<LoadedNames, LoadError> {
        let mut loaded = LoadedNames {
            names: clean_explicit(&self.explicit),
            ..LoadedNames::default()
        };

        if let Some(path) = &self.line_file {
            let names = load_line_file(path)?;
            info!(count = names.len(), path = %path.display(), "loaded names from line file");
            loaded.names.extend(names);
        }

        if let Some(path) = &self.csv_file {
            let (names, skipped) = load_tabular_file(path, &self.columns)?;
            info!(
                count = names.len(),
                skipped = skipped.len(),
                path = %path.display(),
                "loaded names from CSV"
            );
            loaded.names.extend(names);
            if let Some(notice) = skipped_rows_notice(&skipped) {
                loaded.notices.push(notice);
            }
            loaded.skipped_rows = skipped;
        }

        Ok(loaded)
    }
}

/// Trim explicit names and drop blanks.
pub fn clean_explicit(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect()
}

/// Read one name per line.
pub fn load_line_file(path: &Path) -> Result<Vec<String>, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect())
}

/// Read names from a headed CSV file. Returns the names and the skipped row numbers.
pub fn load_tabular_file(
    path: &Path,
    columns: &ColumnMapping,
) -> Result<(Vec<String>, Vec<usize>), LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_tabular(file, columns).map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

fn read_tabular<R: std::io::Read>(
    reader: R,
    columns: &ColumnMapping,
) -> Result<(Vec<String>, Vec<usize>), csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let index_of = |name: &str| headers.iter().position(|h| h.trim() == name);

    let (full_idx, first_idx, last_idx) = match columns {
        ColumnMapping::FullName(col) => {
            let idx = index_of(col);
            if idx.is_none() {
                warn!(column = %col, "name column not found in CSV header");
            }
            (idx, None, None)
        }
        ColumnMapping::FirstLast { first, last } => {
            let (f, l) = (index_of(first), index_of(last));
            if f.is_none() && l.is_none() {
                warn!(first = %first, last = %last, "name columns not found in CSV header");
            }
            (None, f, l)
        }
    };

    let mut names = Vec::new();
    let mut skipped = Vec::new();

    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 2;
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .unwrap_or("")
                .to_string()
        };

        let name = match columns {
            ColumnMapping::FullName(_) => cell(full_idx),
            ColumnMapping::FirstLast { .. } => {
                let parts = [cell(first_idx), cell(last_idx)];
                parts
                    .iter()
                    .filter(|p| !p.is_empty())
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        };

        if name.is_empty() {
            skipped.push(row);
        } else {
            names.push(name);
        }
    }

    Ok((names, skipped))
}

/// Human-readable notice for skipped CSV rows, if any.
pub fn skipped_rows_notice(skipped: &[usize]) -> Option<String> {
    if skipped.is_empty() {
        return None;
    }
    let listed = skipped
        .iter()
        .take(NOTICE_ROW_LIMIT)
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let more = if skipped.len() > NOTICE_ROW_LIMIT { " ..." } else { "" };
    Some(format!(
        "Skipped {} empty row(s) in CSV: {listed}{more}",
        skipped.len()
    ))
}
