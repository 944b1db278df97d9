//! CSV report writing and reading.

use crate::error::ReportError;
use crate::types::{BatchReport, EntityLink, SearchResult, SearchStatus};
use std::path::Path;

/// Report header, in column order.
pub const REPORT_HEADER: [&str; 6] = [
    "query_name",
    "status",
    "match_count",
    "search_url",
    "entity_results",
    "error",
];

/// Separator between `title (url)` entries in the entity column.
pub const ENTITY_SEPARATOR: &str = " | ";

/// Serialize entity links as `title (url) | title (url)`; empty when none.
pub fn format_entities(entities: &[EntityLink]) -> String {
    entities
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(ENTITY_SEPARATOR)
}

/// Cells of one report row.
pub fn row_cells(result: &SearchResult) -> [String; 6] {
    let diagnostic = result
        .error
        .as_deref()
        .or(result.note.as_deref())
        .unwrap_or("");
    [
        result.query_name.clone(),
        result.status.to_string(),
        result.match_count.to_string(),
        result.search_url.clone(),
        format_entities(&result.entities),
        diagnostic.to_string(),
    ]
}

/// Write the whole report in one pass: header plus one row per result.
pub fn write_report(path: &Path, report: &BatchReport) -> Result<(), ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::create(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(file);

    writer.write_record(REPORT_HEADER).map_err(csv_err)?;
    for result in &report.results {
        writer.write_record(row_cells(result)).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// A row parsed back from a report file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub query_name: String,
    pub status: SearchStatus,
    pub match_count: usize,
    pub search_url: String,
    pub entity_results: String,
    pub error: String,
}

/// Read a report written by [`write_report`].
pub fn read_report(path: &Path) -> Result<Vec<ReportRow>, ReportError> {
    let csv_err = |source| ReportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let invalid = |msg: String| ReportError::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, msg),
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        let cell = |i: usize| record.get(i).unwrap_or("").to_string();

        let status = cell(1).parse::<SearchStatus>().map_err(invalid)?;
        let match_count = cell(2)
            .parse::<usize>()
            .map_err(|e| invalid(format!("bad match_count '{}': {e}", cell(2))))?;

        rows.push(ReportRow {
            query_name: cell(0),
            status,
            match_count,
            search_url: cell(3),
            entity_results: cell(4),
            error: cell(5),
        });
    }

    Ok(rows)
}
