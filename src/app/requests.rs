// ReportBar - app/requests.rs
//
// Loads request logs from disk. Accepts either a JSON array of records or
// JSON Lines (one record per line). Malformed JSON Lines records are
// reported and skipped; everything else that goes wrong is fatal.

use crate::core::model::RequestRecord;
use crate::util::constants;
use crate::util::error::RequestLogError;
use std::path::Path;

/// Records loaded from one file plus the non-fatal problems encountered.
#[derive(Debug, Default)]
pub struct LoadedRequests {
    /// Records sorted by timestamp (oldest first).
    pub records: Vec<RequestRecord>,
    /// Malformed lines (capped at `MAX_REQUEST_LOG_ERRORS`) and truncation.
    pub errors: Vec<RequestLogError>,
    /// Total malformed lines, including those not individually reported.
    pub skipped_lines: usize,
}

/// Read and decode a request log file.
pub fn load_requests(path: &Path) -> Result<LoadedRequests, RequestLogError> {
    let metadata = std::fs::metadata(path).map_err(|e| RequestLogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    if metadata.len() > constants::MAX_REQUEST_LOG_FILE_SIZE {
        return Err(RequestLogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_REQUEST_LOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| RequestLogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let loaded = parse_requests(&content, path)?;

    tracing::info!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped_lines,
        "Request log loaded"
    );

    Ok(loaded)
}

/// Decode request log content. `path` is used for error messages only.
pub fn parse_requests(content: &str, path: &Path) -> Result<LoadedRequests, RequestLogError> {
    parse_requests_with_limit(content, path, constants::MAX_REQUEST_RECORDS)
}

/// Records past `max_records` (in file order) are dropped with one
/// `TooManyRecords` error.
fn parse_requests_with_limit(
    content: &str,
    path: &Path,
    max_records: usize,
) -> Result<LoadedRequests, RequestLogError> {
    let mut loaded = if content.trim_start().starts_with('[') {
        parse_array(content, path)?
    } else {
        parse_lines(content, path, max_records)
    };

    if loaded.records.len() > max_records {
        loaded.records.truncate(max_records);
        loaded.errors.push(RequestLogError::TooManyRecords {
            path: path.to_path_buf(),
            max: max_records,
        });
    }

    // Stable sort keeps file order for identical timestamps.
    loaded.records.sort_by_key(|r| r.timestamp);
    Ok(loaded)
}

fn parse_array(content: &str, path: &Path) -> Result<LoadedRequests, RequestLogError> {
    let records: Vec<RequestRecord> =
        serde_json::from_str(content).map_err(|e| RequestLogError::ArrayParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(LoadedRequests {
        records,
        ..Default::default()
    })
}

fn parse_lines(content: &str, path: &Path, max_records: usize) -> LoadedRequests {
    let mut loaded = LoadedRequests::default();

    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // One record past the cap is kept so the caller can tell the
        // file was cut short.
        if loaded.records.len() > max_records {
            break;
        }
        match serde_json::from_str::<RequestRecord>(line) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                loaded.skipped_lines += 1;
                if loaded.errors.len() < constants::MAX_REQUEST_LOG_ERRORS {
                    loaded.errors.push(RequestLogError::LineParse {
                        path: path.to_path_buf(),
                        line_number: idx as u64 + 1,
                        source: e,
                    });
                }
            }
        }
    }

    if loaded.skipped_lines > 0 {
        tracing::warn!(
            path = %path.display(),
            skipped = loaded.skipped_lines,
            "Skipped malformed request records"
        );
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const LINE_A: &str = r#"{"timestamp":"2026-10-01T12:00:00Z","request":{"method":"GET","host":"x.example.co","path":"/auth/v1/user"},"response":{"status_code":200}}"#;
    const LINE_B: &str = r#"{"timestamp":"2026-10-01T11:00:00Z","request":{"method":"POST","host":"x.example.co","path":"/rest/v1/todos"},"response":{"status_code":201,"duration_ms":12}}"#;

    fn path() -> PathBuf {
        PathBuf::from("requests.jsonl")
    }

    #[test]
    fn test_json_lines_sorted_by_timestamp() {
        let content = format!("{LINE_A}\n\n{LINE_B}\n");
        let loaded = parse_requests(&content, &path()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.records[0].request.path, "/rest/v1/todos");
        assert_eq!(loaded.records[0].response.duration_ms, Some(12));
        assert!(loaded.errors.is_empty());
    }

    #[test]
    fn test_malformed_line_is_reported_and_skipped() {
        let content = format!("{LINE_A}\n{{not json}}\n{LINE_B}\n");
        let loaded = parse_requests(&content, &path()).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.skipped_lines, 1);
        assert!(matches!(
            loaded.errors[0],
            RequestLogError::LineParse { line_number: 2, .. }
        ));
    }

    #[test]
    fn test_json_array() {
        let content = format!("[{LINE_A},{LINE_B}]");
        let loaded = parse_requests(&content, &path()).unwrap();
        assert_eq!(loaded.records.len(), 2);
    }

    #[test]
    fn test_malformed_array_is_fatal() {
        let content = format!("[{LINE_A},");
        let result = parse_requests(&content, &path());
        assert!(matches!(result, Err(RequestLogError::ArrayParse { .. })));
    }

    #[test]
    fn test_record_cap_truncates_with_one_error() {
        let content = format!("{LINE_A}\n{LINE_B}\n{LINE_A}\n{LINE_B}\n");
        let loaded = parse_requests_with_limit(&content, &path(), 2).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert_eq!(loaded.errors.len(), 1);
        assert!(matches!(
            loaded.errors[0],
            RequestLogError::TooManyRecords { max: 2, .. }
        ));
    }

    #[test]
    fn test_record_cap_exactly_reached_is_not_an_error() {
        let content = format!("{LINE_A}\n{LINE_B}\n");
        let loaded = parse_requests_with_limit(&content, &path(), 2).unwrap();
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded.errors.is_empty());
    }

    #[test]
    fn test_record_cap_applies_to_arrays() {
        let content = format!("[{LINE_A},{LINE_B},{LINE_A}]");
        let loaded = parse_requests_with_limit(&content, &path(), 1).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert!(matches!(
            loaded.errors.as_slice(),
            [RequestLogError::TooManyRecords { max: 1, .. }]
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_requests(Path::new("/nonexistent/reportbar/requests.jsonl"));
        assert!(matches!(result, Err(RequestLogError::Io { .. })));
    }
}
