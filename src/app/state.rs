// ReportBar - app/state.rs
//
// Application state management. Owns the active filter list and date range
// (the filter composer only requests changes to them), the loaded request
// records, and the selection.
// Owned by the eframe::App implementation.

use crate::app::requests;
use crate::core::composer::{FilterComposer, FilterSink, SwitchOutcome};
use crate::core::datepicker::DatePreset;
use crate::core::model::{DateRange, FilterItem, ProductKey, RequestRecord};
use crate::core::query;
use crate::util::constants;
use crate::util::error::{FilterChangeError, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// The active filter list and date range of the report.
#[derive(Debug, Clone, Default)]
pub struct ReportFilters {
    filters: Vec<FilterItem>,
    date_range: DateRange,
}

impl ReportFilters {
    pub fn new(date_range: DateRange) -> Self {
        Self {
            filters: Vec::new(),
            date_range,
        }
    }

    pub fn filters(&self) -> &[FilterItem] {
        &self.filters
    }

    pub fn date_range(&self) -> &DateRange {
        &self.date_range
    }

    /// Drop every filter. The date range is kept.
    pub fn clear(&mut self) {
        self.filters.clear();
    }
}

impl FilterSink for ReportFilters {
    fn add_filter(&mut self, filter: &FilterItem) -> std::result::Result<(), FilterChangeError> {
        if self.filters.contains(filter) {
            return Err(FilterChangeError::Duplicate {
                filter: filter.to_string(),
            });
        }
        self.filters.push(filter.clone());
        Ok(())
    }

    fn remove_filter(&mut self, filter: &FilterItem) -> std::result::Result<(), FilterChangeError> {
        match self.filters.iter().position(|f| f == filter) {
            Some(pos) => {
                self.filters.remove(pos);
                Ok(())
            }
            None => Err(FilterChangeError::NotFound {
                filter: filter.to_string(),
            }),
        }
    }

    fn change_date_range(&mut self, range: DateRange) {
        self.date_range = range;
    }
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// View-local filter bar state.
    pub composer: FilterComposer,

    /// Active filters and date range.
    pub report: ReportFilters,

    /// Date fields as currently typed, before they are applied.
    pub date_input: DateRange,

    /// Request log currently loaded (None before the first load).
    pub request_path: Option<PathBuf>,

    /// All loaded request records, sorted by timestamp.
    pub records: Vec<RequestRecord>,

    /// Indices of records matching the current filters (into `records`).
    pub filtered_indices: Vec<usize>,

    /// Index into `records` of the selected request. Survives filter
    /// changes for as long as the record stays visible.
    pub selected_record_index: Option<usize>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (bounded by `MAX_WARNINGS`).
    pub warnings: Vec<String>,

    /// Request log the user asked to open; handled by the app loop.
    pub pending_open: Option<PathBuf>,

    /// Whether to show the warnings window.
    pub show_warnings: bool,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Dark (true) or light (false) theme.
    pub dark_mode: bool,

    /// Body font size in points.
    pub ui_font_size: f32,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state around a configured composer.
    pub fn new(composer: FilterComposer, date_range: DateRange, debug_mode: bool) -> Self {
        Self {
            composer,
            date_input: date_range.clone(),
            report: ReportFilters::new(date_range),
            request_path: None,
            records: Vec::new(),
            filtered_indices: Vec::new(),
            selected_record_index: None,
            status_message: "Ready. Open a request log to begin.".to_string(),
            warnings: Vec::new(),
            pending_open: None,
            show_warnings: false,
            show_about: false,
            dark_mode: true,
            ui_font_size: constants::DEFAULT_FONT_SIZE,
            debug_mode,
        }
    }

    /// Recompute filtered indices from the records, filters and date range.
    pub fn apply_filters(&mut self) {
        self.filtered_indices = query::apply_filters(
            &self.records,
            self.report.filters(),
            self.report.date_range(),
        );

        // filtered_indices is ascending, so a binary search finds the record.
        if let Some(idx) = self.selected_record_index {
            if self.filtered_indices.binary_search(&idx).is_err() {
                self.selected_record_index = None;
            }
        }
    }

    /// Get the currently selected record, if any.
    pub fn selected_record(&self) -> Option<&RequestRecord> {
        self.selected_record_index
            .and_then(|i| self.records.get(i))
    }

    /// Record a non-fatal warning, dropping the oldest past the cap.
    pub fn push_warning(&mut self, message: String) {
        if self.warnings.len() >= constants::MAX_WARNINGS {
            self.warnings.remove(0);
        }
        self.warnings.push(message);
    }

    // -------------------------------------------------------------------------
    // Filter bar actions
    // -------------------------------------------------------------------------

    /// Switch the product quick-filter (`None` = All Requests).
    pub fn select_product(&mut self, product: Option<ProductKey>) {
        match self
            .composer
            .select_product(&mut self.report, product.as_ref())
        {
            Ok(SwitchOutcome::Unchanged) => {}
            Ok(SwitchOutcome::Switched(report)) => {
                let failures: Vec<String> = report.errors().map(|e| e.to_string()).collect();
                if failures.is_empty() {
                    self.status_message = format!("Showing {}.", self.composer.button_label());
                } else {
                    self.status_message = format!(
                        "Switched to {} with {} problem(s): {}",
                        self.composer.button_label(),
                        failures.len(),
                        failures.join("; ")
                    );
                    for f in failures {
                        self.push_warning(format!("Quick-filter: {f}"));
                    }
                }
                self.apply_filters();
            }
            Err(e) => {
                self.status_message = e.to_string();
                self.push_warning(e.to_string());
            }
        }
    }

    /// Submit the add-filter form.
    pub fn save_draft(&mut self) {
        match self.composer.save_draft(&mut self.report) {
            Ok(filter) => self.status_message = format!("Added filter: {filter}"),
            Err(e) => {
                self.status_message = format!("Filter not added: {e}");
                self.push_warning(self.status_message.clone());
            }
        }
        self.apply_filters();
    }

    /// Chip removal control.
    pub fn remove_chip(&mut self, filter: &FilterItem) {
        match self.composer.remove_chip(&mut self.report, filter) {
            Ok(()) => self.status_message = format!("Removed filter: {filter}"),
            Err(e) => {
                self.status_message = format!("Filter not removed: {e}");
                self.push_warning(self.status_message.clone());
            }
        }
        self.apply_filters();
    }

    /// Date-picker change.
    pub fn change_date_range(&mut self, range: DateRange) {
        self.composer.change_date_range(&mut self.report, range);
        self.apply_filters();
    }

    /// Apply a relative date preset as of `now`.
    pub fn apply_preset(&mut self, preset: &DatePreset, now: DateTime<Utc>) {
        let range = preset.range_at(now);
        self.date_input = range.clone();
        self.change_date_range(range);
        self.status_message = format!("Date range: {}", preset.text);
    }

    /// Remove every filter, then let the composer drop a stale quick-filter.
    pub fn clear_filters(&mut self) {
        self.report.clear();
        if self.composer.reconcile(self.report.filters()) {
            tracing::debug!("Quick-filter selection reset after clearing filters");
        }
        self.apply_filters();
        self.status_message = "Filters cleared.".to_string();
    }

    /// Backend WHERE clause for the current filters and date range.
    pub fn where_clause(&self) -> String {
        query::where_clause(self.report.filters(), self.report.date_range())
    }

    // -------------------------------------------------------------------------
    // Request log
    // -------------------------------------------------------------------------

    /// Load a request log, replacing the current records.
    ///
    /// Filters and date range are kept. Returns the number of records loaded.
    pub fn open_request_log(&mut self, path: &Path) -> Result<usize> {
        let loaded = requests::load_requests(path)?;
        let count = loaded.records.len();

        for e in loaded.errors {
            self.push_warning(e.to_string());
        }
        if loaded.skipped_lines > constants::MAX_REQUEST_LOG_ERRORS {
            self.push_warning(format!(
                "{} further malformed lines were skipped without detail.",
                loaded.skipped_lines - constants::MAX_REQUEST_LOG_ERRORS
            ));
        }

        self.records = loaded.records;
        self.request_path = Some(path.to_path_buf());
        self.selected_record_index = None;
        self.apply_filters();
        self.status_message = format!(
            "Loaded {count} requests from {} ({} match).",
            path.display(),
            self.filtered_indices.len()
        );
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ProductCatalog;
    use crate::core::composer::ChipMode;
    use crate::core::model::Compare;

    fn state() -> AppState {
        AppState::new(
            FilterComposer::new(ProductCatalog::builtin(), ChipMode::Origin),
            DateRange::default(),
            false,
        )
    }

    #[test]
    fn test_sink_rejects_duplicates() {
        let mut filters = ReportFilters::default();
        let f = FilterItem::manual("request.host", Compare::Is, "a.example.co");
        filters.add_filter(&f).unwrap();
        assert!(matches!(
            filters.add_filter(&f),
            Err(FilterChangeError::Duplicate { .. })
        ));
        assert_eq!(filters.filters().len(), 1);
    }

    #[test]
    fn test_sink_remove_missing() {
        let mut filters = ReportFilters::default();
        let f = FilterItem::manual("request.host", Compare::Is, "a.example.co");
        assert!(matches!(
            filters.remove_filter(&f),
            Err(FilterChangeError::NotFound { .. })
        ));
    }

    #[test]
    fn test_quick_filter_switch_updates_filter_list() {
        let mut s = state();
        s.select_product(Some("storage".into()));
        s.select_product(Some("auth".into()));
        let values: Vec<&str> = s.report.filters().iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["/auth"]);
        assert!(s.warnings.is_empty());
    }

    #[test]
    fn test_switch_after_external_clear_reports_failed_removal() {
        let mut s = state();
        s.select_product(Some("rest".into()));
        // Parent drops the list without telling the composer.
        s.report.clear();
        s.select_product(Some("graphql".into()));
        assert_eq!(s.warnings.len(), 1);
        assert!(s.warnings[0].contains("not active"));
        assert_eq!(s.report.filters().len(), 1);
        assert_eq!(s.composer.button_label(), "GraphQL");
    }

    #[test]
    fn test_clear_filters_reconciles_selection() {
        let mut s = state();
        s.select_product(Some("rest".into()));
        s.clear_filters();
        assert!(s.composer.selected_product().is_none());
        assert!(s.report.filters().is_empty());
    }

    #[test]
    fn test_duplicate_manual_filter_surfaces_warning() {
        let mut s = state();
        s.composer.set_draft_value("/x");
        s.save_draft();
        s.composer.set_draft_value("/x");
        s.save_draft();
        assert_eq!(s.report.filters().len(), 1);
        assert_eq!(s.warnings.len(), 1);
        assert_eq!(s.composer.draft().value, "");
    }

    #[test]
    fn test_unknown_product_is_a_warning() {
        let mut s = state();
        s.select_product(Some("billing".into()));
        assert_eq!(s.warnings, vec!["Unknown product filter 'billing'".to_string()]);
    }

    #[test]
    fn test_warnings_are_bounded() {
        let mut s = state();
        for i in 0..constants::MAX_WARNINGS + 5 {
            s.push_warning(format!("w{i}"));
        }
        assert_eq!(s.warnings.len(), constants::MAX_WARNINGS);
        assert_eq!(s.warnings[0], "w5");
    }

    #[test]
    fn test_selection_follows_record_across_filter_changes() {
        let mut s = state();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.jsonl");
        std::fs::write(
            &path,
            concat!(
                r#"{"timestamp":"2026-10-01T10:00:00Z","request":{"host":"a.example.co","path":"/rest/v1/a"},"response":{"status_code":200}}"#,
                "\n",
                r#"{"timestamp":"2026-10-01T11:00:00Z","request":{"host":"a.example.co","path":"/auth/v1/b"},"response":{"status_code":200}}"#,
                "\n",
                r#"{"timestamp":"2026-10-01T12:00:00Z","request":{"host":"a.example.co","path":"/auth/v1/c"},"response":{"status_code":500}}"#,
                "\n",
            ),
        )
        .unwrap();
        s.open_request_log(&path).unwrap();

        // Third row selected; an auth filter moves it to the second row.
        s.selected_record_index = Some(2);
        s.select_product(Some("auth".into()));
        assert_eq!(s.filtered_indices, vec![1, 2]);
        assert_eq!(
            s.selected_record().map(|r| r.request.path.as_str()),
            Some("/auth/v1/c")
        );

        // A filter that hides the selected record clears the selection.
        s.composer.set_draft_key("response.status_code").unwrap();
        s.composer.set_draft_value("200");
        s.save_draft();
        assert_eq!(s.filtered_indices, vec![1]);
        assert!(s.selected_record().is_none());
    }
}
