// ReportBar - core/composer.rs
//
// Filter composer: the state behind the report filter bar.
//
// Holds only view-local state (selected product quick-filter, the draft
// manual filter, whether the add-filter popover is open). Every change to
// the active filter list or the date range is requested through a
// `FilterSink` owned by the caller; the composer never holds the list.
//
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::catalog::ProductCatalog;
use crate::core::model::{Compare, DateRange, FilterItem, FilterOrigin, ProductFilter, ProductKey};
use crate::util::constants;
use crate::util::error::{ComposerError, FilterChangeError};

/// Owner of the active filter list and date range.
///
/// Calls complete before returning; a quick-filter switch therefore always
/// finishes its remove before its add starts. Sinks that forward changes to
/// a backend report refusals as `FilterChangeError::Rejected`.
pub trait FilterSink {
    /// Add `filter` to the active list.
    fn add_filter(&mut self, filter: &FilterItem) -> Result<(), FilterChangeError>;

    /// Remove `filter` (compared including its origin) from the active list.
    fn remove_filter(&mut self, filter: &FilterItem) -> Result<(), FilterChangeError>;

    /// Replace the date range. The range is not interpreted by the composer.
    fn change_date_range(&mut self, range: DateRange);
}

/// How chips belonging to the selected quick-filter are hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChipMode {
    /// Hide only items tagged with the selected product's origin.
    #[default]
    Origin,
    /// Hide every item whose value equals the selected product's
    /// `filter_value` OR whose key equals its `filter_key`.
    Signature,
}

impl ChipMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "origin" => Some(Self::Origin),
            "signature" => Some(Self::Signature),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Origin => "origin",
            Self::Signature => "signature",
        }
    }
}

/// The manual filter being composed in the add-filter popover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub key: String,
    pub compare: Compare,
    pub value: String,
}

impl Draft {
    fn to_filter(&self) -> FilterItem {
        FilterItem::manual(self.key.clone(), self.compare, self.value.clone())
    }
}

/// Per-step results of a quick-filter switch.
///
/// `removal` is `None` when no product was previously selected and
/// `addition` is `None` when switching to "All Requests".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchReport {
    pub previous: Option<ProductKey>,
    pub selected: Option<ProductKey>,
    pub removal: Option<Result<(), FilterChangeError>>,
    pub addition: Option<Result<(), FilterChangeError>>,
}

impl SwitchReport {
    /// Failures of either step, removal first.
    pub fn errors(&self) -> impl Iterator<Item = &FilterChangeError> {
        [self.removal.as_ref(), self.addition.as_ref()]
            .into_iter()
            .flatten()
            .filter_map(|r| r.as_ref().err())
    }

    /// True when every attempted step succeeded.
    pub fn is_ok(&self) -> bool {
        self.errors().next().is_none()
    }
}

/// Result of selecting a product quick-filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The requested product was already selected; no calls were made.
    Unchanged,
    Switched(SwitchReport),
}

/// One row of the product quick-filter menu.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry<'a> {
    /// `None` for the "All Requests" row.
    pub product: Option<&'a ProductFilter>,
    pub selected: bool,
    pub enabled: bool,
}

impl<'a> MenuEntry<'a> {
    pub fn label(&self) -> &'a str {
        self.product
            .map(|p| p.label.as_str())
            .unwrap_or(constants::ALL_REQUESTS_LABEL)
    }

    pub fn description(&self) -> &'a str {
        self.product.map(|p| p.description.as_str()).unwrap_or("")
    }

    pub fn key(&self) -> Option<&'a ProductKey> {
        self.product.map(|p| &p.key)
    }
}

/// View-local state of the report filter bar.
#[derive(Debug, Clone)]
pub struct FilterComposer {
    catalog: ProductCatalog,
    attribute_keys: Vec<String>,
    chip_mode: ChipMode,
    selected: Option<ProductKey>,
    draft: Draft,
    adder_open: bool,
}

impl FilterComposer {
    /// Create a composer offering the default attribute allow-list.
    pub fn new(catalog: ProductCatalog, chip_mode: ChipMode) -> Self {
        let attribute_keys: Vec<String> =
            constants::FILTER_KEYS.iter().map(|k| k.to_string()).collect();
        let draft = default_draft(&attribute_keys);
        Self {
            catalog,
            attribute_keys,
            chip_mode,
            selected: None,
            draft,
            adder_open: false,
        }
    }

    /// Replace the attribute allow-list. An empty list is ignored.
    pub fn with_attribute_keys(mut self, keys: Vec<String>) -> Self {
        if keys.is_empty() {
            tracing::warn!("Ignoring empty attribute allow-list");
            return self;
        }
        self.attribute_keys = keys;
        self.draft = default_draft(&self.attribute_keys);
        self
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }

    pub fn attribute_keys(&self) -> &[String] {
        &self.attribute_keys
    }

    pub fn chip_mode(&self) -> ChipMode {
        self.chip_mode
    }

    pub fn set_chip_mode(&mut self, mode: ChipMode) {
        self.chip_mode = mode;
    }

    // -------------------------------------------------------------------------
    // Product quick-filters
    // -------------------------------------------------------------------------

    /// The selected quick-filter, or `None` for "All Requests".
    pub fn selected_product(&self) -> Option<&ProductFilter> {
        self.selected.as_ref().and_then(|k| self.catalog.get(k))
    }

    /// Text of the menu button.
    pub fn button_label(&self) -> &str {
        self.selected_product()
            .map(|p| p.label.as_str())
            .unwrap_or(constants::ALL_REQUESTS_LABEL)
    }

    /// "All Requests" followed by every enabled product.
    /// The selected product's row is disabled.
    pub fn product_menu(&self) -> Vec<MenuEntry<'_>> {
        let mut entries = Vec::with_capacity(self.catalog.len() + 1);
        entries.push(MenuEntry {
            product: None,
            selected: self.selected.is_none(),
            enabled: true,
        });
        for p in self.catalog.enabled() {
            let selected = self.selected.as_ref() == Some(&p.key);
            entries.push(MenuEntry {
                product: Some(p),
                selected,
                enabled: !selected,
            });
        }
        entries
    }

    /// Switch the product quick-filter to `product` (`None` = All Requests).
    ///
    /// Removes the previous product's predicate, then adds the new one. Both
    /// steps are attempted even if the first fails; there is no rollback.
    /// The new selection is recorded regardless of the step results.
    pub fn select_product<S: FilterSink + ?Sized>(
        &mut self,
        sink: &mut S,
        product: Option<&ProductKey>,
    ) -> Result<SwitchOutcome, ComposerError> {
        if self.selected.as_ref() == product {
            tracing::debug!(product = ?product, "Quick-filter already selected");
            return Ok(SwitchOutcome::Unchanged);
        }

        let next = match product {
            Some(key) => Some(
                self.catalog
                    .get_enabled(key)
                    .ok_or_else(|| ComposerError::UnknownProduct {
                        key: key.to_string(),
                    })?
                    .clone(),
            ),
            None => None,
        };

        let previous = self.selected_product().cloned();

        let removal = previous.as_ref().map(|q| {
            let predicate = q.predicate();
            tracing::debug!(product = %q.key, filter = %predicate, "Removing quick-filter");
            let result = sink.remove_filter(&predicate);
            if let Err(ref e) = result {
                tracing::warn!(product = %q.key, error = %e, "Quick-filter removal failed");
            }
            result
        });

        let addition = next.as_ref().map(|p| {
            let predicate = p.predicate();
            tracing::debug!(product = %p.key, filter = %predicate, "Adding quick-filter");
            let result = sink.add_filter(&predicate);
            if let Err(ref e) = result {
                tracing::warn!(product = %p.key, error = %e, "Quick-filter addition failed");
            }
            result
        });

        self.selected = next.map(|p| p.key);

        tracing::info!(
            from = previous.as_ref().map(|p| p.key.as_str()).unwrap_or("all"),
            to = self.selected.as_ref().map(|k| k.as_str()).unwrap_or("all"),
            "Quick-filter switched"
        );

        Ok(SwitchOutcome::Switched(SwitchReport {
            previous: previous.map(|p| p.key),
            selected: self.selected.clone(),
            removal,
            addition,
        }))
    }

    /// Forget the selected quick-filter if its predicate is no longer in
    /// `filters`. Issues no sink calls. Returns true if the selection changed.
    pub fn reconcile(&mut self, filters: &[FilterItem]) -> bool {
        let Some(product) = self.selected_product() else {
            return false;
        };
        let predicate = product.predicate();
        if filters.contains(&predicate) {
            return false;
        }
        tracing::debug!(product = %product.key, "Quick-filter predicate gone; resetting selection");
        self.selected = None;
        true
    }

    // -------------------------------------------------------------------------
    // Chips
    // -------------------------------------------------------------------------

    /// Filters to render as chips.
    pub fn visible_chips<'f>(&self, filters: &'f [FilterItem]) -> Vec<&'f FilterItem> {
        let Some(product) = self.selected_product() else {
            return filters.iter().collect();
        };
        match self.chip_mode {
            ChipMode::Origin => filters
                .iter()
                .filter(|f| !matches!(&f.origin, FilterOrigin::QuickFilter(k) if *k == product.key))
                .collect(),
            ChipMode::Signature => filters
                .iter()
                .filter(|f| f.value != product.filter_value && f.key != product.filter_key)
                .collect(),
        }
    }

    /// Chip removal control: request removal of exactly `filter`.
    pub fn remove_chip<S: FilterSink + ?Sized>(
        &self,
        sink: &mut S,
        filter: &FilterItem,
    ) -> Result<(), FilterChangeError> {
        tracing::debug!(filter = %filter, "Removing filter chip");
        sink.remove_filter(filter)
    }

    // -------------------------------------------------------------------------
    // Add-filter popover
    // -------------------------------------------------------------------------

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Select the draft's attribute. Only allow-listed keys are accepted.
    pub fn set_draft_key(&mut self, key: &str) -> Result<(), ComposerError> {
        if !self.attribute_keys.iter().any(|k| k == key) {
            return Err(ComposerError::UnknownAttribute {
                key: key.to_string(),
            });
        }
        self.draft.key = key.to_string();
        Ok(())
    }

    pub fn set_draft_compare(&mut self, compare: Compare) {
        self.draft.compare = compare;
    }

    pub fn set_draft_value(&mut self, value: impl Into<String>) {
        self.draft.value = value.into();
    }

    /// Mutable access to the free-text value for text-edit widgets.
    pub fn draft_value_mut(&mut self) -> &mut String {
        &mut self.draft.value
    }

    pub fn is_adder_open(&self) -> bool {
        self.adder_open
    }

    pub fn open_adder(&mut self) {
        self.adder_open = true;
    }

    /// Dismiss the popover, discarding the draft.
    pub fn cancel_draft(&mut self) {
        self.adder_open = false;
        self.draft = default_draft(&self.attribute_keys);
    }

    /// Submit the draft.
    ///
    /// The popover closes and the draft resets whether or not the sink
    /// accepts the filter; the sink's answer is returned to the caller.
    pub fn save_draft<S: FilterSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<FilterItem, FilterChangeError> {
        let filter = self.draft.to_filter();
        tracing::debug!(filter = %filter, "Saving manual filter");
        let result = sink.add_filter(&filter);
        self.cancel_draft();
        if let Err(ref e) = result {
            tracing::warn!(error = %e, "Manual filter was not added");
        }
        result.map(|()| filter)
    }

    // -------------------------------------------------------------------------
    // Date range
    // -------------------------------------------------------------------------

    /// Forward a date-picker change verbatim.
    pub fn change_date_range<S: FilterSink + ?Sized>(&self, sink: &mut S, range: DateRange) {
        tracing::debug!(from = %range.from, to = %range.to, "Date range changed");
        sink.change_date_range(range);
    }
}

fn default_draft(attribute_keys: &[String]) -> Draft {
    Draft {
        key: attribute_keys
            .first()
            .cloned()
            .unwrap_or_else(|| constants::FILTER_KEYS[0].to_string()),
        compare: Compare::Is,
        value: String::new(),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Add(FilterItem),
        Remove(FilterItem),
        Range(DateRange),
    }

    /// Records every call; optionally fails removals.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        fail_removals: bool,
    }

    impl FilterSink for Recorder {
        fn add_filter(&mut self, filter: &FilterItem) -> Result<(), FilterChangeError> {
            self.calls.push(Call::Add(filter.clone()));
            Ok(())
        }

        fn remove_filter(&mut self, filter: &FilterItem) -> Result<(), FilterChangeError> {
            self.calls.push(Call::Remove(filter.clone()));
            if self.fail_removals {
                return Err(FilterChangeError::NotFound {
                    filter: filter.to_string(),
                });
            }
            Ok(())
        }

        fn change_date_range(&mut self, range: DateRange) {
            self.calls.push(Call::Range(range));
        }
    }

    fn composer(mode: ChipMode) -> FilterComposer {
        FilterComposer::new(ProductCatalog::builtin(), mode)
    }

    fn quick(key: &str, value: &str) -> FilterItem {
        FilterItem {
            key: "request.path".to_string(),
            compare: Compare::Matches,
            value: value.to_string(),
            origin: FilterOrigin::QuickFilter(ProductKey::from(key)),
        }
    }

    #[test]
    fn test_switch_removes_previous_then_adds_next() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"rest".into())).unwrap();
        sink.calls.clear();

        c.select_product(&mut sink, Some(&"graphql".into())).unwrap();
        assert_eq!(
            sink.calls,
            vec![
                Call::Remove(quick("rest", "/rest")),
                Call::Add(quick("graphql", "/graphql")),
            ]
        );
        assert_eq!(c.button_label(), "GraphQL");
    }

    #[test]
    fn test_switch_to_all_requests_only_removes() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"auth".into())).unwrap();
        sink.calls.clear();

        let outcome = c.select_product(&mut sink, None).unwrap();
        assert_eq!(sink.calls, vec![Call::Remove(quick("auth", "/auth"))]);
        assert!(c.selected_product().is_none());
        assert_eq!(c.button_label(), "All Requests");
        match outcome {
            SwitchOutcome::Switched(report) => {
                assert!(report.addition.is_none());
                assert!(report.is_ok());
            }
            SwitchOutcome::Unchanged => panic!("expected a switch"),
        }
    }

    #[test]
    fn test_reselecting_is_a_no_op() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"storage".into())).unwrap();
        sink.calls.clear();

        let outcome = c.select_product(&mut sink, Some(&"storage".into())).unwrap();
        assert_eq!(outcome, SwitchOutcome::Unchanged);
        assert!(sink.calls.is_empty());

        let storage_row = c
            .product_menu()
            .into_iter()
            .find(|e| e.key().map(|k| k.as_str()) == Some("storage"))
            .unwrap();
        assert!(storage_row.selected);
        assert!(!storage_row.enabled);
    }

    #[test]
    fn test_all_requests_when_nothing_selected_is_a_no_op() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        assert_eq!(c.select_product(&mut sink, None).unwrap(), SwitchOutcome::Unchanged);
        assert!(sink.calls.is_empty());
    }

    #[test]
    fn test_unknown_or_disabled_product_rejected_without_calls() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        let err = c.select_product(&mut sink, Some(&"functions".into())).unwrap_err();
        assert_eq!(
            err,
            ComposerError::UnknownProduct {
                key: "functions".to_string()
            }
        );
        assert!(sink.calls.is_empty());
        assert!(c.selected_product().is_none());
    }

    #[test]
    fn test_failed_removal_still_attempts_add() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"rest".into())).unwrap();
        sink.fail_removals = true;
        sink.calls.clear();

        let outcome = c.select_product(&mut sink, Some(&"auth".into())).unwrap();
        assert_eq!(sink.calls.len(), 2);
        assert_eq!(sink.calls[1], Call::Add(quick("auth", "/auth")));
        let SwitchOutcome::Switched(report) = outcome else {
            panic!("expected a switch");
        };
        assert!(!report.is_ok());
        assert_eq!(report.errors().count(), 1);
        assert_eq!(report.selected, Some(ProductKey::from("auth")));
    }

    #[test]
    fn test_menu_lists_all_requests_then_products() {
        let c = composer(ChipMode::Origin);
        let labels: Vec<&str> = c.product_menu().iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            vec!["All Requests", "REST", "Auth", "Storage", "Realtime", "GraphQL"]
        );
        assert!(c.product_menu()[0].selected);
    }

    #[test]
    fn test_signature_mode_hides_key_or_value_matches() {
        let mut c = composer(ChipMode::Signature);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"storage".into())).unwrap();

        let filters = vec![
            quick("storage", "/storage"),
            FilterItem::manual("request.path", Compare::Is, "/other"),
            FilterItem::manual("request.host", Compare::Is, "/storage"),
            FilterItem::manual("request.host", Compare::Matches, "example.com"),
        ];
        let visible = c.visible_chips(&filters);
        assert_eq!(visible, vec![&filters[3]]);
    }

    #[test]
    fn test_origin_mode_hides_only_selected_quick_filter() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"storage".into())).unwrap();

        let filters = vec![
            quick("storage", "/storage"),
            quick("rest", "/rest"),
            FilterItem::manual("request.path", Compare::Matches, "/storage"),
        ];
        let visible = c.visible_chips(&filters);
        assert_eq!(visible, vec![&filters[1], &filters[2]]);
    }

    #[test]
    fn test_no_selection_shows_every_chip() {
        for mode in [ChipMode::Origin, ChipMode::Signature] {
            let c = composer(mode);
            let filters = vec![
                quick("rest", "/rest"),
                FilterItem::manual("request.path", Compare::Is, "/rest"),
            ];
            assert_eq!(c.visible_chips(&filters).len(), 2);
        }
    }

    #[test]
    fn test_remove_chip_removes_exactly_that_item() {
        let c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        let chip = FilterItem::manual("request.host", Compare::Matches, "example.com");
        c.remove_chip(&mut sink, &chip).unwrap();
        assert_eq!(sink.calls, vec![Call::Remove(chip)]);
    }

    #[test]
    fn test_storage_then_auth_sequence() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        assert!(c.selected_product().is_none());

        c.select_product(&mut sink, Some(&"storage".into())).unwrap();
        assert_eq!(sink.calls, vec![Call::Add(quick("storage", "/storage"))]);

        c.select_product(&mut sink, Some(&"auth".into())).unwrap();
        assert_eq!(
            sink.calls[1..],
            [
                Call::Remove(quick("storage", "/storage")),
                Call::Add(quick("auth", "/auth")),
            ]
        );
    }

    #[test]
    fn test_save_draft_adds_once_and_resets() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.open_adder();
        c.set_draft_key("response.status_code").unwrap();
        c.set_draft_compare(Compare::Is);
        c.set_draft_value("500");

        let saved = c.save_draft(&mut sink).unwrap();
        assert_eq!(
            sink.calls,
            vec![Call::Add(FilterItem::manual("response.status_code", Compare::Is, "500"))]
        );
        assert_eq!(saved.value, "500");
        assert_eq!(
            c.draft(),
            &Draft {
                key: "request.path".to_string(),
                compare: Compare::Is,
                value: String::new(),
            }
        );
        assert!(!c.is_adder_open());
    }

    #[test]
    fn test_empty_value_is_submittable() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.save_draft(&mut sink).unwrap();
        assert_eq!(
            sink.calls,
            vec![Call::Add(FilterItem::manual("request.path", Compare::Is, ""))]
        );
    }

    #[test]
    fn test_unknown_attribute_rejected() {
        let mut c = composer(ChipMode::Origin);
        assert!(c.set_draft_key("request.body").is_err());
        assert_eq!(c.draft().key, "request.path");
    }

    #[test]
    fn test_cancel_resets_draft() {
        let mut c = composer(ChipMode::Origin);
        c.open_adder();
        c.set_draft_value("abc");
        c.set_draft_compare(Compare::Matches);
        c.cancel_draft();
        assert!(!c.is_adder_open());
        assert_eq!(c.draft().value, "");
        assert_eq!(c.draft().compare, Compare::Is);
    }

    #[test]
    fn test_date_range_forwarded_verbatim() {
        let c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        let range = DateRange::new("not a date", "");
        c.change_date_range(&mut sink, range.clone());
        assert_eq!(sink.calls, vec![Call::Range(range)]);
    }

    #[test]
    fn test_reconcile_resets_stale_selection() {
        let mut c = composer(ChipMode::Origin);
        let mut sink = Recorder::default();
        c.select_product(&mut sink, Some(&"rest".into())).unwrap();

        assert!(!c.reconcile(&[quick("rest", "/rest")]));
        assert!(c.reconcile(&[]));
        assert!(c.selected_product().is_none());
    }

    #[test]
    fn test_custom_attribute_keys() {
        let c = composer(ChipMode::Origin)
            .with_attribute_keys(vec!["request.host".to_string(), "request.method".to_string()]);
        assert_eq!(c.draft().key, "request.host");
        assert_eq!(c.attribute_keys().len(), 2);
    }
}
