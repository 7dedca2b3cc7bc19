//! Quality-report storage and classification.

use std::collections::BTreeMap;

use dqwatch_types::{QReport, QStatus};

/// The set of quality reports attached to one element, with classified
/// views.
///
/// Reports are keyed by test name: inserting a report for a name that
/// already exists replaces the earlier verdict, including moving it
/// between views. The warnings/errors/others views are rebuilt in
/// O(number of reports) whenever the set changes; `Ok` reports appear in
/// no view but stay retrievable by name.
#[derive(Debug, Default)]
pub struct ReportSet {
    reports: BTreeMap<String, QReport>,
    warnings: Vec<String>,
    errors: Vec<String>,
    others: Vec<String>,
}

impl ReportSet {
    /// Create an empty report set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one report.
    pub fn insert(&mut self, report: QReport) {
        self.reports.insert(report.test_name.clone(), report);
        self.rebuild();
    }

    /// Insert or replace a batch of reports, rebuilding the views once.
    pub fn extend(&mut self, reports: impl IntoIterator<Item = QReport>) {
        for report in reports {
            self.reports.insert(report.test_name.clone(), report);
        }
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.warnings.clear();
        self.errors.clear();
        self.others.clear();
        for (name, report) in &self.reports {
            match report.status {
                QStatus::Error => self.errors.push(name.clone()),
                QStatus::Warning => self.warnings.push(name.clone()),
                QStatus::Ok => {}
                _ => self.others.push(name.clone()),
            }
        }
    }

    /// Look up the report for one test. `None` if the test never ran.
    pub fn get(&self, name: &str) -> Option<&QReport> {
        self.reports.get(name)
    }

    /// True if a report exists for the named test.
    pub fn contains(&self, name: &str) -> bool {
        self.reports.contains_key(name)
    }

    /// Number of distinct tests with a report.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// True if no test has run.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// All reports, including `Ok` ones.
    pub fn all(&self) -> Vec<QReport> {
        self.reports.values().cloned().collect()
    }

    /// Reports in the warnings view.
    pub fn warnings(&self) -> Vec<QReport> {
        self.select(&self.warnings)
    }

    /// Reports in the errors view.
    pub fn errors(&self) -> Vec<QReport> {
        self.select(&self.errors)
    }

    /// Reports in the "other" view (non-ok, non-warning, non-error).
    pub fn others(&self) -> Vec<QReport> {
        self.select(&self.others)
    }

    /// True if the warnings view is non-empty.
    pub fn has_warning(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// True if the errors view is non-empty.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True if the "other" view is non-empty.
    pub fn has_other(&self) -> bool {
        !self.others.is_empty()
    }

    /// Drop every report and view.
    pub fn clear(&mut self) {
        self.reports.clear();
        self.warnings.clear();
        self.errors.clear();
        self.others.clear();
    }

    fn select(&self, names: &[String]) -> Vec<QReport> {
        names
            .iter()
            .filter_map(|name| self.reports.get(name).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, status: QStatus) -> QReport {
        QReport::new(name, status, status.symbol())
    }

    #[test]
    fn insert_classifies_by_status() {
        let mut set = ReportSet::new();
        set.insert(report("a", QStatus::Error));
        set.insert(report("b", QStatus::Warning));
        set.insert(report("c", QStatus::Ok));
        set.insert(report("d", QStatus::InsufficientData));

        assert_eq!(set.len(), 4);
        assert_eq!(set.errors().len(), 1);
        assert_eq!(set.warnings().len(), 1);
        assert_eq!(set.others().len(), 1);
        assert!(set.has_error());
        assert!(set.has_warning());
        assert!(set.has_other());
    }

    #[test]
    fn ok_reports_stay_retrievable_but_unclassified() {
        let mut set = ReportSet::new();
        set.insert(report("meanCheck", QStatus::Ok));

        assert!(set.get("meanCheck").is_some());
        assert_eq!(set.all().len(), 1);
        assert!(!set.has_error());
        assert!(!set.has_warning());
        assert!(!set.has_other());
    }

    #[test]
    fn reinsert_replaces_and_moves_between_views() {
        let mut set = ReportSet::new();
        set.insert(report("rangeCheck", QStatus::Error));
        assert!(set.has_error());

        set.insert(report("rangeCheck", QStatus::Ok));
        assert_eq!(set.len(), 1);
        assert!(!set.has_error());
        assert_eq!(set.get("rangeCheck").unwrap().status, QStatus::Ok);
    }

    #[test]
    fn unknown_test_lookup_is_none() {
        let set = ReportSet::new();
        assert!(set.get("neverRan").is_none());
        assert!(!set.contains("neverRan"));
    }

    #[test]
    fn partition_invariant() {
        let statuses = [
            QStatus::Ok,
            QStatus::Warning,
            QStatus::Error,
            QStatus::Other,
            QStatus::Disabled,
            QStatus::InsufficientData,
            QStatus::Invalid,
            QStatus::DidNotRun,
        ];
        let mut set = ReportSet::new();
        for (i, status) in statuses.iter().enumerate() {
            set.insert(report(&format!("t{i}"), *status));
        }

        let classified = set.warnings().len() + set.errors().len() + set.others().len();
        let ok_count = set.all().iter().filter(|r| r.is_ok()).count();
        assert_eq!(classified + ok_count, set.len());

        // no report appears in two views
        for r in set.warnings() {
            assert!(!set.errors().iter().any(|e| e.test_name == r.test_name));
            assert!(!set.others().iter().any(|o| o.test_name == r.test_name));
        }
    }

    #[test]
    fn extend_rebuilds_once_with_final_verdicts() {
        let mut set = ReportSet::new();
        set.extend([
            report("a", QStatus::Error),
            report("b", QStatus::Ok),
            report("a", QStatus::Warning), // later entry wins
        ]);

        assert_eq!(set.len(), 2);
        assert!(!set.has_error());
        assert!(set.has_warning());
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = ReportSet::new();
        set.insert(report("a", QStatus::Error));
        set.clear();

        assert!(set.is_empty());
        assert!(!set.has_error());
        assert!(set.all().is_empty());
    }
}
