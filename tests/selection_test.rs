use catalog_browser::{CatalogStore, QueryEngine, SelectionTracker};

#[test]
fn test_replace_selection_is_idempotent() {
    let catalog = CatalogStore::bundled().unwrap();
    let mut tracker = SelectionTracker::new(&catalog);
    let chosen = ["PSY303", "AE101", "SOC1414", "BOGUS1"];

    let first_report = tracker.replace_selection(&chosen);
    let first = tracker.current().to_vec();

    let second_report = tracker.replace_selection(&chosen);
    let second = tracker.current().to_vec();

    assert_eq!(first, second);
    assert_eq!(first_report, second_report);
    assert_eq!(tracker.codes(), vec!["PSY303", "AE101", "SOC1414"]);
}

#[test]
fn test_unknown_code_is_skipped_and_order_kept() {
    let catalog = CatalogStore::bundled().unwrap();
    let mut tracker = SelectionTracker::new(&catalog);

    let report = tracker.replace_selection(&["BI202", "XX404", "AI101"]);

    assert_eq!(tracker.len(), 2);
    assert_eq!(tracker.codes(), vec!["BI202", "AI101"]);
    assert_eq!(tracker.current()[0].department, "Department of Bioinformatics");
    assert_eq!(tracker.current()[1].department, "Department of Artificial Intelligence");
    assert_eq!(report.resolved, 2);
    assert_eq!(report.unknown, vec!["XX404".to_string()]);
}

#[test]
fn test_picker_labels_round_trip() {
    let catalog = CatalogStore::bundled().unwrap();
    let options = QueryEngine::new(&catalog).picker_options();
    let chosen: Vec<String> = options
        .iter()
        .filter(|label| label.starts_with("SL"))
        .cloned()
        .collect();

    let mut tracker = SelectionTracker::new(&catalog);
    let report = tracker.replace_selection_from_labels(&chosen);

    assert_eq!(report.resolved, 14);
    assert!(report.unknown.is_empty());
    let labels: Vec<String> = tracker.current().iter().map(|e| e.picker_label()).collect();
    assert_eq!(labels, chosen);
}

#[test]
fn test_sessions_do_not_share_selection() {
    let catalog = CatalogStore::bundled().unwrap();
    let mut alice = SelectionTracker::new(&catalog);
    let mut bob = SelectionTracker::new(&catalog);

    alice.replace_selection(&["AE101"]);
    bob.replace_selection(&["AI101", "AI202"]);

    assert_eq!(alice.codes(), vec!["AE101"]);
    assert_eq!(bob.codes(), vec!["AI101", "AI202"]);
}

#[test]
fn test_selection_starts_empty() {
    let catalog = CatalogStore::bundled().unwrap();
    let tracker = SelectionTracker::new(&catalog);
    assert!(tracker.is_empty());
    assert!(tracker.current().is_empty());
    assert_eq!(tracker.total_credits(), 0);
}
