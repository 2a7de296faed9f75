use newsdesk_core::{
    update, AppState, Effect, FileDetails, FileRecord, Msg, Page, Severity, BULK_DOWNLOAD_STAGGER,
};
use pretty_assertions::assert_eq;

fn record(name: &str) -> FileRecord {
    FileRecord {
        file_name: name.to_string(),
        size_label: "10 KB".to_string(),
        modified_label: "2024-05-01 10:00:00".to_string(),
        evaluated: false,
    }
}

fn results_with(names: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(Page::Results));
    let (state, _) = update(
        state,
        Msg::FilesLoaded(Ok(names.iter().map(|n| record(n)).collect())),
    );
    state
}

#[test]
fn bulk_download_emits_selected_files_in_click_order() {
    let state = results_with(&["a.csv", "b.csv", "c.csv"]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    let (state, _) = update(state, Msg::BulkFileToggled("c.csv".to_string()));
    let (state, _) = update(state, Msg::BulkFileToggled("a.csv".to_string()));
    assert_eq!(state.view().results.bulk.selected_count, 2);

    let (state, effects) = update(state, Msg::BulkDownloadConfirmed);

    assert_eq!(
        effects,
        vec![Effect::Download {
            file_names: vec!["c.csv".to_string(), "a.csv".to_string()],
            stagger: BULK_DOWNLOAD_STAGGER,
        }]
    );
    assert!(!state.view().results.bulk.open);
}

#[test]
fn bulk_confirm_with_empty_selection_does_nothing() {
    let state = results_with(&["a.csv"]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    let (state, effects) = update(state, Msg::BulkDownloadConfirmed);

    assert!(effects.is_empty());
    assert!(state.view().results.bulk.open);
}

#[test]
fn select_all_toggles_between_all_and_none() {
    let state = results_with(&["a.csv", "b.csv"]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    let (state, _) = update(state, Msg::BulkSelectAllToggled);
    let bulk = state.view().results.bulk;
    assert!(bulk.all_selected);
    assert!(bulk.entries.iter().all(|entry| entry.checked));

    let (state, _) = update(state, Msg::BulkSelectAllToggled);
    assert_eq!(state.view().results.bulk.selected_count, 0);
}

#[test]
fn reload_drops_selected_files_that_disappeared() {
    let state = results_with(&["a.csv", "b.csv"]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    let (state, _) = update(state, Msg::BulkFileToggled("b.csv".to_string()));
    let (state, _) = update(state, Msg::BulkFileToggled("a.csv".to_string()));

    let (state, effects) = update(state, Msg::RefreshFiles);
    assert_eq!(effects, vec![Effect::ListFiles]);
    let (state, _) = update(state, Msg::FilesLoaded(Ok(vec![record("a.csv")])));

    let bulk = state.view().results.bulk;
    assert_eq!(bulk.selected_count, 1);
    assert!(bulk.all_selected);

    let (_, effects) = update(state, Msg::BulkDownloadConfirmed);
    assert_eq!(
        effects,
        vec![Effect::Download {
            file_names: vec!["a.csv".to_string()],
            stagger: BULK_DOWNLOAD_STAGGER,
        }]
    );
}

#[test]
fn reopening_dialog_resets_selection() {
    let state = results_with(&["a.csv", "b.csv"]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    let (state, _) = update(state, Msg::BulkFileToggled("a.csv".to_string()));
    let (state, _) = update(state, Msg::BulkFileToggled("a.csv".to_string()));
    let (state, _) = update(state, Msg::BulkFileToggled("missing.csv".to_string()));
    assert_eq!(state.view().results.bulk.selected_count, 0);

    let (state, _) = update(state, Msg::BulkFileToggled("b.csv".to_string()));
    let (state, _) = update(state, Msg::BulkDialogClosed);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    assert_eq!(state.view().results.bulk.selected_count, 0);
}

#[test]
fn bulk_dialog_needs_files() {
    let state = results_with(&[]);
    let (state, _) = update(state, Msg::BulkDialogOpened);
    assert!(!state.view().results.bulk.open);
    assert!(!state.view().results.bulk.can_open);
}

#[test]
fn single_download_requires_selection() {
    let state = results_with(&["a.csv"]);
    let (state, effects) = update(state, Msg::DownloadSelectedClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().notice.expect("error").severity, Severity::Error);

    let (state, _) = update(state, Msg::FileSelected("a.csv".to_string()));
    let (state, _) = update(
        state,
        Msg::FileDetailsLoaded {
            file_name: "a.csv".to_string(),
            result: Ok(FileDetails::default()),
        },
    );
    let (state, effects) = update(state, Msg::DownloadSelectedClicked);
    assert_eq!(
        effects,
        vec![Effect::Download {
            file_names: vec!["a.csv".to_string()],
            stagger: BULK_DOWNLOAD_STAGGER,
        }]
    );
    assert_eq!(state.view().notice.expect("info").severity, Severity::Info);
}

#[test]
fn download_outcomes_are_reported() {
    let state = results_with(&["a.csv"]);
    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            file_name: "a.csv".to_string(),
            result: Ok("/tmp/downloads/a.csv".to_string()),
        },
    );
    let notice = state.view().notice.expect("success");
    assert_eq!(notice.severity, Severity::Success);
    assert!(notice.message.contains("/tmp/downloads/a.csv"));

    let (state, _) = update(
        state,
        Msg::DownloadFinished {
            file_name: "a.csv".to_string(),
            result: Err("http status 404".to_string()),
        },
    );
    assert_eq!(state.view().notice.expect("error").severity, Severity::Error);
}
