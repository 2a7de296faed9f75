use newsdesk_core::{
    update, AppState, Effect, EvaluationStats, EvaluationSummary, FileRecord, Msg, Page,
    Preferences, Secret, Severity,
};
use pretty_assertions::assert_eq;

fn ready_state(file: Option<&str>, api_key: &str) -> AppState {
    let (mut state, _) = update(AppState::new(), Msg::Navigate(Page::Relevance));
    (state, _) = update(state, Msg::FilesLoaded(Ok(Vec::new())));
    if let Some(file) = file {
        (state, _) = update(state, Msg::EvaluationFileChosen(file.to_string()));
    }
    let (state, _) = update(state, Msg::ApiKeyChanged(api_key.to_string()));
    state
}

#[test]
fn evaluate_without_file_reports_error_without_request() {
    let state = ready_state(None, "sk-test");
    let (state, effects) = update(state, Msg::EvaluateClicked);

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("validation notice");
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.contains("Select a file"));
}

#[test]
fn evaluate_with_blank_api_key_reports_error_without_request() {
    let state = ready_state(Some("news.csv"), "   ");
    let (state, effects) = update(state, Msg::EvaluateClicked);

    assert!(effects.is_empty());
    assert!(state
        .view()
        .notice
        .expect("validation notice")
        .message
        .contains("API key"));
}

#[test]
fn evaluate_sends_file_key_and_model() {
    let state = ready_state(Some("news.csv"), " sk-test ");
    let (state, _) = update(state, Msg::ModelSelected("gpt-4".to_string()));
    let (state, effects) = update(state, Msg::EvaluateClicked);

    assert_eq!(
        effects,
        vec![Effect::Evaluate {
            file_path: "news.csv".to_string(),
            api_key: Secret::new("sk-test"),
            model: "gpt-4".to_string(),
        }]
    );
    assert!(state.view().relevance.evaluating);

    let (_, effects) = update(state, Msg::EvaluateClicked);
    assert!(effects.is_empty());
}

#[test]
fn evaluate_effect_debug_output_hides_api_key() {
    let state = ready_state(Some("news.csv"), "sk-very-secret");
    let (_, effects) = update(state, Msg::EvaluateClicked);
    let rendered = format!("{effects:?}");
    assert!(!rendered.contains("sk-very-secret"));
}

#[test]
fn model_selection_is_persisted_immediately() {
    let state = ready_state(None, "");
    let (state, effects) = update(state, Msg::ModelSelected("claude-2".to_string()));

    assert_eq!(
        effects,
        vec![Effect::SavePreferences(Preferences {
            model: "claude-2".to_string(),
            ..Preferences::default()
        })]
    );
    assert_eq!(state.view().relevance.model_description, "High quality analysis and accuracy");

    let (_, effects) = update(state, Msg::ModelSelected("unknown-model".to_string()));
    assert!(effects.is_empty());
}

#[test]
fn api_key_save_trims_and_persists() {
    let state = ready_state(None, "  sk-abc  ");
    let (state, effects) = update(state, Msg::ApiKeySaved);

    assert_eq!(state.preferences().api_key, Secret::new("sk-abc"));
    assert!(matches!(&effects[0], Effect::SavePreferences(p) if p.api_key.expose() == "sk-abc"));
    assert!(matches!(&effects[1], Effect::DismissNoticeAfter { .. }));

    let blank = ready_state(None, "  ");
    let (_, effects) = update(blank, Msg::ApiKeySaved);
    assert!(effects.is_empty());
}

#[test]
fn api_key_visibility_toggles() {
    let state = ready_state(None, "k");
    assert!(!state.view().relevance.api_key_visible);
    let (state, _) = update(state, Msg::ApiKeyVisibilityToggled);
    assert!(state.view().relevance.api_key_visible);
}

#[test]
fn successful_evaluation_moves_to_results_and_reloads_files() {
    let state = ready_state(Some("news.csv"), "sk");
    let (state, _) = update(state, Msg::EvaluateClicked);

    let (state, effects) = update(
        state,
        Msg::EvaluationCompleted(Ok(EvaluationSummary {
            success: true,
            message: "done".to_string(),
            stats: Some(EvaluationStats {
                relevant_count: 3,
                total_count: 10,
                relevant_percent: 30.0,
            }),
        })),
    );

    assert_eq!(effects, vec![Effect::ListFiles]);
    let view = state.view();
    assert_eq!(view.page, Page::Results);
    let notice = view.notice.expect("success notice");
    assert_eq!(notice.severity, Severity::Success);
    assert_eq!(notice.title.as_deref(), Some("Evaluation complete"));
    assert!(notice.message.contains("3/10 (30%)"));

    let (state, effects) = update(
        state,
        Msg::FilesLoaded(Ok(vec![FileRecord {
            file_name: "news_evaluated.csv".to_string(),
            size_label: "2 KB".to_string(),
            modified_label: "2024-05-01 10:00:00".to_string(),
            evaluated: true,
        }])),
    );
    assert_eq!(effects.len(), 1);
    assert!(state.view().results.loading_details);
}

#[test]
fn failed_evaluation_keeps_form_and_shows_single_error() {
    let state = ready_state(Some("news.csv"), "sk");
    let before = state.view();
    let (state, _) = update(state, Msg::EvaluateClicked);
    let (state, _) = update(
        state,
        Msg::EvaluationCompleted(Ok(EvaluationSummary {
            success: false,
            message: "File not found: news.csv".to_string(),
            stats: None,
        })),
    );

    let after = state.view();
    assert_eq!(after.page, Page::Relevance);
    assert_eq!(after.relevance, before.relevance);
    assert!(after.notice.expect("error").message.contains("File not found"));

    let (state, _) = update(state, Msg::EvaluateClicked);
    let (state, _) = update(
        state,
        Msg::EvaluationCompleted(Err("http status 500".to_string())),
    );
    assert_eq!(state.view().relevance, before.relevance);
}

#[test]
fn dismissing_notice_and_stale_expiry() {
    let state = ready_state(None, "sk");
    let (state, _) = update(state, Msg::ApiKeySaved);
    let first = state.view().notice.expect("first").id;
    let (state, _) = update(state, Msg::EvaluateClicked);
    let second = state.view().notice.expect("second").id;
    assert_ne!(first, second);

    let (state, _) = update(state, Msg::NoticeExpired(first));
    assert_eq!(state.view().notice.map(|n| n.id), Some(second));

    let (state, _) = update(state, Msg::NoticeDismissed);
    assert!(state.view().notice.is_none());
}
