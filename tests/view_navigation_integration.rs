//! Integration tests driving the view controller the way a chat page does:
//! a session streams a response, the host re-renders with fresh inputs and
//! the router reports every URL change back.

use vibecode::application::ChatSession;
use vibecode::infra::app_config::ViewConfig;
use vibecode::view::{ViewController, ViewHost, ViewInputs, ViewType};

#[derive(Default)]
struct Router {
    navigations: Vec<String>,
    backs: usize,
}

impl ViewHost for Router {
    fn navigate(&mut self, path: &str) {
        self.navigations.push(path.to_string());
    }

    fn go_back(&mut self) {
        self.backs += 1;
    }
}

fn inputs(code: &str, is_streaming: bool, preview_ready: bool) -> ViewInputs {
    ViewInputs {
        session_id: Some("S".into()),
        title: Some("T".into()),
        code_length: code.len(),
        is_streaming,
        preview_ready,
    }
}

fn controller_at(path: &str) -> ViewController<Router> {
    ViewController::new(ViewConfig::default(), path, Router::default())
}

#[test]
fn test_pinned_code_view_is_never_left() {
    let mut controller = controller_at("/chat/S/T/code");
    controller.update_inputs(inputs("", false, false));
    controller.update_inputs(inputs("x", true, true));
    controller.update_inputs(inputs("x", false, true));

    assert!(controller.host().navigations.is_empty());
    assert_eq!(controller.snapshot().display_view, ViewType::Code);
}

#[test]
fn test_base_path_moves_to_app_when_stream_ends() {
    let mut controller = controller_at("/chat/S/T");
    controller.update_inputs(inputs("x", true, false));
    controller.update_inputs(inputs("x", false, true));

    assert_eq!(controller.host().navigations, vec!["/chat/S/T/app"]);
}

#[test]
fn test_streamed_session_drives_navigation() {
    let mut session = ChatSession::with_identity("S", "T");
    session.push_user("make a counter");
    let mut controller = controller_at("/chat/S/T");
    controller.update_inputs(session.view_inputs(false));

    session.begin_response();
    controller.update_inputs(session.view_inputs(false));
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.display_view, ViewType::Code);
    assert!(snapshot.show_view_controls);
    assert!(!snapshot.view_controls.data.enabled);

    for chunk in ["A counter.\n```jsx\n", "export default () => 1;", "\n```\n"] {
        session.push_chunk(chunk).unwrap();
        controller.update_inputs(session.view_inputs(false));
    }
    assert!(controller.host().navigations.is_empty());
    assert!(controller.snapshot().view_controls.code.loading);

    session.finish_response().unwrap();
    controller.update_inputs(session.view_inputs(false));
    // Stream over but the preview has not rendered yet.
    assert_eq!(controller.snapshot().display_view, ViewType::Code);
    assert!(controller.host().navigations.is_empty());

    controller.update_inputs(session.view_inputs(true));
    assert_eq!(controller.host().navigations, vec!["/chat/S/T/app"]);

    controller.url_changed("/chat/S/T/app");
    let snapshot = controller.snapshot();
    assert_eq!(snapshot.current_view, ViewType::Preview);
    assert_eq!(snapshot.display_view, ViewType::Preview);
    assert!(snapshot.view_controls.preview.enabled);
}

#[test]
fn test_back_during_stream_keeps_user_in_place() {
    let mut controller = controller_at("/chat/S/T");
    controller.update_inputs(inputs("x", true, false));
    controller.back();
    controller.update_inputs(inputs("xy", false, true));

    assert_eq!(controller.host().backs, 1);
    assert!(controller.host().navigations.is_empty());

    // The next generation re-arms auto-navigation.
    controller.update_inputs(inputs("xy", true, false));
    controller.update_inputs(inputs("xyz", false, true));
    assert_eq!(controller.host().navigations, vec!["/chat/S/T/app"]);
}

#[test]
fn test_mobile_shows_code_until_preview_loads() {
    let mut controller = controller_at("/chat/S/T/app");
    controller.viewport_resized(375);
    controller.update_inputs(inputs("x", false, true));
    assert_eq!(controller.snapshot().display_view, ViewType::Code);

    controller
        .receive_iframe_message(r#"{"type":"preview-loaded"}"#)
        .unwrap();
    let snapshot = controller.snapshot();
    assert!(snapshot.mobile_preview_shown);
    assert_eq!(snapshot.display_view, ViewType::Preview);
    assert!(controller.host().navigations.is_empty());
}

#[tokio::test]
async fn test_iframe_ready_waits_for_debounce() {
    let config = ViewConfig {
        auto_navigate_delay_ms: 20,
        ..ViewConfig::default()
    };
    let mut controller = ViewController::new(config, "/chat/S/T", Router::default());
    controller.update_inputs(inputs("x", false, false));

    controller
        .receive_iframe_message(r#"{"type":"preview-ready"}"#)
        .unwrap();
    assert!(controller.host().navigations.is_empty());

    assert!(controller.next_action().await);
    assert_eq!(controller.host().navigations, vec!["/chat/S/T/app"]);
}

#[tokio::test]
async fn test_stream_restart_cancels_debounced_navigation() {
    let config = ViewConfig {
        auto_navigate_delay_ms: 20,
        ..ViewConfig::default()
    };
    let mut controller = ViewController::new(config, "/chat/S/T", Router::default());
    controller.update_inputs(inputs("x", false, false));
    controller
        .receive_iframe_message(r#"{"type":"preview-ready"}"#)
        .unwrap();

    controller.update_inputs(inputs("x", true, false));

    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    controller.poll_actions();
    assert!(controller.host().navigations.is_empty());
}

#[test]
fn test_session_titled_app_still_auto_navigates() {
    let mut session = ChatSession::new();
    session.push_user("App");
    let (id, title) = session.assign_identity(None);
    assert_eq!(title, "app");

    let base = format!("/chat/{id}/{title}");
    let mut controller = controller_at(&base);
    controller.update_inputs(session.view_inputs(false));
    assert_eq!(controller.snapshot().current_view, ViewType::Preview);

    session.begin_response();
    controller.update_inputs(session.view_inputs(false));
    session.push_chunk("```\nx\n```").unwrap();
    session.finish_response().unwrap();
    controller.update_inputs(session.view_inputs(true));

    assert_eq!(controller.host().navigations, vec![format!("{base}/app")]);
}

#[test]
fn test_identity_after_stream_end_resumes_navigation() {
    let mut controller = controller_at("/");
    let anonymous = |code: &str, is_streaming: bool, preview_ready: bool| ViewInputs {
        session_id: None,
        title: None,
        ..inputs(code, is_streaming, preview_ready)
    };
    controller.update_inputs(anonymous("", true, false));
    controller.update_inputs(anonymous("x", false, true));
    assert!(controller.host().navigations.is_empty());

    controller.update_inputs(inputs("x", false, true));
    controller.url_changed("/chat/S/T");

    assert_eq!(controller.host().navigations, vec!["/chat/S/T/app"]);
}
