use super::*;

fn message(id: &str, text: &str) -> ChatMessage {
    ChatMessage {
        id: id.to_owned(),
        user: "0x1234...abcd".to_owned(),
        full_address: None,
        message: text.to_owned(),
        timestamp: "2024-01-01T00:00:00Z".to_owned(),
    }
}

fn connected() -> ChatSession {
    let mut session = ChatSession::new();
    session.begin_connect();
    session.on_open();
    session
}

fn rate_limit_error() -> ServerMessage {
    ServerMessage::Error { message: "Rate limit exceeded".to_owned() }
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn new_session_is_disconnected() {
    let session = ChatSession::new();
    assert_eq!(session.status(), ConnectionStatus::Disconnected);
    assert!(session.messages().is_empty());
    assert_eq!(session.user_count(), 0);
}

#[test]
fn begin_connect_then_open_reaches_connected() {
    let mut session = ChatSession::new();
    session.begin_connect();
    assert_eq!(session.status(), ConnectionStatus::Connecting);
    session.on_open();
    assert_eq!(session.status(), ConnectionStatus::Connected);
}

#[test]
fn consecutive_closes_back_off() {
    let mut session = ChatSession::new();
    let delays: Vec<u128> = (0..3)
        .map(|_| {
            session.begin_connect();
            session.on_close().as_millis()
        })
        .collect();
    assert_eq!(delays, vec![1_000, 1_500, 2_250]);
    assert_eq!(session.status(), ConnectionStatus::Disconnected);
}

#[test]
fn open_resets_backoff() {
    let mut session = ChatSession::new();
    session.on_close();
    session.on_close();
    session.on_open();
    assert_eq!(session.on_close().as_millis(), 1_000);
}

// =============================================================================
// Incoming
// =============================================================================

#[test]
fn history_replaces_then_messages_append() {
    let mut session = connected();
    session.on_server_message(ServerMessage::Message { data: message("0", "stale") }, 0.0);
    session.on_server_message(
        ServerMessage::History { messages: vec![message("1", "a"), message("2", "b")] },
        0.0,
    );
    session.on_server_message(ServerMessage::Message { data: message("3", "c") }, 0.0);
    let ids: Vec<&str> = session.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[test]
fn reconnect_history_replaces_previous_list() {
    let mut session = connected();
    session.on_server_message(ServerMessage::History { messages: vec![message("1", "a")] }, 0.0);
    session.on_close();
    session.begin_connect();
    session.on_open();
    session.on_server_message(
        ServerMessage::History { messages: vec![message("1", "a"), message("2", "b")] },
        0.0,
    );
    assert_eq!(session.messages().len(), 2);
}

#[test]
fn user_count_updates() {
    let mut session = connected();
    session.on_server_message(ServerMessage::UserCount { count: 4 }, 0.0);
    assert_eq!(session.user_count(), 4);
}

#[test]
fn on_text_ignores_malformed_frames() {
    let mut session = connected();
    assert!(session.on_text("{", 0.0).is_err());
    assert!(session.messages().is_empty());
}

#[test]
fn on_text_applies_decoded_frame() {
    let mut session = connected();
    session.on_text(r#"{"type":"userCount","count":3}"#, 0.0).expect("valid frame");
    assert_eq!(session.user_count(), 3);
}

// =============================================================================
// Rate limiting and notices
// =============================================================================

#[test]
fn send_two_seconds_after_rate_limit_is_rejected() {
    let mut session = connected();
    session.on_server_message(rate_limit_error(), 0.0);
    let err = session.prepare_send("hello", None, 2_000.0).expect_err("cooldown");
    assert_eq!(err, SendError::RateLimited);
    assert_eq!(session.notice(2_000.0), Some("You are sending messages too quickly. Please wait."));
}

#[test]
fn send_six_seconds_after_rate_limit_is_allowed() {
    let mut session = connected();
    session.on_server_message(rate_limit_error(), 0.0);
    assert!(session.prepare_send("hello", None, 6_000.0).is_ok());
}

#[test]
fn non_rate_limit_error_sets_notice_only() {
    let mut session = connected();
    session.on_server_message(ServerMessage::Error { message: "Message too long".to_owned() }, 0.0);
    assert!(!session.is_rate_limited(1.0));
    assert_eq!(session.notice(1.0), Some("Message too long"));
}

#[test]
fn notice_expires_after_five_seconds() {
    let mut session = connected();
    session.on_server_message(ServerMessage::Error { message: "nope".to_owned() }, 1_000.0);
    assert!(session.notice(5_999.0).is_some());
    assert!(session.notice(6_000.0).is_none());
}

// =============================================================================
// prepare_send
// =============================================================================

#[test]
fn send_while_disconnected_is_rejected() {
    let mut session = ChatSession::new();
    assert_eq!(session.prepare_send("hi", None, 0.0), Err(SendError::NotConnected));
    assert_eq!(session.notice(0.0), Some("Not connected to chat"));
}

#[test]
fn send_while_connecting_is_rejected() {
    let mut session = ChatSession::new();
    session.begin_connect();
    assert_eq!(session.prepare_send("hi", None, 0.0), Err(SendError::NotConnected));
}

#[test]
fn send_trims_text_and_carries_address() {
    let mut session = connected();
    let msg = session.prepare_send("  gm  ", Some("0xabc"), 0.0).expect("send");
    assert_eq!(msg, ClientMessage::Chat { text: "gm".to_owned(), address: Some("0xabc".to_owned()) });
}

#[test]
fn blank_text_is_rejected() {
    let mut session = connected();
    assert_eq!(session.prepare_send("   ", None, 0.0), Err(SendError::Empty));
}

#[test]
fn overlong_text_is_rejected() {
    let mut session = connected();
    let text = "x".repeat(MAX_MESSAGE_CHARS + 1);
    assert_eq!(session.prepare_send(&text, None, 0.0), Err(SendError::TooLong { max: MAX_MESSAGE_CHARS }));
}

#[test]
fn text_at_limit_is_accepted() {
    let mut session = connected();
    let text = "x".repeat(MAX_MESSAGE_CHARS);
    assert!(session.prepare_send(&text, None, 0.0).is_ok());
}
