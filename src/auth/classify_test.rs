use super::*;
use crate::auth::messages::{ENGLISH, THAI};

fn status(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Status {
        status,
        message: message.map(ToString::to_string),
    }
}

const DEFAULT: &str = "operation failed";

// =============================================================
// Fixed-message statuses
// =============================================================

#[test]
fn unauthorized_ignores_server_text() {
    let err = classify(&status(401, Some("bad password for bob")), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::Auth);
    assert_eq!(err.message, THAI.invalid_credentials);
}

#[test]
fn forbidden_maps_to_auth_kind() {
    let err = classify(&status(403, None), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::Auth);
    assert_eq!(err.message, THAI.forbidden);
}

#[test]
fn not_found_is_fixed() {
    let err = classify(&status(404, Some("no such user")), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, THAI.not_found);
}

#[test]
fn server_errors_share_one_message() {
    for code in [500, 502, 503, 599] {
        let err = classify(&status(code, Some("stack trace")), DEFAULT, &THAI);
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.message, THAI.server_error);
    }
}

// =============================================================
// Server-supplied text
// =============================================================

#[test]
fn unprocessable_prefers_server_text() {
    let err = classify(&status(422, Some("X")), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "X");
}

#[test]
fn unprocessable_without_text_uses_invalid_input() {
    let err = classify(&status(422, None), DEFAULT, &THAI);
    assert_eq!(err.message, THAI.invalid_input);
}

#[test]
fn unprocessable_blank_text_uses_invalid_input() {
    let err = classify(&status(422, Some("   ")), DEFAULT, &THAI);
    assert_eq!(err.message, THAI.invalid_input);
}

#[test]
fn other_status_prefers_server_text() {
    let err = classify(&status(409, Some("username taken")), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::UnknownHttp);
    assert_eq!(err.message, "username taken");
}

#[test]
fn other_status_without_text_uses_operation_default() {
    let err = classify(&status(400, None), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::UnknownHttp);
    assert_eq!(err.message, DEFAULT);
}

// =============================================================
// No response
// =============================================================

#[test]
fn network_failure_is_fixed() {
    let err = classify(&ApiError::Network("connection refused".into()), DEFAULT, &ENGLISH);
    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(err.message, ENGLISH.network);
}

#[test]
fn undecodable_body_shows_operation_default() {
    let err = classify(
        &ApiError::Decode("expected value at line 1 column 1".into()),
        DEFAULT,
        &THAI,
    );
    assert_eq!(err.kind, ErrorKind::Other);
    assert_eq!(err.message, DEFAULT);
}

#[test]
fn unbuildable_request_shows_operation_default() {
    let err = classify(&ApiError::Request("builder error: relative URL".into()), DEFAULT, &THAI);
    assert_eq!(err.kind, ErrorKind::Other);
    assert_eq!(err.message, DEFAULT);
}

#[test]
fn every_shape_yields_non_empty_message() {
    let shapes = [
        ApiError::Network(String::new()),
        ApiError::Decode(String::new()),
        ApiError::Request(" ".into()),
        status(100, None),
        status(302, Some("")),
        status(400, None),
        status(401, None),
        status(403, None),
        status(404, None),
        status(418, None),
        status(422, None),
        status(429, None),
        status(500, None),
        status(u16::MAX, None),
    ];
    for shape in &shapes {
        for messages in [&THAI, &ENGLISH] {
            let err = classify(shape, DEFAULT, messages);
            assert!(!err.message.is_empty(), "empty message for {:?}", shape);
        }
    }
}

#[test]
fn session_error_displays_message() {
    let err = SessionError::local("fill in the form");
    assert_eq!(err.to_string(), "fill in the form");
    assert_eq!(err.kind, ErrorKind::LocalValidation);
}
