use super::*;
use serde_json::json;

#[test]
fn request_serializes_without_empty_fields() {
    let request = CdpRequest {
        id: 1,
        method: "Page.navigate".to_string(),
        params: None,
        session_id: None,
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value, json!({"id": 1, "method": "Page.navigate"}));
}

#[test]
fn request_serializes_session_id_camel_case() {
    let request = CdpRequest {
        id: 7,
        method: "DOM.getDocument".to_string(),
        params: Some(json!({"depth": -1})),
        session_id: Some("abc".to_string()),
    };
    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(value["sessionId"], "abc");
    assert_eq!(value["params"]["depth"], -1);
}

#[test]
fn response_deserializes_result() {
    let response: CdpResponse =
        serde_json::from_str(r#"{"id": 3, "result": {"frameId": "F1"}}"#).unwrap();
    assert_eq!(response.id, Some(3));
    assert_eq!(response.result.unwrap()["frameId"], "F1");
    assert!(response.error.is_none());
}

#[test]
fn response_deserializes_error() {
    let response: CdpResponse =
        serde_json::from_str(r#"{"id": 4, "error": {"code": -32000, "message": "boom"}}"#).unwrap();
    let error = response.error.unwrap();
    assert_eq!(error.code, -32000);
    assert_eq!(error.message, "boom");
}

#[test]
fn event_deserializes_with_method() {
    let response: CdpResponse = serde_json::from_str(
        r#"{"method": "Page.loadEventFired", "params": {}, "sessionId": "s1"}"#,
    )
    .unwrap();
    assert!(response.id.is_none());
    assert_eq!(response.method.as_deref(), Some("Page.loadEventFired"));
    assert_eq!(response.session_id.as_deref(), Some("s1"));
}

#[test]
fn browser_version_deserializes_pascal_case() {
    let version: BrowserVersion = serde_json::from_str(
        r#"{
            "Browser": "Chrome/131.0",
            "Protocol-Version": "1.3",
            "User-Agent": "Mozilla/5.0",
            "webSocketDebuggerUrl": "ws://localhost:9222/devtools/browser/xyz"
        }"#,
    )
    .unwrap();
    assert_eq!(version.browser, "Chrome/131.0");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn storage_state_round_trips() {
    let state = StorageState {
        cookies: vec![Cookie {
            name: "hhtoken".to_string(),
            value: "secret".to_string(),
            domain: Some(".hh.ru".to_string()),
            path: Some("/".to_string()),
            expires: Some(1900000000.0),
            http_only: Some(true),
            secure: Some(true),
            same_site: Some("Lax".to_string()),
        }],
    };
    let json = serde_json::to_string(&state).unwrap();
    assert!(json.contains("httpOnly"));
    let parsed: StorageState = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, state);
}

#[test]
fn storage_state_tolerates_missing_cookies_field() {
    let state: StorageState = serde_json::from_str("{}").unwrap();
    assert!(state.cookies.is_empty());
}
