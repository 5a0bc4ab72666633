use crate::helpers::{MAX_SESSIONS, TestApp, location, session_cookie};

#[tokio::test]
async fn get_requests_reach_the_application() {
    let app = TestApp::spawn().await;

    let page = app.get_login_page().await;

    assert_eq!(page["error"], serde_json::Value::Null);
    assert_eq!(page["last_username"], serde_json::Value::Null);
}

#[tokio::test]
async fn other_forms_reach_the_application_with_their_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/contact", &[("FORM_SUBMIT", "contact"), ("message", "hello")])
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(session_cookie(&response).is_none());
    assert_eq!(
        response.text().await.unwrap(),
        "FORM_SUBMIT=contact&message=hello"
    );
}

#[tokio::test]
async fn valid_credentials_redirect_to_target_and_open_a_session() {
    let app = TestApp::spawn().await;

    let response = app
        .post_login(&[
            ("FORM_SUBMIT", "tl_login_1"),
            ("username", "  alice "),
            ("password", "secret"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), Some("/members"));
    assert!(session_cookie(&response).is_some());

    let page = app.get_login_page().await;
    assert_eq!(page["error"], serde_json::Value::Null);
    assert_eq!(page["last_username"], serde_json::Value::Null);
}

#[tokio::test]
async fn wrong_password_redirects_back_with_error_and_username() {
    let app = TestApp::spawn().await;

    let response = app
        .post_login(&[
            ("FORM_SUBMIT", "tl_login"),
            ("username", "alice"),
            ("password", "wrong"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), Some("/login"));

    let page = app.get_login_page().await;
    assert_eq!(page["error"], "Invalid credentials.");
    assert_eq!(page["last_username"], "alice");
}

#[tokio::test]
async fn second_factor_completes_a_pending_login() {
    let app = TestApp::spawn().await;

    let first = app
        .post_login(&[
            ("FORM_SUBMIT", "tl_login_2"),
            ("username", "bob"),
            ("password", "secret"),
        ])
        .await;
    assert_eq!(first.status().as_u16(), 303);
    assert_eq!(location(&first), Some("/login/2fa"));
    let first_session = session_cookie(&first).expect("No session cookie issued");

    let wrong = app
        .post_login(&[("FORM_SUBMIT", "tl_login_2"), ("verify", "000000")])
        .await;
    assert_eq!(location(&wrong), Some("/login"));

    let second = app
        .post_login(&[("FORM_SUBMIT", "tl_login_2"), ("verify", "123456")])
        .await;
    assert_eq!(second.status().as_u16(), 303);
    assert_eq!(location(&second), Some("/members"));

    let second_session = session_cookie(&second).expect("Session was not migrated");
    assert_ne!(first_session, second_session);
}

#[tokio::test]
async fn array_username_is_a_bad_request() {
    let app = TestApp::spawn().await;

    let response = app
        .post_login(&[
            ("FORM_SUBMIT", "tl_login"),
            ("username[]", "alice"),
            ("password", "secret"),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        r#"The key "username" must be a string, "array" given."#
    );
}

#[tokio::test]
async fn oversized_bodies_are_rejected() {
    let app = TestApp::spawn().await;
    let padding = "x".repeat(2048);

    let response = app
        .post_login(&[
            ("FORM_SUBMIT", "tl_login"),
            ("username", "alice"),
            ("password", &padding),
        ])
        .await;

    assert_eq!(response.status().as_u16(), 413);
}

#[tokio::test]
async fn large_non_form_bodies_reach_the_application() {
    let app = TestApp::spawn().await;
    let payload = vec![7u8; 100 * 1024];

    let response = app
        .http_client
        .post(format!("{}/upload", app.address))
        .header("content-type", "application/octet-stream")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), (100 * 1024).to_string());
}

#[tokio::test]
async fn rejected_submissions_without_data_leave_no_session() {
    let app = TestApp::spawn().await;

    for _ in 0..200 {
        let response = app
            .post_login_without_cookies(&[("FORM_SUBMIT", "tl_login"), ("username[]", "x")])
            .await;
        assert_eq!(response.status().as_u16(), 400);
        assert!(session_cookie(&response).is_none());
    }

    assert!(app.sessions.is_empty());
}

#[tokio::test]
async fn failed_logins_cannot_grow_the_session_store_without_bound() {
    let app = TestApp::spawn().await;

    for _ in 0..200 {
        let response = app
            .post_login_without_cookies(&[
                ("FORM_SUBMIT", "tl_login"),
                ("username", "mallory"),
                ("password", "guess"),
            ])
            .await;
        assert_eq!(location(&response), Some("/login"));
    }

    assert_eq!(app.sessions.len(), MAX_SESSIONS);
}
