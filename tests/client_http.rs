// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! End-to-end pipeline tests over a local mock server

use mustekala::{Client, ClientOptions, RequestOptions, ResponseType, UrlEncodedForm};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_get_sends_default_user_agent_and_decodes_text() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .and(header("user-agent", mustekala::DEFAULT_USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_string("terve"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    let response = client
        .get(format!("{}/x", server.uri()), RequestOptions::new())
        .await
        .expect("request should succeed");

    assert_eq!(response.status_code(), 200);
    // responseType defaults to text
    assert_eq!(response.body.as_text(), Some("terve"));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_post_json_body() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/x"))
        .and(header("content-type", "application/json"))
        .and(body_string(r#"{"a":1}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    let response = client
        .post(
            format!("{}/x", server.uri()),
            serde_json::json!({"a": 1}),
            RequestOptions::new(),
        )
        .await
        .expect("request should succeed");
    assert!(response.is_success());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_post_urlencoded_form() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/form"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("user=arvo&note=two+words"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    let form = UrlEncodedForm::new()
        .pair("user", "arvo")
        .pair("note", "two words");
    let response = client
        .post(format!("{}/form", server.uri()), form, RequestOptions::new())
        .await
        .expect("request should succeed");
    assert!(response.is_success());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cookie_round_trip() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "session=abc123; Path=/"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_string("profile"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    client
        .get(format!("{}/login", server.uri()), RequestOptions::new())
        .await
        .expect("login should succeed");
    assert_eq!(client.cookie_jar().len(), 1);

    let response = client
        .get(format!("{}/me", server.uri()), RequestOptions::new())
        .await
        .expect("request should succeed");
    assert_eq!(response.body.as_text(), Some("profile"));
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_cookie_store_disabled_stores_nothing() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "session=abc123; Path=/"),
        )
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    client
        .get(
            format!("{}/x", server.uri()),
            RequestOptions::new().cookie_store(false),
        )
        .await
        .expect("request should succeed");
    assert!(client.cookie_jar().is_empty());
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_created_client_starts_with_empty_jar() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "parent=1; Path=/"),
        )
        .mount(&server)
        .await;
    // a request still carrying the parent cookie would hit this first
    Mock::given(method("GET"))
        .and(path("/iso"))
        .and(header("cookie", "parent=1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/iso"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let parent = Client::new().expect("client should build");
    parent
        .get(format!("{}/login", server.uri()), RequestOptions::new())
        .await
        .expect("login should succeed");
    assert_eq!(parent.cookie_jar().len(), 1);

    let child = parent
        .create(ClientOptions::new())
        .expect("derived client should build");
    assert!(child.cookie_jar().is_empty());

    let from_child = child
        .get(format!("{}/iso", server.uri()), RequestOptions::new())
        .await
        .expect("request should succeed");
    assert_eq!(from_child.status_code(), 200);

    let from_parent = parent
        .get(format!("{}/iso", server.uri()), RequestOptions::new())
        .await
        .expect("request should succeed");
    assert_eq!(from_parent.status_code(), 500);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_response_type_json() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"count": 3}"#))
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    let response = client
        .get(
            format!("{}/data", server.uri()),
            RequestOptions::new().response_type(ResponseType::Json),
        )
        .await
        .expect("request should succeed");
    assert_eq!(response.body.as_json().unwrap()["count"], 3);
}

#[cfg_attr(miri, ignore)]
#[tokio::test]
async fn test_delete_method() {
    init_tracing();
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/item/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new().expect("client should build");
    let response = client
        .delete(format!("{}/item/7", server.uri()), RequestOptions::new())
        .await
        .expect("request should succeed");
    assert_eq!(response.status_code(), 204);
}
