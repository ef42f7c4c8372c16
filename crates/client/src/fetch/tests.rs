// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use super::*;

#[test]
fn method_display() {
    assert_eq!("GET", Method::Get.to_string());
    assert_eq!("POST", Method::Post.to_string());
    assert_eq!("DELETE", Method::Delete.to_string());
}

#[test]
fn post_json_sets_content_type() {
    let request =
        RequestSpec::post_json("admin/editmovie", &serde_json::json!({"id": "0"})).unwrap();
    assert_eq!(Method::Post, request.method);
    assert_eq!(Some(CONTENT_TYPE_JSON), request.header("content-type"));
    assert_eq!(Some(Bytes::from_static(br#"{"id":"0"}"#)), request.body);
}

#[test]
fn get_without_body() {
    let request = RequestSpec::get("movies/1");
    assert_eq!("movies/1", request.target);
    assert!(request.body.is_none());
    assert!(request.headers.is_empty());
}

#[tokio::test]
async fn loading_before_request_is_sent() {
    let handle = Handle::new(crate::Config::default()).unwrap();
    let fetcher = ResourceFetcher::<u32>::new();
    assert!(fetcher.load_state().is_idle());
    let (_task, continuation) = fetcher
        .fetch_task(&handle, RequestSpec::get("movies"), |_| Ok(0))
        .unwrap();
    assert!(fetcher.load_state().is_loading());
    assert!(fetcher.reset());
    assert!(fetcher.load_state().is_idle());
    // The result of the request has become stale
    assert!(!fetcher.fetch_task_completed(Ok(1), continuation));
    assert!(fetcher.load_state().is_idle());
}
