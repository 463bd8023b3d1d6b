mod common;

use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use serde_json::json;
use uuid::Uuid;

#[actix_web::test]
async fn test_create_requires_token() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (status, _) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_create_and_fetch_post() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (alice_id, token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;

    let (status, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Hi");
    assert_eq!(body["author"], alice_id.as_str());
    assert_eq!(body["comments"], json!([]));
    let post_id = body["id"].as_str().unwrap().to_string();

    // Reads are public.
    let (status, body) = common::api(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{post_id}")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], post_id.as_str());

    let (status, body) = common::api(&app, TestRequest::get().uri("/api/v1/posts"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_create_rejects_empty_fields() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;

    for payload in [
        json!({ "title": "", "content": "World" }),
        json!({ "title": "Hi", "content": "" }),
    ] {
        let (status, _) = common::api(
            &app,
            TestRequest::post().uri("/api/v1/posts").set_json(payload),
            Some(&token),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn test_get_unknown_post_is_not_found() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (status, _) = common::api(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{}", Uuid::new_v4())),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_only_author_may_update_or_delete() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, alice_token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;
    let (_, bob_token) = common::signed_up_user(&app, "bob", "bob@x.com", "password1").await;

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&alice_token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = common::api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .set_json(json!({ "title": "Hijacked" })),
        Some(&bob_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = common::api(
        &app,
        TestRequest::delete().uri(&format!("/api/v1/posts/{post_id}")),
        Some(&bob_token),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The author still can.
    let (status, body) = common::api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .set_json(json!({ "title": "Updated" })),
        Some(&alice_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Updated");
    assert_eq!(body["content"], "World");
}

#[actix_web::test]
async fn test_admin_overrides_ownership() {
    let state = common::test_state();
    let app = common::init_app(state.clone()).await;

    let (_, alice_token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;
    let admin_token = state.tokens.issue(Uuid::new_v4(), "admin").unwrap();

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&alice_token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();
    let author = body["author"].clone();

    let (status, body) = common::api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .set_json(json!({ "content": "Moderated" })),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["content"], "Moderated");
    assert_eq!(body["author"], author);

    let (status, _) = common::api(
        &app,
        TestRequest::delete().uri(&format!("/api/v1/posts/{post_id}")),
        Some(&admin_token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_update_cannot_change_author() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = common::api(
        &app,
        TestRequest::put()
            .uri(&format!("/api/v1/posts/{post_id}"))
            .set_json(json!({ "author": Uuid::new_v4() })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_delete_removes_post_and_comments() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({ "text": "first" })),
        Some(&token),
    )
    .await;

    let (status, _) = common::api(
        &app,
        TestRequest::delete().uri(&format!("/api/v1/posts/{post_id}")),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::api(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{post_id}")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::api(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{post_id}/comments")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_any_authenticated_user_may_comment() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, alice_token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;
    let (bob_id, bob_token) = common::signed_up_user(&app, "bob", "bob@x.com", "password1").await;

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&alice_token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({ "text": "nice post" })),
        Some(&bob_token),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["comments"][0]["author"], bob_id.as_str());
    assert_eq!(body["comments"][0]["text"], "nice post");

    // Appends preserve insertion order.
    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({ "text": "second" })),
        Some(&alice_token),
    )
    .await;
    assert_eq!(body["comments"][0]["text"], "nice post");
    assert_eq!(body["comments"][1]["text"], "second");

    // Comment reads are public.
    let (status, body) = common::api(
        &app,
        TestRequest::get().uri(&format!("/api/v1/posts/{post_id}/comments")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_comment_validation_and_missing_post() {
    let state = common::test_state();
    let app = common::init_app(state).await;

    let (_, token) = common::signed_up_user(&app, "alice", "alice@x.com", "password1").await;

    let (_, body) = common::api(
        &app,
        TestRequest::post()
            .uri("/api/v1/posts")
            .set_json(json!({ "title": "Hi", "content": "World" })),
        Some(&token),
    )
    .await;
    let post_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({ "text": "" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{}/comments", Uuid::new_v4()))
            .set_json(json!({ "text": "hello" })),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::api(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/posts/{post_id}/comments"))
            .set_json(json!({ "text": "hello" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
