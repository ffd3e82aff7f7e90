//! API Integration Tests
//!
//! Each test spins up a server on an ephemeral port with in-memory
//! persistence and local media storage in a temporary directory.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use axum::body::Body;
use axum::http::{header, Request};
use integration_tests::{
    assert_json, assert_status, count_files, fixtures::*, test_config, TestServer,
};
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::json;
use tower::ServiceExt;

const API: &str = "/api/v1";

fn api(path: &str) -> String {
    format!("{API}{path}")
}

async fn register(server: &TestServer) -> (RegisterRequest, AuthResponse) {
    let request = RegisterRequest::unique();
    let response = server.post(&api("/auth/register"), &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (request, auth)
}

async fn upload(server: &TestServer, token: &str, title: &str) -> VideoResponse {
    let response = server
        .post_multipart(&api("/videos"), token, upload_form(title))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn react(
    server: &TestServer,
    token: &str,
    video_id: &str,
    request: &ReactionRequest,
) -> ReactionCounts {
    let response = server
        .post_auth(&api(&format!("/videos/{video_id}/reaction")), token, request)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&api("/health")).await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api-docs/openapi.json").await.unwrap();
    let doc: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert!(doc["openapi"].as_str().unwrap().starts_with('3'));
    assert!(doc["components"]["schemas"]["VideoResponse"].is_object());
}

#[tokio::test]
async fn test_unknown_route_uses_error_body() {
    let server = TestServer::start().await.unwrap();
    let response = server.get(&api("/nope")).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "NOT_FOUND");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    let server = TestServer::start().await.expect("Failed to start server");
    let (request, auth) = register(&server).await;

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.email.as_deref(), Some(request.email.as_str()));
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let server = TestServer::start().await.unwrap();
    let (first, _) = register(&server).await;

    let mut request = RegisterRequest::unique();
    request.email = first.email.clone();
    let response = server.post(&api("/auth/register"), &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_register_invalid_payload() {
    let server = TestServer::start().await.unwrap();
    let response = server
        .post(
            &api("/auth/register"),
            &json!({ "username": "x", "email": "not-an-email", "full_name": "", "password": "short" }),
        )
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert!(body.error.details.is_some());
}

#[tokio::test]
async fn test_login_and_wrong_password() {
    let server = TestServer::start().await.unwrap();
    let (request, _) = register(&server).await;

    let response = server
        .post(&api("/auth/login"), &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, request.username);

    let wrong = LoginRequest {
        login: request.username.clone(),
        password: "WrongPass999".to_string(),
    };
    let response = server.post(&api("/auth/login"), &wrong).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_refresh_rotates_token() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post(&api("/auth/refresh"), &request).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, auth.refresh_token);

    // The consumed token cannot be replayed
    let response = server.post(&api("/auth/refresh"), &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let response = server
        .post_auth(
            &api("/auth/logout"),
            &auth.access_token,
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post(&api("/auth/refresh"), &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_malformed_logout_body_keeps_sessions() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let response = server
        .post_raw_json(&api("/auth/logout"), &auth.access_token, "{\"refresh_token\": ")
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_BODY");

    // The session survived, so the refresh token still rotates
    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post(&api("/auth/refresh"), &request).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();

    // An empty body ends every session
    let response = server
        .post_raw_json(&api("/auth/logout"), &rotated.access_token, "")
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let request = RefreshTokenRequest {
        refresh_token: rotated.refresh_token,
    };
    let response = server.post(&api("/auth/refresh"), &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_missing_auth_is_unauthenticated() {
    let server = TestServer::start().await.unwrap();
    let response = server.get(&api("/users/@me")).await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "UNAUTHENTICATED");

    let response = server.get_auth(&api("/users/@me"), "garbage").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(body.error.code, "INVALID_TOKEN");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_current_user_and_public_profile() {
    let server = TestServer::start().await.unwrap();
    let (request, auth) = register(&server).await;

    let response = server
        .get_auth(&api("/users/@me"), &auth.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.username, request.username);

    let response = server
        .patch_auth(
            &api("/users/@me"),
            &auth.access_token,
            &json!({ "full_name": "Renamed Person" }),
        )
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.full_name, "Renamed Person");

    let (_, other) = register(&server).await;
    let response = server
        .get_auth(&api(&format!("/users/{}", me.id)), &other.access_token)
        .await
        .unwrap();
    let public: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(public.full_name, "Renamed Person");
    assert!(public.email.is_none());
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_upload_then_stream_media() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let video = upload(&server, &auth.access_token, "First clip").await;
    assert_eq!(video.owner_id, auth.user.id);
    assert_eq!(video.title, "First clip");
    assert!((video.duration_secs - 12.5).abs() < f64::EPSILON);
    assert!(video.is_published);
    assert!(video.video_url.starts_with("/media/videos/"));
    assert!(video.thumbnail_url.is_some());
    assert_eq!(server.stored_files(), 2);

    let response = server.get(&video.video_url).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[reqwest::header::CONTENT_TYPE],
        "video/mp4"
    );
    let bytes = response.bytes().await.unwrap();
    assert_eq!(bytes.as_ref(), VIDEO_BYTES);
}

#[tokio::test]
async fn test_upload_without_video_part_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let form = Form::new().text("title", "No file");
    let response = server
        .post_multipart(&api("/videos"), &auth.access_token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(server.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_wrong_media_type_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let form = Form::new().text("title", "Not a video").part(
        "video",
        Part::bytes(b"plain text".to_vec())
            .file_name("notes.txt")
            .mime_str("text/plain")
            .unwrap(),
    );
    let response = server
        .post_multipart(&api("/videos"), &auth.access_token, form)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(server.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_whitespace_title_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    let response = server
        .post_multipart(&api("/videos"), &auth.access_token, upload_form("   "))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "VALIDATION_ERROR");
    assert_eq!(server.stored_files(), 0);
}

#[tokio::test]
async fn test_upload_non_finite_duration_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;

    for duration in ["NaN", "inf"] {
        let form = upload_form("Endless").text("duration", duration);
        let response = server
            .post_multipart(&api("/videos"), &auth.access_token, form)
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }
    assert_eq!(server.stored_files(), 0);
}

#[tokio::test]
async fn test_get_video_counts_each_viewer_once() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let (_, viewer) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Watch me").await;
    let path = api(&format!("/videos/{}", video.id));

    for _ in 0..3 {
        let response = server.get_auth(&path, &viewer.access_token).await.unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }
    let response = server.get_auth(&path, &owner.access_token).await.unwrap();
    let fetched: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.view_count, 2);
}

#[tokio::test]
async fn test_list_videos_pages_and_filters() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;
    for title in ["alpha cats", "beta dogs", "gamma cats"] {
        upload(&server, &auth.access_token, title).await;
    }

    let response = server.get(&api("/videos?limit=2")).await.unwrap();
    let page: Page<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert!(page.pagination.has_more);
    assert_eq!(page.pagination.limit, 2);

    let response = server.get(&api("/videos?q=cats")).await.unwrap();
    let page: Page<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert!(page.data.iter().all(|v| v.title.contains("cats")));

    let response = server.get(&api("/videos?sort=sideways")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

async fn list_titles(server: &TestServer, query: &str) -> (Vec<String>, Page<VideoResponse>) {
    let response = server
        .get(&api(&format!("/videos?limit=2{query}")))
        .await
        .unwrap();
    let page: Page<VideoResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let titles = page.data.iter().map(|v| v.title.clone()).collect();
    (titles, page)
}

#[tokio::test]
async fn test_list_videos_cursors_walk_both_directions() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;
    for i in 1..=5 {
        upload(&server, &auth.access_token, &format!("clip {i}")).await;
    }

    let (titles, first) = list_titles(&server, "").await;
    assert_eq!(titles, ["clip 5", "clip 4"]);
    let before = first.pagination.before.unwrap();
    let (titles, older) = list_titles(&server, &format!("&before={before}")).await;
    assert_eq!(titles, ["clip 3", "clip 2"]);
    let after = older.pagination.after.unwrap();
    let (titles, _) = list_titles(&server, &format!("&after={after}")).await;
    assert_eq!(titles, ["clip 5", "clip 4"]);

    let (titles, first) = list_titles(&server, "&sort=oldest").await;
    assert_eq!(titles, ["clip 1", "clip 2"]);
    let after = first.pagination.after.unwrap();
    let (titles, second) = list_titles(&server, &format!("&sort=oldest&after={after}")).await;
    assert_eq!(titles, ["clip 3", "clip 4"]);
    let before = second.pagination.before.unwrap();
    let (titles, _) = list_titles(&server, &format!("&sort=oldest&before={before}")).await;
    assert_eq!(titles, ["clip 1", "clip 2"]);
}

#[tokio::test]
async fn test_owner_only_update_and_publish() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let (_, other) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Mine").await;
    let path = api(&format!("/videos/{}", video.id));

    let response = server
        .patch_auth(&path, &other.access_token, &json!({ "title": "Stolen" }))
        .await
        .unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "FORBIDDEN");

    let response = server
        .patch_auth(&path, &owner.access_token, &json!({ "title": "  Still mine  " }))
        .await
        .unwrap();
    let updated: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Still mine");

    let publish = format!("{path}/publish");
    let response = server.patch_empty(&publish, &other.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.patch_empty(&publish, &owner.access_token).await.unwrap();
    let toggled: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!toggled.is_published);

    // Drafts read as missing to everyone but the owner
    let response = server.get_auth(&path, &other.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_replace_thumbnail_releases_old_file() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Thumbs").await;
    let path = api(&format!("/videos/{}/thumbnail", video.id));

    let form = Form::new().part("thumbnail", thumbnail_part());
    let response = server
        .put_multipart(&path, &owner.access_token, form)
        .await
        .unwrap();
    let updated: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();

    assert_ne!(updated.thumbnail_url, video.thumbnail_url);
    assert_eq!(server.stored_files(), 2);

    let old = video.thumbnail_url.unwrap();
    let response = server.get(&old).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_delete_is_owner_only_and_releases_media() {
    let server = TestServer::start().await.unwrap();
    let (_, alice) = register(&server).await;
    let (_, bob) = register(&server).await;
    let video = upload(&server, &alice.access_token, "Alice's video").await;
    let path = api(&format!("/videos/{}", video.id));

    let response = server.delete_auth(&path, &bob.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(server.stored_files(), 2);

    let response = server.delete_auth(&path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    assert_eq!(server.stored_files(), 0);

    let response = server.get(&video.video_url).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get_auth(&path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.delete_auth(&path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_malformed_video_id_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;
    let response = server
        .get_auth(&api("/videos/not-a-number"), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let state = vidshare_api::create_app_state(test_config(&dir)).await.unwrap();
    let app = vidshare_api::create_app(state).unwrap();

    let register = RegisterRequest::unique();
    let response = app
        .clone()
        .oneshot(
            Request::post(api("/auth/register"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&register).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let auth: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let token = auth["access_token"].as_str().unwrap().to_string();

    let boundary = "vidshare-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHuge\r\n\
             --{boundary}\r\nContent-Disposition: form-data; name=\"video\"; filename=\"big.mp4\"\r\n\
             Content-Type: video/mp4\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend(std::iter::repeat(0u8).take(2 * 1024 * 1024));
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let response = app
        .oneshot(
            Request::post(api("/videos"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(count_files(dir.path()), 0);
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_reaction_walkthrough() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let (_, a) = register(&server).await;
    let (_, b) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Vote on me").await;

    let counts = react(
        &server,
        &a.access_token,
        &video.id,
        &ReactionRequest::like(&video.id),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(1, 0));

    let counts = react(
        &server,
        &a.access_token,
        &video.id,
        &ReactionRequest::dislike(&video.id),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(0, 1));

    let counts = react(
        &server,
        &a.access_token,
        &video.id,
        &ReactionRequest::like(&video.id),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(1, 0));

    let counts = react(
        &server,
        &b.access_token,
        &video.id,
        &ReactionRequest::like(&video.id),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(2, 0));

    // Repeating a like does not inflate the total
    let counts = react(
        &server,
        &b.access_token,
        &video.id,
        &ReactionRequest::like(&video.id),
    )
    .await;
    assert_eq!(counts, ReactionCounts::new(2, 0));

    let path = api(&format!("/videos/{}/reaction", video.id));
    let response = server.get_auth(&path, &a.access_token).await.unwrap();
    let status: ReactionStatus = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status.video_id, video.id);
    assert_eq!(status.state, "liked");
    assert_eq!((status.likes, status.dislikes), (2, 0));

    let response = server.delete_auth(&path, &a.access_token).await.unwrap();
    let counts: ReactionCounts = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts, ReactionCounts::new(1, 0));

    let response = server
        .get_auth(&api(&format!("/videos/{}", video.id)), &owner.access_token)
        .await
        .unwrap();
    let fetched: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((fetched.like_count, fetched.dislike_count), (1, 0));
}

#[tokio::test]
async fn test_reaction_body_must_match_path() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let first = upload(&server, &owner.access_token, "One").await;
    let second = upload(&server, &owner.access_token, "Two").await;

    let response = server
        .post_auth(
            &api(&format!("/videos/{}/reaction", first.id)),
            &owner.access_token,
            &ReactionRequest::like(&second.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // videoId may be omitted entirely
    let request = ReactionRequest {
        video_id: None,
        desired: "dislike",
    };
    let counts = react(&server, &owner.access_token, &first.id, &request).await;
    assert_eq!(counts, ReactionCounts::new(0, 1));
}

#[tokio::test]
async fn test_reaction_on_missing_video() {
    let server = TestServer::start().await.unwrap();
    let (_, auth) = register(&server).await;
    let response = server
        .post_auth(
            &api("/videos/424242/reaction"),
            &auth.access_token,
            &ReactionRequest::like("424242"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reaction_requires_auth() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Anon").await;
    let response = server
        .post(
            &api(&format!("/videos/{}/reaction", video.id)),
            &ReactionRequest::like(&video.id),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_reconcile_is_owner_only() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let (_, fan) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Tally").await;
    react(&server, &fan.access_token, &video.id, &ReactionRequest::like(&video.id)).await;

    let path = api(&format!("/videos/{}/reconcile", video.id));
    let response = server.post_auth(&path, &fan.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.post_auth(&path, &owner.access_token, &json!({})).await.unwrap();
    let counts: ReactionCounts = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts, ReactionCounts::new(1, 0));
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let (_, commenter) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Discuss").await;
    let comments = api(&format!("/videos/{}/comments", video.id));

    let response = server
        .post_auth(&comments, &commenter.access_token, &CommentRequest::new("first!"))
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.video_id, video.id);
    assert_eq!(comment.owner_id, commenter.user.id);
    assert!(!comment.edited);

    server
        .post_auth(&comments, &owner.access_token, &CommentRequest::new("thanks"))
        .await
        .unwrap();

    let response = server.get(&comments).await.unwrap();
    let page: Page<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.data[0].content, "thanks");

    let path = api(&format!("/comments/{}", comment.id));
    let response = server
        .patch_auth(&path, &owner.access_token, &CommentRequest::new("hijack"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .patch_auth(&path, &commenter.access_token, &CommentRequest::new("first, edited"))
        .await
        .unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(edited.edited);
    assert_eq!(edited.content, "first, edited");

    let response = server.delete_auth(&path, &commenter.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.delete_auth(&path, &commenter.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_blank_comment_rejected() {
    let server = TestServer::start().await.unwrap();
    let (_, owner) = register(&server).await;
    let video = upload(&server, &owner.access_token, "Quiet").await;
    let path = api(&format!("/videos/{}/comments", video.id));

    for content in ["", "  \n\t  "] {
        let response = server
            .post_auth(&path, &owner.access_token, &CommentRequest::new(content))
            .await
            .unwrap();
        assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
    }

    let response = server.get(&path).await.unwrap();
    let page: Page<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(page.data.is_empty());
}
