
use common_test_utils::{config_for, form_field_names, form_field_value, run_blocking, API_KEY, ORG_ID, PROJECT_ID};
use pi_uploader::backend_config::{AuthScheme, PLACEHOLDER_BASE_URL, PLACEHOLDER_PROJECT_ID};
use pi_uploader::errors::{PipelineError, UploadError};
use pi_uploader::operations::Uploader;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/api/hardware/images";

#[tokio::test(flavor = "multi_thread")]
async fn created_response_uploads_and_removes_local_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "image": { "id": "abc", "public_url": "http://x/y.jpg" },
            "message": "Photo uploaded successfully from hardware device"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());
    let target = dir.path().join("shot.jpg");
    let target_for_task = target.clone();

    let receipt = run_blocking(move || {
        let mut uploader = Uploader::new(config).unwrap();
        assert!(!uploader.initialize_camera(true));
        uploader.capture_and_upload_to(Some(target_for_task.as_path()), true)
    })
    .await
    .unwrap();

    assert_eq!(receipt.image_id.as_deref(), Some("abc"));
    assert_eq!(receipt.public_url.as_deref(), Some("http://x/y.jpg"));
    assert!(!target.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn server_error_fails_and_keeps_local_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("server error"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());
    let target = dir.path().join("shot.jpg");
    let target_for_task = target.clone();

    let err = run_blocking(move || {
        let mut uploader = Uploader::new(config).unwrap();
        uploader.capture_and_upload_to(Some(target_for_task.as_path()), true)
    })
    .await
    .unwrap_err();

    match err {
        PipelineError::Upload(UploadError::Rejected { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "server error");
        }
        other => panic!("expected a rejected upload, got {other:?}"),
    }
    assert!(target.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn request_carries_four_fields_file_and_one_auth_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());
    let target = dir.path().join("shot.jpg");

    run_blocking(move || {
        let mut uploader = Uploader::new(config).unwrap();
        uploader.capture_and_upload_to(Some(target.as_path()), false)
    })
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    let mut names = form_field_names(&request.body);
    names.sort();
    assert_eq!(
        names,
        vec!["description", "file", "folderName", "organizationId", "projectId"]
    );
    assert_eq!(form_field_value(&request.body, "projectId").as_deref(), Some(PROJECT_ID));
    assert_eq!(form_field_value(&request.body, "organizationId").as_deref(), Some(ORG_ID));
    assert_eq!(
        form_field_value(&request.body, "folderName").as_deref(),
        Some("Raspberry Pi Photos")
    );
    let description = form_field_value(&request.body, "description").unwrap();
    assert!(description.starts_with("RPi Capture - "));
    assert_eq!(description.len(), "RPi Capture - YYYY-MM-DD HH:MM:SS".len());

    let body = String::from_utf8_lossy(&request.body);
    assert!(body.contains("name=\"file\"; filename=\"shot.jpg\"\r\nContent-Type: image/jpeg"));

    assert_eq!(request.headers.get_all("x-api-key").iter().count(), 1);
    assert_eq!(request.headers.get("x-api-key").unwrap(), API_KEY);
    assert!(request.headers.get("authorization").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn bearer_scheme_sends_only_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "image": { "id": 7 } })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&server.uri(), dir.path());
    config.backend.auth_scheme = AuthScheme::Bearer;

    let receipt = run_blocking(move || {
        let mut uploader = Uploader::new(config).unwrap();
        uploader.capture_and_upload(true)
    })
    .await
    .unwrap();
    assert_eq!(receipt.image_id.as_deref(), Some("7"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn created_without_image_object_is_still_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());

    let receipt = run_blocking(move || Uploader::new(config).unwrap().capture_and_upload(true))
        .await
        .unwrap();
    assert!(receipt.image_id.is_none());
    assert!(receipt.public_url.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn created_with_non_json_body_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(201).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());
    let target = dir.path().join("shot.jpg");
    let target_for_task = target.clone();

    let err = run_blocking(move || {
        Uploader::new(config)
            .unwrap()
            .capture_and_upload_to(Some(target_for_task.as_path()), true)
    })
    .await
    .unwrap_err();
    assert!(matches!(err, PipelineError::Upload(UploadError::InvalidResponse(_))));
    assert!(target.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_is_reported_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid or missing API key" })),
        )
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&server.uri(), dir.path());

    let err = run_blocking(move || Uploader::new(config).unwrap().capture_and_upload(true))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Upload(UploadError::Rejected { status, .. }) if status.as_u16() == 401
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn slow_backend_hits_the_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&server.uri(), dir.path());
    config.upload.timeout_secs = 1;
    let target = dir.path().join("shot.jpg");
    let target_for_task = target.clone();

    let err = run_blocking(move || {
        Uploader::new(config)
            .unwrap()
            .capture_and_upload_to(Some(target_for_task.as_path()), true)
    })
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Upload(UploadError::Timeout(_) | UploadError::Network(_))
    ));
    assert!(target.exists());
}

#[test]
fn connection_refused_is_a_failure_not_a_crash() {
    // Reserve a port, then free it so nothing is listening there.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&format!("http://127.0.0.1:{}", port), dir.path());
    let target = dir.path().join("shot.jpg");

    let err = Uploader::new(config)
        .unwrap()
        .capture_and_upload_to(Some(target.as_path()), true)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Upload(UploadError::Network(_))));
    assert!(target.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_configuration_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();

    let mut config = config_for(&server.uri(), dir.path());
    config.backend.project_id = PLACEHOLDER_PROJECT_ID.to_string();
    assert!(run_blocking(move || Uploader::new(config).is_err()).await);

    let mut config = config_for(&server.uri(), dir.path());
    config.backend.base_url = PLACEHOLDER_BASE_URL.to_string();
    assert!(run_blocking(move || Uploader::new(config).is_err()).await);

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
