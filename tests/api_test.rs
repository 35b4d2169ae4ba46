use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use mediascribe::application::ports::{
    MediaConverter, MediaConverterError, TranscriptionClient, TranscriptionClientError,
};
use mediascribe::application::services::TranscriptionPipeline;
use mediascribe::infrastructure::storage::MediaLibrary;
use mediascribe::presentation::auth::TokenStore;
use mediascribe::presentation::config::{
    AuthSettings, ServerSettings, Settings, StorageSettings, WhisperSettings,
    SEGMENT_CEILING_BYTES, UPLOAD_CEILING_BYTES,
};
use mediascribe::presentation::{create_router, AppState};

struct StubConverter;

#[async_trait]
impl MediaConverter for StubConverter {
    async fn extract_audio(&self, _source: &Path, dest: &Path) -> Result<(), MediaConverterError> {
        tokio::fs::write(dest, b"audio").await?;
        Ok(())
    }

    async fn probe_duration(&self, _path: &Path) -> Result<f64, MediaConverterError> {
        Ok(60.0)
    }

    async fn extract_segment(
        &self,
        _source: &Path,
        _start_secs: u64,
        _duration_secs: Option<u64>,
        dest: &Path,
    ) -> Result<(), MediaConverterError> {
        tokio::fs::write(dest, b"segment").await?;
        Ok(())
    }
}

struct StubClient;

#[async_trait]
impl TranscriptionClient for StubClient {
    async fn transcribe(&self, _segment: &Path) -> Result<String, TranscriptionClientError> {
        Ok("stubbed transcript".to_string())
    }
}

const PASSWORD: &str = "correct horse";

fn test_settings(working_dir: PathBuf) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        storage: StorageSettings {
            working_dir: working_dir.clone(),
            public_dir: working_dir.join("public"),
            upload_ceiling_bytes: UPLOAD_CEILING_BYTES,
            segment_ceiling_bytes: SEGMENT_CEILING_BYTES,
        },
        whisper: WhisperSettings {
            api_key: "test-key".to_string(),
            base_url: None,
            model: None,
            ffmpeg_bin: "ffmpeg".to_string(),
            ffprobe_bin: "ffprobe".to_string(),
            tool_timeout_secs: 60,
        },
        auth: AuthSettings {
            access_password: PASSWORD.to_string(),
            token_ttl_hours: 1,
        },
    }
}

fn test_router() -> (tempfile::TempDir, Router) {
    let dir = tempfile::TempDir::new().unwrap();
    let working_dir = dir.path().to_path_buf();
    let settings = test_settings(working_dir.clone());

    let library = Arc::new(MediaLibrary::new(working_dir.clone()).unwrap());
    let converter = Arc::new(StubConverter);
    let client = Arc::new(StubClient);
    let pipeline = Arc::new(TranscriptionPipeline::new(
        converter,
        client,
        Arc::clone(&library) as _,
        working_dir,
        settings.storage.segment_ceiling_bytes,
    ));
    let token_store = Arc::new(TokenStore::new(settings.auth.token_ttl_hours));

    let state = AppState {
        pipeline,
        library,
        token_store,
        settings,
    };
    (dir, create_router(state))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(r#"{{"password": "{}"}}"#, PASSWORD)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn given_no_auth_when_checking_health_then_it_is_public() {
    let (_dir, router) = test_router();

    let response = router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_unauthorized() {
    let (_dir, router) = test_router();

    let response = router
        .oneshot(
            Request::post("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"password": "nope"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn given_no_token_when_listing_files_then_unauthorized() {
    let (_dir, router) = test_router();

    let response = router
        .oneshot(
            Request::get("/api/server-files")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn given_garbage_token_when_listing_files_then_forbidden() {
    let (_dir, router) = test_router();

    let response = router
        .oneshot(
            Request::get("/api/server-files")
                .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_valid_token_when_listing_files_then_entries_are_returned() {
    let (dir, router) = test_router();
    std::fs::write(dir.path().join("talk.mp3"), b"audio").unwrap();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::get("/api/server-files")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["files"][0]["name"], "talk.mp3");
    assert_eq!(json["files"][0]["isTranscription"], false);
}

#[tokio::test]
async fn given_valid_token_when_checking_auth_then_authenticated() {
    let (_dir, router) = test_router();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::get("/api/auth/check")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["authenticated"], true);
}

#[tokio::test]
async fn given_server_file_when_transcribing_then_transcript_is_returned() {
    let (dir, router) = test_router();
    std::fs::write(dir.path().join("talk.mp3"), b"audio bytes").unwrap();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::post("/api/transcribe-server-file")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(r#"{"filename": "talk.mp3"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["transcription"], "stubbed transcript");
    let artifact = json["transcriptionFile"].as_str().unwrap();
    assert!(artifact.starts_with("talk_transcription_"));
    assert!(dir.path().join(artifact).exists());
}

#[tokio::test]
async fn given_traversal_filename_when_transcribing_then_access_denied() {
    let (_dir, router) = test_router();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::post("/api/transcribe-server-file")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(r#"{"filename": "../outside.mp3"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn given_missing_server_file_when_transcribing_then_not_found() {
    let (_dir, router) = test_router();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::post("/api/transcribe-server-file")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::from(r#"{"filename": "ghost.mp3"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn given_persisted_transcript_when_downloading_then_bytes_match() {
    let (dir, router) = test_router();
    std::fs::write(
        dir.path().join("talk_transcription_1.txt"),
        b"Transcription for: talk\n\nbody",
    )
    .unwrap();
    let token = login(&router).await;

    let response = router
        .oneshot(
            Request::get("/api/download/talk_transcription_1.txt")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"Transcription for: talk\n\nbody");
}
