use std::time::{Duration, SystemTime};

use mediascribe::application::ports::TranscriptStore;
use mediascribe::infrastructure::storage::{MediaLibrary, MediaLibraryError};

fn library() -> (tempfile::TempDir, MediaLibrary) {
    let dir = tempfile::TempDir::new().unwrap();
    let library = MediaLibrary::new(dir.path().to_path_buf()).unwrap();
    (dir, library)
}

fn touch(dir: &std::path::Path, name: &str, age: Duration) {
    let path = dir.join(name);
    let file = std::fs::File::create(&path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
}

#[tokio::test]
async fn given_mixed_files_when_listing_then_only_known_extensions_appear() {
    let (dir, library) = library();
    touch(dir.path(), "video.mp4", Duration::ZERO);
    touch(dir.path(), "audio.mp3", Duration::ZERO);
    touch(dir.path(), "notes.docx", Duration::ZERO);
    touch(dir.path(), "archive.zip", Duration::ZERO);

    let entries = library.list().await.unwrap();
    let mut names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
    names.sort();

    assert_eq!(names, vec!["audio.mp3", "video.mp4"]);
}

#[tokio::test]
async fn given_files_of_different_ages_when_listing_then_newest_comes_first() {
    let (dir, library) = library();
    touch(dir.path(), "old.mp3", Duration::from_secs(3600));
    touch(dir.path(), "middle.mp3", Duration::from_secs(60));
    touch(dir.path(), "new.mp3", Duration::ZERO);

    let entries = library.list().await.unwrap();
    let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

    assert_eq!(names, vec!["new.mp3", "middle.mp3", "old.mp3"]);
}

#[tokio::test]
async fn given_transcript_artifact_when_listing_then_it_is_flagged() {
    let (dir, library) = library();
    touch(dir.path(), "talk_transcription_2024.txt", Duration::ZERO);
    touch(dir.path(), "talk.mp3", Duration::from_secs(10));

    let entries = library.list().await.unwrap();

    let transcript = entries
        .iter()
        .find(|e| e.name.ends_with(".txt"))
        .unwrap();
    assert!(transcript.is_transcript);
    let media = entries.iter().find(|e| e.name.ends_with(".mp3")).unwrap();
    assert!(!media.is_transcript);
}

#[tokio::test]
async fn given_traversal_names_when_resolving_then_access_is_denied() {
    let (_dir, library) = library();

    for name in ["../evil.txt", "a/b.txt", "/etc/passwd", "..", ""] {
        let result = library.resolve(name);
        assert!(
            matches!(result, Err(MediaLibraryError::AccessDenied(_))),
            "name {:?} was not rejected",
            name
        );
    }
}

#[tokio::test]
async fn given_missing_file_when_reading_then_not_found() {
    let (_dir, library) = library();
    let result = library.read("missing.mp3").await;
    assert!(matches!(result, Err(MediaLibraryError::NotFound(_))));
}

#[tokio::test]
async fn given_saved_transcript_when_reading_then_content_round_trips() {
    let (_dir, library) = library();

    library
        .save_transcript("talk_transcription_x.txt", "Transcription for: talk\n\nbody")
        .await
        .unwrap();

    let bytes = library.read("talk_transcription_x.txt").await.unwrap();
    assert_eq!(bytes, b"Transcription for: talk\n\nbody");
}

#[tokio::test]
async fn given_upload_name_when_creating_file_then_it_lands_in_the_library() {
    let (dir, library) = library();

    let (_file, path) = library.create_file("video_123_clip.mp4").await.unwrap();
    assert!(path.starts_with(dir.path().canonicalize().unwrap()));
    assert!(path.exists());
}
