use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use mediascribe::application::services::TranscriptionPipeline;
use mediascribe::infrastructure::media::FfmpegConverter;
use mediascribe::infrastructure::observability::{init_tracing, TracingConfig};
use mediascribe::infrastructure::storage::MediaLibrary;
use mediascribe::infrastructure::transcription::OpenAiWhisperClient;
use mediascribe::presentation::auth::TokenStore;
use mediascribe::presentation::config::Settings;
use mediascribe::presentation::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env();
    init_tracing(TracingConfig::default(), settings.server.port);

    if settings.whisper.api_key.is_empty() {
        tracing::warn!("OPENAI_API_KEY not set; transcription jobs will fail until it is");
    }

    let library = Arc::new(MediaLibrary::new(settings.storage.working_dir.clone())?);

    let converter = Arc::new(
        FfmpegConverter::new(
            settings.whisper.ffmpeg_bin.clone(),
            settings.whisper.ffprobe_bin.clone(),
        )
        .with_timeout(settings.whisper.tool_timeout_secs),
    );

    let client = Arc::new(OpenAiWhisperClient::new(
        settings.whisper.api_key.clone(),
        settings.whisper.base_url.clone(),
        settings.whisper.model.clone(),
    ));

    let pipeline = Arc::new(TranscriptionPipeline::new(
        converter,
        client,
        Arc::clone(&library) as _,
        library.base_dir().to_path_buf(),
        settings.storage.segment_ceiling_bytes,
    ));

    let token_store = Arc::new(TokenStore::new(settings.auth.token_ttl_hours));

    let addr = SocketAddr::new(settings.server.host.parse()?, settings.server.port);

    let state = AppState {
        pipeline,
        library,
        token_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
