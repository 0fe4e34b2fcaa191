use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use moodping_server::config::{establish_connection, AppConfig};
use moodping_server::domain::mood_analysis::{
    LlmClient, MoodAnalysisService, OpenAiClient, SeaOrmMoodAnalysisRepository,
};
use moodping_server::domain::mood_record::SeaOrmMoodRecordRepository;
use moodping_server::utils::logging::init_logging;
use moodping_server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 환경변수 로드
    dotenvy::dotenv().ok();

    // 2. 설정 로드
    let config = AppConfig::from_env()?;

    // 3. 로깅 초기화 (guard는 main 종료까지 유지)
    let _log_guard = init_logging(&config.log_dir);
    for key in config.insecure_defaults() {
        tracing::warn!(key, "환경변수가 설정되지 않아 개발용 기본값을 사용합니다. 프로덕션 환경에서는 반드시 설정하세요.");
    }

    // 4. DB 연결
    let db = establish_connection(&config.database_url, config.schema_update).await?;

    // 5. 의존성 조립
    let llm: LlmClient = Arc::new(OpenAiClient::new(&config));
    let analysis_service = Arc::new(MoodAnalysisService::new(
        Arc::clone(&llm),
        Arc::new(SeaOrmMoodAnalysisRepository::new(db.clone())),
    ));

    let state = AppState {
        mood_records: Arc::new(SeaOrmMoodRecordRepository::new(db)),
        analysis_service,
        llm,
        started_at: Instant::now(),
        config: config.clone(),
    };

    // 6. 서버 실행
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
