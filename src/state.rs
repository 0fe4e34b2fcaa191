use std::sync::Arc;
use std::time::Instant;

use crate::config::AppConfig;
use crate::domain::mood_analysis::{LlmClient, MoodAnalysisService};
use crate::domain::mood_record::MoodRecordRepository;

/// 핸들러가 공유하는 애플리케이션 상태
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub mood_records: Arc<dyn MoodRecordRepository>,
    pub analysis_service: Arc<MoodAnalysisService>,
    pub llm: LlmClient,
    pub started_at: Instant,
}
