use std::sync::Arc;

use super::client::LlmClient;
use super::dto::AnalysisResult;
use super::entity::mood_analysis::{self, EmptyAnalysisText, NewMoodAnalysis};
use super::extractor;
use super::prompt::{self, SYSTEM_PROMPT};
use super::repository::MoodAnalysisRepository;
use super::signal::MoodSignal;
use crate::utils::error::AppError;

const RAW_PREVIEW_CHARS: usize = 200;

/// 분석 파이프라인 실패 원인
///
/// 어느 단계에서 멈췄는지 구분하지만, 외부로는 모두 같은 "분석 불가" 응답이 됩니다.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisFailure {
    #[error("LLM 응답 없음")]
    UpstreamUnavailable,

    #[error("LLM 응답에서 분석 텍스트를 추출하지 못함")]
    UnparsableResponse,

    #[error("분석 결과 생성 실패: {0}")]
    InvalidEntity(#[from] EmptyAnalysisText),

    #[error("분석 결과 저장 실패: {0}")]
    PersistenceFailure(#[source] AppError),
}

impl From<AnalysisFailure> for AppError {
    fn from(_: AnalysisFailure) -> Self {
        AppError::AnalysisUnavailable
    }
}

/// 감정 분석 오케스트레이터
///
/// 프롬프트 생성 → LLM 호출 → 텍스트 추출 → 저장 순서로만 진행하며,
/// 앞 단계가 실패하면 뒤 단계는 실행하지 않습니다.
pub struct MoodAnalysisService {
    llm: LlmClient,
    repository: Arc<dyn MoodAnalysisRepository>,
}

impl MoodAnalysisService {
    pub fn new(llm: LlmClient, repository: Arc<dyn MoodAnalysisRepository>) -> Self {
        Self { llm, repository }
    }

    pub async fn analyze_and_save(
        &self,
        signal: &MoodSignal,
    ) -> Result<AnalysisResult, AnalysisFailure> {
        let record_id = signal.record_id;

        let user_prompt = prompt::build(signal);
        let raw = self.call_llm(record_id, &user_prompt).await?;
        let text = Self::extract(record_id, &raw)?;
        let saved = self.persist(signal, &text).await?;

        tracing::info!(record_id, analysis_id = saved.id, "감정 분석 저장 완료");
        // 반환값은 저장본: 추출 텍스트에서 앞뒤 공백만 제거한 값 (조회 API 응답과 동일)
        Ok(AnalysisResult {
            text: saved.analysis_text,
        })
    }

    async fn call_llm(&self, record_id: i64, user_prompt: &str) -> Result<String, AnalysisFailure> {
        let Some(raw) = self.llm.complete(SYSTEM_PROMPT, user_prompt).await else {
            tracing::error!(record_id, "LLM 응답 없음 (타임아웃 또는 API 오류)");
            return Err(AnalysisFailure::UpstreamUnavailable);
        };

        tracing::info!(record_id, raw_len = raw.chars().count(), "LLM 응답 수신");
        tracing::debug!(
            record_id,
            preview = %raw.chars().take(RAW_PREVIEW_CHARS).collect::<String>(),
            "LLM 원본 응답"
        );
        Ok(raw)
    }

    fn extract(record_id: i64, raw: &str) -> Result<String, AnalysisFailure> {
        let Some(extraction) = extractor::extract_with_strategy(raw) else {
            tracing::error!(record_id, "LLM 응답 파싱 실패");
            return Err(AnalysisFailure::UnparsableResponse);
        };

        tracing::debug!(record_id, strategy = extraction.strategy.name(), "분석 텍스트 추출");
        Ok(extraction.text)
    }

    async fn persist(
        &self,
        signal: &MoodSignal,
        text: &str,
    ) -> Result<mood_analysis::Model, AnalysisFailure> {
        let analysis = NewMoodAnalysis::create(signal.record_id, signal.owner_id.clone(), text)
            .inspect_err(|e| tracing::error!(record_id = signal.record_id, error = %e, "분석 결과 생성 실패"))?;

        self.repository.save(analysis).await.map_err(|e| {
            tracing::error!(record_id = signal.record_id, error = %e, "분석 결과 저장 실패");
            AnalysisFailure::PersistenceFailure(e)
        })
    }

    /// 기록 ID로 분석 결과 조회. 빈 텍스트는 없는 것으로 취급합니다.
    pub async fn get_analysis_by_record_id(
        &self,
        record_id: i64,
    ) -> Result<Option<AnalysisResult>, AppError> {
        let found = self.repository.find_by_record_id(record_id).await?;

        Ok(found
            .filter(|model| !model.analysis_text.trim().is_empty())
            .map(|model| AnalysisResult {
                text: model.analysis_text,
            }))
    }

    pub async fn has_analysis(&self, record_id: i64) -> Result<bool, AppError> {
        self.repository.exists_by_record_id(record_id).await
    }

    pub async fn list_analyses_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<mood_analysis::Model>, AppError> {
        self.repository
            .find_all_by_owner_id(owner_id.to_string())
            .await
    }
}
