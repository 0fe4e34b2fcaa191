use serde::Serialize;
use utoipa::ToSchema;

use super::entity::mood_analysis;

/// 분석 성공 시 호출자에게 돌려주는 값
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub text: String,
}

/// 감정 분석 응답
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[schema(example = 1)]
    pub record_id: i64,
    #[schema(example = "😊 오늘 하루 정말 잘 보내셨네요!")]
    pub analysis_text: String,
}

/// 분석 목록 항목
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisItem {
    pub record_id: i64,
    pub analysis_text: String,
    #[schema(example = "2026-01-26T21:30:00")]
    pub created_at: String,
}

impl From<mood_analysis::Model> for AnalysisItem {
    fn from(model: mood_analysis::Model) -> Self {
        Self {
            record_id: model.record_id,
            analysis_text: model.analysis_text,
            created_at: model.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisListResponse {
    pub items: Vec<AnalysisItem>,
    pub total: usize,
}

/// 감정 분석 성공 응답 (OpenAPI 스키마용)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSuccessResponse {
    #[schema(example = true)]
    pub is_success: bool,

    #[schema(example = "COMMON200")]
    pub code: String,

    #[schema(example = "성공입니다.")]
    pub message: String,

    pub result: AnalysisResponse,
}
