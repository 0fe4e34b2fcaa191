use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::entity::mood_record;

/// 감정 기록 생성 요청 DTO
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodRecordRequest {
    /// 감정 레이블 (예: happy, anxious)
    #[validate(length(min = 1, message = "감정 이모지는 필수입니다"))]
    pub mood_emoji: String,

    /// 감정 강도 (0 ~ 10)
    #[validate(range(min = 0, max = 10, message = "감정 강도는 0 이상 10 이하여야 합니다"))]
    pub intensity: i16,

    /// 감정 메모 (선택, 500자 이내)
    #[validate(length(max = 500, message = "감정 메모는 500자 이하여야 합니다"))]
    pub mood_text: Option<String>,

    /// 비로그인 사용자 익명 ID
    pub anon_id: Option<String>,
}

/// 감정 기록 목록 조회 쿼리
#[derive(Debug, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListMoodRecordQuery {
    /// 최대 조회 건수 (1 ~ 100)
    #[validate(range(min = 1, max = 100, message = "limit은 1 이상 100 이하여야 합니다"))]
    pub limit: Option<u64>,
}

/// 감정 기록 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecordResponse {
    pub id: i64,
    pub mood_emoji: String,
    pub intensity: i16,
    pub mood_text: Option<String>,
    #[schema(example = "2026-10-19")]
    pub record_date: String,
    #[schema(example = "2026-10-19T21:30:00")]
    pub recorded_at: String,
}

impl From<mood_record::Model> for MoodRecordResponse {
    fn from(model: mood_record::Model) -> Self {
        Self {
            id: model.id,
            mood_emoji: model.mood_emoji,
            intensity: model.intensity,
            mood_text: model.mood_text,
            record_date: model.record_date.format("%Y-%m-%d").to_string(),
            recorded_at: model.recorded_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

/// 감정 기록 목록 응답 DTO
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoodRecordListResponse {
    pub items: Vec<MoodRecordResponse>,
    pub total: usize,
}
