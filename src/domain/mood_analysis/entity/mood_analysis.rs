use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

/// 감정 기록에 대한 LLM 분석 결과
///
/// `record_id`는 `mood_record.id`를 논리적으로 참조합니다 (FK 없음).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mood_analysis")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub record_id: i64,
    /// 로그인 사용자 ID 또는 익명 ID
    pub user_id: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub analysis_text: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("analysis_text must not be empty")]
pub struct EmptyAnalysisText;

/// 저장 전 분석 결과
///
/// 공백뿐인 텍스트로는 만들 수 없으므로, 저장소까지 빈 분석이 내려가지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodAnalysis {
    record_id: i64,
    owner_id: Option<String>,
    analysis_text: String,
}

impl NewMoodAnalysis {
    pub fn create(
        record_id: i64,
        owner_id: Option<String>,
        analysis_text: &str,
    ) -> Result<Self, EmptyAnalysisText> {
        let analysis_text = analysis_text.trim();
        if analysis_text.is_empty() {
            return Err(EmptyAnalysisText);
        }

        Ok(Self {
            record_id,
            owner_id,
            analysis_text: analysis_text.to_string(),
        })
    }

    pub fn record_id(&self) -> i64 {
        self.record_id
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn analysis_text(&self) -> &str {
        &self.analysis_text
    }

    pub fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            record_id: Set(self.record_id),
            user_id: Set(self.owner_id),
            analysis_text: Set(self.analysis_text),
            created_at: Set(Local::now().naive_local()),
            ..Default::default()
        }
    }

    /// 저장된 모델 형태로 변환 (id는 저장소가 부여)
    pub fn into_model(self, id: i64) -> Model {
        Model {
            id,
            record_id: self.record_id,
            user_id: self.owner_id,
            analysis_text: self.analysis_text,
            created_at: Local::now().naive_local(),
        }
    }
}
