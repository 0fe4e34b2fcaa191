use chrono::Local;
use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// 감정 강도 허용 범위
pub const MIN_INTENSITY: i16 = 0;
pub const MAX_INTENSITY: i16 = 10;

/// 감정 메모 최대 글자 수
pub const MOOD_TEXT_MAX_CHARS: usize = 500;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "mood_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 로그인 사용자 ID
    pub user_id: Option<String>,
    /// 비로그인 사용자의 익명 ID
    pub anon_id: Option<String>,
    pub record_date: Date,
    pub recorded_at: DateTime,
    /// 감정 레이블 (예: "happy", "anxious")
    pub mood_emoji: String,
    pub intensity: i16,
    pub mood_text: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 분석 결과에 붙일 소유자 식별자 (로그인 ID 우선, 없으면 익명 ID)
    pub fn owner_id(&self) -> Option<&str> {
        self.user_id.as_deref().or(self.anon_id.as_deref())
    }
}

/// 저장 전 감정 기록 (검증을 통과한 값만 생성 가능)
#[derive(Debug, Clone, PartialEq)]
pub struct NewMoodRecord {
    user_id: Option<String>,
    anon_id: Option<String>,
    mood_emoji: String,
    intensity: i16,
    mood_text: Option<String>,
    recorded_at: DateTime,
}

impl NewMoodRecord {
    pub fn create(
        mood_emoji: &str,
        intensity: i16,
        mood_text: Option<&str>,
        user_id: Option<String>,
        anon_id: Option<String>,
    ) -> Result<Self, AppError> {
        let mood_emoji = mood_emoji.trim();
        if mood_emoji.is_empty() {
            return Err(AppError::ValidationError(
                "감정 이모지는 비어 있을 수 없습니다.".to_string(),
            ));
        }

        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&intensity) {
            return Err(AppError::ValidationError(
                "감정 강도는 0 이상 10 이하여야 합니다.".to_string(),
            ));
        }

        if mood_text.is_some_and(|text| text.chars().count() > MOOD_TEXT_MAX_CHARS) {
            return Err(AppError::ValidationError(
                "감정 메모는 500자 이하여야 합니다.".to_string(),
            ));
        }

        let mood_text = mood_text
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string);

        Ok(Self {
            user_id,
            anon_id,
            mood_emoji: mood_emoji.to_string(),
            intensity,
            mood_text,
            recorded_at: Local::now().naive_local(),
        })
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn mood_emoji(&self) -> &str {
        &self.mood_emoji
    }

    pub fn intensity(&self) -> i16 {
        self.intensity
    }

    pub fn mood_text(&self) -> Option<&str> {
        self.mood_text.as_deref()
    }

    pub fn into_active_model(self) -> ActiveModel {
        let now = Local::now().naive_local();
        ActiveModel {
            user_id: Set(self.user_id),
            anon_id: Set(self.anon_id),
            record_date: Set(self.recorded_at.date()),
            recorded_at: Set(self.recorded_at),
            mood_emoji: Set(self.mood_emoji),
            intensity: Set(self.intensity),
            mood_text: Set(self.mood_text),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
    }

    /// 저장된 모델 형태로 변환 (id는 저장소가 부여)
    pub fn into_model(self, id: i64) -> Model {
        let now = Local::now().naive_local();
        Model {
            id,
            user_id: self.user_id,
            anon_id: self.anon_id,
            record_date: self.recorded_at.date(),
            recorded_at: self.recorded_at,
            mood_emoji: self.mood_emoji,
            intensity: self.intensity,
            mood_text: self.mood_text,
            created_at: now,
            updated_at: now,
        }
    }
}
