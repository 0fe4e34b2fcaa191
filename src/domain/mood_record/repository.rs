use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use super::entity::mood_record::{self, NewMoodRecord};
use crate::utils::error::AppError;

/// 감정 기록 저장소
#[async_trait]
pub trait MoodRecordRepository: Send + Sync {
    async fn save(&self, record: NewMoodRecord) -> Result<mood_record::Model, AppError>;

    async fn find_by_id(&self, record_id: i64) -> Result<Option<mood_record::Model>, AppError>;

    /// 사용자의 감정 기록을 최신순으로 조회
    async fn find_by_user(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<mood_record::Model>, AppError>;
}

#[derive(Clone)]
pub struct SeaOrmMoodRecordRepository {
    db: DatabaseConnection,
}

impl SeaOrmMoodRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MoodRecordRepository for SeaOrmMoodRecordRepository {
    async fn save(&self, record: NewMoodRecord) -> Result<mood_record::Model, AppError> {
        let model = record.into_active_model().insert(&self.db).await?;
        Ok(model)
    }

    async fn find_by_id(&self, record_id: i64) -> Result<Option<mood_record::Model>, AppError> {
        let model = mood_record::Entity::find_by_id(record_id)
            .one(&self.db)
            .await?;
        Ok(model)
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<mood_record::Model>, AppError> {
        let models = mood_record::Entity::find()
            .filter(mood_record::Column::UserId.eq(user_id))
            .order_by_desc(mood_record::Column::RecordedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models)
    }
}
