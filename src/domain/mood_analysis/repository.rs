use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

use super::entity::mood_analysis::{self, NewMoodAnalysis};
use crate::utils::error::AppError;

/// 분석 결과 저장소
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MoodAnalysisRepository: Send + Sync {
    /// 분석 결과를 저장합니다. 실패하면 쓰기는 롤백됩니다.
    async fn save(&self, analysis: NewMoodAnalysis) -> Result<mood_analysis::Model, AppError>;

    async fn find_by_record_id(
        &self,
        record_id: i64,
    ) -> Result<Option<mood_analysis::Model>, AppError>;

    /// 소유자의 분석 결과를 최신순으로 조회
    async fn find_all_by_owner_id(
        &self,
        owner_id: String,
    ) -> Result<Vec<mood_analysis::Model>, AppError>;

    async fn exists_by_record_id(&self, record_id: i64) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct SeaOrmMoodAnalysisRepository {
    db: DatabaseConnection,
}

impl SeaOrmMoodAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MoodAnalysisRepository for SeaOrmMoodAnalysisRepository {
    async fn save(&self, analysis: NewMoodAnalysis) -> Result<mood_analysis::Model, AppError> {
        let record_id = analysis.record_id();
        let txn = self.db.begin().await?;

        match analysis.into_active_model().insert(&txn).await {
            Ok(model) => {
                txn.commit().await?;
                Ok(model)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(
                        record_id,
                        error = %rollback_err,
                        "분석 결과 롤백 실패"
                    );
                }
                Err(e.into())
            }
        }
    }

    async fn find_by_record_id(
        &self,
        record_id: i64,
    ) -> Result<Option<mood_analysis::Model>, AppError> {
        let model = mood_analysis::Entity::find()
            .filter(mood_analysis::Column::RecordId.eq(record_id))
            .one(&self.db)
            .await?;
        Ok(model)
    }

    async fn find_all_by_owner_id(
        &self,
        owner_id: String,
    ) -> Result<Vec<mood_analysis::Model>, AppError> {
        let models = mood_analysis::Entity::find()
            .filter(mood_analysis::Column::UserId.eq(owner_id))
            .order_by_desc(mood_analysis::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models)
    }

    async fn exists_by_record_id(&self, record_id: i64) -> Result<bool, AppError> {
        let count = mood_analysis::Entity::find()
            .filter(mood_analysis::Column::RecordId.eq(record_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
