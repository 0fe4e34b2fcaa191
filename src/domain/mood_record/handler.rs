use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    Json,
};
use validator::Validate;

use super::dto::{
    CreateMoodRecordRequest, ListMoodRecordQuery, MoodRecordListResponse, MoodRecordResponse,
};
use super::entity::mood_record::NewMoodRecord;
use crate::state::AppState;
use crate::utils::auth::{AuthUser, OptionalAuthUser};
use crate::utils::{error::AppError, response::ErrorResponse, BaseResponse};

/// 감정 기록 생성 API
///
/// 로그인 사용자는 토큰의 사용자 ID로, 비로그인 사용자는 `anonId`로 저장됩니다.
#[utoipa::path(
    post,
    path = "/mood-record/create",
    request_body = CreateMoodRecordRequest,
    responses(
        (status = 200, body = MoodRecordResponse),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse)
    ),
    tag = "MoodRecord"
)]
pub async fn create_mood_record(
    State(state): State<AppState>,
    user: OptionalAuthUser,
    payload: Result<Json<CreateMoodRecordRequest>, JsonRejection>,
) -> Result<Json<BaseResponse<MoodRecordResponse>>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let (user_id, anon_id) = match user.user_id() {
        Some(user_id) => (Some(user_id.to_string()), None),
        None => (None, req.anon_id),
    };

    let record = NewMoodRecord::create(
        &req.mood_emoji,
        req.intensity,
        req.mood_text.as_deref(),
        user_id,
        anon_id,
    )?;

    let saved = state.mood_records.save(record).await?;
    tracing::info!(record_id = saved.id, "감정 기록 저장 완료");

    Ok(Json(BaseResponse::success(MoodRecordResponse::from(saved))))
}

/// 내 감정 기록 목록 조회 API
#[utoipa::path(
    get,
    path = "/mood-record/list",
    params(ListMoodRecordQuery),
    responses(
        (status = 200, body = MoodRecordListResponse),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse)
    ),
    tag = "MoodRecord"
)]
pub async fn list_mood_records(
    State(state): State<AppState>,
    user: AuthUser,
    query: Result<Query<ListMoodRecordQuery>, QueryRejection>,
) -> Result<Json<BaseResponse<MoodRecordListResponse>>, AppError> {
    let Query(query) = query?;
    query.validate()?;

    let records = state
        .mood_records
        .find_by_user(user.user_id(), query.limit)
        .await?;

    let items: Vec<MoodRecordResponse> = records.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(BaseResponse::success(MoodRecordListResponse {
        items,
        total,
    })))
}
