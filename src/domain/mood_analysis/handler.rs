use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use super::dto::{AnalysisItem, AnalysisListResponse, AnalysisResponse, AnalysisSuccessResponse};
use super::signal::MoodSignal;
use crate::state::AppState;
use crate::utils::auth::{AuthUser, OptionalAuthUser};
use crate::utils::{error::AppError, response::ErrorResponse, BaseResponse};

fn parse_record_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    let Path(record_id) = path?;
    if record_id < 1 {
        return Err(AppError::bad_request("recordId는 1 이상이어야 합니다."));
    }
    Ok(record_id)
}

/// 감정 기록 분석 API
///
/// 저장된 감정 기록을 LLM으로 분석하고 결과를 저장합니다.
/// 로그인 사용자는 본인 기록만 분석할 수 있으며, 기록당 분석은 한 번입니다.
#[utoipa::path(
    post,
    path = "/mood-analysis/analyze/{record_id}",
    params(("record_id" = i64, Path, description = "감정 기록 ID")),
    responses(
        (status = 200, body = AnalysisSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 403, body = ErrorResponse),
        (status = 404, body = ErrorResponse),
        (status = 409, body = ErrorResponse),
        (status = 502, description = "AI 분석 불가", body = ErrorResponse)
    ),
    tag = "MoodAnalysis"
)]
pub async fn analyze_record(
    State(state): State<AppState>,
    user: OptionalAuthUser,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<AnalysisResponse>>, AppError> {
    let record_id = parse_record_id(path)?;

    let record = state
        .mood_records
        .find_by_id(record_id)
        .await?
        .ok_or_else(|| {
            AppError::MoodRecordNotFound(format!(
                "감정 기록(id={})을 찾을 수 없습니다.",
                record_id
            ))
        })?;

    if let Some(user_id) = user.user_id() {
        if record.user_id.as_deref() != Some(user_id) {
            tracing::warn!(record_id, user_id, "타인의 감정 기록 분석 시도");
            return Err(AppError::forbidden("본인의 감정 기록만 분석할 수 있습니다."));
        }
    }

    if state.analysis_service.has_analysis(record_id).await? {
        return Err(AppError::AlreadyAnalyzed(format!(
            "감정 기록(id={})은 이미 분석되었습니다.",
            record_id
        )));
    }

    let signal = MoodSignal::try_from(&record)?;
    let result = state.analysis_service.analyze_and_save(&signal).await?;

    Ok(Json(BaseResponse::success(AnalysisResponse {
        record_id,
        analysis_text: result.text,
    })))
}

/// 감정 분석 결과 조회 API
#[utoipa::path(
    get,
    path = "/mood-analysis/{record_id}",
    params(("record_id" = i64, Path, description = "감정 기록 ID")),
    responses(
        (status = 200, body = AnalysisSuccessResponse),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "MoodAnalysis"
)]
pub async fn get_analysis(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<BaseResponse<AnalysisResponse>>, AppError> {
    let record_id = parse_record_id(path)?;

    let result = state
        .analysis_service
        .get_analysis_by_record_id(record_id)
        .await?
        .ok_or_else(|| {
            AppError::AnalysisNotFound(format!(
                "감정 기록(id={})의 분석 결과가 없습니다.",
                record_id
            ))
        })?;

    Ok(Json(BaseResponse::success(AnalysisResponse {
        record_id,
        analysis_text: result.text,
    })))
}

/// 내 감정 분석 목록 조회 API
#[utoipa::path(
    get,
    path = "/mood-analysis/list",
    responses(
        (status = 200, body = AnalysisListResponse),
        (status = 401, body = ErrorResponse)
    ),
    tag = "MoodAnalysis"
)]
pub async fn list_my_analyses(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<BaseResponse<AnalysisListResponse>>, AppError> {
    let analyses = state
        .analysis_service
        .list_analyses_by_owner(user.user_id())
        .await?;

    let items: Vec<AnalysisItem> = analyses.into_iter().map(Into::into).collect();
    let total = items.len();

    Ok(Json(BaseResponse::success(AnalysisListResponse {
        items,
        total,
    })))
}
