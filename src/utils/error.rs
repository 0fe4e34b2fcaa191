use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use super::response::ErrorResponse;

/// 애플리케이션 전역 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("잘못된 요청 형식입니다: {0}")]
    JsonParseFailed(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    MoodRecordNotFound(String),

    #[error("{0}")]
    AnalysisNotFound(String),

    #[error("{0}")]
    AlreadyAnalyzed(String),

    /// 분석 파이프라인 실패 (LLM 무응답, 파싱 실패, 저장 실패를 하나로 묶음)
    #[error("감정 분석에 실패했습니다. 잠시 후 다시 시도해 주세요.")]
    AnalysisUnavailable,

    #[error("OpenAI API 인증에 실패했습니다.")]
    OpenAiAuthError,

    #[error("OpenAI API 요청 한도를 초과했습니다.")]
    OpenAiRateLimitError,

    #[error("OpenAI API가 일시적으로 응답하지 않습니다.")]
    OpenAiTemporaryError,

    #[error("OpenAI API 에러: {0}")]
    OpenAiError(String),

    #[error("데이터베이스 에러: {0}")]
    DatabaseError(String),

    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// 에러 메시지 반환
    pub fn message(&self) -> String {
        match self {
            // 내부 상세 정보는 로그에만 남긴다
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "서버 에러, 관리자에게 문의 바랍니다.".to_string()
            }
            AppError::OpenAiError(_) => "외부 API 호출에 실패했습니다.".to_string(),
            other => other.to_string(),
        }
    }

    /// 에러 코드 반환
    pub fn error_code(&self) -> String {
        match self {
            AppError::BadRequest(_) => "COMMON400",
            AppError::ValidationError(_) => "COMMON400",
            AppError::JsonParseFailed(_) => "COMMON400",
            AppError::Unauthorized(_) => "AUTH4001",
            AppError::Forbidden(_) => "MOOD4031",
            AppError::MoodRecordNotFound(_) => "MOOD4041",
            AppError::AnalysisNotFound(_) => "ANALYSIS4041",
            AppError::AlreadyAnalyzed(_) => "ANALYSIS4091",
            AppError::AnalysisUnavailable => "ANALYSIS5021",
            AppError::OpenAiAuthError => "AI5001",
            AppError::OpenAiRateLimitError => "AI4291",
            AppError::OpenAiTemporaryError => "AI5031",
            AppError::OpenAiError(_) => "AI5002",
            AppError::DatabaseError(_) => "COMMON500",
            AppError::InternalError(_) => "COMMON500",
        }
        .to_string()
    }

    /// HTTP 상태 코드 반환
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_)
            | AppError::ValidationError(_)
            | AppError::JsonParseFailed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::MoodRecordNotFound(_) | AppError::AnalysisNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            AppError::AlreadyAnalyzed(_) => StatusCode::CONFLICT,
            AppError::AnalysisUnavailable => StatusCode::BAD_GATEWAY,
            AppError::OpenAiRateLimitError => StatusCode::TOO_MANY_REQUESTS,
            AppError::OpenAiTemporaryError => StatusCode::SERVICE_UNAVAILABLE,
            AppError::OpenAiAuthError
            | AppError::OpenAiError(_)
            | AppError::DatabaseError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        match &self {
            // 상세 원인은 로그에만
            AppError::DatabaseError(detail) | AppError::InternalError(detail) => {
                error!(code = %error_code, detail = %detail, "Internal Server Error");
            }
            _ if status.is_server_error() => {
                error!(code = %error_code, status = status.as_u16(), "{}", self);
            }
            _ => {
                warn!(code = %error_code, status = status.as_u16(), "{}", self);
            }
        }

        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}

/// JsonRejection을 AppError로 변환
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::JsonParseFailed(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

/// 편의 함수들
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn internal_error(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_analysis_unavailable_to_bad_gateway() {
        let error = AppError::AnalysisUnavailable;

        assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(error.error_code(), "ANALYSIS5021");
        assert!(error.message().contains("다시 시도"));
    }

    #[test]
    fn should_hide_internal_details_from_message() {
        let error = AppError::DatabaseError("Duplicate entry '3' for key 'uq'".to_string());

        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!error.message().contains("Duplicate"));
    }

    #[test]
    fn should_map_already_analyzed_to_conflict() {
        let error = AppError::AlreadyAnalyzed("이미 분석된 기록입니다.".to_string());

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(error.message(), "이미 분석된 기록입니다.");
    }
}
