use serde::Serialize;
use utoipa::ToSchema;

use super::error::AppError;

const SUCCESS_CODE: &str = "COMMON200";
const SUCCESS_MESSAGE: &str = "성공입니다.";

/// 모든 API가 공유하는 응답 봉투
///
/// ```json
/// { "isSuccess": true, "code": "COMMON200", "message": "성공입니다.", "result": { ... } }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseResponse<T: Serialize> {
    pub is_success: bool,
    pub code: String,
    pub message: String,
    pub result: Option<T>,
}

impl<T: Serialize> BaseResponse<T> {
    pub fn success(result: T) -> Self {
        Self {
            is_success: true,
            code: SUCCESS_CODE.to_string(),
            message: SUCCESS_MESSAGE.to_string(),
            result: Some(result),
        }
    }
}

/// 실패 응답 (`result`는 항상 null)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub is_success: bool,
    #[schema(example = "ANALYSIS5021")]
    pub code: String,
    pub message: String,
    pub result: Option<()>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_success: false,
            code: code.into(),
            message: message.into(),
            result: None,
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self::new(error.error_code(), error.message())
    }
}
