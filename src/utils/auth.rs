use axum::{
    async_trait,
    extract::FromRequestParts,
    http::header::{AUTHORIZATION, COOKIE},
    http::request::Parts,
};

use crate::state::AppState;
use crate::utils::error::AppError;
use crate::utils::jwt::{decode_access_token, Claims};

/// Access Token 쿠키 이름
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// 인증된 사용자 정보를 담는 Extractor (토큰 필수)
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

/// 로그인/비로그인 모두 허용하는 Extractor
///
/// 토큰이 없으면 `None`, 토큰이 있지만 유효하지 않으면 401을 반환합니다.
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<&str> {
        self.0.as_ref().map(AuthUser::user_id)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?
            .ok_or_else(|| AppError::unauthorized("로그인이 필요합니다."))?;

        let claims = decode_access_token(&token, &state.config.jwt_secret)?;

        Ok(AuthUser(claims))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match extract_token(parts)? {
            Some(token) => {
                let claims = decode_access_token(&token, &state.config.jwt_secret)?;
                Ok(OptionalAuthUser(Some(AuthUser(claims))))
            }
            None => Ok(OptionalAuthUser(None)),
        }
    }
}

/// Authorization 헤더 → access_token 쿠키 순서로 토큰을 찾는다
fn extract_token(parts: &Parts) -> Result<Option<String>, AppError> {
    if let Some(auth_header) = parts.headers.get(AUTHORIZATION) {
        let auth_header_str = auth_header
            .to_str()
            .map_err(|_| AppError::unauthorized("잘못된 헤더 형식입니다."))?;

        let token = auth_header_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::unauthorized("토큰 형식이 올바르지 않습니다."))?;

        return Ok(Some(token.to_string()));
    }

    let Some(cookie_header) = parts.headers.get(COOKIE) else {
        return Ok(None);
    };

    let cookie_str = cookie_header
        .to_str()
        .map_err(|_| AppError::unauthorized("잘못된 쿠키 형식입니다."))?;

    // "name1=value1; name2=value2" 형식
    let token = cookie_str
        .split(';')
        .map(str::trim)
        .filter_map(|cookie| cookie.strip_prefix(&format!("{}=", ACCESS_TOKEN_COOKIE)))
        .find(|value| !value.is_empty())
        .map(str::to_string);

    Ok(token)
}
