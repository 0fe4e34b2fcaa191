use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};

use super::retry::RetryPolicy;
use crate::config::AppConfig;
use crate::utils::error::AppError;

/// OpenAI 에러를 세분화된 AppError로 변환
fn classify_openai_error(error: OpenAIError) -> AppError {
    match &error {
        OpenAIError::ApiError(api_err) => {
            let err_type = api_err.r#type.as_deref().unwrap_or("");
            let message = &api_err.message;
            let err_code = api_err
                .code
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default();

            if err_type == "invalid_request_error"
                && (err_code.contains("invalid_api_key") || message.contains("API key"))
            {
                AppError::OpenAiAuthError
            } else if err_type == "rate_limit_error"
                || err_code.contains("rate_limit_exceeded")
                || message.contains("rate limit")
            {
                AppError::OpenAiRateLimitError
            } else if err_type == "server_error" || err_code.contains("server") {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(message.clone())
            }
        }
        OpenAIError::Reqwest(req_err) => {
            let status = req_err.status().map(|s| s.as_u16());
            if req_err.is_timeout() || req_err.is_connect() {
                AppError::OpenAiTemporaryError
            } else if status == Some(401) {
                AppError::OpenAiAuthError
            } else if status == Some(429) {
                AppError::OpenAiRateLimitError
            } else if status.is_some_and(|s| s >= 500) {
                AppError::OpenAiTemporaryError
            } else {
                AppError::OpenAiError(req_err.to_string())
            }
        }
        _ => AppError::OpenAiError(error.to_string()),
    }
}

/// LLM 클라이언트 인터페이스
///
/// 실패 원인은 클라이언트 안에서 로그로만 남기고, 호출자에게는 텍스트 유무만 알립니다.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmClientTrait: Send + Sync {
    /// 채팅 완성 요청. 타임아웃, API 오류, 빈 응답은 모두 `None`
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Option<String>;

    /// API 연결 상태 확인 (모델 목록 조회)
    async fn check_connectivity(&self) -> Result<(), AppError>;
}

pub type LlmClient = Arc<dyn LlmClientTrait>;

/// OpenAI API 클라이언트 구현체
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
    /// 시도 1회당 제한 시간
    timeout: Duration,
    retry: RetryPolicy,
}

impl OpenAiClient {
    pub fn new(config: &AppConfig) -> Self {
        let openai_config = OpenAIConfig::new().with_api_key(&config.openai_api_key);
        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
            max_tokens: config.openai_max_tokens,
            timeout: Duration::from_secs(config.openai_timeout_secs),
            retry: RetryPolicy::default(),
        }
    }

    async fn request_completion(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(vec![
                build_system_message(system_prompt)?,
                build_user_message(user_prompt)?,
            ])
            .max_tokens(self.max_tokens)
            .temperature(0.7)
            .build()
            .map_err(|e| AppError::internal_error(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| AppError::OpenAiTemporaryError)? // 타임아웃
            .map_err(classify_openai_error)?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait::async_trait]
impl LlmClientTrait for OpenAiClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Option<String> {
        match self
            .retry
            .run(|| self.request_completion(system_prompt, user_prompt))
            .await
        {
            Ok(content) if !content.trim().is_empty() => Some(content),
            Ok(_) => {
                tracing::warn!(model = %self.model, "LLM이 빈 응답을 반환했습니다");
                None
            }
            Err(e) => {
                tracing::error!(model = %self.model, error = %e, "LLM 호출 실패");
                None
            }
        }
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        self.client
            .models()
            .list()
            .await
            .map_err(classify_openai_error)?;
        Ok(())
    }
}

fn build_system_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::System(
        ChatCompletionRequestSystemMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::internal_error(e.to_string()))?,
    ))
}

fn build_user_message(content: &str) -> Result<ChatCompletionRequestMessage, AppError> {
    Ok(ChatCompletionRequestMessage::User(
        ChatCompletionRequestUserMessageArgs::default()
            .content(content)
            .build()
            .map_err(|e| AppError::internal_error(e.to_string()))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            server_port: 8080,
            database_url: "mysql://localhost/test".to_string(),
            jwt_secret: "secret".to_string(),
            schema_update: false,
            log_dir: "logs".to_string(),
            openai_api_key: "test-api-key".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            openai_timeout_secs: 25,
            openai_max_tokens: 1024,
        }
    }

    #[test]
    fn should_create_openai_client_from_config() {
        let client = OpenAiClient::new(&test_config());

        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.max_tokens, 1024);
        assert_eq!(client.timeout, Duration::from_secs(25));
        assert_eq!(client.retry, RetryPolicy::default());
    }

    #[test]
    fn should_build_system_and_user_messages() {
        assert!(matches!(
            build_system_message("system"),
            Ok(ChatCompletionRequestMessage::System(_))
        ));
        assert!(matches!(
            build_user_message("user"),
            Ok(ChatCompletionRequestMessage::User(_))
        ));
    }

    #[test]
    fn should_classify_unknown_errors_as_generic_openai_error() {
        let error = classify_openai_error(OpenAIError::InvalidArgument("bad".to_string()));

        assert!(matches!(error, AppError::OpenAiError(_)));
    }
}
