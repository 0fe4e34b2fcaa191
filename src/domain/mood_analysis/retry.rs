use std::future::Future;
use std::time::Duration;

use backoff::{future::retry, ExponentialBackoff};

use crate::utils::error::AppError;

/// 일시적 장애로 보고 다시 시도할 오류
///
/// 분류는 `classify_openai_error`가 먼저 하고, 분류되지 않은 메시지만 문자열로 판단합니다.
fn is_transient(error: &AppError) -> bool {
    match error {
        AppError::OpenAiRateLimitError | AppError::OpenAiTemporaryError => true,
        AppError::OpenAiError(msg) => {
            let msg = msg.to_lowercase();
            ["timed out", "timeout", "connection", "503", "502", "504"]
                .iter()
                .any(|needle| msg.contains(needle))
        }
        _ => false,
    }
}

/// LLM 호출 재시도 정책 (지수 백오프)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub initial_interval: Duration,
    pub max_interval: Duration,
    /// 첫 시도부터 포기까지의 총 시간
    pub max_elapsed: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            max_interval: Duration::from_secs(10),
            max_elapsed: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_interval,
            current_interval: self.initial_interval,
            max_interval: self.max_interval,
            max_elapsed_time: Some(self.max_elapsed),
            multiplier: 2.0,
            ..Default::default()
        }
    }

    /// 일시적 오류는 백오프 후 재시도하고, 영구적 오류는 즉시 돌려준다
    pub async fn run<F, Fut, T>(&self, operation: F) -> Result<T, AppError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let operation = &operation;
        retry(self.backoff(), || async move {
            operation().await.map_err(|e| {
                if is_transient(&e) {
                    tracing::warn!(error = %e, "LLM 호출 일시 오류, 재시도");
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        })
        .await
    }
}
