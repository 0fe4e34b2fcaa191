use serde::Serialize;
use utoipa::ToSchema;

/// `GET /health` 응답
#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "0.1.0")]
    pub version: &'static str,
    #[schema(example = 3600)]
    pub uptime_secs: u64,
    pub checks: HealthChecks,
}

/// LLM 연결이 끊겨도 기록 API는 동작하므로 `degraded`까지만 내려갑니다.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
}

#[derive(Serialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthChecks {
    pub openai_api: CheckResult,
}

impl HealthChecks {
    pub fn overall(&self) -> HealthState {
        if self.openai_api.status {
            HealthState::Healthy
        } else {
            HealthState::Degraded
        }
    }
}

/// 의존성 하나의 점검 결과
#[derive(Serialize, Debug, Clone, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    #[schema(example = true)]
    pub status: bool,
    #[schema(example = 150)]
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    pub fn from_outcome(latency_ms: u64, outcome: Result<(), String>) -> Self {
        Self {
            status: outcome.is_ok(),
            latency_ms,
            error: outcome.err(),
        }
    }
}
