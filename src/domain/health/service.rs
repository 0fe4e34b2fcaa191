use std::time::{Duration, Instant};

use super::dto::{CheckResult, HealthChecks, HealthStatus};
use crate::domain::mood_analysis::LlmClientTrait;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

pub(super) async fn check_health(llm: &dyn LlmClientTrait, started_at: Instant) -> HealthStatus {
    let checks = HealthChecks {
        openai_api: check_llm(llm).await,
    };

    HealthStatus {
        status: checks.overall(),
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: started_at.elapsed().as_secs(),
        checks,
    }
}

async fn check_llm(llm: &dyn LlmClientTrait) -> CheckResult {
    let start = Instant::now();

    let outcome = match tokio::time::timeout(CHECK_TIMEOUT, llm.check_connectivity()).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err("Timeout".to_string()),
    };

    if let Err(reason) = &outcome {
        tracing::warn!(reason = %reason, "LLM 헬스체크 실패");
    }

    CheckResult::from_outcome(start.elapsed().as_millis() as u64, outcome)
}
