//! 구조화 로깅 초기화
//!
//! 모든 로그는 JSON 한 줄로 stdout과 일별 파일(`moodping.log.YYYY-MM-DD`)에 함께 남습니다.
//! 요청 span(`request_id`)과 분석 단계 필드(`record_id`, `strategy`, `raw_len`)가 그대로 실립니다.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "moodping.log";
const DEFAULT_FILTER: &str = "info,moodping_server=debug,tower_http=info";

/// `RUST_LOG`가 없거나 잘못되면 기본 필터를 사용
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 로깅을 초기화하고 파일 writer guard를 돌려줍니다.
///
/// 파일은 `log_dir` 아래에 쌓입니다 (`AppConfig::log_dir`).
/// guard가 drop되면 버퍼링된 파일 로그가 유실되므로 main이 끝날 때까지 들고 있어야 합니다.
pub fn init_logging(log_dir: &str) -> WorkerGuard {
    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true);

    let file_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .with_ansi(false)
        .with_writer(file_writer);

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter())
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Failed to initialize tracing: {}", err);
    }

    guard
}
