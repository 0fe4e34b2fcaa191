use std::env;

const DEV_JWT_SECRET: &str = "secret";
const PLACEHOLDER_OPENAI_KEY: &str = "test-key";
const DEFAULT_LOG_DIR: &str = "logs";

/// 애플리케이션 설정
///
/// 프로세스 시작 시 한 번 생성되어 생성자를 통해 전달됩니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// 시작 시 테이블/인덱스 생성 여부 (`DB_SCHEMA_UPDATE`)
    pub schema_update: bool,
    pub log_dir: String,

    // LLM
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_timeout_secs: u64,
    pub openai_max_tokens: u32,
}

impl AppConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "8080".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string());

        let schema_update = match lookup("DB_SCHEMA_UPDATE") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidSchemaUpdate(value))?,
            None => false,
        };

        let log_dir = lookup("LOG_DIR").unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());

        let openai_api_key =
            lookup("OPENAI_API_KEY").unwrap_or_else(|| PLACEHOLDER_OPENAI_KEY.to_string());

        let openai_model = lookup("OPENAI_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string());

        let openai_timeout_secs = lookup("OPENAI_TIMEOUT_SECS")
            .unwrap_or_else(|| "25".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidTimeout)?;

        let openai_max_tokens = lookup("OPENAI_MAX_TOKENS")
            .unwrap_or_else(|| "1024".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidMaxTokens)?;

        Ok(Self {
            server_port,
            database_url,
            jwt_secret,
            schema_update,
            log_dir,
            openai_api_key,
            openai_model,
            openai_timeout_secs,
            openai_max_tokens,
        })
    }

    /// 개발용 기본값이 그대로 쓰이고 있는 키 목록
    ///
    /// 설정은 로깅보다 먼저 로드되므로, 경고는 로깅 초기화 후 main에서 남깁니다.
    pub fn insecure_defaults(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.jwt_secret == DEV_JWT_SECRET {
            keys.push("JWT_SECRET");
        }
        if self.openai_api_key == PLACEHOLDER_OPENAI_KEY {
            keys.push("OPENAI_API_KEY");
        }
        keys
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("Invalid DB_SCHEMA_UPDATE value '{0}', use 'true' or 'false'")]
    InvalidSchemaUpdate(String),
    #[error("Invalid OpenAI timeout seconds")]
    InvalidTimeout,
    #[error("Invalid OpenAI max tokens")]
    InvalidMaxTokens,
}
