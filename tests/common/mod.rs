//! 통합 테스트 공용 픽스처
//!
//! DB와 OpenAI 없이 라우터 전체를 띄우기 위한 인메모리 저장소와 고정 응답 LLM.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use moodping_server::config::AppConfig;
use moodping_server::domain::mood_analysis::entity::mood_analysis::{self, NewMoodAnalysis};
use moodping_server::domain::mood_analysis::{
    LlmClientTrait, MoodAnalysisRepository, MoodAnalysisService,
};
use moodping_server::domain::mood_record::entity::mood_record::{self, NewMoodRecord};
use moodping_server::domain::mood_record::MoodRecordRepository;
use moodping_server::utils::error::AppError;
use moodping_server::utils::jwt::encode_token;
use moodping_server::{create_router, AppState};

pub const JWT_SECRET: &str = "test-secret";

#[derive(Default)]
pub struct InMemoryMoodRecords {
    records: Mutex<Vec<mood_record::Model>>,
}

impl InMemoryMoodRecords {
    pub fn insert(&self, record: NewMoodRecord) -> mood_record::Model {
        let mut records = self.records.lock().unwrap();
        let model = record.into_model(records.len() as i64 + 1);
        records.push(model.clone());
        model
    }
}

#[async_trait]
impl MoodRecordRepository for InMemoryMoodRecords {
    async fn save(&self, record: NewMoodRecord) -> Result<mood_record::Model, AppError> {
        Ok(self.insert(record))
    }

    async fn find_by_id(&self, record_id: i64) -> Result<Option<mood_record::Model>, AppError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == record_id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        limit: Option<u64>,
    ) -> Result<Vec<mood_record::Model>, AppError> {
        let records = self.records.lock().unwrap();
        let mut found: Vec<_> = records
            .iter()
            .filter(|r| r.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();
        found.reverse();
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }
}

#[derive(Default)]
pub struct InMemoryAnalyses {
    analyses: Mutex<Vec<mood_analysis::Model>>,
    fail_on_save: bool,
}

impl InMemoryAnalyses {
    pub fn failing() -> Self {
        Self {
            fail_on_save: true,
            ..Default::default()
        }
    }

    pub fn count(&self) -> usize {
        self.analyses.lock().unwrap().len()
    }
}

#[async_trait]
impl MoodAnalysisRepository for InMemoryAnalyses {
    async fn save(&self, analysis: NewMoodAnalysis) -> Result<mood_analysis::Model, AppError> {
        if self.fail_on_save {
            return Err(AppError::DatabaseError("write failed".to_string()));
        }
        let mut analyses = self.analyses.lock().unwrap();
        let model = analysis.into_model(analyses.len() as i64 + 1);
        analyses.push(model.clone());
        Ok(model)
    }

    async fn find_by_record_id(
        &self,
        record_id: i64,
    ) -> Result<Option<mood_analysis::Model>, AppError> {
        let analyses = self.analyses.lock().unwrap();
        Ok(analyses.iter().find(|a| a.record_id == record_id).cloned())
    }

    async fn find_all_by_owner_id(
        &self,
        owner_id: String,
    ) -> Result<Vec<mood_analysis::Model>, AppError> {
        let analyses = self.analyses.lock().unwrap();
        Ok(analyses
            .iter()
            .rev()
            .filter(|a| a.user_id.as_deref() == Some(owner_id.as_str()))
            .cloned()
            .collect())
    }

    async fn exists_by_record_id(&self, record_id: i64) -> Result<bool, AppError> {
        let analyses = self.analyses.lock().unwrap();
        Ok(analyses.iter().any(|a| a.record_id == record_id))
    }
}

/// 항상 같은 응답을 돌려주는 LLM
pub struct ScriptedLlm {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            reply: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClientTrait for ScriptedLlm {
    async fn complete(&self, _system_prompt: &str, _user_prompt: &str) -> Option<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }

    async fn check_connectivity(&self) -> Result<(), AppError> {
        match self.reply {
            Some(_) => Ok(()),
            None => Err(AppError::OpenAiTemporaryError),
        }
    }
}

pub struct TestApp {
    pub router: Router,
    pub records: Arc<InMemoryMoodRecords>,
    pub analyses: Arc<InMemoryAnalyses>,
    pub llm: Arc<ScriptedLlm>,
}

pub fn test_config() -> AppConfig {
    AppConfig {
        server_port: 0,
        database_url: "mysql://localhost/test".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        schema_update: false,
        log_dir: "logs".to_string(),
        openai_api_key: "test-key".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        openai_timeout_secs: 25,
        openai_max_tokens: 1024,
    }
}

pub fn test_app(llm: ScriptedLlm) -> TestApp {
    test_app_with(llm, InMemoryAnalyses::default())
}

pub fn test_app_with(llm: ScriptedLlm, analyses: InMemoryAnalyses) -> TestApp {
    let records = Arc::new(InMemoryMoodRecords::default());
    let analyses = Arc::new(analyses);
    let llm = Arc::new(llm);

    let analysis_service = Arc::new(MoodAnalysisService::new(llm.clone(), analyses.clone()));
    let state = AppState {
        config: test_config(),
        mood_records: records.clone(),
        analysis_service,
        llm: llm.clone(),
        started_at: Instant::now(),
    };

    TestApp {
        router: create_router(state),
        records,
        analyses,
        llm,
    }
}

pub fn bearer(user_id: &str) -> String {
    let token = encode_token(user_id.to_string(), JWT_SECRET, 3600).unwrap();
    format!("Bearer {}", token)
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
