pub mod config;
pub mod domain;
pub mod global;
pub mod state;
pub mod utils;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::health::handler::health_check,
        domain::mood_record::handler::create_mood_record,
        domain::mood_record::handler::list_mood_records,
        domain::mood_analysis::handler::analyze_record,
        domain::mood_analysis::handler::get_analysis,
        domain::mood_analysis::handler::list_my_analyses,
    ),
    components(
        schemas(
            domain::health::dto::HealthStatus,
            domain::health::dto::HealthState,
            domain::health::dto::HealthChecks,
            domain::health::dto::CheckResult,
            domain::mood_record::dto::CreateMoodRecordRequest,
            domain::mood_record::dto::MoodRecordResponse,
            domain::mood_record::dto::MoodRecordListResponse,
            domain::mood_analysis::dto::AnalysisResponse,
            domain::mood_analysis::dto::AnalysisItem,
            domain::mood_analysis::dto::AnalysisListResponse,
            domain::mood_analysis::dto::AnalysisSuccessResponse,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "헬스체크 API"),
        (name = "MoodRecord", description = "감정 기록 API"),
        (name = "MoodAnalysis", description = "감정 분석 API")
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(domain::health::health_check))
        .route(
            "/mood-record/create",
            post(domain::mood_record::handler::create_mood_record),
        )
        .route(
            "/mood-record/list",
            get(domain::mood_record::handler::list_mood_records),
        )
        .route(
            "/mood-analysis/analyze/:record_id",
            post(domain::mood_analysis::handler::analyze_record),
        )
        .route(
            "/mood-analysis/list",
            get(domain::mood_analysis::handler::list_my_analyses),
        )
        .route(
            "/mood-analysis/:record_id",
            get(domain::mood_analysis::handler::get_analysis),
        )
        .layer(middleware::from_fn(global::middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
