pub mod client;
pub mod dto;
pub mod entity;
pub mod extractor;
pub mod handler;
pub mod prompt;
pub mod repository;
mod retry;
pub mod service;
pub mod signal;

pub use client::{LlmClient, LlmClientTrait, OpenAiClient};
pub use repository::{MoodAnalysisRepository, SeaOrmMoodAnalysisRepository};
pub use service::{AnalysisFailure, MoodAnalysisService};
pub use signal::MoodSignal;
