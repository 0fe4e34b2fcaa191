pub mod health;
pub mod mood_analysis;
pub mod mood_record;
