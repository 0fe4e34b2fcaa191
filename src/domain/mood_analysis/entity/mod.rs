pub mod mood_analysis;
