pub mod mood_record;
