//! Integration tests

pub mod ai_api_test;
pub mod api_test;
pub mod database_test;
pub mod gemini_client_test;
