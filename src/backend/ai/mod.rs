//! AI Module
//!
//! Turns free-text planning input into validated activity and note drafts
//! with the help of an external language model.
//!
//! # Pipeline
//!
//! ```text
//! prompt ──► prompt::build_system_instruction ──► client::PlannerModel::generate
//!                                                          │
//!        AiResponse ◄── types::ValidatedResponse::stamp ◄── schema::validate_response ◄── extract::extract_json
//! ```
//!
//! - **`prompt`** - System instruction with reference-timezone dates
//! - **`client`** - `PlannerModel` trait and the Gemini REST client
//! - **`extract`** - Code-fence stripping and JSON parsing
//! - **`schema`** - Field-by-field validation into typed drafts
//! - **`types`** - Draft and response types, stamping
//! - **`service`** - The pipeline
//! - **`handlers`** - `POST /api/ai/parse`
//! - **`error`** - `AiError` and `ModelError`
//!
//! Model output is never trusted: `source` and `userId` are always set by the
//! server after validation.

pub mod client;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod prompt;
pub mod schema;
pub mod service;
pub mod types;

pub use client::{GeminiClient, PlannerModel};
pub use error::{AiError, ModelError, SchemaViolation, SchemaViolations};
pub use handlers::parse_prompt;
pub use service::AiService;
pub use types::{ActivityDraft, AiResponse, NoteDraft, ResponseKind, Stamped, ValidatedResponse};
