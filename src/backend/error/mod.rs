//! Backend Error Module
//!
//! Error types used by HTTP handlers and their conversion into responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status/code/message mapping
//! └── conversion.rs - IntoResponse impl and the ApiJson extractor
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` on AI, shared, sqlx and JSON body
//! errors alike.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ApiJson;
pub use types::BackendError;
