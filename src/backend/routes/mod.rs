//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, health check, fallback, layers
//! └── api_routes.rs   - API endpoint routing
//! ```
//!
//! # Route Organization
//!
//! 1. **Health** - `GET /api/health`
//! 2. **Auth** - `/api/auth/*`, public
//! 3. **Protected API** - activities, notes, activity logs, AI parsing
//! 4. **Fallback** - `404 NOT_FOUND` envelope for anything else

/// Main router creation
pub mod router;

/// API endpoint routing
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
