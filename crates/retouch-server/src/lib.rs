//! Retouch Server - HTTP host for Retouch editing sessions
//!
//! Each browser tab creates a session, uploads an image and then drives the
//! sliders and transform buttons through the JSON API. Rendering happens in
//! `retouch-core`; prepared downloads are written as temp files.
//!
//! # Module Structure
//!
//! - `config` - Command line and environment configuration
//! - `logging` - Tracing subscriber setup
//! - `error` - API errors and their HTTP status mapping
//! - `state` - Shared session table
//! - `routes` - Request routing and handlers
//! - `server` - Accept loop

pub mod config;
pub mod error;
pub mod logging;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{LogFormat, ServerConfig};
pub use error::ApiError;
pub use state::AppState;
