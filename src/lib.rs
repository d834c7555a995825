//! Edueasee Assist Engine - AI study assistant backend
//!
//! This library implements the non-UI logic of the Edueasee study
//! assistant: prompt composition per tool, a client for the Gemini
//! generateContent endpoint, and segmentation of free-text model
//! responses into fully-populated structured results. Auth, subscription
//! gating, and billing are delegated to external backends and consumed
//! over HTTP.
//!
//! ## Features
//!
//! - **Six assist tools**: rewrite, paraphrase, grammar, equation
//!   (text or image), document analysis, assignment help
//! - **Total response segmentation**: any model response, including the
//!   empty string, yields a fully-populated result
//! - **Plan-gated access**: tool availability follows the active
//!   subscription plan
//! - **Pre-network validation**: upload ceilings and mime checks run
//!   before any external call
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edueasee_engine::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Load configuration
//!     let config = Config::from_file("config.toml")?;
//!
//!     // Initialize the engine
//!     let generator = Arc::new(GeminiClient::new(config.gemini)?);
//!     let engine = ToolEngine::new(generator, config.limits);
//!
//!     // Run a tool request
//!     let result = engine.run(ToolRequest::rewrite("my draft text")).await?;
//!     println!("{:?}", result);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod gemini;
pub mod observability;
pub mod segment;
pub mod session;
pub mod tools;
pub mod upload;

pub use config::Config;
pub use error::{AssistError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{AssistError, Result};
    pub use crate::gemini::{GeminiClient, TextGenerator};
    pub use crate::observability::HealthChecker;
    pub use crate::session::{AuthClient, BillingClient, Plan, SessionStore, User};
    pub use crate::tools::{ToolEngine, ToolKind, ToolRequest, ToolResult};
}
