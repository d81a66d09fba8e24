//! # gemini-smoke
//!
//! A one-shot smoke test for Google's Gemini API: load the API key from
//! `.env.local`, send the prompt `"Hello"` to `gemini-flash-latest`, and
//! print what comes back.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gemini_smoke::{app, GeminiClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     gemini_smoke::config::load_env_file(gemini_smoke::config::ENV_FILE);
//!
//!     let mut stdout = std::io::stdout();
//!     app::run(|name| std::env::var(name).ok(), GeminiClient::new, &mut stdout).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod generator;
pub mod models;

// Re-export main types
pub use client::{GeminiClient, GeminiClientBuilder};
pub use config::{ApiVersion, GeminiConfig, ModelConfig};
pub use error::{Error, Result};
pub use generator::TextGenerator;
pub use models::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Content, GeminiClient, GeminiClientBuilder, GenerateContentRequest,
        GenerateContentResponse, Part, Result, Role, TextGenerator,
    };
}
