//! # QA Rooms
//!
//! Client for a Q&A "rooms" application: list rooms, read a room's
//! questions, and submit new questions with optimistic cache updates.
//!
//! ## Features
//!
//! - **Keyed cache**: server-derived data stored under `(kind, room id)` keys
//! - **Optimistic submission**: questions appear immediately and are
//!   reconciled against the server, or rolled back on failure
//! - **Relative dates**: locale-aware "há 2 horas" / "2 hours ago"
//!
//! ## Modules
//!
//! - [`api`]: REST client for the rooms server
//! - [`cache`]: Remote data cache
//! - [`mutation`]: Optimistic question submission
//! - [`client`]: Fetch-and-cache reads and submission entry point
//! - [`format`]: Relative time formatting
//! - [`view`]: Room list rendering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qa_rooms::{ClientConfig, HttpRoomsClient, RoomsClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = HttpRoomsClient::new(ClientConfig::new("http://localhost:3333"))?;
//!     let client = RoomsClient::new(Arc::new(api));
//!
//!     let rooms = client.rooms().await?;
//!     if let Some(room) = rooms.first() {
//!         // Visible in the cache before the server answers
//!         let question = client.submit_question(&room.id, "What is ownership?").await?;
//!         println!("Created {}", question.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod format;
pub mod models;
pub mod mutation;
pub mod view;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, ClientConfig, HttpRoomsClient, RoomsApi};

pub use cache::{CacheEntry, QueryCache, QueryKey, QueryKind};

pub use client::{QueryState, RoomsClient};

pub use config::{Config, ConfigError, DisplayConfig, LoggingConfig};

pub use format::{Locale, RelativeTimeFormatter, UnknownLocale};

pub use models::{CreateQuestionRequest, CreateQuestionResponse, Question, Room};

pub use mutation::{CreateQuestion, MutationError, MutationResult, RestoreToken};

pub use view::{Labels, RoomListItem, RoomListView};
