//! Rooms REST API
//!
//! Client side of the rooms server.
//!
//! # Endpoints
//!
//! - `GET /rooms` - List rooms
//! - `GET /rooms/:roomId/questions` - List a room's questions, newest first
//! - `POST /rooms/:roomId/questions` - Create a question
//!
//! The [`RoomsApi`] trait is the seam the rest of the crate depends on;
//! [`HttpRoomsClient`] is its reqwest implementation.

mod client;
pub mod error;

pub use client::{ClientConfig, HttpRoomsClient};
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;

use crate::models::{CreateQuestionRequest, Question, Room};

/// Remote operations against the rooms server
#[async_trait]
pub trait RoomsApi: Send + Sync {
    /// Fetch every room
    async fn list_rooms(&self) -> ApiResult<Vec<Room>>;

    /// Fetch the questions of a room, newest first
    async fn list_questions(&self, room_id: &str) -> ApiResult<Vec<Question>>;

    /// Create a question in a room, returning the server-confirmed record
    async fn create_question(
        &self,
        room_id: &str,
        request: &CreateQuestionRequest,
    ) -> ApiResult<Question>;
}
