//! Core data types for the Q&A rooms client
//!
//! This module defines the records exchanged with the rooms API:
//! - `Room`: A room snapshot as listed by the server
//! - `Question`: A question asked in a room, optionally answered
//! - `CreateQuestionRequest`: Body of a question submission

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A room snapshot
///
/// Rooms are created and destroyed by the server; the client only reads them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Opaque server identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of questions asked in this room
    pub questions_count: u64,
    /// When the room was created
    pub created_at: DateTime<Utc>,
}

/// A question asked in a room
///
/// The room is not stored on the record: questions are always held under a
/// per-room cache key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Client-generated for speculative entries, server-generated otherwise
    pub id: String,
    /// The question text
    pub question: String,
    /// Answer text, absent until answered
    #[serde(default)]
    pub answer: Option<String>,
    /// When the question was created
    pub created_at: DateTime<Utc>,
}

impl Question {
    /// Create a speculative question with a fresh local identifier
    pub fn speculative(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            question: text.into(),
            answer: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the question has been answered
    pub fn is_answered(&self) -> bool {
        self.answer.is_some()
    }
}

/// Body of `POST /rooms/{roomId}/questions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateQuestionRequest {
    pub question: String,
}

impl CreateQuestionRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }
}

/// Server-confirmed question returned by a submission
pub type CreateQuestionResponse = Question;
