//! In-memory `RoomsApi` for unit tests

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::Notify;

use crate::api::{ApiError, ApiResult, RoomsApi};
use crate::models::{CreateQuestionRequest, Question, Room};

#[derive(Default)]
pub(crate) struct FakeApi {
    rooms: Mutex<Vec<Room>>,
    questions: Mutex<HashMap<String, Vec<Question>>>,
    fail: bool,
    gated: bool,
    create_calls: AtomicUsize,
    list_calls: AtomicUsize,
    entered: Notify,
    gate: Notify,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails with a 503
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    /// `create_question` blocks until [`FakeApi::release`]
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn with_rooms(self, rooms: Vec<Room>) -> Self {
        *self.rooms.lock().unwrap() = rooms;
        self
    }

    pub fn with_questions(self, room_id: &str, questions: Vec<Question>) -> Self {
        self.questions
            .lock()
            .unwrap()
            .insert(room_id.to_string(), questions);
        self
    }

    pub async fn wait_for_request(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: 503,
            message: "service unavailable".to_string(),
        }
    }
}

#[async_trait]
impl RoomsApi for FakeApi {
    async fn list_rooms(&self) -> ApiResult<Vec<Room>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self.rooms.lock().unwrap().clone())
    }

    async fn list_questions(&self, room_id: &str) -> ApiResult<Vec<Question>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Self::unavailable());
        }
        Ok(self
            .questions
            .lock()
            .unwrap()
            .get(room_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_question(
        &self,
        room_id: &str,
        request: &CreateQuestionRequest,
    ) -> ApiResult<Question> {
        let n = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.entered.notify_one();
        if self.gated {
            self.gate.notified().await;
        }
        if self.fail {
            return Err(Self::unavailable());
        }

        let question = Question {
            id: format!("server-{}", n),
            question: request.question.clone(),
            answer: None,
            created_at: Utc::now(),
        };
        self.questions
            .lock()
            .unwrap()
            .entry(room_id.to_string())
            .or_default()
            .insert(0, question.clone());
        Ok(question)
    }
}
