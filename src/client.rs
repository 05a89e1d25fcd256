//! Query Client
//!
//! Fetch-and-cache reads over [`RoomsApi`] plus the entry point for
//! optimistic question submission. Reads expose a [`QueryState`] snapshot
//! (`data` + `is_loading`) for presentation code.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::api::{ApiResult, RoomsApi};
use crate::cache::{QueryCache, QueryKey};
use crate::models::{Question, Room};
use crate::mutation::{CreateQuestion, MutationResult};

/// Snapshot of a cached query
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    /// Last fetched value, if any
    pub data: Option<T>,
    /// Whether a fetch for this key is in flight
    pub is_loading: bool,
}

/// Shared client state: API handle, caches and in-flight fetches
pub struct RoomsClient {
    api: Arc<dyn RoomsApi>,
    rooms: Arc<QueryCache<Vec<Room>>>,
    questions: Arc<QueryCache<Vec<Question>>>,
    in_flight: Mutex<HashMap<QueryKey, usize>>,
}

/// Marks a key as loading for as long as it lives
///
/// Overlapping fetches of one key are counted; the key stops loading when
/// the last guard drops.
struct InFlight<'a> {
    counts: &'a Mutex<HashMap<QueryKey, usize>>,
    key: QueryKey,
}

impl<'a> InFlight<'a> {
    fn start(counts: &'a Mutex<HashMap<QueryKey, usize>>, key: QueryKey) -> Self {
        *counts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_insert(0) += 1;
        Self { counts, key }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut counts = self.counts.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = counts.get_mut(&self.key) {
            *count -= 1;
            if *count == 0 {
                counts.remove(&self.key);
            }
        }
    }
}

impl RoomsClient {
    /// Create a client with empty caches
    pub fn new(api: Arc<dyn RoomsApi>) -> Self {
        Self {
            api,
            rooms: Arc::new(QueryCache::new()),
            questions: Arc::new(QueryCache::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The per-room question cache
    pub fn questions_cache(&self) -> &Arc<QueryCache<Vec<Question>>> {
        &self.questions
    }

    /// The room list cache
    pub fn rooms_cache(&self) -> &Arc<QueryCache<Vec<Room>>> {
        &self.rooms
    }

    fn is_loading(&self, key: &QueryKey) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    // ============================================
    // Rooms
    // ============================================

    /// Current room list snapshot
    pub fn rooms_state(&self) -> QueryState<Vec<Room>> {
        let key = QueryKey::rooms();
        QueryState {
            data: self.rooms.get(&key),
            is_loading: self.is_loading(&key),
        }
    }

    /// Fetch the room list from the server and cache it
    pub async fn fetch_rooms(&self) -> ApiResult<Vec<Room>> {
        let key = QueryKey::rooms();
        let _loading = InFlight::start(&self.in_flight, key.clone());

        let rooms = self.api.list_rooms().await?;
        tracing::debug!(count = rooms.len(), "Fetched rooms");
        self.rooms.set(&key, rooms.clone());
        Ok(rooms)
    }

    /// Cached room list, fetching it on first use
    pub async fn rooms(&self) -> ApiResult<Vec<Room>> {
        match self.rooms.get(&QueryKey::rooms()) {
            Some(rooms) => Ok(rooms),
            None => self.fetch_rooms().await,
        }
    }

    // ============================================
    // Questions
    // ============================================

    /// Current snapshot of a room's questions
    pub fn questions_state(&self, room_id: &str) -> QueryState<Vec<Question>> {
        let key = QueryKey::questions(room_id);
        QueryState {
            data: self.questions.get(&key),
            is_loading: self.is_loading(&key),
        }
    }

    /// Fetch a room's questions from the server and cache them
    pub async fn fetch_questions(&self, room_id: &str) -> ApiResult<Vec<Question>> {
        let key = QueryKey::questions(room_id);
        let _loading = InFlight::start(&self.in_flight, key.clone());

        let questions = self.api.list_questions(room_id).await?;
        tracing::debug!(room_id = %room_id, count = questions.len(), "Fetched questions");
        self.questions.set(&key, questions.clone());
        Ok(questions)
    }

    /// Cached questions of a room, fetching them on first use
    pub async fn questions(&self, room_id: &str) -> ApiResult<Vec<Question>> {
        match self.questions.get(&QueryKey::questions(room_id)) {
            Some(questions) => Ok(questions),
            None => self.fetch_questions(room_id).await,
        }
    }

    /// Question submission bound to `room_id`
    pub fn create_question(&self, room_id: impl Into<String>) -> CreateQuestion {
        CreateQuestion::new(Arc::clone(&self.api), Arc::clone(&self.questions), room_id)
    }

    /// Optimistically submit a question to a room
    pub async fn submit_question(&self, room_id: &str, text: &str) -> MutationResult<Question> {
        self.create_question(room_id).execute(text).await
    }
}
