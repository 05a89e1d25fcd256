//! Optimistic question submission
//!
//! Inserts a speculative question at the head of the room's cached sequence
//! before the request is sent, then reconciles it against the server.

use std::sync::Arc;

use super::{MutationError, MutationResult};
use crate::api::RoomsApi;
use crate::cache::{QueryCache, QueryKey};
use crate::models::{CreateQuestionRequest, Question};

/// Snapshot captured by [`CreateQuestion::on_mutate`]
///
/// Reconciliation must use the token produced by the same submission's
/// preparation, never another's.
#[derive(Debug, Clone)]
pub struct RestoreToken {
    /// The placeholder inserted into the cache
    pub speculative: Question,
    /// The cached sequence before insertion; `None` if no entry existed
    pub previous: Option<Vec<Question>>,
}

/// Question submission bound to a single room
pub struct CreateQuestion {
    api: Arc<dyn RoomsApi>,
    cache: Arc<QueryCache<Vec<Question>>>,
    room_id: String,
    key: QueryKey,
}

impl CreateQuestion {
    pub fn new(
        api: Arc<dyn RoomsApi>,
        cache: Arc<QueryCache<Vec<Question>>>,
        room_id: impl Into<String>,
    ) -> Self {
        let room_id = room_id.into();
        let key = QueryKey::questions(room_id.as_str());
        Self {
            api,
            cache,
            room_id,
            key,
        }
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Submit a question
    ///
    /// Returns the server-confirmed question. On any request failure the
    /// cache is restored to its pre-submission state before the error is
    /// returned.
    pub async fn execute(&self, text: &str) -> MutationResult<Question> {
        self.validate(text)?;

        let token = self.on_mutate(text);
        let request = CreateQuestionRequest::new(text);

        match self.api.create_question(&self.room_id, &request).await {
            Ok(confirmed) => {
                self.on_success(&token, &confirmed);
                tracing::info!(
                    room_id = %self.room_id,
                    question_id = %confirmed.id,
                    "Question created"
                );
                Ok(confirmed)
            }
            Err(e) => {
                self.on_error(&token);
                tracing::warn!(
                    room_id = %self.room_id,
                    error = %e,
                    "Question submission failed, cache rolled back"
                );
                Err(MutationError::Api(e))
            }
        }
    }

    fn validate(&self, text: &str) -> MutationResult<()> {
        if self.room_id.is_empty() {
            return Err(MutationError::Validation(
                "room id must not be empty".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(MutationError::Validation(
                "question must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Stage a speculative question at the head of the room's sequence
    pub fn on_mutate(&self, text: &str) -> RestoreToken {
        let speculative = Question::speculative(text);
        let mut previous = None;

        self.cache.update(&self.key, |current| {
            let mut questions = current.clone().unwrap_or_default();
            questions.insert(0, speculative.clone());
            previous = current;
            Some(questions)
        });

        tracing::debug!(
            room_id = %self.room_id,
            speculative_id = %speculative.id,
            had_entry = previous.is_some(),
            "Staged speculative question"
        );

        RestoreToken {
            speculative,
            previous,
        }
    }

    /// Replace the placeholder with the confirmed record
    ///
    /// The placeholder is matched by its local id; the rest of the sequence
    /// keeps its order. If the placeholder is gone (the entry was refetched
    /// or cleared in the meantime) the cached value is left untouched.
    pub fn on_success(&self, token: &RestoreToken, confirmed: &Question) {
        self.cache.update(&self.key, |current| {
            current.map(|mut questions| {
                match questions
                    .iter()
                    .position(|q| q.id == token.speculative.id)
                {
                    Some(pos) => questions[pos] = confirmed.clone(),
                    None => tracing::debug!(
                        room_id = %self.room_id,
                        speculative_id = %token.speculative.id,
                        "Speculative question no longer cached"
                    ),
                }
                questions
            })
        });
    }

    /// Restore the snapshot captured before the speculative insert
    pub fn on_error(&self, token: &RestoreToken) {
        match &token.previous {
            Some(previous) => self.cache.set(&self.key, previous.clone()),
            None => {
                self.cache.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeApi;
    use chrono::{TimeZone, Utc};

    fn old_question() -> Question {
        Question {
            id: "q1".to_string(),
            question: "Old?".to_string(),
            answer: Some("A".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn setup(api: FakeApi) -> (Arc<FakeApi>, Arc<QueryCache<Vec<Question>>>) {
        (Arc::new(api), Arc::new(QueryCache::new()))
    }

    #[test]
    fn test_on_mutate_prepends() {
        let (api, cache) = setup(FakeApi::new());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);

        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");
        let token = mutation.on_mutate("New?");

        let cached = cache.get(&key).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0], token.speculative);
        assert_eq!(cached[0].question, "New?");
        assert!(cached[0].answer.is_none());
        assert_eq!(cached[1], old_question());
        assert_eq!(token.previous, Some(vec![old_question()]));
    }

    #[test]
    fn test_on_mutate_absent_entry() {
        let (api, cache) = setup(FakeApi::new());
        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r2");

        let token = mutation.on_mutate("First?");

        assert!(token.previous.is_none());
        assert_eq!(cache.get(&QueryKey::questions("r2")).unwrap().len(), 1);
    }

    #[test]
    fn test_speculative_ids_unique() {
        let (api, cache) = setup(FakeApi::new());
        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");

        let first = mutation.on_mutate("A?");
        let second = mutation.on_mutate("B?");

        assert_ne!(first.speculative.id, second.speculative.id);

        // Second preparation observes the first placeholder
        let cached = cache.get(&QueryKey::questions("r1")).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, second.speculative.id);
        assert_eq!(cached[1].id, first.speculative.id);
        assert_eq!(second.previous.unwrap()[0].id, first.speculative.id);
    }

    #[test]
    fn test_on_success_replaces_in_place() {
        let (api, cache) = setup(FakeApi::new());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);
        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");

        let first = mutation.on_mutate("A?");
        let _second = mutation.on_mutate("B?");

        let confirmed = Question {
            id: "server-1".to_string(),
            ..first.speculative.clone()
        };
        mutation.on_success(&first, &confirmed);

        let ids: Vec<String> = cache.get(&key).unwrap().into_iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[1], "server-1");
        assert_eq!(ids[2], "q1");
        assert!(!ids.contains(&first.speculative.id));
    }

    #[test]
    fn test_rollback_discards_sibling_placeholder() {
        let (api, cache) = setup(FakeApi::new());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);
        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");

        let first = mutation.on_mutate("A?");
        let second = mutation.on_mutate("B?");
        assert_eq!(cache.get(&key).unwrap().len(), 3);

        // The first token's snapshot predates the second placeholder
        mutation.on_error(&first);
        assert_eq!(cache.get(&key), Some(vec![old_question()]));

        let confirmed = Question {
            id: "server-2".to_string(),
            ..second.speculative.clone()
        };
        mutation.on_success(&second, &confirmed);
        assert_eq!(cache.get(&key), Some(vec![old_question()]));
    }

    #[test]
    fn test_on_success_after_clear_keeps_absent() {
        let (api, cache) = setup(FakeApi::new());
        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");

        let token = mutation.on_mutate("A?");
        cache.clear();

        let confirmed = Question {
            id: "server-1".to_string(),
            ..token.speculative.clone()
        };
        mutation.on_success(&token, &confirmed);

        assert!(cache.get(&QueryKey::questions("r1")).is_none());
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot() {
        let (api, cache) = setup(FakeApi::new().failing());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "r1");
        let result = mutation.execute("New?").await;

        assert!(matches!(result, Err(MutationError::Api(_))));
        assert_eq!(cache.get(&key), Some(vec![old_question()]));
        assert_eq!(api.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_restores_absence() {
        let (api, cache) = setup(FakeApi::new().failing());
        let key = QueryKey::questions("r2");

        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r2");
        assert!(mutation.execute("First?").await.is_err());

        assert!(!cache.contains(&key));
        assert!(cache.get(&key).is_none());
    }

    #[tokio::test]
    async fn test_failure_restores_empty_sequence() {
        let (api, cache) = setup(FakeApi::new().failing());
        let key = QueryKey::questions("r3");
        cache.set(&key, Vec::new());

        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r3");
        assert!(mutation.execute("First?").await.is_err());

        assert_eq!(cache.get(&key), Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_success_confirms_question() {
        let (api, cache) = setup(FakeApi::new());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);

        let mutation = CreateQuestion::new(api, Arc::clone(&cache), "r1");
        let confirmed = mutation.execute("New?").await.unwrap();

        let cached = cache.get(&key).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0], confirmed);
        assert!(cached[0].id.starts_with("server-"));
        assert_eq!(cached[1], old_question());
    }

    #[tokio::test]
    async fn test_speculative_visible_before_response() {
        let (api, cache) = setup(FakeApi::new().gated().failing());
        let key = QueryKey::questions("r1");
        cache.set(&key, vec![old_question()]);

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "r1");
        let handle = tokio::spawn(async move { mutation.execute("New?").await });

        api.wait_for_request().await;
        let cached = cache.get(&key).unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].question, "New?");
        assert!(cached[0].answer.is_none());
        assert_ne!(cached[0].id, "q1");

        api.release();
        assert!(handle.await.unwrap().is_err());
        assert_eq!(cache.get(&key), Some(vec![old_question()]));
    }

    #[tokio::test]
    async fn test_other_rooms_untouched() {
        let (api, cache) = setup(FakeApi::new().failing());
        let other = QueryKey::questions("b");
        cache.set(&other, vec![old_question()]);

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "a");
        let token = mutation.on_mutate("A?");
        assert_eq!(cache.get(&other), Some(vec![old_question()]));

        mutation.on_error(&token);
        assert_eq!(cache.get(&other), Some(vec![old_question()]));

        let _ = mutation.execute("A?").await;
        assert_eq!(cache.get(&other), Some(vec![old_question()]));
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let (api, cache) = setup(FakeApi::new());

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "r1");
        let result = mutation.execute("   ").await;
        assert!(matches!(result, Err(MutationError::Validation(_))));

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "");
        let result = mutation.execute("Why?").await;
        assert!(matches!(result, Err(MutationError::Validation(_))));

        assert!(cache.is_empty());
        assert_eq!(api.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_room_id_submitted() {
        let (api, cache) = setup(FakeApi::new());

        let mutation = CreateQuestion::new(api.clone(), Arc::clone(&cache), "   ");
        let confirmed = mutation.execute("Why?").await.unwrap();

        assert_eq!(api.create_calls(), 1);
        assert_eq!(cache.get(&QueryKey::questions("   ")), Some(vec![confirmed]));
    }
}
