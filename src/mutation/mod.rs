//! Optimistic Mutations
//!
//! Cache-consistent remote writes. A mutation runs in three phases:
//!
//! 1. **Prepare**: stage a speculative record in the cache and capture a
//!    [`RestoreToken`] holding the pre-mutation snapshot
//! 2. **Send**: perform exactly one request against the server of record
//! 3. **Reconcile**: on success swap the speculative record for the confirmed
//!    one; on failure restore the snapshot from the token
//!
//! ## Data Flow
//!
//! ```text
//! submit("New?")
//!     ↓
//! cache[r1] = [speculative, q1]        ← visible immediately
//!     ↓
//! POST /rooms/r1/questions
//!     ↓                    ↓
//! ok: [confirmed, q1]      err: [q1]   (or absent, if it was absent)
//! ```

mod create_question;

pub use create_question::{CreateQuestion, RestoreToken};

use crate::api::ApiError;
use thiserror::Error;

/// Errors returned to the caller of a mutation
#[derive(Error, Debug)]
pub enum MutationError {
    /// Input rejected before any cache write or request
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request failed; the cache has been rolled back
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for mutations
pub type MutationResult<T> = Result<T, MutationError>;
