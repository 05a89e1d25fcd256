//! Remote Data Cache
//!
//! In-memory store of server-derived data, addressed by a composite
//! [`QueryKey`] of resource kind and room identifier.
//!
//! # Contract
//!
//! - `get(key)`: current value, or `None` if no entry exists
//! - `set(key, value)`: unconditional replace
//! - `update(key, updater)`: read-modify-write; the updater sees the current
//!   value (or `None`) and returning `None` removes the entry
//!
//! Every operation is synchronous and local. None of them trigger requests.
//!
//! ```text
//! ["get-questions", "r1"] → [q3, q2, q1]   (newest first)
//! ["get-questions", "r2"] → [q7]
//! ["get-rooms"]           → [r1, r2]
//! ```

mod key;
mod store;

pub use key::{QueryKey, QueryKind};
pub use store::{CacheEntry, QueryCache};
