//! Cache keys

use std::fmt;

/// Kind of resource held under a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// The room list
    Rooms,
    /// Questions of a single room
    Questions,
}

impl QueryKind {
    /// Wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Rooms => "get-rooms",
            QueryKind::Questions => "get-questions",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite cache key: (resource kind, room identifier)
///
/// Keys that are not scoped to a room carry an empty room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    kind: QueryKind,
    room_id: String,
}

impl QueryKey {
    /// Key of the room list
    pub fn rooms() -> Self {
        Self {
            kind: QueryKind::Rooms,
            room_id: String::new(),
        }
    }

    /// Key of a room's question sequence: `["get-questions", roomId]`
    pub fn questions(room_id: impl Into<String>) -> Self {
        Self {
            kind: QueryKind::Questions,
            room_id: room_id.into(),
        }
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.room_id.is_empty() {
            write!(f, "[\"{}\"]", self.kind)
        } else {
            write!(f, "[\"{}\", \"{}\"]", self.kind, self.room_id)
        }
    }
}
