//! Room List View
//!
//! Turns a room list snapshot into navigable entries and plain text.
//! Presentation only: no fetching, no mutation.

use chrono::{DateTime, Utc};

use crate::client::QueryState;
use crate::format::{Locale, RelativeTimeFormatter};
use crate::models::{Question, Room};

/// Fixed strings of the room list, per locale
#[derive(Debug, Clone, Copy)]
pub struct Labels {
    pub title: &'static str,
    pub description: &'static str,
    pub loading: &'static str,
    pub enter: &'static str,
    pub questions: &'static str,
    pub unanswered: &'static str,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::PtBr => Self {
                title: "Salas Recentes",
                description: "Acesso rápido às salas criadas recentemente",
                loading: "Carregando salas...",
                enter: "Entrar",
                questions: "perguntas",
                unanswered: "Aguardando resposta",
            },
            Locale::En => Self {
                title: "Recent Rooms",
                description: "Quick access to recently created rooms",
                loading: "Loading rooms...",
                enter: "Enter",
                questions: "questions",
                unanswered: "Awaiting answer",
            },
        }
    }
}

/// One navigable room entry
#[derive(Debug, Clone, PartialEq)]
pub struct RoomListItem {
    pub id: String,
    pub name: String,
    /// Route of the room page: `/room/{id}`
    pub href: String,
    /// e.g. "3 perguntas"
    pub questions_badge: String,
    /// e.g. "há 2 horas"
    pub created_badge: String,
}

/// Renders rooms with a shared formatter
pub struct RoomListView<'a> {
    formatter: &'a RelativeTimeFormatter,
    labels: Labels,
}

impl<'a> RoomListView<'a> {
    pub fn new(formatter: &'a RelativeTimeFormatter) -> Self {
        Self {
            formatter,
            labels: Labels::for_locale(formatter.locale()),
        }
    }

    /// Build list entries relative to `now`
    pub fn items_at(&self, rooms: &[Room], now: DateTime<Utc>) -> Vec<RoomListItem> {
        rooms
            .iter()
            .map(|room| RoomListItem {
                id: room.id.clone(),
                name: room.name.clone(),
                href: format!("/room/{}", room.id),
                questions_badge: format!("{} {}", room.questions_count, self.labels.questions),
                created_badge: self.formatter.relative_to(room.created_at, now),
            })
            .collect()
    }

    pub fn items(&self, rooms: &[Room]) -> Vec<RoomListItem> {
        self.items_at(rooms, Utc::now())
    }

    /// Render a room list snapshot as text
    pub fn render_at(&self, state: &QueryState<Vec<Room>>, now: DateTime<Utc>) -> String {
        let mut out = format!("{}\n{}\n", self.labels.title, self.labels.description);

        if state.is_loading {
            out.push_str(self.labels.loading);
            out.push('\n');
        }

        if let Some(rooms) = &state.data {
            for item in self.items_at(rooms, now) {
                out.push_str(&format!(
                    "\n  {}  [{}] [{}]\n  {} → {}\n",
                    item.name, item.questions_badge, item.created_badge, self.labels.enter, item.href
                ));
            }
        }

        out
    }

    pub fn render(&self, state: &QueryState<Vec<Room>>) -> String {
        self.render_at(state, Utc::now())
    }

    /// Render a room's questions as text, newest first
    pub fn render_questions_at(&self, questions: &[Question], now: DateTime<Utc>) -> String {
        let mut out = String::new();
        for question in questions {
            out.push_str(&format!(
                "- {} ({})\n  {}\n",
                question.question,
                self.formatter.relative_to(question.created_at, now),
                question.answer.as_deref().unwrap_or(self.labels.unanswered)
            ));
        }
        out
    }
}
