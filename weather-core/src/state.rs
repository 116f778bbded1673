//! Explicit state container for the card lifecycle.
//!
//! All three slots (cards, error, mood) live in one [`AppState`] that update
//! operations borrow mutably. Nothing here performs I/O.

use std::fmt;

use crate::{
    error::FetchFailed,
    model::{CardId, WeatherRecord},
};

/// Ordered cards, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardList {
    records: Vec<WeatherRecord>,
}

impl CardList {
    pub fn push(&mut self, record: WeatherRecord) {
        self.records.push(record);
    }

    /// Remove every record with `id`. Returns how many were removed; removing
    /// an absent id is a no-op.
    pub fn remove(&mut self, id: CardId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id() != id);
        before - self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn as_slice(&self) -> &[WeatherRecord] {
        &self.records
    }
}

/// Background styling hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mood(String);

impl Mood {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood("clear".to_string())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sequence number handed out when a fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Default)]
pub struct AppState {
    cards: CardList,
    error: Option<String>,
    mood: Mood,
    issued: u64,
    applied: Option<SearchTicket>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn mood(&self) -> &Mood {
        &self.mood
    }

    /// Start a fetch attempt.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.issued += 1;
        SearchTicket(self.issued)
    }

    /// Apply a finished fetch.
    ///
    /// A successful record is always appended. Error and mood only change when
    /// `ticket` is newer than every ticket applied so far, so a slow response
    /// cannot overwrite the outcome of a later search.
    pub fn complete(&mut self, ticket: SearchTicket, result: Result<WeatherRecord, FetchFailed>) {
        let is_latest = self.applied.is_none_or(|applied| ticket > applied);

        match result {
            Ok(record) => {
                if is_latest {
                    self.mood = Mood(record.mood());
                    self.error = None;
                }
                self.cards.push(record);
            }
            Err(err) => {
                if is_latest {
                    self.error = Some(err.to_string());
                }
            }
        }

        if is_latest {
            self.applied = Some(ticket);
        }
    }

    /// Remove all cards with `id`. Mood and error are left as they are.
    pub fn remove_card(&mut self, id: CardId) -> usize {
        self.cards.remove(id)
    }
}
