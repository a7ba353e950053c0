//! Session entity model
//!
//! A session links one movie to one cinema. It has no identity of its own:
//! the `(cinemaId, movieId)` pair is the key, so a movie is screened at most
//! once per cinema.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::Entity;
use crate::entities::{Cinema, Movie};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub movie_id: i64,
    pub cinema_id: i64,

    #[serde(default)]
    pub movie: Option<Box<Movie>>,

    #[serde(default)]
    pub cinema: Option<Box<Cinema>>,
}

impl Session {
    pub fn new(cinema_id: i64, movie_id: i64) -> Self {
        Self {
            movie_id,
            cinema_id,
            movie: None,
            cinema: None,
        }
    }
}

/// Composite key, ordered by cinema then movie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub cinema_id: i64,
    pub movie_id: i64,
}

impl SessionKey {
    pub fn new(cinema_id: i64, movie_id: i64) -> Self {
        Self {
            cinema_id,
            movie_id,
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.cinema_id, self.movie_id)
    }
}

impl Entity for Session {
    type Key = SessionKey;

    fn resource_name() -> &'static str {
        "session"
    }

    fn key(&self) -> SessionKey {
        SessionKey::new(self.cinema_id, self.movie_id)
    }

    fn relations() -> &'static [&'static str] {
        &["movie", "cinema"]
    }
}
