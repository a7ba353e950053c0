//! Movie entity model

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::entities::Session;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub genre: String,
    /// Running time in minutes
    pub duration: i32,

    /// Sessions screening this movie, loaded on request
    #[serde(default)]
    pub sessions: Option<Vec<Session>>,
}

impl Entity for Movie {
    type Key = i64;

    fn resource_name() -> &'static str {
        "movie"
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn relations() -> &'static [&'static str] {
        &["sessions"]
    }
}
