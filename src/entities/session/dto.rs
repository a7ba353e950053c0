//! Session request bodies

use serde::Deserialize;
use validator::Validate;

use super::model::{Session, SessionKey};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionDto {
    #[validate(required(message = "MovieId is required"))]
    pub movie_id: Option<i64>,

    #[validate(required(message = "CinemaId is required"))]
    pub cinema_id: Option<i64>,
}

impl CreateSessionDto {
    pub fn into_session(self) -> Session {
        Session::new(
            self.cinema_id.unwrap_or_default(),
            self.movie_id.unwrap_or_default(),
        )
    }
}

/// Move a session to another movie and/or cinema
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionDto {
    pub movie_id: Option<i64>,
    pub cinema_id: Option<i64>,
}

impl UpdateSessionDto {
    /// The key the session ends up under
    pub fn target(&self, current: SessionKey) -> SessionKey {
        SessionKey::new(
            self.cinema_id.unwrap_or(current.cinema_id),
            self.movie_id.unwrap_or(current.movie_id),
        )
    }
}
