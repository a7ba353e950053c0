//! Movie request bodies

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::model::Movie;
use crate::core::validation::validators::validate_not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieDto {
    #[validate(
        required(message = "Title is required"),
        custom(function = "validate_not_blank", message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Genre is required"),
        custom(function = "validate_not_blank", message = "Genre is required"),
        length(max = 20, message = "Genre cannot be longer than 20 characters")
    )]
    pub genre: Option<String>,

    #[validate(
        required(message = "Duration is required"),
        range(min = 1, max = 500, message = "Duration must be between 1 and 500 minutes")
    )]
    pub duration: Option<i32>,
}

impl CreateMovieDto {
    /// Build an unsaved movie; the store assigns the id
    pub fn into_movie(self) -> Movie {
        Movie {
            id: 0,
            title: self.title.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            duration: self.duration.unwrap_or_default(),
            sessions: None,
        }
    }
}

/// Full replacement body, also the document JSON Patches are applied to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieDto {
    #[validate(
        required(message = "Title is required"),
        custom(function = "validate_not_blank", message = "Title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "Genre is required"),
        custom(function = "validate_not_blank", message = "Genre is required"),
        length(max = 20, message = "Genre cannot be longer than 20 characters")
    )]
    pub genre: Option<String>,

    #[validate(
        required(message = "Duration is required"),
        range(min = 1, max = 500, message = "Duration must be between 1 and 500 minutes")
    )]
    pub duration: Option<i32>,
}

impl UpdateMovieDto {
    pub fn apply(self, movie: &mut Movie) {
        if let Some(title) = self.title {
            movie.title = title;
        }
        if let Some(genre) = self.genre {
            movie.genre = genre;
        }
        if let Some(duration) = self.duration {
            movie.duration = duration;
        }
    }
}

impl From<&Movie> for UpdateMovieDto {
    fn from(movie: &Movie) -> Self {
        Self {
            title: Some(movie.title.clone()),
            genre: Some(movie.genre.clone()),
            duration: Some(movie.duration),
        }
    }
}
