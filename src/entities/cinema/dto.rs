//! Cinema request bodies

use serde::Deserialize;
use validator::Validate;

use super::model::Cinema;
use crate::core::validation::validators::validate_not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCinemaDto {
    #[validate(
        required(message = "Name is required"),
        custom(function = "validate_not_blank", message = "Name is required"),
        length(max = 50, message = "Name cannot be longer than 50 characters")
    )]
    pub name: Option<String>,

    #[validate(required(message = "AddressId is required"))]
    pub address_id: Option<i64>,
}

impl CreateCinemaDto {
    pub fn into_cinema(self) -> Cinema {
        Cinema {
            id: 0,
            name: self.name.unwrap_or_default(),
            address_id: self.address_id.unwrap_or_default(),
            address: None,
            sessions: None,
        }
    }
}

/// Rename a cinema and optionally move it to another address
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCinemaDto {
    #[validate(
        required(message = "Name is required"),
        custom(function = "validate_not_blank", message = "Name is required"),
        length(max = 50, message = "Name cannot be longer than 50 characters")
    )]
    pub name: Option<String>,

    pub address_id: Option<i64>,
}

impl UpdateCinemaDto {
    pub fn apply(self, cinema: &mut Cinema) {
        if let Some(name) = self.name {
            cinema.name = name;
        }
        if let Some(address_id) = self.address_id {
            cinema.address_id = address_id;
        }
    }
}
