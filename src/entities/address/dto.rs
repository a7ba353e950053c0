//! Address request bodies

use serde::Deserialize;
use validator::Validate;

use super::model::Address;
use crate::core::validation::validators::validate_not_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressDto {
    #[validate(
        required(message = "Street is required"),
        custom(function = "validate_not_blank", message = "Street is required")
    )]
    pub street: Option<String>,

    #[validate(
        required(message = "Number is required"),
        custom(function = "validate_not_blank", message = "Number is required")
    )]
    pub number: Option<String>,
}

impl CreateAddressDto {
    /// Build an unsaved address; the store assigns the id
    pub fn into_address(self) -> Address {
        Address {
            id: 0,
            street: self.street.unwrap_or_default(),
            number: self.number.unwrap_or_default(),
        }
    }
}

/// Partial update: only the fields present in the body are overwritten
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressDto {
    #[validate(custom(function = "validate_not_blank", message = "Street cannot be empty"))]
    pub street: Option<String>,

    #[validate(custom(function = "validate_not_blank", message = "Number cannot be empty"))]
    pub number: Option<String>,
}

impl UpdateAddressDto {
    pub fn apply(self, address: &mut Address) {
        if let Some(street) = self.street {
            address.street = street;
        }
        if let Some(number) = self.number {
            address.number = number;
        }
    }
}
