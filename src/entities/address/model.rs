//! Address entity model

use serde::{Deserialize, Serialize};

use crate::core::Entity;

/// A street address that may host one cinema
///
/// The owning cinema is reachable through the cinema's `addressId`; it is
/// never serialized from this side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    pub street: String,
    pub number: String,
}

impl Entity for Address {
    type Key = i64;

    fn resource_name() -> &'static str {
        "address"
    }

    fn key(&self) -> i64 {
        self.id
    }
}
