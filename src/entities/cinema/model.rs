//! Cinema entity model

use serde::{Deserialize, Serialize};

use crate::core::Entity;
use crate::entities::{Address, Session};

/// A cinema located at exactly one address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cinema {
    pub id: i64,
    pub name: String,
    pub address_id: i64,

    #[serde(default)]
    pub address: Option<Address>,

    #[serde(default)]
    pub sessions: Option<Vec<Session>>,
}

impl Entity for Cinema {
    type Key = i64;

    fn resource_name() -> &'static str {
        "cinema"
    }

    fn key(&self) -> i64 {
        self.id
    }

    fn relations() -> &'static [&'static str] {
        &["address", "sessions"]
    }
}
