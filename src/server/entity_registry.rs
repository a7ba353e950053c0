//! Entity registry collecting the route descriptors of every handler group

use axum::Router;
use std::collections::BTreeMap;

/// Describes how to build the routes of one handler group
///
/// Each catalog entity (address, cinema, movie, session) and the identity
/// endpoints implement this trait; nothing is discovered implicitly.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name, also its route segment (e.g. "movie")
    fn entity_type(&self) -> &str;

    /// Build the routes for this group, with state already applied
    fn build_routes(&self) -> Router;
}

/// Registry for every handler group of the application
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a later one with the same type replaces it
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        if self.descriptors.insert(entity_type.clone(), descriptor).is_some() {
            tracing::warn!(entity_type = %entity_type, "entity descriptor replaced");
        }
    }

    /// Merge the routes of every registered descriptor
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types, in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
