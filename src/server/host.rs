//! Server host holding the assembled application state
//!
//! The host owns everything a request needs (catalog services, identity
//! service, configuration) and knows which descriptors make up the API.
//! Binaries and tests build one from a config and a pair of stores, then
//! turn it into a router.

use std::sync::Arc;

use super::builder::ServerBuilder;
use crate::auth::{
    AuthDescriptor, AuthService, AuthState, PasswordService, TokenIssuer,
};
use crate::config::AppConfig;
use crate::core::error::{ApiResult, ConfigError};
use crate::core::{DataService, FieldVisibility, RelationService, UserStore};
use crate::entities::address::AddressDescriptor;
use crate::entities::cinema::CinemaDescriptor;
use crate::entities::movie::MovieDescriptor;
use crate::entities::session::SessionDescriptor;
use crate::entities::{Address, CatalogState, Cinema, Movie, Session};

pub struct ServerHost {
    pub config: Arc<AppConfig>,
    pub catalog: CatalogState,
    pub auth: AuthState,
}

impl ServerHost {
    /// Assemble the host from a validated config and its stores
    pub fn new<B>(
        config: AppConfig,
        catalog: Arc<B>,
        users: Arc<dyn UserStore>,
    ) -> Result<Self, ConfigError>
    where
        B: DataService<Address>
            + DataService<Cinema>
            + DataService<Movie>
            + DataService<Session>
            + RelationService
            + 'static,
    {
        let tokens = TokenIssuer::new(config.signing_key()?, config.auth.token_lifetime_days);
        let passwords = PasswordService::new(config.auth.password.clone());
        let service = AuthService::new(users, passwords, tokens, config.auth.lockout());

        let catalog = CatalogState::from_backend(
            catalog,
            FieldVisibility::new(&config.serialization.keep_relations),
            config.pagination.items_per_page,
        );

        Ok(Self {
            config: Arc::new(config),
            catalog,
            auth: AuthState {
                service: Arc::new(service),
            },
        })
    }

    /// Create the roles every user may be given
    pub async fn seed(&self) -> ApiResult<()> {
        self.auth.service.seed_roles().await
    }

    /// A builder with every catalog and identity descriptor registered
    pub fn builder(&self) -> ServerBuilder {
        ServerBuilder::new()
            .register(AddressDescriptor::new(self.catalog.clone()))
            .register(CinemaDescriptor::new(self.catalog.clone()))
            .register(MovieDescriptor::new(self.catalog.clone()))
            .register(SessionDescriptor::new(self.catalog.clone()))
            .register(AuthDescriptor::new(self.auth.clone()))
    }
}
