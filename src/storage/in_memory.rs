//! In-memory storage for testing and development
//!
//! Catalog rows live in ordered maps behind one `RwLock`, so listings come
//! out in key order and relationship queries see a consistent snapshot.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::auth::model::User;
use crate::core::error::EntityError;
use crate::core::{DataService, Entity, Page, RelationService, UserStore};
use crate::entities::{Address, Cinema, Movie, Session, SessionKey};

#[derive(Debug, Default)]
struct Tables {
    addresses: BTreeMap<i64, Address>,
    cinemas: BTreeMap<i64, Cinema>,
    movies: BTreeMap<i64, Movie>,
    sessions: BTreeMap<SessionKey, Session>,
    last_address_id: i64,
    last_cinema_id: i64,
    last_movie_id: i64,
}

/// A catalog row type stored in [`Tables`]
trait Table: Entity {
    fn rows(tables: &Tables) -> &BTreeMap<Self::Key, Self>;
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<Self::Key, Self>;

    /// Give a new row its key; `None` keeps the key it came with
    fn next_key(tables: &mut Tables) -> Option<Self::Key>;
    fn set_key(&mut self, key: Self::Key);

    /// Drop loaded relationships so only scalar columns are stored
    fn detach(&mut self);
}

impl Table for Address {
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.addresses
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.addresses
    }
    fn next_key(tables: &mut Tables) -> Option<i64> {
        tables.last_address_id += 1;
        Some(tables.last_address_id)
    }
    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
    fn detach(&mut self) {}
}

impl Table for Cinema {
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.cinemas
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.cinemas
    }
    fn next_key(tables: &mut Tables) -> Option<i64> {
        tables.last_cinema_id += 1;
        Some(tables.last_cinema_id)
    }
    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
    fn detach(&mut self) {
        self.address = None;
        self.sessions = None;
    }
}

impl Table for Movie {
    fn rows(tables: &Tables) -> &BTreeMap<i64, Self> {
        &tables.movies
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<i64, Self> {
        &mut tables.movies
    }
    fn next_key(tables: &mut Tables) -> Option<i64> {
        tables.last_movie_id += 1;
        Some(tables.last_movie_id)
    }
    fn set_key(&mut self, key: i64) {
        self.id = key;
    }
    fn detach(&mut self) {
        self.sessions = None;
    }
}

impl Table for Session {
    fn rows(tables: &Tables) -> &BTreeMap<SessionKey, Self> {
        &tables.sessions
    }
    fn rows_mut(tables: &mut Tables) -> &mut BTreeMap<SessionKey, Self> {
        &mut tables.sessions
    }
    fn next_key(_tables: &mut Tables) -> Option<SessionKey> {
        None
    }
    fn set_key(&mut self, key: SessionKey) {
        self.cinema_id = key.cinema_id;
        self.movie_id = key.movie_id;
    }
    fn detach(&mut self) {
        self.movie = None;
        self.cinema = None;
    }
}

fn paged<'a, T: Clone + 'a>(rows: impl Iterator<Item = &'a T>, page: Page) -> Vec<T> {
    rows.skip(page.offset()).take(page.limit).cloned().collect()
}

/// In-memory catalog implementing every catalog service
///
/// Cloning is cheap and clones share the same tables.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl<T: Table> DataService<T> for InMemoryCatalog {
    async fn create(&self, mut entity: T) -> Result<T> {
        let mut tables = self.write()?;

        if let Some(key) = T::next_key(&mut tables) {
            entity.set_key(key);
        }
        entity.detach();

        let key = entity.key();
        let rows = T::rows_mut(&mut tables);
        if rows.contains_key(&key) {
            return Err(EntityError::already_exists(T::resource_name(), key).into());
        }
        rows.insert(key, entity.clone());

        Ok(entity)
    }

    async fn get(&self, key: &T::Key) -> Result<Option<T>> {
        let tables = self.read()?;
        Ok(T::rows(&tables).get(key).cloned())
    }

    async fn list(&self, page: Page) -> Result<Vec<T>> {
        let tables = self.read()?;
        Ok(paged(T::rows(&tables).values(), page))
    }

    async fn update(&self, key: &T::Key, mut entity: T) -> Result<Option<T>> {
        let mut tables = self.write()?;
        let rows = T::rows_mut(&mut tables);

        if !rows.contains_key(key) {
            return Ok(None);
        }
        entity.detach();

        // re-keying must not overwrite another row
        let new_key = entity.key();
        if new_key != *key && rows.contains_key(&new_key) {
            return Err(EntityError::already_exists(T::resource_name(), new_key).into());
        }
        rows.remove(key);
        rows.insert(new_key, entity.clone());

        Ok(Some(entity))
    }
}

#[async_trait]
impl RelationService for InMemoryCatalog {
    async fn cinema_at_address(&self, address_id: i64) -> Result<Option<Cinema>> {
        let tables = self.read()?;
        Ok(tables
            .cinemas
            .values()
            .find(|cinema| cinema.address_id == address_id)
            .cloned())
    }

    async fn sessions_for_movie(&self, movie_id: i64) -> Result<Vec<Session>> {
        let tables = self.read()?;
        Ok(tables
            .sessions
            .values()
            .filter(|session| session.movie_id == movie_id)
            .cloned()
            .collect())
    }

    async fn sessions_for_cinema(&self, cinema_id: i64) -> Result<Vec<Session>> {
        let tables = self.read()?;
        Ok(tables
            .sessions
            .values()
            .filter(|session| session.cinema_id == cinema_id)
            .cloned()
            .collect())
    }

    async fn movies_showing_at(&self, name: &str, page: Page) -> Result<Vec<Movie>> {
        let tables = self.read()?;
        let name = name.to_lowercase();

        let movie_ids: BTreeSet<i64> = tables
            .sessions
            .values()
            .filter(|session| {
                tables
                    .cinemas
                    .get(&session.cinema_id)
                    .is_some_and(|cinema| cinema.name.to_lowercase().contains(&name))
            })
            .map(|session| session.movie_id)
            .collect();

        Ok(paged(
            movie_ids.iter().filter_map(|id| tables.movies.get(id)),
            page,
        ))
    }

    async fn cinemas_at_address(&self, address_id: i64, page: Page) -> Result<Vec<Cinema>> {
        let tables = self.read()?;
        Ok(paged(
            tables
                .cinemas
                .values()
                .filter(|cinema| cinema.address_id == address_id),
            page,
        ))
    }
}

#[derive(Debug, Default)]
struct Identity {
    users: HashMap<Uuid, User>,
    roles: BTreeSet<String>,
}

/// In-memory user and role store
#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    identity: Arc<RwLock<Identity>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Identity>> {
        self.identity
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Identity>> {
        self.identity
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, user: User) -> Result<User> {
        let mut identity = self.write()?;

        if identity
            .users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(anyhow!("email '{}' is already taken", user.email));
        }
        identity.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>> {
        Ok(self.read()?.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn update(&self, user: &User) -> Result<()> {
        let mut identity = self.write()?;
        let stored = identity
            .users
            .get_mut(&user.id)
            .ok_or_else(|| anyhow!("User not found"))?;
        *stored = user.clone();
        Ok(())
    }

    async fn roles(&self) -> Result<Vec<String>> {
        Ok(self.read()?.roles.iter().cloned().collect())
    }

    async fn create_role(&self, name: &str) -> Result<()> {
        self.write()?.roles.insert(name.to_string());
        Ok(())
    }
}
