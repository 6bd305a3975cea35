//! Repositories over the in-memory database: three read-only asset
//! registries, the favourite store and the user lookup.
//!
//! Registry batch gets silently omit missing ids and never fail on a partial
//! miss; duplicate input ids yield duplicate output entries. Output order
//! follows input order.

use std::sync::Arc;

use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Audience, Chart, Favourite, Insight, User};
use crate::pagination::{max_page, Pagination};

use super::Database;

/// Read-only lookup store for charts.
#[derive(Clone)]
pub struct ChartRegistry {
    db: Arc<Database>,
}

impl ChartRegistry {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Batch lookup; one entry per id found.
    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Chart>, AppError> {
        let charts = self.db.charts.read().await;
        Ok(ids.iter().filter_map(|id| charts.get(id).cloned()).collect())
    }

    /// Single lookup, used by the asset type resolver.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Chart>, AppError> {
        Ok(self.db.charts.read().await.get(&id).cloned())
    }
}

/// Read-only lookup store for insights.
#[derive(Clone)]
pub struct InsightRegistry {
    db: Arc<Database>,
}

impl InsightRegistry {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Insight>, AppError> {
        let insights = self.db.insights.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| insights.get(id).cloned())
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Insight>, AppError> {
        Ok(self.db.insights.read().await.get(&id).cloned())
    }
}

/// Read-only lookup store for audience segments.
#[derive(Clone)]
pub struct AudienceRegistry {
    db: Arc<Database>,
}

impl AudienceRegistry {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Audience>, AppError> {
        let audiences = self.db.audiences.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| audiences.get(id).cloned())
            .collect())
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Audience>, AppError> {
        Ok(self.db.audiences.read().await.get(&id).cloned())
    }
}

/// Keyed storage of favourite records with per-user paginated listing.
#[derive(Clone)]
pub struct FavouriteRepository {
    db: Arc<Database>,
}

impl FavouriteRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// One page of a user's favourites in deterministic order, plus the
    /// pagination metadata computed from the full filtered count.
    ///
    /// The underlying map is unordered, so the page is sorted by favourite id
    /// before slicing; a `Uuid`'s byte order matches its canonical string
    /// order, which keeps paging stable across calls. An offset past the end
    /// yields an empty page, not an error.
    pub async fn get_by_user_paginated(
        &self,
        user_id: Uuid,
        page_size: usize,
        page_number: usize,
    ) -> Result<(Vec<Favourite>, Pagination), AppError> {
        let favourites = self.db.favourites.read().await;

        let mut matching: Vec<Favourite> = favourites
            .values()
            .filter(|favourite| favourite.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by_key(|favourite| favourite.id);

        let total = matching.len();
        let offset = page_size.saturating_mul(page_number);

        let items: Vec<Favourite> = matching.into_iter().skip(offset).take(page_size).collect();

        let pagination = Pagination {
            page: page_number,
            page_size,
            max_page: max_page(total, page_size),
        };

        Ok((items, pagination))
    }

    /// Get a favourite by id.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Favourite>, AppError> {
        Ok(self.db.favourites.read().await.get(&id).cloned())
    }

    /// Upsert a favourite by its caller-supplied id.
    pub async fn create(&self, favourite: Favourite) -> Result<Favourite, AppError> {
        self.db
            .favourites
            .write()
            .await
            .insert(favourite.id, favourite.clone());
        Ok(favourite)
    }

    /// Full overwrite by id.
    pub async fn update(&self, favourite: Favourite) -> Result<Favourite, AppError> {
        self.db
            .favourites
            .write()
            .await
            .insert(favourite.id, favourite.clone());
        Ok(favourite)
    }

    /// Delete a favourite; deleting an unknown id is an error.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.db.favourites.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::FavouriteNotFound),
        }
    }
}

/// Lookup of registered users, keyed by email at the login boundary.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.db.users.read().await;
        Ok(users.values().find(|user| user.email == email).cloned())
    }
}
